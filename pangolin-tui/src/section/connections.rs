use std::thread;

use crossterm::event::{KeyCode, KeyEvent};
use kanal::Sender;
use log::error;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

use pangolin_api::types::{ActiveConnections, NetworkNode, NetworkStats};

use crate::app::AppResult;
use crate::client::Client;
use crate::config::Config;
use crate::event::Event;
use crate::notification::{Notification, NotificationLevel};

#[derive(Debug)]
pub struct Connections {
    total: u64,
    nodes: Vec<NetworkNode>,
    stats: Option<NetworkStats>,
    state: TableState,
    client: Client,
    max_rows: usize,
    suspicious_color: Color,
    normal_color: Color,
}

impl Connections {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            total: 0,
            nodes: Vec::new(),
            stats: None,
            state: TableState::default(),
            client,
            max_rows: config.display.max_rows,
            suspicious_color: config.theme.suspicious_color(),
            normal_color: config.theme.normal_color(),
        }
    }

    pub fn update(&mut self, connections: ActiveConnections) {
        self.total = connections.total;
        self.nodes = connections.connections;
        self.nodes.truncate(self.max_rows);
        if self
            .state
            .selected()
            .is_some_and(|index| index >= self.nodes.len())
        {
            self.state.select(self.nodes.len().checked_sub(1));
        }
    }

    pub fn set_stats(&mut self, stats: NetworkStats) {
        self.stats = Some(stats);
    }

    pub fn handle_keys(&mut self, key_event: KeyEvent, sender: Sender<Event>) -> AppResult<()> {
        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let index = match self.state.selected() {
                    Some(index) => (index + 1).min(self.nodes.len().saturating_sub(1)),
                    None => 0,
                };
                self.state.select(Some(index));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let index = self
                    .state
                    .selected()
                    .map_or(0, |index| index.saturating_sub(1));
                self.state.select(Some(index));
            }
            KeyCode::Char('b') => {
                if let Some(node) = self.state.selected().and_then(|index| self.nodes.get(index)) {
                    match &node.ip {
                        Some(ip) => block_in_background(self.client.clone(), ip.clone(), sender),
                        None => Notification::send(
                            format!("{} exposes no address to block", node.name),
                            NotificationLevel::Warning,
                            sender,
                        )?,
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, block: Rect) {
        let area = block.inner(Margin {
            horizontal: 2,
            vertical: 2,
        });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Fill(1)])
            .split(area);

        self.render_overview(frame, chunks[0]);

        if self.nodes.is_empty() {
            frame.render_widget(
                Paragraph::new("No active connections")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
            return;
        }

        let widths = [
            Constraint::Max(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Fill(1),
        ];

        let rows = self.nodes.iter().map(|node| {
            let style = if node.status.is_suspicious() {
                Style::default().fg(self.suspicious_color)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(node.name.clone()),
                Cell::from(node.kind.to_string()),
                Cell::from(node.status.to_string()),
                Cell::from(node.connections.to_string()),
                Cell::from(node.ip.clone().unwrap_or_else(|| "-".to_string())),
            ])
            .style(style)
        });

        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Name", "Type", "Status", "Connections", "Address"])
                    .style(Style::new().bold())
                    .bottom_margin(1),
            )
            .column_spacing(2)
            .highlight_spacing(HighlightSpacing::Always)
            .row_highlight_style(Style::new().bg(Color::DarkGray));

        frame.render_stateful_widget(table, chunks[1], &mut self.state);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.stats {
            Some(stats) => {
                let status_color = if stats.overview.status == "healthy" {
                    self.normal_color
                } else {
                    self.suspicious_color
                };
                Line::from(vec![
                    Span::from(format!("{} devices", stats.overview.total_devices)),
                    Span::from("   "),
                    Span::from(format!("{} active", self.total)),
                    Span::from("   "),
                    Span::from(format!("load {}", stats.overview.network_load)),
                    Span::from("   "),
                    Span::styled(
                        stats.overview.status.clone(),
                        Style::default().fg(status_color),
                    ),
                    Span::from("   "),
                    Span::from(format!(
                        "{} threats blocked",
                        stats.security.threats_blocked
                    )),
                ])
            }
            None => Line::from(Span::styled(
                "Waiting for network stats",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn block_in_background(client: Client, ip: String, sender: Sender<Event>) {
    thread::spawn(move || match client.block_ip(&ip) {
        Ok(()) => {
            let _ = Notification::send(
                format!("Blocked {ip}"),
                NotificationLevel::Info,
                sender,
            );
        }
        Err(e) => {
            error!("blocking {ip} failed: {e:#}");
            let _ = Notification::send(
                format!("Failed to block {ip}"),
                NotificationLevel::Error,
                sender,
            );
        }
    });
}
