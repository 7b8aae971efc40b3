use std::thread;

use crossterm::event::{KeyCode, KeyEvent};
use kanal::Sender;
use log::error;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Margin, Rect},
    style::{Color, Style, Stylize},
    widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

use pangolin_api::types::BlockedIp;

use crate::app::AppResult;
use crate::client::Client;
use crate::config::Config;
use crate::event::Event;
use crate::notification::{Notification, NotificationLevel};

#[derive(Debug)]
pub struct Blocked {
    ips: Vec<BlockedIp>,
    state: TableState,
    client: Client,
    max_rows: usize,
}

impl Blocked {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            ips: Vec::new(),
            state: TableState::default(),
            client,
            max_rows: config.display.max_rows,
        }
    }

    pub fn update(&mut self, ips: Vec<BlockedIp>) {
        self.ips = ips;
        self.ips.truncate(self.max_rows);
        if self
            .state
            .selected()
            .is_some_and(|index| index >= self.ips.len())
        {
            self.state.select(self.ips.len().checked_sub(1));
        }
    }

    pub fn handle_keys(&mut self, key_event: KeyEvent, sender: Sender<Event>) -> AppResult<()> {
        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let index = match self.state.selected() {
                    Some(index) => (index + 1).min(self.ips.len().saturating_sub(1)),
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
            KeyCode::Char('u') => {
                if let Some(entry) = self.state.selected().and_then(|index| self.ips.get(index)) {
                    unblock_in_background(self.client.clone(), entry.ip.clone(), sender);
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

        if self.ips.is_empty() {
            frame.render_widget(
                Paragraph::new("No blocked IPs")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }

        let widths = [Constraint::Max(40), Constraint::Fill(1)];

        let rows = self.ips.iter().map(|entry| {
            Row::new(vec![
                Cell::from(entry.ip.clone()),
                Cell::from(entry.reason.clone().unwrap_or_else(|| "-".to_string())),
            ])
        });

        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Address", "Reason"])
                    .style(Style::new().bold())
                    .bottom_margin(1),
            )
            .column_spacing(2)
            .highlight_spacing(HighlightSpacing::Always)
            .row_highlight_style(Style::new().bg(Color::DarkGray));

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

fn unblock_in_background(client: Client, ip: String, sender: Sender<Event>) {
    thread::spawn(move || match client.unblock_ip(&ip) {
        Ok(()) => {
            let _ = Notification::send(
                format!("Unblocked {ip}"),
                NotificationLevel::Info,
                sender,
            );
        }
        Err(e) => {
            error!("unblocking {ip} failed: {e:#}");
            let _ = Notification::send(
                format!("Failed to unblock {ip}"),
                NotificationLevel::Error,
                sender,
            );
        }
    });
}
