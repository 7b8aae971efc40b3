pub mod blocked;
pub mod connections;
pub mod rules;
pub mod traffic;

use crossterm::event::{KeyCode, KeyEvent};
use kanal::Sender;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding},
};

use pangolin_api::types::HealthStatus;

use crate::app::AppResult;
use crate::client::Client;
use crate::config::Config;
use crate::event::Event;
use crate::section::{blocked::Blocked, connections::Connections, rules::Rules, traffic::Traffic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedSection {
    Rules,
    Traffic,
    Connections,
    BlockedIps,
}

#[derive(Debug)]
pub struct Section {
    focused_section: FocusedSection,
    pub rules: Rules,
    pub traffic: Traffic,
    pub connections: Connections,
    pub blocked: Blocked,
}

impl Section {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            focused_section: FocusedSection::Rules,
            rules: Rules::new(),
            traffic: Traffic::new(),
            connections: Connections::new(client.clone(), config),
            blocked: Blocked::new(client, config),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.rules.is_editing()
    }

    pub fn handle_keys(&mut self, key_event: KeyEvent, sender: Sender<Event>) -> AppResult<()> {
        // an open editor owns the keyboard, section switching waits
        if self.rules.is_editing() {
            return self.rules.handle_keys(key_event, sender);
        }

        match key_event.code {
            KeyCode::Tab => {
                self.focused_section = match self.focused_section {
                    FocusedSection::Rules => FocusedSection::Traffic,
                    FocusedSection::Traffic => FocusedSection::Connections,
                    FocusedSection::Connections => FocusedSection::BlockedIps,
                    FocusedSection::BlockedIps => FocusedSection::Rules,
                };
                Ok(())
            }
            KeyCode::BackTab => {
                self.focused_section = match self.focused_section {
                    FocusedSection::Rules => FocusedSection::BlockedIps,
                    FocusedSection::Traffic => FocusedSection::Rules,
                    FocusedSection::Connections => FocusedSection::Traffic,
                    FocusedSection::BlockedIps => FocusedSection::Connections,
                };
                Ok(())
            }
            _ => match self.focused_section {
                FocusedSection::Rules => self.rules.handle_keys(key_event, sender),
                FocusedSection::Traffic => Ok(()),
                FocusedSection::Connections => self.connections.handle_keys(key_event, sender),
                FocusedSection::BlockedIps => self.blocked.handle_keys(key_event, sender),
            },
        }
    }

    pub fn render(&mut self, frame: &mut Frame, block: Rect, health: Option<&HealthStatus>) {
        let title = Line::from(vec![
            Span::from(" "),
            self.tab_title(FocusedSection::Rules, " Rules "),
            Span::from(" "),
            self.tab_title(FocusedSection::Traffic, " Traffic "),
            Span::from(" "),
            self.tab_title(FocusedSection::Connections, " Connections "),
            Span::from(" "),
            self.tab_title(FocusedSection::BlockedIps, " Blocked IPs "),
        ]);

        let backend_line = match health {
            Some(health) => {
                let color = if health.status == "operational" {
                    Color::Green
                } else {
                    Color::Yellow
                };
                Line::from(format!(" backend: {} ", health.status)).fg(color)
            }
            None => Line::from(" backend: connecting ").fg(Color::DarkGray),
        }
        .right_aligned();

        frame.render_widget(
            Block::default()
                .title(title)
                .title_bottom(backend_line)
                .title_alignment(Alignment::Left)
                .padding(Padding::top(1))
                .borders(Borders::ALL)
                .border_type(BorderType::default())
                .border_style(Style::default().green()),
            block,
        );

        match self.focused_section {
            FocusedSection::Rules => self.rules.render(frame, block),
            FocusedSection::Traffic => self.traffic.render(frame, block),
            FocusedSection::Connections => self.connections.render(frame, block),
            FocusedSection::BlockedIps => self.blocked.render(frame, block),
        }
    }

    fn tab_title(&self, section: FocusedSection, label: &'static str) -> Span<'static> {
        if self.focused_section == section {
            Span::styled(
                label,
                Style::default().bg(Color::Green).fg(Color::White).bold(),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn section() -> Section {
        let config = Config::default();
        Section::new(Client::new(&config).unwrap(), &config)
    }

    #[test]
    fn tab_cycles_through_all_sections_and_wraps() {
        let (sender, _receiver) = kanal::unbounded();
        let mut section = section();

        assert_eq!(section.focused_section, FocusedSection::Rules);
        for expected in [
            FocusedSection::Traffic,
            FocusedSection::Connections,
            FocusedSection::BlockedIps,
            FocusedSection::Rules,
        ] {
            section.handle_keys(key(KeyCode::Tab), sender.clone()).unwrap();
            assert_eq!(section.focused_section, expected);
        }
    }

    #[test]
    fn back_tab_cycles_in_reverse() {
        let (sender, _receiver) = kanal::unbounded();
        let mut section = section();

        section
            .handle_keys(key(KeyCode::BackTab), sender.clone())
            .unwrap();
        assert_eq!(section.focused_section, FocusedSection::BlockedIps);
    }

    #[test]
    fn an_open_editor_keeps_the_keyboard() {
        let (sender, _receiver) = kanal::unbounded();
        let mut section = section();

        section
            .handle_keys(key(KeyCode::Char('n')), sender.clone())
            .unwrap();
        assert!(section.is_editing());

        // tab now moves the editor focus, not the section
        section.handle_keys(key(KeyCode::Tab), sender.clone()).unwrap();
        assert!(section.is_editing());
        assert_eq!(section.focused_section, FocusedSection::Rules);
    }
}
