use kanal::Sender;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{app::AppResult, event::Event};

/// Ticks a notification stays on screen.
const TTL: u16 = 12;

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: u16,
}

#[derive(Debug, Clone)]
pub enum NotificationLevel {
    Error,
    Warning,
    Info,
}

impl Notification {
    pub fn send(
        message: String,
        level: NotificationLevel,
        sender: Sender<Event>,
    ) -> AppResult<()> {
        let notification = Notification {
            message,
            level,
            ttl: TTL,
        };
        sender.send(Event::Notification(notification))?;
        Ok(())
    }

    pub fn render(&self, index: usize, frame: &mut Frame) {
        let (color, title) = match self.level {
            NotificationLevel::Info => (Color::Green, "Info"),
            NotificationLevel::Warning => (Color::Yellow, "Warning"),
            NotificationLevel::Error => (Color::Red, "Error"),
        };

        let text = Text::styled(self.message.as_str(), Style::default().fg(color));
        let height = text.height() as u16 + 2;

        let block = notification_rect(index as u16, height, frame.area());

        let notification = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(color)),
            );

        frame.render_widget(Clear, block);
        frame.render_widget(notification, block);
    }
}

fn notification_rect(offset: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(height * offset),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .split(popup_layout[1])[1]
}
