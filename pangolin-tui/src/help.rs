use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Row, Table},
};

#[derive(Debug, Clone)]
pub struct Help {
    visible_rows: usize,
    scroll: usize,
    keys: Vec<(Cell<'static>, &'static str)>,
}

impl Default for Help {
    fn default() -> Self {
        Self::new()
    }
}

impl Help {
    pub fn new() -> Self {
        Self {
            visible_rows: 0,
            scroll: 0,
            keys: vec![
                (Cell::from("Esc").bold(), "Dismiss the help or the rule editor"),
                (Cell::from("Tab / Shift+Tab").bold(), "Switch between sections"),
                (Cell::from("j / k").bold(), "Scroll through tables"),
                (Cell::from("?").bold(), "Show this help"),
                (Cell::from("ctrl + r").bold(), "Reset the application"),
                (Cell::from("q / ctrl + c").bold(), "Quit"),
                (Cell::from(""), ""),
                (Cell::from("# Rules").fg(Color::Yellow), ""),
                (Cell::from("n").bold(), "Open the new rule editor"),
                (Cell::from("Space").bold(), "Enable or disable the selected rule"),
                (Cell::from("s").bold(), "Save the rules under ~/pangolin"),
                (Cell::from("Enter").bold(), "Create the rule being edited"),
                (Cell::from(""), ""),
                (Cell::from("# Connections").fg(Color::Yellow), ""),
                (Cell::from("b").bold(), "Block the selected node's address"),
                (Cell::from(""), ""),
                (Cell::from("# Blocked IPs").fg(Color::Yellow), ""),
                (Cell::from("u").bold(), "Unblock the selected address"),
            ],
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < self.keys.len().saturating_sub(self.visible_rows) {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let block = {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(16),
                    Constraint::Fill(1),
                ])
                .flex(Flex::SpaceBetween)
                .split(frame.area());
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Percentage(60),
                    Constraint::Fill(1),
                ])
                .flex(Flex::SpaceBetween)
                .split(vertical[1])[1]
        };

        self.visible_rows = block.height.saturating_sub(4) as usize;

        let rows: Vec<Row> = self
            .keys
            .iter()
            .skip(self.scroll)
            .map(|key| Row::new(vec![key.0.clone(), Cell::from(key.1)]))
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
            .block(
                Block::default()
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(Color::Green))
                    .padding(Padding::uniform(1)),
            );

        frame.render_widget(Clear, block);
        frame.render_widget(table, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_stays_within_bounds() {
        let mut help = Help::new();
        help.visible_rows = 10;

        help.scroll_up();
        assert_eq!(help.scroll, 0);

        for _ in 0..100 {
            help.scroll_down();
        }
        assert_eq!(help.scroll, help.keys.len() - 10);
    }
}
