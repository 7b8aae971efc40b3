use std::fmt;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use kanal::Sender;
use log::{error, info};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, HighlightSpacing, Padding, Row, Table,
        TableState,
    },
};
use serde::{Deserialize, Serialize};
use strum::Display;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::app::AppResult;
use crate::event::Event;
use crate::export;
use crate::notification::{Notification, NotificationLevel};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleAction {
    #[default]
    #[strum(to_string = "BLOCK")]
    Block,
    #[strum(to_string = "ALERT")]
    Alert,
}

/// Identifier handed out by the rule store. Unique for the lifetime of the
/// session, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(u64);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRule {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    pub action: RuleAction,
    pub condition: String,
    pub enabled: bool,
}

/// What the editor hands over on submit. The store assigns the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub name: String,
    pub description: String,
    pub action: RuleAction,
    pub condition: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum FocusedField {
    #[default]
    Name,
    Description,
    Action,
    Condition,
}

#[derive(Debug, Clone, Default)]
struct InputField {
    field: Input,
    error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RuleEditor {
    name: InputField,
    description: InputField,
    condition: InputField,
    action: RuleAction,
    focused_field: FocusedField,
}

impl RuleEditor {
    fn validate(&mut self) -> bool {
        let mut valid = true;

        self.name.error = None;
        if self.name.field.value().is_empty() {
            self.name.error = Some("Required field.".to_string());
            valid = false;
        }

        self.description.error = None;
        if self.description.field.value().is_empty() {
            self.description.error = Some("Required field.".to_string());
            valid = false;
        }

        valid
    }

    /// Returns the draft when every required field is filled, otherwise
    /// records the per field errors and returns nothing.
    fn submit(&mut self) -> Option<RuleDraft> {
        if !self.validate() {
            return None;
        }

        Some(RuleDraft {
            name: self.name.field.value().to_owned(),
            description: self.description.field.value().to_owned(),
            action: self.action,
            condition: self.condition.field.value().to_owned(),
            enabled: true,
        })
    }

    fn handle_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Tab => {
                self.focused_field = match self.focused_field {
                    FocusedField::Name => FocusedField::Description,
                    FocusedField::Description => FocusedField::Action,
                    FocusedField::Action => FocusedField::Condition,
                    FocusedField::Condition => FocusedField::Name,
                };
            }
            KeyCode::BackTab => {
                self.focused_field = match self.focused_field {
                    FocusedField::Name => FocusedField::Condition,
                    FocusedField::Description => FocusedField::Name,
                    FocusedField::Action => FocusedField::Description,
                    FocusedField::Condition => FocusedField::Action,
                };
            }
            _ => match self.focused_field {
                FocusedField::Name => {
                    self.name.field.handle_event(&CrosstermEvent::Key(key_event));
                }
                FocusedField::Description => {
                    self.description
                        .field
                        .handle_event(&CrosstermEvent::Key(key_event));
                }
                FocusedField::Condition => {
                    self.condition
                        .field
                        .handle_event(&CrosstermEvent::Key(key_event));
                }
                FocusedField::Action => match key_event.code {
                    KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k')
                    | KeyCode::Char(' ') => {
                        self.action = match self.action {
                            RuleAction::Block => RuleAction::Alert,
                            RuleAction::Alert => RuleAction::Block,
                        };
                    }
                    _ => {}
                },
            },
        }
    }

    fn render(&self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(9),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area());
        let block = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Percentage(80),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(layout[1])[1];

        let field_style = |field: FocusedField| {
            if self.focused_field == field {
                Style::default().bg(Color::Gray).fg(Color::Black)
            } else {
                Style::default().bg(Color::DarkGray).fg(Color::Black)
            }
        };

        let condition_cell = if self.condition.field.value().is_empty()
            && self.focused_field != FocusedField::Condition
        {
            Cell::from("e.g. requests_per_minute > 1000")
                .style(Style::default().bg(Color::DarkGray).fg(Color::Black).italic())
        } else {
            Cell::from(self.condition.field.value().to_owned())
                .style(field_style(FocusedField::Condition))
        };

        let rows = [
            Row::new(vec![
                Cell::from(self.name.field.value().to_owned())
                    .style(field_style(FocusedField::Name)),
                Cell::from(self.description.field.value().to_owned())
                    .style(field_style(FocusedField::Description)),
                Cell::from(self.action.to_string()).style(field_style(FocusedField::Action)),
                condition_cell,
            ]),
            Row::new(vec![Cell::from(""), Cell::from(""), Cell::from(""), Cell::from("")]),
            Row::new(vec![
                Cell::from(self.name.error.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::Red)),
                Cell::from(self.description.error.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::Red)),
                Cell::from(""),
                Cell::from("optional").style(Style::default().fg(Color::DarkGray)),
            ]),
        ];

        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ];

        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Name", "Description", "Action", "Condition"])
                    .style(Style::new().bold())
                    .bottom_margin(1),
            )
            .column_spacing(2)
            .block(
                Block::default()
                    .title(" New Security Rule ")
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

#[derive(Debug)]
pub struct Rules {
    rules: Vec<SecurityRule>,
    next_id: u64,
    state: TableState,
    editor: Option<RuleEditor>,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules {
    pub fn new() -> Self {
        let mut rules = Self {
            rules: Vec::new(),
            next_id: 1,
            state: TableState::default(),
            editor: None,
        };
        for draft in starter_rules() {
            rules.add(draft);
        }
        rules
    }

    pub fn rules(&self) -> &[SecurityRule] {
        &self.rules
    }

    /// Appends a rule built from the draft and returns its fresh id.
    ///
    /// New rules always come up enabled, whatever the draft says.
    pub fn add(&mut self, draft: RuleDraft) -> RuleId {
        let id = RuleId(self.next_id);
        self.next_id += 1;
        self.rules.push(SecurityRule {
            id,
            name: draft.name,
            description: draft.description,
            action: draft.action,
            condition: draft.condition,
            enabled: true,
        });
        id
    }

    /// Flips the enabled flag of the matching rule. Unknown ids are ignored.
    pub fn toggle(&mut self, id: RuleId) {
        if let Some(rule) = self.rules.iter_mut().find(|rule| rule.id == id) {
            rule.enabled = !rule.enabled;
        }
    }

    pub fn open_editor(&mut self) {
        self.editor = Some(RuleEditor::default());
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn handle_keys(&mut self, key_event: KeyEvent, sender: Sender<Event>) -> AppResult<()> {
        if self.is_editing() {
            self.handle_editor_keys(key_event);
            Ok(())
        } else {
            self.handle_list_keys(key_event, sender)
        }
    }

    fn handle_editor_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.editor = None,
            KeyCode::Enter => {
                let draft = self.editor.as_mut().and_then(RuleEditor::submit);
                if let Some(draft) = draft {
                    let id = self.add(draft);
                    info!("security rule {id} created");
                    self.editor = None;
                }
            }
            _ => {
                if let Some(editor) = &mut self.editor {
                    editor.handle_keys(key_event);
                }
            }
        }
    }

    fn handle_list_keys(&mut self, key_event: KeyEvent, sender: Sender<Event>) -> AppResult<()> {
        match key_event.code {
            KeyCode::Char('n') => self.open_editor(),
            KeyCode::Char(' ') => {
                if let Some(id) = self
                    .state
                    .selected()
                    .and_then(|index| self.rules.get(index))
                    .map(|rule| rule.id)
                {
                    self.toggle(id);
                }
            }
            KeyCode::Char('s') => match export::export_rules(&self.rules) {
                Ok(path) => {
                    Notification::send(
                        format!("Rules saved to {}", path.display()),
                        NotificationLevel::Info,
                        sender,
                    )?;
                }
                Err(e) => {
                    error!("saving rules failed: {e:#}");
                    Notification::send(
                        "Error while saving the rules".to_string(),
                        NotificationLevel::Error,
                        sender,
                    )?;
                }
            },
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            _ => {}
        }
        Ok(())
    }

    fn scroll_down(&mut self) {
        let index = match self.state.selected() {
            Some(index) => (index + 1).min(self.rules.len().saturating_sub(1)),
            None => 0,
        };
        self.state.select(Some(index));
    }

    fn scroll_up(&mut self) {
        let index = self.state.selected().map_or(0, |index| index.saturating_sub(1));
        self.state.select(Some(index));
    }

    pub fn render(&mut self, frame: &mut Frame, block: Rect) {
        if self.state.selected().is_none() && !self.rules.is_empty() {
            self.state.select(Some(0));
        }

        let widths = [
            Constraint::Max(25),
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Max(34),
            Constraint::Length(8),
        ];

        let rows = self.rules.iter().map(|rule| {
            let action_style = match rule.action {
                RuleAction::Block => Style::default().fg(Color::Red).bold(),
                RuleAction::Alert => Style::default().fg(Color::Yellow).bold(),
            };
            let (status, status_style) = if rule.enabled {
                ("Enabled", Style::default().fg(Color::Green))
            } else {
                ("Disabled", Style::default().fg(Color::DarkGray))
            };

            Row::new(vec![
                Cell::from(rule.name.clone()),
                Cell::from(rule.description.clone()),
                Cell::from(rule.action.to_string()).style(action_style),
                Cell::from(rule.condition.clone()),
                Cell::from(status).style(status_style),
            ])
        });

        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Name", "Description", "Action", "Condition", "Status"])
                    .style(Style::new().bold())
                    .bottom_margin(1),
            )
            .column_spacing(2)
            .highlight_spacing(HighlightSpacing::Always)
            .row_highlight_style(Style::new().bg(Color::DarkGray));

        frame.render_stateful_widget(
            table,
            block.inner(Margin {
                horizontal: 2,
                vertical: 2,
            }),
            &mut self.state,
        );
    }

    pub fn render_editor_popup(&self, frame: &mut Frame) {
        if let Some(editor) = &self.editor {
            editor.render(frame);
        }
    }
}

fn starter_rules() -> [RuleDraft; 3] {
    [
        RuleDraft {
            name: "DDoS Protection".to_string(),
            description: "Block IPs with excessive request rates".to_string(),
            action: RuleAction::Block,
            condition: "requests_per_minute > 1000".to_string(),
            enabled: true,
        },
        RuleDraft {
            name: "Port Scanning Detection".to_string(),
            description: "Alert on potential port scanning activity".to_string(),
            action: RuleAction::Alert,
            condition: "distinct_ports_accessed > 10".to_string(),
            enabled: true,
        },
        RuleDraft {
            name: "Known Malicious IPs".to_string(),
            description: "Block traffic from known malicious IP addresses".to_string(),
            action: RuleAction::Block,
            condition: String::new(),
            enabled: true,
        },
    ]
}
