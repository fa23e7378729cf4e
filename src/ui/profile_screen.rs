// Profile screen: personal information form and password change.
// The widget owns its edit state and reports outcomes as actions,
// so the event loop and App stay in charge of the provider calls.

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::data::provider::MIN_PASSWORD_LEN;
use crate::data::records::{ProfileUpdate, UserProfile};
use crate::ui::app::App;

const INFO_FIELDS: [&str; 4] = ["Username", "First Name", "Last Name", "Location"];
const PASSWORD_FIELDS: [&str; 2] = ["Old Password", "New Password"];

/// What a key press on the profile screen amounted to
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    None,
    Save(ProfileUpdate),
    ChangePassword { current: String, new: String },
    /// Local validation failed; show the message on the status line
    Invalid(String),
    /// Esc outside any edit
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditState {
    Viewing,
    EditingInfo,
    EditingPassword,
}

pub struct ProfileScreen {
    state: EditState,
    focus: usize,
    info_inputs: [Input; 4],
    password_inputs: [Input; 2],
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self {
            state: EditState::Viewing,
            focus: 0,
            info_inputs: Default::default(),
            password_inputs: Default::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.state != EditState::Viewing
    }

    /// Load the form from the saved profile, the edit baseline
    fn start_info_edit(&mut self, profile: &UserProfile) {
        self.info_inputs = [
            Input::new(profile.username.clone()),
            Input::new(profile.first_name.clone()),
            Input::new(profile.last_name.clone()),
            Input::new(profile.location.clone()),
        ];
        self.focus = 0;
        self.state = EditState::EditingInfo;
    }

    fn start_password_edit(&mut self) {
        self.password_inputs = Default::default();
        self.focus = 0;
        self.state = EditState::EditingPassword;
    }

    pub fn handle_key(&mut self, key: KeyEvent, profile: Option<&UserProfile>) -> ProfileAction {
        match self.state {
            EditState::Viewing => match key.code {
                KeyCode::Char('e') => {
                    if let Some(profile) = profile {
                        self.start_info_edit(profile);
                    }
                    ProfileAction::None
                }
                KeyCode::Char('c') => {
                    self.start_password_edit();
                    ProfileAction::None
                }
                KeyCode::Esc => ProfileAction::Close,
                _ => ProfileAction::None,
            },
            EditState::EditingInfo => self.handle_info_key(key, profile),
            EditState::EditingPassword => self.handle_password_key(key),
        }
    }

    fn handle_info_key(&mut self, key: KeyEvent, profile: Option<&UserProfile>) -> ProfileAction {
        match key.code {
            KeyCode::Esc => {
                // Cancel drops the edits; the saved profile is untouched
                self.state = EditState::Viewing;
                ProfileAction::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % INFO_FIELDS.len();
                ProfileAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + INFO_FIELDS.len() - 1) % INFO_FIELDS.len();
                ProfileAction::None
            }
            KeyCode::Enter => {
                let Some(profile) = profile else {
                    return ProfileAction::None;
                };
                self.state = EditState::Viewing;
                ProfileAction::Save(ProfileUpdate {
                    user_id: profile.user_id.clone(),
                    username: self.info_inputs[0].value().to_string(),
                    first_name: self.info_inputs[1].value().to_string(),
                    last_name: self.info_inputs[2].value().to_string(),
                    location: self.info_inputs[3].value().to_string(),
                })
            }
            _ => {
                self.info_inputs[self.focus].handle_event(&Event::Key(key));
                ProfileAction::None
            }
        }
    }

    fn handle_password_key(&mut self, key: KeyEvent) -> ProfileAction {
        match key.code {
            KeyCode::Esc => {
                self.password_inputs = Default::default();
                self.state = EditState::Viewing;
                ProfileAction::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % PASSWORD_FIELDS.len();
                ProfileAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + PASSWORD_FIELDS.len() - 1) % PASSWORD_FIELDS.len();
                ProfileAction::None
            }
            KeyCode::Enter => {
                let new = self.password_inputs[1].value().to_string();
                if new.len() < MIN_PASSWORD_LEN {
                    return ProfileAction::Invalid(format!(
                        "Password must be at least {} characters",
                        MIN_PASSWORD_LEN
                    ));
                }
                let current = self.password_inputs[0].value().to_string();
                self.password_inputs = Default::default();
                self.state = EditState::Viewing;
                ProfileAction::ChangePassword { current, new }
            }
            _ => {
                self.password_inputs[self.focus].handle_event(&Event::Key(key));
                ProfileAction::None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(12), Constraint::Length(8)])
            .split(area);

        self.render_info_card(f, chunks[0], app);
        self.render_password_card(f, chunks[1]);
    }

    fn render_info_card(&self, f: &mut Frame, area: Rect, app: &App) {
        let mut lines = vec![Line::from("")];

        match app.profile.as_ref() {
            Some(profile) => {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(" {} ", profile.initials()),
                        Style::default()
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {}", profile.email)),
                    Span::styled(
                        "   (email cannot be changed here)",
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
                lines.push(Line::from(""));

                let editing = self.state == EditState::EditingInfo;
                let values: [&str; 4] = if editing {
                    [
                        self.info_inputs[0].value(),
                        self.info_inputs[1].value(),
                        self.info_inputs[2].value(),
                        self.info_inputs[3].value(),
                    ]
                } else {
                    [
                        &profile.username,
                        &profile.first_name,
                        &profile.last_name,
                        &profile.location,
                    ]
                };

                for (i, (label, value)) in INFO_FIELDS.iter().zip(values).enumerate() {
                    lines.push(field_line(label, value, editing && i == self.focus));
                }

                lines.push(Line::from(""));
                let hint = if editing {
                    "Tab next field   Enter save   Esc cancel"
                } else {
                    "e edit   c change password   Esc back"
                };
                lines.push(Line::from(Span::styled(
                    hint,
                    Style::default().fg(Color::DarkGray),
                )));
            }
            None => {
                lines.push(Line::from("No profile loaded"));
            }
        }

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Personal Information"),
        );
        f.render_widget(card, area);
    }

    fn render_password_card(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];

        if self.state == EditState::EditingPassword {
            for (i, label) in PASSWORD_FIELDS.iter().enumerate() {
                let masked = "*".repeat(self.password_inputs[i].value().len());
                lines.push(field_line(label, &masked, i == self.focus));
            }
            lines.push(Line::from(Span::styled(
                "Minimum of 6 characters",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                "Tab next field   Enter change   Esc cancel",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "c change password",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Change password"),
        );
        f.render_widget(card, area);
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(
            format!("{:<14}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value.to_string(), value_style),
    ])
}
