//! Interactive dashboard. Owns the terminal lifecycle and turns key
//! presses into [`Action`]s; the workflow itself lives in [`App`].

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tui_input::backend::crossterm::EventHandler;

use crate::data::export::ExportFormat;
use crate::data::records::RentalStatus;
use crate::ui::actions::Action;
use crate::ui::app::{App, Screen};
use crate::ui::profile_screen::{ProfileAction, ProfileScreen};
use crate::ui::table_screen::SearchBox;
use crate::ui::{detail_screen, help_screen, logs_screen, overview_screen, table_screen};

pub struct DashboardTui {
    app: App,
    search: SearchBox,
    profile: ProfileScreen,
    show_help: bool,
}

/// Set up the terminal, run the dashboard, and always restore the
/// terminal on the way out.
pub fn run(app: App) -> Result<()> {
    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to enable raw terminal mode: {e}");
        eprintln!("Try running with --classic flag.");
        return Err(e.into());
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            return Err(e.into());
        }
    };

    let mut tui = DashboardTui::new(app);
    let result = tui.run_loop(&mut terminal);

    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    result
}

/// Keys that work on every screen (outside of search and form edits)
fn global_action(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::F(5) => Some(Action::ToggleLogs),
        KeyCode::Char('o') => Some(Action::ShowOverview),
        KeyCode::Char('p') => Some(Action::ShowProfile),
        _ => None,
    }
}

impl DashboardTui {
    pub fn new(app: App) -> Self {
        Self {
            app,
            search: SearchBox::new(),
            profile: ProfileScreen::new(),
            show_help: false,
        }
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Returns true when the app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.search.active {
            self.handle_search_key(key);
            return false;
        }

        if self.app.screen == Screen::Profile {
            let was_editing = self.profile.is_editing();
            let action = self.profile.handle_key(key, self.app.profile.as_ref());
            self.apply_profile_action(action);
            if was_editing || self.profile.is_editing() {
                // the form owns the keys while an edit is open
                return false;
            }
            if self.app.screen == Screen::Profile {
                if let Some(action) = global_action(key) {
                    return self.dispatch(action);
                }
            }
            return false;
        }

        match self.map_key(key) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.search.commit(),
            KeyCode::Esc => {
                let prior = self.search.cancel();
                self.app.set_search(prior);
            }
            _ => {
                // live filtering while the query is typed
                self.search.input.handle_event(&Event::Key(key));
                self.app.set_search(self.search.input.value());
            }
        }
    }

    fn apply_profile_action(&mut self, action: ProfileAction) {
        match action {
            ProfileAction::None => {}
            ProfileAction::Save(update) => self.app.save_profile(update),
            ProfileAction::ChangePassword { current, new } => {
                let _ = self.app.change_password(&current, &new);
            }
            ProfileAction::Invalid(message) => self.app.set_error(message),
            ProfileAction::Close => {
                if self.app.has_dashboard() {
                    self.app.screen = Screen::Table;
                }
            }
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = global_action(key) {
            return Some(action);
        }

        match self.app.screen {
            Screen::Table => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectUp),
                KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
                KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
                KeyCode::Char('g') => Some(Action::FirstPage),
                KeyCode::Char('G') => Some(Action::LastPage),
                KeyCode::Char('f') => Some(Action::CycleFilter),
                KeyCode::Char('/') => Some(Action::StartSearch),
                KeyCode::Enter => Some(Action::OpenDetail),
                KeyCode::Char('e') => Some(Action::Export(ExportFormat::Csv)),
                KeyCode::Char('E') => Some(Action::Export(ExportFormat::Json)),
                KeyCode::Char('y') => Some(Action::YankRow),
                KeyCode::Char('R') => Some(Action::Refresh),
                _ => None,
            },
            Screen::Detail => match key.code {
                KeyCode::Char('a') => Some(Action::Approve),
                KeyCode::Char('r') => Some(Action::Reject),
                KeyCode::Char('y') => Some(Action::YankRow),
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                _ => None,
            },
            Screen::Overview => match key.code {
                KeyCode::Esc => Some(Action::Back),
                KeyCode::Char('R') => Some(Action::Refresh),
                _ => None,
            },
            Screen::Logs => match key.code {
                KeyCode::Esc => Some(Action::Back),
                _ => None,
            },
            // the profile widget already had its chance
            Screen::Profile => None,
        }
    }

    /// Returns true when the app should quit
    fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ToggleLogs => {
                self.app.screen = if self.app.screen == Screen::Logs {
                    self.home_screen()
                } else {
                    Screen::Logs
                };
            }
            Action::ShowOverview => {
                if self.app.has_dashboard() {
                    self.app.screen = if self.app.screen == Screen::Overview {
                        Screen::Table
                    } else {
                        Screen::Overview
                    };
                }
            }
            Action::ShowProfile => {
                self.app.screen = if self.app.screen == Screen::Profile {
                    self.home_screen()
                } else {
                    Screen::Profile
                };
            }
            Action::Back => match self.app.screen {
                Screen::Detail => {
                    self.app.detail_id = None;
                    self.app.screen = Screen::Table;
                }
                Screen::Overview | Screen::Logs => self.app.screen = self.home_screen(),
                _ => {}
            },
            Action::SelectUp => self.app.select_up(),
            Action::SelectDown => self.app.select_down(),
            Action::NextPage => self.app.next_page(),
            Action::PrevPage => self.app.prev_page(),
            Action::FirstPage => self.app.first_page(),
            Action::LastPage => self.app.last_page(),
            Action::CycleFilter => self.app.cycle_filter(),
            Action::StartSearch => self.search.start(self.app.table.search()),
            Action::OpenDetail => self.app.open_selected_detail(),
            Action::Approve => self.app.set_detail_status(RentalStatus::Approved),
            Action::Reject => self.app.set_detail_status(RentalStatus::Rejected),
            Action::Export(format) => self.app.export(format),
            Action::YankRow => self.app.yank_selected(),
            Action::Refresh => self.app.refresh(),
        }
        false
    }

    fn home_screen(&self) -> Screen {
        if self.app.has_dashboard() {
            Screen::Table
        } else {
            Screen::Profile
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_title_bar(f, chunks[0]);

        match self.app.screen {
            Screen::Overview => overview_screen::render(f, chunks[1], &self.app),
            Screen::Table => table_screen::render(f, chunks[1], &self.app, &self.search),
            Screen::Detail => detail_screen::render(f, chunks[1], &self.app),
            Screen::Profile => self.profile.render(f, chunks[1], &self.app),
            Screen::Logs => logs_screen::render(f, chunks[1], &self.app),
        }

        self.render_status_bar(f, chunks[2]);

        if self.show_help {
            help_screen::render(f, f.area());
        }
    }

    fn render_title_bar(&self, f: &mut Frame, area: Rect) {
        let screen_name = match self.app.screen {
            Screen::Overview => "Overview",
            Screen::Table => self.app.table.title(),
            Screen::Detail => "Detail",
            Screen::Profile => "Profile",
            Screen::Logs => "Logs",
        };
        let title = Line::from(vec![
            Span::styled(
                " agrodash ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(screen_name, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        f.render_widget(Paragraph::new(title), area);

        let session = Paragraph::new(Line::from(Span::styled(
            format!(
                "{} ({}) ",
                self.app.session.username,
                self.app.session.role.as_str()
            ),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right);
        f.render_widget(session, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let line = match self.app.status() {
            Some(status) => {
                let color = if status.is_error {
                    Color::Red
                } else {
                    Color::Green
                };
                Line::from(Span::styled(
                    format!(" {}", status.text),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(Span::styled(
                " ? help   q quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Config;
    use crate::data::fixtures;
    use crate::data::provider::DemoProvider;
    use crate::data::records::SessionRole;
    use crate::logging::LogRingBuffer;

    fn tui(role: SessionRole) -> DashboardTui {
        let app = App::new(
            Box::new(DemoProvider::new()),
            fixtures::demo_session(role),
            Config::default(),
            LogRingBuffer::new(),
        )
        .unwrap();
        DashboardTui::new(app)
    }

    fn press(tui: &mut DashboardTui, code: KeyCode) -> bool {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn q_quits_and_navigation_keys_do_not() {
        let mut tui = tui(SessionRole::Lender);
        tui.app.screen = Screen::Table;
        assert!(!press(&mut tui, KeyCode::Char('j')));
        assert!(!press(&mut tui, KeyCode::Char('l')));
        assert!(press(&mut tui, KeyCode::Char('q')));
    }

    #[test]
    fn search_keys_go_to_the_query_until_enter() {
        let mut tui = tui(SessionRole::Lender);
        tui.app.screen = Screen::Table;
        press(&mut tui, KeyCode::Char('/'));
        assert!(tui.search.active);

        // "q" is part of the query here, not quit
        assert!(!press(&mut tui, KeyCode::Char('q')));
        assert_eq!(tui.app.table.search(), "q");

        press(&mut tui, KeyCode::Enter);
        assert!(!tui.search.active);
        assert_eq!(tui.app.table.search(), "q");
    }

    #[test]
    fn cancelled_search_restores_the_prior_query() {
        let mut tui = tui(SessionRole::Lender);
        tui.app.screen = Screen::Table;
        tui.app.set_search("manila");

        press(&mut tui, KeyCode::Char('/'));
        press(&mut tui, KeyCode::Char('x'));
        assert_eq!(tui.app.table.search(), "manilax");

        press(&mut tui, KeyCode::Esc);
        assert_eq!(tui.app.table.search(), "manila");
    }

    #[test]
    fn farmers_stay_on_the_profile_screen() {
        let mut tui = tui(SessionRole::Farmer);
        assert_eq!(tui.app.screen, Screen::Profile);
        press(&mut tui, KeyCode::Char('o'));
        assert_eq!(tui.app.screen, Screen::Profile);
        press(&mut tui, KeyCode::Esc);
        assert_eq!(tui.app.screen, Screen::Profile);
    }

    #[test]
    fn overview_toggles_back_to_the_table() {
        let mut tui = tui(SessionRole::Lender);
        tui.app.screen = Screen::Table;
        press(&mut tui, KeyCode::Char('o'));
        assert_eq!(tui.app.screen, Screen::Overview);
        press(&mut tui, KeyCode::Char('o'));
        assert_eq!(tui.app.screen, Screen::Table);
    }

    #[test]
    fn detail_esc_returns_to_the_table() {
        let mut tui = tui(SessionRole::Lender);
        tui.app.screen = Screen::Table;
        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.app.screen, Screen::Detail);
        press(&mut tui, KeyCode::Esc);
        assert_eq!(tui.app.screen, Screen::Table);
        assert!(tui.app.detail_id.is_none());
    }

    #[test]
    fn profile_edit_swallows_global_keys() {
        let mut tui = tui(SessionRole::Farmer);
        press(&mut tui, KeyCode::Char('e'));
        assert!(tui.profile.is_editing());

        // "q" lands in the focused field instead of quitting
        assert!(!press(&mut tui, KeyCode::Char('q')));
        press(&mut tui, KeyCode::Esc);
        assert!(!tui.profile.is_editing());
    }
}
