//! Application state for the dashboard TUI.
//!
//! Owns the session, the provider, the table view and the overview
//! collections. All workflow rules live here so the event loop stays
//! a thin key-to-action dispatcher.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{error, info};

use crate::config::config::Config;
use crate::data::export::{write_export, ExportFormat};
use crate::data::records::{
    AccountRecord, EquipmentSummary, RentalRecord, RentalStatus, Review, SessionRole, UserProfile,
    UserSession,
};
use crate::data::provider::RecordProvider;
use crate::data::table_view::{DashboardTable, TableView};
use crate::logging::LogRingBuffer;

/// Which screen the TUI is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Table,
    Detail,
    Profile,
    Logs,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    set_at: Instant,
}

pub struct App {
    pub session: UserSession,
    provider: Box<dyn RecordProvider>,
    pub config: Config,
    pub table: DashboardTable,
    pub screen: Screen,
    /// Row highlight within the current page
    pub selected_row: usize,
    /// Record id the detail screen is showing
    pub detail_id: Option<String>,
    pub reviews: Vec<Review>,
    pub equipment: Vec<EquipmentSummary>,
    pub profile: Option<UserProfile>,
    pub log_buffer: LogRingBuffer,
    /// Session log on disk, shown in the log view title
    pub log_file_path: Option<PathBuf>,
    status: Option<StatusMessage>,
    /// Rentals kept for the admin overview; the admin table shows accounts
    admin_rentals: Vec<RentalRecord>,
    /// True while a provider mutation is running
    action_in_flight: bool,
    last_action_at: Option<Instant>,
}

impl App {
    pub fn new(
        provider: Box<dyn RecordProvider>,
        session: UserSession,
        config: Config,
        log_buffer: LogRingBuffer,
    ) -> Result<Self> {
        let mut admin_rentals = Vec::new();

        let table = match session.role {
            SessionRole::Admin => {
                admin_rentals = provider.fetch_rentals()?;
                DashboardTable::Accounts(TableView::new(provider.fetch_accounts()?))
            }
            SessionRole::Lender => DashboardTable::Rentals(TableView::new(provider.fetch_rentals()?)),
            // Farmers only see their profile; leave the table empty
            SessionRole::Farmer => DashboardTable::Rentals(TableView::new(Vec::new())),
        };

        let (reviews, equipment) = if session.role == SessionRole::Farmer {
            (Vec::new(), Vec::new())
        } else {
            (provider.fetch_reviews()?, provider.fetch_equipment()?)
        };

        let profile = provider.fetch_profile(&session.user_id).ok();

        let screen = match session.role {
            SessionRole::Farmer => Screen::Profile,
            _ => Screen::Overview,
        };

        info!(
            "session started for {} ({})",
            session.username,
            session.role.as_str()
        );

        Ok(Self {
            session,
            provider,
            config,
            table,
            screen,
            selected_row: 0,
            detail_id: None,
            reviews,
            equipment,
            profile,
            log_buffer,
            log_file_path: None,
            status: None,
            admin_rentals,
            action_in_flight: false,
            last_action_at: None,
        })
    }

    /// Screens other than the profile are off limits for farmers
    pub fn has_dashboard(&self) -> bool {
        self.session.role != SessionRole::Farmer
    }

    /// Rentals backing the overview chart and status breakdown
    pub fn overview_rentals(&self) -> &[RentalRecord] {
        match &self.table {
            DashboardTable::Rentals(view) => view.source(),
            DashboardTable::Accounts(_) => &self.admin_rentals,
        }
    }

    // --- status line ---

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            set_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        error!("{}", text);
        self.status = Some(StatusMessage {
            text,
            is_error: true,
            set_at: Instant::now(),
        });
    }

    /// Current status message, if it has not expired yet
    pub fn status(&self) -> Option<&StatusMessage> {
        let ttl = Duration::from_secs(self.config.behavior.status_message_secs);
        self.status
            .as_ref()
            .filter(|message| message.set_at.elapsed() < ttl)
    }

    // --- selection and paging ---

    pub fn select_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let rows = self.table.page_cells().len();
        if rows > 0 && self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    /// Keep the highlight inside the page after any page or filter change
    pub fn clamp_selection(&mut self) {
        let rows = self.table.page_cells().len();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }

    pub fn next_page(&mut self) {
        self.table.next_page();
        self.selected_row = 0;
    }

    pub fn prev_page(&mut self) {
        self.table.prev_page();
        self.selected_row = 0;
    }

    pub fn first_page(&mut self) {
        self.table.first_page();
        self.selected_row = 0;
    }

    pub fn last_page(&mut self) {
        self.table.last_page();
        self.selected_row = 0;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.table.set_search(query);
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.table.cycle_filter();
        self.clamp_selection();
    }

    // --- detail workflow ---

    /// Open the detail screen for the highlighted row
    pub fn open_selected_detail(&mut self) {
        let cells = self.table.page_cells();
        if let Some((id, _)) = cells.get(self.selected_row) {
            self.detail_id = Some(id.clone());
            self.screen = Screen::Detail;
        }
    }

    pub fn detail_rental(&self) -> Option<&RentalRecord> {
        let id = self.detail_id.as_deref()?;
        match &self.table {
            DashboardTable::Rentals(view) => view.record_by_id(id),
            DashboardTable::Accounts(_) => None,
        }
    }

    pub fn detail_account(&self) -> Option<&AccountRecord> {
        let id = self.detail_id.as_deref()?;
        match &self.table {
            DashboardTable::Accounts(view) => view.record_by_id(id),
            DashboardTable::Rentals(_) => None,
        }
    }

    /// Approve or reject the rental on the detail screen.
    ///
    /// No-ops: the rental is already in the target status, another
    /// action is still in flight, or the cooldown since the previous
    /// action has not elapsed. On success the whole snapshot is
    /// refetched and swapped under the view.
    pub fn set_detail_status(&mut self, status: RentalStatus) {
        if self.action_in_flight {
            return;
        }

        let cooldown = Duration::from_millis(self.config.behavior.approval_cooldown_ms);
        if let Some(at) = self.last_action_at {
            if at.elapsed() < cooldown {
                self.set_status("Please wait a moment before the next action");
                return;
            }
        }

        let Some(rental) = self.detail_rental() else {
            return;
        };
        if rental.status == status {
            self.set_status(format!("Rental is already {}", status.label().to_lowercase()));
            return;
        }
        let id = rental.id.clone();

        self.action_in_flight = true;
        let outcome = self
            .provider
            .set_rental_status(&id, status)
            .and_then(|_| self.provider.fetch_rentals());
        self.action_in_flight = false;
        self.last_action_at = Some(Instant::now());

        match outcome {
            Ok(rentals) => {
                if let DashboardTable::Rentals(view) = &mut self.table {
                    view.set_source(rentals);
                }
                self.clamp_selection();
                self.set_status(format!("Rental {}", status.label().to_lowercase()));
            }
            Err(e) => self.set_error(format!("Failed to update rental: {:#}", e)),
        }
    }

    // --- snapshot refresh ---

    pub fn refresh(&mut self) {
        let outcome = self.reload_snapshots();
        match outcome {
            Ok(()) => self.set_status("Refreshed"),
            Err(e) => self.set_error(format!("Refresh failed: {:#}", e)),
        }
    }

    fn reload_snapshots(&mut self) -> Result<()> {
        match &mut self.table {
            DashboardTable::Rentals(view) => {
                if self.session.role != SessionRole::Farmer {
                    view.set_source(self.provider.fetch_rentals()?);
                }
            }
            DashboardTable::Accounts(view) => {
                self.admin_rentals = self.provider.fetch_rentals()?;
                view.set_source(self.provider.fetch_accounts()?);
            }
        }
        if self.session.role != SessionRole::Farmer {
            self.reviews = self.provider.fetch_reviews()?;
            self.equipment = self.provider.fetch_equipment()?;
        }
        self.clamp_selection();
        Ok(())
    }

    // --- export and clipboard ---

    pub fn export(&mut self, format: ExportFormat) {
        match write_export(&self.table, format, &self.config.export_dir()) {
            Ok(Some(path)) => self.set_status(format!("Exported to {}", path.display())),
            Ok(None) => self.set_status(format!("No {} to export", self.table.entity_noun())),
            Err(e) => self.set_error(format!("Export failed: {:#}", e)),
        }
    }

    /// Copy the highlighted row to the clipboard, tab-separated
    pub fn yank_selected(&mut self) {
        let cells = self.table.page_cells();
        let Some((_, row)) = cells.get(self.selected_row) else {
            self.set_status("Nothing to copy");
            return;
        };
        let line = row.join("\t");

        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(&line) {
                Ok(_) => self.set_status("Copied row to clipboard"),
                Err(e) => self.set_error(format!("Failed to copy: {}", e)),
            },
            Err(e) => self.set_error(format!("Failed to access clipboard: {}", e)),
        }
    }

    // --- profile workflow ---

    pub fn save_profile(&mut self, update: crate::data::records::ProfileUpdate) {
        match self.provider.update_profile(&update) {
            Ok(profile) => {
                self.profile = Some(profile);
                self.set_status("Profile updated");
            }
            Err(e) => self.set_error(format!("Failed to update profile: {:#}", e)),
        }
    }

    /// Returns true when the password change went through
    pub fn change_password(&mut self, current: &str, new: &str) -> bool {
        match self.provider.change_password(current, new) {
            Ok(()) => {
                self.set_status("Password changed");
                true
            }
            Err(e) => {
                self.set_error(format!("Failed to change password: {:#}", e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::provider::DemoProvider;

    fn lender_app() -> App {
        let mut config = Config::default();
        // No cooldown so tests can fire repeated actions
        config.behavior.approval_cooldown_ms = 0;
        App::new(
            Box::new(DemoProvider::new()),
            fixtures::demo_session(SessionRole::Lender),
            config,
            LogRingBuffer::new(),
        )
        .unwrap()
    }

    fn admin_app() -> App {
        App::new(
            Box::new(DemoProvider::new()),
            fixtures::demo_session(SessionRole::Admin),
            Config::default(),
            LogRingBuffer::new(),
        )
        .unwrap()
    }

    #[test]
    fn lender_sees_rentals_and_admin_sees_accounts() {
        assert_eq!(lender_app().table.title(), "Review");
        assert_eq!(admin_app().table.title(), "User Accounts");
    }

    #[test]
    fn farmer_lands_on_the_profile_screen() {
        let app = App::new(
            Box::new(DemoProvider::new()),
            fixtures::demo_session(SessionRole::Farmer),
            Config::default(),
            LogRingBuffer::new(),
        )
        .unwrap();

        assert_eq!(app.screen, Screen::Profile);
        assert!(!app.has_dashboard());
        assert_eq!(app.table.filtered_len(), 0);
    }

    #[test]
    fn approving_a_pending_rental_swaps_the_snapshot() {
        let mut app = lender_app();
        app.detail_id = Some("1".to_string());

        app.set_detail_status(RentalStatus::Approved);

        let rental = app.detail_rental().unwrap();
        assert_eq!(rental.status, RentalStatus::Approved);
        assert_eq!(app.status().unwrap().text, "Rental approved");
    }

    #[test]
    fn approving_twice_is_a_no_op() {
        let mut app = lender_app();
        app.detail_id = Some("1".to_string());

        app.set_detail_status(RentalStatus::Approved);
        app.set_detail_status(RentalStatus::Approved);

        assert_eq!(app.status().unwrap().text, "Rental is already approved");
    }

    #[test]
    fn actions_inside_the_cooldown_are_blocked() {
        let mut app = lender_app();
        app.config.behavior.approval_cooldown_ms = 60_000;
        app.detail_id = Some("1".to_string());

        app.set_detail_status(RentalStatus::Approved);
        app.set_detail_status(RentalStatus::Rejected);

        // Second action blocked, rental still approved
        assert_eq!(
            app.detail_rental().unwrap().status,
            RentalStatus::Approved
        );
        assert_eq!(
            app.status().unwrap().text,
            "Please wait a moment before the next action"
        );
    }

    #[test]
    fn in_flight_actions_are_ignored() {
        let mut app = lender_app();
        app.detail_id = Some("1".to_string());
        app.action_in_flight = true;

        app.set_detail_status(RentalStatus::Approved);

        assert_eq!(app.detail_rental().unwrap().status, RentalStatus::Pending);
        assert!(app.status().is_none());
    }

    #[test]
    fn narrowing_the_filter_clamps_the_selection() {
        let mut app = lender_app();
        app.last_page();
        app.selected_row = 1;

        app.set_search("maria");

        assert_eq!(app.table.filtered_len(), 1);
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.table.current_page(), 1);
    }

    #[test]
    fn page_changes_reset_the_highlight() {
        let mut app = lender_app();
        app.selected_row = 5;
        app.next_page();
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.table.current_page(), 2);
    }

    #[test]
    fn detail_opens_for_the_highlighted_row() {
        let mut app = lender_app();
        app.selected_row = 1;
        app.open_selected_detail();

        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.detail_rental().unwrap().name, "Doe John");
    }

    #[test]
    fn status_messages_expire() {
        let mut app = lender_app();
        app.config.behavior.status_message_secs = 0;
        app.set_status("hello");
        assert!(app.status().is_none());
    }
}
