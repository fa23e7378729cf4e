#[cfg(test)]
mod tests {
    use agrodash::config::config::Config;
    use agrodash::data::export::ExportFormat;
    use agrodash::data::fixtures;
    use agrodash::data::provider::DemoProvider;
    use agrodash::data::records::{RentalStatus, SessionRole};
    use agrodash::logging::LogRingBuffer;
    use agrodash::ui::app::{App, Screen};

    fn app_with(role: SessionRole, config: Config) -> App {
        App::new(
            Box::new(DemoProvider::new()),
            fixtures::demo_session(role),
            config,
            LogRingBuffer::new(),
        )
        .unwrap()
    }

    fn no_cooldown_config() -> Config {
        let mut config = Config::default();
        config.behavior.approval_cooldown_ms = 0;
        config
    }

    #[test]
    fn test_approve_then_reject_with_zero_cooldown() {
        let mut app = app_with(SessionRole::Lender, no_cooldown_config());

        app.open_selected_detail();
        assert_eq!(app.screen, Screen::Detail);
        let id = app.detail_rental().unwrap().id.clone();

        app.set_detail_status(RentalStatus::Approved);
        assert_eq!(
            app.detail_rental().unwrap().status,
            RentalStatus::Approved
        );

        app.set_detail_status(RentalStatus::Rejected);
        assert_eq!(
            app.detail_rental().unwrap().status,
            RentalStatus::Rejected
        );
        assert_eq!(app.detail_rental().unwrap().id, id);
    }

    #[test]
    fn test_search_narrows_the_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = no_cooldown_config();
        config.behavior.export_dir = Some(dir.path().to_path_buf());

        let mut app = app_with(SessionRole::Lender, config);
        app.set_search("maria");
        assert_eq!(app.table.filtered_len(), 1);

        app.export(ExportFormat::Csv);
        let status = app.status().expect("export sets a status");
        assert!(!status.is_error);
        assert!(status.text.starts_with("Exported to "));

        let exported = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .find(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .unwrap();
        let contents = std::fs::read_to_string(exported).unwrap();
        // header plus the single matching row
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("Maria Santos"));
    }

    #[test]
    fn test_empty_filtered_export_reports_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = no_cooldown_config();
        config.behavior.export_dir = Some(dir.path().to_path_buf());

        let mut app = app_with(SessionRole::Lender, config);
        app.set_search("nobody matches this");
        app.export(ExportFormat::Json);

        let status = app.status().unwrap();
        assert!(!status.is_error);
        assert_eq!(status.text, "No rentals to export");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_admin_filter_cycle_narrows_the_accounts_table() {
        let mut app = app_with(SessionRole::Admin, Config::default());
        let all = app.table.filtered_len();

        // All -> Admin
        app.cycle_filter();
        assert_eq!(app.table.filter_label(), "Admin");
        assert!(app.table.filtered_len() < all);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_farmer_has_no_dashboard() {
        let app = app_with(SessionRole::Farmer, Config::default());
        assert!(!app.has_dashboard());
        assert_eq!(app.screen, Screen::Profile);
        assert_eq!(app.table.filtered_len(), 0);
        assert!(app.profile.is_some());
    }

    #[test]
    fn test_saving_the_profile_moves_the_baseline() {
        let mut app = app_with(SessionRole::Lender, Config::default());
        let mut update = fixtures::demo_profiles()
            .into_iter()
            .find(|p| p.user_id == app.session.user_id)
            .map(|p| agrodash::data::records::ProfileUpdate {
                user_id: p.user_id,
                username: p.username,
                first_name: p.first_name,
                last_name: p.last_name,
                location: p.location,
            })
            .unwrap();
        update.location = "Davao".to_string();

        app.save_profile(update);
        assert_eq!(app.profile.as_ref().unwrap().location, "Davao");
        assert_eq!(app.status().unwrap().text, "Profile updated");
    }

    #[test]
    fn test_short_password_is_a_visible_error() {
        let mut app = app_with(SessionRole::Lender, Config::default());
        assert!(!app.change_password("old", "123"));

        let status = app.status().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("at least 6 characters"));
    }

    #[test]
    fn test_page_change_resets_the_highlight() {
        let mut app = app_with(SessionRole::Lender, no_cooldown_config());
        app.select_down();
        app.select_down();
        assert_eq!(app.selected_row, 2);

        app.next_page();
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.table.current_page(), 2);
    }
}
