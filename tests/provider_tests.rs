#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use agrodash::data::fixtures;
    use agrodash::data::provider::{FileProvider, RecordProvider};
    use agrodash::data::records::RentalStatus;

    fn write_demo_json(dir: &Path) {
        fs::write(
            dir.join("rentals.json"),
            serde_json::to_string_pretty(&fixtures::demo_rentals()).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.join("accounts.json"),
            serde_json::to_string_pretty(&fixtures::demo_accounts()).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_json_directory_round_trips_the_demo_data() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_json(dir.path());

        let provider = FileProvider::new(dir.path());
        assert_eq!(provider.fetch_rentals().unwrap(), fixtures::demo_rentals());
        assert_eq!(
            provider.fetch_accounts().unwrap(),
            fixtures::demo_accounts()
        );
    }

    #[test]
    fn test_missing_optional_files_fall_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_json(dir.path());

        let provider = FileProvider::new(dir.path());
        assert!(provider.fetch_reviews().unwrap().is_empty());
        assert!(provider.fetch_equipment().unwrap().is_empty());
        assert!(provider.fetch_profile("1").is_err());
    }

    #[test]
    fn test_optional_files_are_loaded_when_present() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_json(dir.path());
        fs::write(
            dir.path().join("reviews.json"),
            serde_json::to_string_pretty(&fixtures::demo_reviews()).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("profiles.json"),
            serde_json::to_string_pretty(&fixtures::demo_profiles()).unwrap(),
        )
        .unwrap();

        let provider = FileProvider::new(dir.path());
        assert_eq!(provider.fetch_reviews().unwrap(), fixtures::demo_reviews());
        assert_eq!(provider.fetch_profile("1").unwrap().username, "johndoe");
    }

    #[test]
    fn test_csv_rentals_load_with_quoted_dates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rentals.csv"),
            "id,name,equipment,date,duration,location,email,status\n\
             1,John Doe,Tractor X200,\"Dec 1, 2025\",3 days,Manila,john.doe@example.com,pending\n\
             2,Maria Santos,Hand Tractor,\"Nov 12, 2025\",1 week,Cebu,maria@example.com,approved\n",
        )
        .unwrap();

        let provider = FileProvider::new(dir.path());
        let rentals = provider.fetch_rentals().unwrap();
        assert_eq!(rentals.len(), 2);
        assert_eq!(rentals[0].date, "Dec 1, 2025");
        assert_eq!(rentals[1].status, RentalStatus::Approved);
    }

    #[test]
    fn test_json_is_preferred_over_csv_for_the_same_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_json(dir.path());
        fs::write(
            dir.path().join("rentals.csv"),
            "id,name,equipment,date,duration,location,email,status\n\
             99,Only In Csv,Thresher,\"Jan 1, 2026\",2 days,Iloilo,csv@example.com,pending\n",
        )
        .unwrap();

        let provider = FileProvider::new(dir.path());
        let rentals = provider.fetch_rentals().unwrap();
        assert!(rentals.iter().all(|r| r.id != "99"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut rentals = fixtures::demo_rentals();
        let mut copy = rentals[0].clone();
        copy.name = "Shadow".to_string();
        rentals.push(copy);
        fs::write(
            dir.path().join("rentals.json"),
            serde_json::to_string_pretty(&rentals).unwrap(),
        )
        .unwrap();

        let provider = FileProvider::new(dir.path());
        let err = provider.fetch_rentals().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_malformed_json_carries_the_path_in_the_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rentals.json"), "{not json").unwrap();

        let provider = FileProvider::new(dir.path());
        let err = provider.fetch_rentals().unwrap_err();
        assert!(format!("{:#}", err).contains("rentals.json"));
    }
}
