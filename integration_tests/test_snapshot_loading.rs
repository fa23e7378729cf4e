use std::fs;

use agrodash::data::fixtures;
use agrodash::data::provider::{FileProvider, RecordProvider};
use agrodash::data::table_view::{StatusFilter, TableView};

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("agrodash-snapshots-{}", std::process::id()));
    fs::create_dir_all(&dir)?;

    // Seed a data directory with one JSON and one CSV collection
    fs::write(
        dir.join("rentals.json"),
        serde_json::to_string_pretty(&fixtures::demo_rentals())?,
    )?;
    let mut accounts_csv = String::from("id,name,email,date,location,role\n");
    for account in fixtures::demo_accounts() {
        accounts_csv.push_str(&format!(
            "{},{},{},\"{}\",{},{}\n",
            account.id,
            account.name,
            account.email,
            account.date,
            account.location,
            account.role.as_str()
        ));
    }
    fs::write(dir.join("accounts.csv"), accounts_csv)?;

    let provider = FileProvider::new(&dir);

    let rentals = provider.fetch_rentals()?;
    println!("Loaded {} rentals from JSON", rentals.len());
    assert_eq!(rentals, fixtures::demo_rentals());

    let accounts = provider.fetch_accounts()?;
    println!("Loaded {} accounts from CSV", accounts.len());
    assert_eq!(accounts, fixtures::demo_accounts());

    // Optional collections are absent and come back empty
    assert!(provider.fetch_reviews()?.is_empty());
    assert!(provider.fetch_equipment()?.is_empty());
    println!("Optional collections fell back to empty");

    // Mutations are rejected for file-backed data
    let err = provider
        .set_rental_status("1", agrodash::data::records::RentalStatus::Approved)
        .unwrap_err();
    println!("Mutation rejected as expected: {}", err);

    // Paging over the loaded snapshot behaves like the in-memory one
    let mut view = TableView::new(rentals);
    println!("{}", view.entries_summary());
    assert_eq!(view.total_pages(), 2);

    view.set_filter(StatusFilter::Pending);
    println!(
        "Pending filter leaves {} rentals ({})",
        view.filtered_len(),
        view.entries_summary()
    );
    assert!(view.filtered_len() > 0);

    view.set_search("manila");
    println!("\"manila\" search leaves {} rentals", view.filtered_len());
    for rental in view.filtered() {
        assert!(rental.location.to_lowercase().contains("manila"));
    }

    fs::remove_dir_all(&dir)?;
    println!("\nAll snapshot loading checks passed");
    Ok(())
}
