use std::fs;

use agrodash::data::export::{write_export, ExportFormat};
use agrodash::data::fixtures;
use agrodash::data::table_view::{DashboardTable, StatusFilter, TableView};

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("agrodash-exports-{}", std::process::id()));
    fs::create_dir_all(&dir)?;

    let mut view = TableView::new(fixtures::demo_rentals());
    view.set_filter(StatusFilter::Pending);
    let expected_rows = view.filtered_len();
    let table = DashboardTable::Rentals(view);

    // CSV: one header line plus one line per filtered row
    let csv_path = write_export(&table, ExportFormat::Csv, &dir)?
        .expect("pending rentals exist in the demo data");
    println!("CSV export: {}", csv_path.display());
    let csv_contents = fs::read_to_string(&csv_path)?;
    println!("--- first lines ---");
    for line in csv_contents.lines().take(3) {
        println!("{}", line);
    }
    assert_eq!(csv_contents.lines().count(), expected_rows + 1);
    assert!(csv_contents.starts_with("id,name,equipment,date"));

    // JSON: an array of flat objects with the same field subset
    let json_path = write_export(&table, ExportFormat::Json, &dir)?
        .expect("pending rentals exist in the demo data");
    println!("\nJSON export: {}", json_path.display());
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(parsed.len(), expected_rows);
    for object in &parsed {
        assert_eq!(object["status"], "pending");
    }
    println!("Parsed {} JSON objects back", parsed.len());

    // An empty filtered set writes nothing
    let empty = DashboardTable::Accounts(TableView::new(Vec::new()));
    let written = write_export(&empty, ExportFormat::Csv, &dir)?;
    assert!(written.is_none());
    println!("Empty set skipped as expected");

    // Unknown formats fail at the parse boundary
    let err = "xlsx".parse::<ExportFormat>().unwrap_err();
    println!("Unknown format rejected: {}", err);

    fs::remove_dir_all(&dir)?;
    println!("\nAll export format checks passed");
    Ok(())
}
