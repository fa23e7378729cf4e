use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde_json::Value;
use tracing::{info, warn};

use crate::data::table_view::DashboardTable;

/// Output format for a table export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => bail!("unsupported export format: {}", other),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Quote a CSV field if it contains a comma, quote or newline,
/// doubling any embedded quotes
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header.join(","));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_csv_field(cell)).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

fn render_json(header: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let objects: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (field, value) in header.iter().zip(row) {
                object.insert(field.to_string(), Value::String(value.clone()));
            }
            Value::Object(object)
        })
        .collect();

    serde_json::to_string_pretty(&objects).context("failed to serialize export")
}

/// Date-stamped filename, e.g. "rentals-export-2025-12-01.csv"
pub fn export_filename(subject: &str, format: ExportFormat) -> String {
    format!(
        "{}-export-{}.{}",
        subject,
        Local::now().format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write the table's full filtered set to `dir`.
///
/// Every filtered row goes out, not just the current page. An empty
/// filtered set writes nothing and returns `Ok(None)`.
pub fn write_export(
    table: &DashboardTable,
    format: ExportFormat,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let (header, rows) = table.export_rows();

    if rows.is_empty() {
        warn!("no {} to export, skipping", table.entity_noun());
        return Ok(None);
    }

    let contents = match format {
        ExportFormat::Csv => render_csv(header, &rows),
        ExportFormat::Json => render_json(header, &rows)?,
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_filename(table.entity_noun(), format));
    fs::write(&path, contents)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    info!(
        "exported {} {} to {}",
        rows.len(),
        table.entity_noun(),
        path.display()
    );

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{RentalRecord, RentalStatus};
    use crate::data::table_view::TableView;

    fn sample_table() -> DashboardTable {
        DashboardTable::Rentals(TableView::new(vec![RentalRecord {
            id: "r1".to_string(),
            name: "Doe, John".to_string(),
            equipment: "Tractor \"X200\"".to_string(),
            date: "Dec 1, 2025".to_string(),
            duration: "3 days".to_string(),
            location: "Manila".to_string(),
            email: "john@example.com".to_string(),
            status: RentalStatus::Pending,
        }]))
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("Doe, John"), "\"Doe, John\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn csv_export_quotes_awkward_fields() {
        let table = sample_table();
        let (header, rows) = table.export_rows();
        let csv = render_csv(header, &rows);

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,equipment,date,duration,location,email,status")
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\"Doe, John\""));
        assert!(row.contains("\"Tractor \"\"X200\"\"\""));
        assert!(row.ends_with(",pending"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_export_holds_the_field_subset() {
        let table = sample_table();
        let (header, rows) = table.export_rows();
        let json = render_json(header, &rows).unwrap();

        let parsed: Vec<serde_json::Map<String, Value>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        let object = &parsed[0];
        assert_eq!(object.len(), 8);
        assert_eq!(object["status"], Value::String("pending".to_string()));
        assert_eq!(object["name"], Value::String("Doe, John".to_string()));
        assert!(!object.contains_key("rating"));
    }

    #[test]
    fn empty_filtered_set_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = DashboardTable::Rentals(TableView::new(vec![]));

        let written = write_export(&table, ExportFormat::Csv, dir.path()).unwrap();

        assert!(written.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn filename_carries_subject_and_date() {
        let name = export_filename("rentals", ExportFormat::Json);
        assert!(name.starts_with("rentals-export-"));
        assert!(name.ends_with(".json"));

        let stamp = Local::now().format("%Y-%m-%d").to_string();
        assert!(name.contains(&stamp));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!("xml".parse::<ExportFormat>().is_err());
        assert!("CSV".parse::<ExportFormat>().is_ok());
    }
}
