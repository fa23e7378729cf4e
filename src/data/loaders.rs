//! Snapshot loaders for file-backed data.
//!
//! A data directory holds one file per collection (`rentals.json`,
//! `accounts.csv`, ...). JSON is an array of objects, CSV a headered
//! table; both deserialize into the same record structs.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::data::records::{AccountRecord, EquipmentSummary, RentalRecord, Review, UserProfile};

/// Locate `<stem>.json` or `<stem>.csv` in `dir`, JSON preferred
pub fn find_data_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    for ext in ["json", "csv"] {
        let candidate = dir.join(format!("{}.{}", stem, ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: T =
            row.with_context(|| format!("failed to parse row in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Dispatch on extension; anything but .json/.csv is rejected
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!("unsupported data file: {}", path.display()),
    }
}

fn check_unique_ids<'a>(ids: impl Iterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate {} id: {}", what, id);
        }
    }
    Ok(())
}

pub fn load_rentals(path: &Path) -> Result<Vec<RentalRecord>> {
    let rentals: Vec<RentalRecord> = load_records(path)?;
    check_unique_ids(rentals.iter().map(|r| r.id.as_str()), "rental")?;
    info!("loaded {} rentals from {}", rentals.len(), path.display());
    Ok(rentals)
}

pub fn load_accounts(path: &Path) -> Result<Vec<AccountRecord>> {
    let accounts: Vec<AccountRecord> = load_records(path)?;
    check_unique_ids(accounts.iter().map(|a| a.id.as_str()), "account")?;
    info!("loaded {} accounts from {}", accounts.len(), path.display());
    Ok(accounts)
}

pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    load_records(path)
}

pub fn load_equipment(path: &Path) -> Result<Vec<EquipmentSummary>> {
    load_records(path)
}

pub fn load_profiles(path: &Path) -> Result<Vec<UserProfile>> {
    load_records(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::RentalStatus;
    use std::fs;

    const RENTALS_JSON: &str = r#"[
        {
            "id": "r1",
            "name": "John Doe",
            "equipment": "Tractor X200",
            "date": "Dec 1, 2025",
            "duration": "3 days",
            "location": "Manila",
            "email": "john.doe@example.com",
            "status": "pending"
        }
    ]"#;

    const ACCOUNTS_CSV: &str = "\
id,name,email,date,location,role
a1,Jane Smith,jane.smith@example.com,\"Feb 20, 2024\",Cebu,renter
a2,Admin User,admin@agroecom.com,\"Jan 1, 2024\",Manila,admin
";

    #[test]
    fn json_rentals_load_with_typed_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentals.json");
        fs::write(&path, RENTALS_JSON).unwrap();

        let rentals = load_rentals(&path).unwrap();
        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].status, RentalStatus::Pending);
        assert_eq!(rentals[0].equipment, "Tractor X200");
    }

    #[test]
    fn csv_accounts_load_with_typed_role() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        fs::write(&path, ACCOUNTS_CSV).unwrap();

        let accounts = load_accounts(&path).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].date, "Feb 20, 2024");
        assert_eq!(accounts[1].role.as_str(), "admin");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        fs::write(
            &path,
            "id,name,email,date,location,role\n\
             a1,A,a@x.com,\"Jan 1, 2024\",Manila,admin\n\
             a1,B,b@x.com,\"Jan 2, 2024\",Cebu,renter\n",
        )
        .unwrap();

        let err = load_accounts(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate account id: a1"));
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentals.xml");
        fs::write(&path, "<rentals/>").unwrap();
        assert!(load_rentals(&path).is_err());
    }

    #[test]
    fn json_is_preferred_over_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rentals.json"), RENTALS_JSON).unwrap();
        fs::write(dir.path().join("rentals.csv"), "id\n").unwrap();

        let found = find_data_file(dir.path(), "rentals").unwrap();
        assert_eq!(found.extension().unwrap(), "json");
    }
}
