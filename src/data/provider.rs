//! Record provider trait for abstracting where snapshots come from
//!
//! The dashboard only ever renders immutable snapshots. A provider is
//! the single seam that produces them and applies workflow mutations;
//! after a successful mutation the caller refetches and swaps the
//! snapshot rather than editing rows in place.

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::data::fixtures;
use crate::data::loaders;
use crate::data::records::{
    AccountRecord, EquipmentSummary, ProfileUpdate, RentalRecord, RentalStatus, Review,
    UserProfile,
};

/// Minimum length the backend accepts for a new password
pub const MIN_PASSWORD_LEN: usize = 6;

pub trait RecordProvider: Send + Sync + Debug {
    fn fetch_rentals(&self) -> Result<Vec<RentalRecord>>;

    fn fetch_accounts(&self) -> Result<Vec<AccountRecord>>;

    fn fetch_reviews(&self) -> Result<Vec<Review>>;

    fn fetch_equipment(&self) -> Result<Vec<EquipmentSummary>>;

    fn fetch_profile(&self, user_id: &str) -> Result<UserProfile>;

    /// Move a rental to `status`. Callers refetch afterwards.
    fn set_rental_status(&self, rental_id: &str, status: RentalStatus) -> Result<()>;

    fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile>;

    fn change_password(&self, current: &str, new: &str) -> Result<()>;
}

#[derive(Debug)]
struct DemoState {
    rentals: Vec<RentalRecord>,
    accounts: Vec<AccountRecord>,
    reviews: Vec<Review>,
    equipment: Vec<EquipmentSummary>,
    profiles: Vec<UserProfile>,
}

/// In-memory provider over the built-in dataset.
///
/// Mutations update the held collections so the approval and profile
/// workflows are fully exercisable offline. Also serves as the test
/// double for everything above the provider seam.
#[derive(Debug)]
pub struct DemoProvider {
    state: Mutex<DemoState>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DemoState {
                rentals: fixtures::demo_rentals(),
                accounts: fixtures::demo_accounts(),
                reviews: fixtures::demo_reviews(),
                equipment: fixtures::demo_equipment(),
                profiles: fixtures::demo_profiles(),
            }),
        }
    }

    /// Provider with caller-supplied collections, for tests
    pub fn with_data(rentals: Vec<RentalRecord>, accounts: Vec<AccountRecord>) -> Self {
        Self {
            state: Mutex::new(DemoState {
                rentals,
                accounts,
                reviews: Vec::new(),
                equipment: Vec::new(),
                profiles: fixtures::demo_profiles(),
            }),
        }
    }
}

impl RecordProvider for DemoProvider {
    fn fetch_rentals(&self) -> Result<Vec<RentalRecord>> {
        Ok(self.state.lock().unwrap().rentals.clone())
    }

    fn fetch_accounts(&self) -> Result<Vec<AccountRecord>> {
        Ok(self.state.lock().unwrap().accounts.clone())
    }

    fn fetch_reviews(&self) -> Result<Vec<Review>> {
        Ok(self.state.lock().unwrap().reviews.clone())
    }

    fn fetch_equipment(&self) -> Result<Vec<EquipmentSummary>> {
        Ok(self.state.lock().unwrap().equipment.clone())
    }

    fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.state
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
            .with_context(|| format!("no profile for user {}", user_id))
    }

    fn set_rental_status(&self, rental_id: &str, status: RentalStatus) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let rental = state
            .rentals
            .iter_mut()
            .find(|r| r.id == rental_id)
            .with_context(|| format!("no rental with id {}", rental_id))?;

        rental.status = status;
        info!("rental {} moved to {}", rental_id, status.as_str());
        Ok(())
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut state = self.state.lock().unwrap();
        let profile = state
            .profiles
            .iter_mut()
            .find(|p| p.user_id == update.user_id)
            .with_context(|| format!("no profile for user {}", update.user_id))?;

        profile.username = update.username.clone();
        profile.first_name = update.first_name.clone();
        profile.last_name = update.last_name.clone();
        profile.location = update.location.clone();
        info!("profile updated for user {}", update.user_id);
        Ok(profile.clone())
    }

    fn change_password(&self, _current: &str, new: &str) -> Result<()> {
        if new.len() < MIN_PASSWORD_LEN {
            bail!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LEN
            );
        }
        info!("password changed");
        Ok(())
    }
}

/// Read-only provider over JSON or CSV files in a data directory.
///
/// Rentals and accounts are required; reviews, equipment and profiles
/// are picked up when present. Workflow mutations are rejected since
/// there is nothing to write back to.
#[derive(Debug)]
pub struct FileProvider {
    data_dir: PathBuf,
}

impl FileProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn optional<T>(
        &self,
        stem: &str,
        load: impl FnOnce(&std::path::Path) -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        match loaders::find_data_file(&self.data_dir, stem) {
            Some(path) => load(&path),
            None => {
                debug!("no {} file in {}, skipping", stem, self.data_dir.display());
                Ok(Vec::new())
            }
        }
    }
}

impl RecordProvider for FileProvider {
    fn fetch_rentals(&self) -> Result<Vec<RentalRecord>> {
        let path = loaders::find_data_file(&self.data_dir, "rentals").with_context(|| {
            format!(
                "no rentals.json or rentals.csv in {}",
                self.data_dir.display()
            )
        })?;
        loaders::load_rentals(&path)
    }

    fn fetch_accounts(&self) -> Result<Vec<AccountRecord>> {
        let path = loaders::find_data_file(&self.data_dir, "accounts").with_context(|| {
            format!(
                "no accounts.json or accounts.csv in {}",
                self.data_dir.display()
            )
        })?;
        loaders::load_accounts(&path)
    }

    fn fetch_reviews(&self) -> Result<Vec<Review>> {
        self.optional("reviews", loaders::load_reviews)
    }

    fn fetch_equipment(&self) -> Result<Vec<EquipmentSummary>> {
        self.optional("equipment", loaders::load_equipment)
    }

    fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        let profiles = self.optional("profiles", loaders::load_profiles)?;
        profiles
            .into_iter()
            .find(|p| p.user_id == user_id)
            .with_context(|| format!("no profile for user {}", user_id))
    }

    fn set_rental_status(&self, _rental_id: &str, _status: RentalStatus) -> Result<()> {
        bail!("file-backed data is read-only")
    }

    fn update_profile(&self, _update: &ProfileUpdate) -> Result<UserProfile> {
        bail!("file-backed data is read-only")
    }

    fn change_password(&self, _current: &str, _new: &str) -> Result<()> {
        bail!("file-backed data is read-only")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_status_change_survives_a_refetch() {
        let provider = DemoProvider::new();
        provider
            .set_rental_status("1", RentalStatus::Approved)
            .unwrap();

        let rentals = provider.fetch_rentals().unwrap();
        let rental = rentals.iter().find(|r| r.id == "1").unwrap();
        assert_eq!(rental.status, RentalStatus::Approved);
    }

    #[test]
    fn unknown_rental_id_is_an_error() {
        let provider = DemoProvider::new();
        let err = provider
            .set_rental_status("nope", RentalStatus::Approved)
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn demo_profile_update_is_returned_and_stored() {
        let provider = DemoProvider::new();
        let update = ProfileUpdate {
            user_id: "1".to_string(),
            username: "johnd".to_string(),
            first_name: "Johnny".to_string(),
            last_name: "Doe".to_string(),
            location: "Davao".to_string(),
        };

        let saved = provider.update_profile(&update).unwrap();
        assert_eq!(saved.first_name, "Johnny");
        // Email is not part of the update payload
        assert_eq!(saved.email, "john.doe@example.com");

        let fetched = provider.fetch_profile("1").unwrap();
        assert_eq!(fetched.location, "Davao");
    }

    #[test]
    fn short_passwords_are_rejected() {
        let provider = DemoProvider::new();
        assert!(provider.change_password("old", "12345").is_err());
        assert!(provider.change_password("old", "123456").is_ok());
    }

    #[test]
    fn file_provider_rejects_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileProvider::new(dir.path());
        assert!(provider
            .set_rental_status("1", RentalStatus::Approved)
            .is_err());
        assert!(provider.change_password("a", "b").is_err());
    }

    #[test]
    fn file_provider_requires_a_rentals_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileProvider::new(dir.path());
        let err = provider.fetch_rentals().unwrap_err();
        assert!(err.to_string().contains("rentals"));
    }
}
