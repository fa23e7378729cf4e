use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a rental request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Approved,
    Rejected,
}

impl RentalStatus {
    /// Wire value used by the backend and by exports
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Approved => "approved",
            RentalStatus::Rejected => "rejected",
        }
    }

    /// Human-readable label, always derived from the enum so the two
    /// can never drift apart
    pub fn label(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "Pending",
            RentalStatus::Approved => "Approved",
            RentalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(RentalStatus::Pending),
            "approved" => Ok(RentalStatus::Approved),
            "rejected" => Ok(RentalStatus::Rejected),
            other => Err(anyhow::anyhow!("Unknown rental status: {}", other)),
        }
    }
}

/// Marketplace role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Lender,
    Renter,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Lender => "lender",
            AccountRole::Renter => "renter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::Admin => "Admin",
            AccountRole::Lender => "Lender",
            AccountRole::Renter => "Renter",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(AccountRole::Admin),
            "lender" => Ok(AccountRole::Lender),
            "renter" => Ok(AccountRole::Renter),
            other => Err(anyhow::anyhow!("Unknown account role: {}", other)),
        }
    }
}

/// One rental request as the dashboard receives it from the backend.
///
/// All scalar fields are the backend's display strings; the dashboard
/// never reformats them. `id` is unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub id: String,
    /// Renter's display name
    pub name: String,
    pub equipment: String,
    pub date: String,
    pub duration: String,
    pub location: String,
    pub email: String,
    pub status: RentalStatus,
}

impl RentalRecord {
    /// Label shown in the status column
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// One user account row (admin view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Sign-up date as a display string
    pub date: String,
    pub location: String,
    pub role: AccountRole,
}

impl AccountRecord {
    pub fn role_label(&self) -> &'static str {
        self.role.label()
    }
}

/// A recent equipment review shown on the overview panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: String,
    /// Star rating, 0-5
    pub rating: u8,
    pub comment: String,
}

/// Summary card for a lender's listed equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub name: String,
    pub maker: String,
    pub owner: String,
    pub delivery: String,
    pub description: String,
    pub rating: f32,
    pub rented_count: u32,
    /// Daily rate in PHP
    pub daily_rate: u32,
}

/// Profile fields for a signed-in user. Email is read-only on the
/// profile screen; everything else is editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
}

impl UserProfile {
    /// Initials for the avatar fallback, e.g. "JD" for John Doe
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        match (first, last) {
            (Some(f), Some(l)) => format!("{}{}", f, l).to_uppercase(),
            (Some(f), None) => f.to_uppercase().to_string(),
            _ => self
                .email
                .chars()
                .take(2)
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

/// Editable subset of the profile sent to the provider on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
}

/// Role of the signed-in session. Farmers have no table screens and
/// land on their profile, matching how the platform routes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Admin,
    Lender,
    Farmer,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Admin => "admin",
            SessionRole::Lender => "lender",
            SessionRole::Farmer => "farmer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionRole::Admin => "Admin",
            SessionRole::Lender => "Lender",
            SessionRole::Farmer => "Farmer",
        }
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(SessionRole::Admin),
            "lender" => Ok(SessionRole::Lender),
            "farmer" => Ok(SessionRole::Farmer),
            other => Err(anyhow::anyhow!("Unknown session role: {}", other)),
        }
    }
}

/// Identity of the signed-in user, passed explicitly to every screen
/// that needs it. There is no ambient session lookup anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub user_id: String,
    pub username: String,
    pub role: SessionRole,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, role: SessionRole) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_follow_the_enum() {
        assert_eq!(RentalStatus::Pending.label(), "Pending");
        assert_eq!(RentalStatus::Approved.label(), "Approved");
        assert_eq!(RentalStatus::Rejected.label(), "Rejected");
        assert_eq!(AccountRole::Renter.label(), "Renter");
    }

    #[test]
    fn status_serializes_as_lowercase_wire_value() {
        let json = serde_json::to_string(&RentalStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");

        let back: RentalStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(back, RentalStatus::Pending);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<RentalStatus, _> = serde_json::from_str("\"archived\"");
        assert!(result.is_err());

        assert!("archived".parse::<RentalStatus>().is_err());
    }

    #[test]
    fn profile_initials_fall_back_to_email() {
        let mut profile = UserProfile {
            user_id: "u1".into(),
            username: "jdoe".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            location: "Manila".into(),
        };
        assert_eq!(profile.initials(), "JD");

        profile.first_name.clear();
        profile.last_name.clear();
        assert_eq!(profile.initials(), "JO");
    }
}
