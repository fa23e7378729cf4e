//! Built-in demo dataset.
//!
//! Used by demo mode and by tests that want a realistic snapshot
//! without touching the filesystem or the network. The rental set is
//! deliberately larger than one page so pagination is visible out of
//! the box.

use crate::data::records::{
    AccountRecord, AccountRole, EquipmentSummary, RentalRecord, RentalStatus, Review, UserProfile,
    SessionRole, UserSession,
};

fn rental(
    id: &str,
    name: &str,
    equipment: &str,
    date: &str,
    duration: &str,
    location: &str,
    email: &str,
    status: RentalStatus,
) -> RentalRecord {
    RentalRecord {
        id: id.to_string(),
        name: name.to_string(),
        equipment: equipment.to_string(),
        date: date.to_string(),
        duration: duration.to_string(),
        location: location.to_string(),
        email: email.to_string(),
        status,
    }
}

fn account(
    id: &str,
    name: &str,
    email: &str,
    date: &str,
    location: &str,
    role: AccountRole,
) -> AccountRecord {
    AccountRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        date: date.to_string(),
        location: location.to_string(),
        role,
    }
}

pub fn demo_rentals() -> Vec<RentalRecord> {
    use RentalStatus::*;
    vec![
        rental(
            "1",
            "John Doe",
            "Tractor X200",
            "Dec 1, 2025",
            "3 days",
            "Manila",
            "john.doe@example.com",
            Pending,
        ),
        rental(
            "2",
            "Doe John",
            "Tractor X200",
            "Dec 5, 2025",
            "3 days",
            "Manila",
            "doe.johm@example.com",
            Pending,
        ),
        rental(
            "3",
            "Maria Santos",
            "Rice Harvester Pro",
            "Dec 8, 2025",
            "1 week",
            "Ormoc City",
            "maria.santos@example.com",
            Approved,
        ),
        rental(
            "4",
            "Pedro Reyes",
            "Hand Tractor",
            "Dec 10, 2025",
            "2 days",
            "Cebu",
            "pedro.reyes@example.com",
            Approved,
        ),
        rental(
            "5",
            "Liza Cruz",
            "Water Pump Set",
            "Dec 12, 2025",
            "5 days",
            "Iloilo",
            "liza.cruz@example.com",
            Rejected,
        ),
        rental(
            "6",
            "Ramon Bautista",
            "Disc Plow",
            "Dec 14, 2025",
            "4 days",
            "Davao",
            "ramon.bautista@example.com",
            Pending,
        ),
        rental(
            "7",
            "Ana Villanueva",
            "Combine Harvester CH-5",
            "Dec 16, 2025",
            "1 week",
            "Tagum",
            "ana.villanueva@example.com",
            Approved,
        ),
        rental(
            "8",
            "Carlos Mendoza",
            "Seed Drill",
            "Dec 18, 2025",
            "2 days",
            "Bacolod",
            "carlos.mendoza@example.com",
            Pending,
        ),
        rental(
            "9",
            "Grace Lim",
            "Boom Sprayer",
            "Dec 20, 2025",
            "3 days",
            "Quezon City",
            "grace.lim@example.com",
            Rejected,
        ),
        rental(
            "10",
            "Miguel Torres",
            "Rotavator",
            "Dec 22, 2025",
            "6 days",
            "Baguio",
            "miguel.torres@example.com",
            Approved,
        ),
        rental(
            "11",
            "Elena Garcia",
            "Rice Harvester Pro",
            "Dec 24, 2025",
            "1 week",
            "Ormoc City",
            "elena.garcia@example.com",
            Pending,
        ),
        rental(
            "12",
            "Nestor Aquino",
            "Hand Tractor",
            "Dec 28, 2025",
            "2 days",
            "Leyte",
            "nestor.aquino@example.com",
            Approved,
        ),
    ]
}

pub fn demo_accounts() -> Vec<AccountRecord> {
    use AccountRole::*;
    vec![
        account(
            "1",
            "John Doe",
            "john.doe@example.com",
            "Jan 15, 2024",
            "Manila",
            Lender,
        ),
        account(
            "2",
            "Jane Smith",
            "jane.smith@example.com",
            "Feb 20, 2024",
            "Cebu",
            Renter,
        ),
        account(
            "3",
            "Admin User",
            "admin@agroecom.com",
            "Jan 1, 2024",
            "Manila",
            Admin,
        ),
        account(
            "4",
            "Maria Santos",
            "maria.santos@example.com",
            "Mar 3, 2024",
            "Ormoc City",
            Renter,
        ),
        account(
            "5",
            "Pedro Reyes",
            "pedro.reyes@example.com",
            "Mar 18, 2024",
            "Cebu",
            Renter,
        ),
        account(
            "6",
            "AgriTech Solutions",
            "contact@agritech.example.com",
            "Apr 2, 2024",
            "Ormoc City",
            Lender,
        ),
        account(
            "7",
            "Ramon Bautista",
            "ramon.bautista@example.com",
            "May 11, 2024",
            "Davao",
            Renter,
        ),
        account(
            "8",
            "Grace Lim",
            "grace.lim@example.com",
            "Jun 25, 2024",
            "Quezon City",
            Lender,
        ),
    ]
}

pub fn demo_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".to_string(),
            name: "Maria Santos".to_string(),
            location: "Ormoc City".to_string(),
            date: "Dec 15, 2025".to_string(),
            rating: 5,
            comment: "Harvester was in great shape and the pickup was painless.".to_string(),
        },
        Review {
            id: "2".to_string(),
            name: "Pedro Reyes".to_string(),
            location: "Cebu".to_string(),
            date: "Dec 12, 2025".to_string(),
            rating: 4,
            comment: "Hand tractor did the job, delivery arrived an hour late.".to_string(),
        },
        Review {
            id: "3".to_string(),
            name: "Ana Villanueva".to_string(),
            location: "Tagum".to_string(),
            date: "Dec 18, 2025".to_string(),
            rating: 5,
            comment: "Second rental from this lender, still excellent.".to_string(),
        },
    ]
}

pub fn demo_equipment() -> Vec<EquipmentSummary> {
    vec![
        EquipmentSummary {
            name: "Rice Harvester Pro".to_string(),
            maker: "LOVOL".to_string(),
            owner: "AgriTech Solutions".to_string(),
            delivery: "Pickup / Deliver within Ormoc City".to_string(),
            description: "High-performance rice harvester suitable for all rice field sizes."
                .to_string(),
            rating: 4.5,
            rented_count: 1250,
            daily_rate: 2500,
        },
        EquipmentSummary {
            name: "Tractor X200".to_string(),
            maker: "Kubota".to_string(),
            owner: "John Doe".to_string(),
            delivery: "Pickup only, Manila".to_string(),
            description: "Mid-size utility tractor with tiller attachment.".to_string(),
            rating: 4.2,
            rented_count: 340,
            daily_rate: 1800,
        },
        EquipmentSummary {
            name: "Hand Tractor".to_string(),
            maker: "Yanmar".to_string(),
            owner: "Grace Lim".to_string(),
            delivery: "Deliver within Metro Manila".to_string(),
            description: "Walk-behind tractor for small paddies.".to_string(),
            rating: 4.0,
            rented_count: 520,
            daily_rate: 750,
        },
    ]
}

pub fn demo_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile {
            user_id: "1".to_string(),
            username: "johndoe".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            location: "Manila".to_string(),
        },
        UserProfile {
            user_id: "2".to_string(),
            username: "janesmith".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            location: "Cebu".to_string(),
        },
        UserProfile {
            user_id: "3".to_string(),
            username: "admin".to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: "admin@agroecom.com".to_string(),
            location: "Manila".to_string(),
        },
    ]
}

/// Session for a demo run, tied to the matching demo profile
pub fn demo_session(role: SessionRole) -> UserSession {
    match role {
        SessionRole::Admin => UserSession::new("3", "Admin User", role),
        SessionRole::Lender => UserSession::new("1", "John Doe", role),
        SessionRole::Farmer => UserSession::new("2", "Jane Smith", role),
    }
}
