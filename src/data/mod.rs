//! Data layer for the dashboard.
//!
//! Records are plain structs, snapshots are immutable `Vec`s of them,
//! and everything above this layer works through `TableView` and the
//! `RecordProvider` seam.

pub mod export;
pub mod fixtures;
pub mod loaders;
pub mod provider;
pub mod records;
pub mod table_view;
