//! Configuration module
//!
//! Settings that survive between runs: display preferences, data
//! sources and workflow behavior.

pub mod config;
