pub mod api_client;
pub mod classic;
pub mod config;
pub mod data;
pub mod logging;
pub mod ui;
pub mod utils;
