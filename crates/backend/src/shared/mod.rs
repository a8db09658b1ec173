pub mod api_client;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod listing;
pub mod state;
