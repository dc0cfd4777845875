pub mod api;
pub mod config;
pub mod search;
pub mod state;
