pub mod api;
pub mod config;
pub mod error;
pub mod fleet;
pub mod models;
pub mod observability;
pub mod render;
pub mod state;
pub mod store;
