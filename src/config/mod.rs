/// Application settings and sample data from config.toml
pub mod app;

/// Database connection and table creation
pub mod database;

/// Local user profile from environment variables
pub mod profile;

pub use app::{AppConfig, load_app_configuration};
