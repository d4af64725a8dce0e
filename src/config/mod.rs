/// Database configuration and connection management
pub mod database;

/// Application settings read from environment variables
pub mod app;

/// Subject and schedule seeding from config.toml
pub mod seed;
