/// Database configuration and connection management
pub mod database;

/// Typed application settings loaded from config.toml
pub mod settings;

/// Deposit wallet seed list from config.toml
pub mod wallets;
