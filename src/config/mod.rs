/// Database connection and schema management
pub mod database;

/// Seed catalog loading from config.toml
pub mod seed;

/// Server settings from environment variables
pub mod server;

pub use seed::SeedConfig;
pub use server::ServerConfig;
