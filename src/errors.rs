//! Unified error types and result handling.

use thiserror::Error;

/// Errors raised by configuration, storage and seeding.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid environment or seed configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the setting
        message: String,
    },

    /// Storage failure, including constraint violations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A seeding step failed and was rolled back
    #[error("Seeding failed: {message}")]
    Seed {
        /// Which step failed and why
        message: String,
    },

    /// A row that was just written could not be read back
    #[error("Planta not found: {id}")]
    PlantaNotFound {
        /// ID that was looked up
        id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
