//! Error types for the cache
//!
//! Cache operations report absence through `Option`/`bool`; only construction
//! and sweeper control can fail.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected at construction or reschedule time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background sweeper could not be started
    #[error("Failed to start sweeper: {0}")]
    Sweeper(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
