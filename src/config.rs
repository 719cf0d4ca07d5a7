//! Configuration Module
//!
//! Cache parameters, with an optional loader for hosts that configure through
//! environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{DEFAULT_CHECK_INTERVAL, INFINITE_TTL};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Both values are fixed once a cache is built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// TTL applied when `set` is called without one; zero means never expire
    pub default_ttl: Duration,
    /// Period between background expiration sweeps
    pub check_interval: Duration,
}

impl Config {
    /// Creates a config from explicit values.
    pub fn new(default_ttl: Duration, check_interval: Duration) -> Self {
        Self {
            default_ttl,
            check_interval,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds, 0 = infinite (default: 0)
    /// - `CACHE_CHECK_INTERVAL` - Sweep interval in seconds (default: 600)
    pub fn from_env() -> Self {
        Self {
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(INFINITE_TTL),
            check_interval: env::var("CACHE_CHECK_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CHECK_INTERVAL),
        }
    }

    /// Rejects a zero `check_interval`.
    pub fn validate(&self) -> Result<()> {
        validate_check_interval(self.check_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: INFINITE_TTL,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

pub(crate) fn validate_check_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(CacheError::InvalidConfig(
            "check_interval must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
