//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiration sweeper: removes expired cache entries at a fixed period

mod sweeper;

pub use sweeper::Sweeper;
