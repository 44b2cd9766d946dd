//! Core types and shared functionality for privrank.
//!
//! This crate provides:
//! - The bounded, time-aware rating cache
//! - The persistence boundary behind it (key-value store trait + SQLite backend)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::sqlite::SqliteStore;
pub use cache::store::{MemoryStore, RatingStore, STORE_KEY};
pub use cache::{CachedRating, ResultCache};
pub use config::AppConfig;
pub use error::Error;
