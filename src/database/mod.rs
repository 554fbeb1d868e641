//! Database module for qqwry-rs
//!
//! # Module Organization
//!
//! - `types`: Result types (GeoLocation, IpRange)
//! - `traits`: The `Database` query trait
//! - `manager`: Shared handle management and reloads
//! - `qqwry`: The QQwry reader

// Core modules
pub mod types;
pub mod traits;
pub mod manager;

// Database implementation modules
pub mod qqwry;

// Re-export core types and traits for convenience
pub use types::{GeoLocation, IpRange};
pub use traits::Database;
pub use manager::DatabaseManager;

pub use qqwry::QQwryDatabase;
