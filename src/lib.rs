//! qqwry-rs: offline IPv4 geolocation over the QQWry database
//!
//! The core is [`database::QQwryDatabase`], a read-only, memory-mapped reader
//! for the QQWry (cz88.net) format:
//!
//! ```no_run
//! use qqwry::QQwryDatabase;
//!
//! let db = QQwryDatabase::open("qqwry.dat")?;
//! let (area, detail) = db.query("1.2.3.4")?;
//! println!("{} {} ({})", area, detail, db.version()?);
//! # Ok::<(), qqwry::QQwryError>(())
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod utils;

// Re-export common types
pub use error::{QQwryError, Result};

pub use database::{Database, DatabaseManager, GeoLocation, IpRange, QQwryDatabase};
