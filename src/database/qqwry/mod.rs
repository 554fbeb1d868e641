//! QQwry database implementation
//!
//! This module implements support for the QQwry IPv4 database format,
//! which is the most commonly used Chinese IP geolocation database.
//!
//! File layout:
//!
//! ```text
//! [idx_start: u32][idx_end: u32]      header, little-endian
//! [end ip: u32][labels] ...           record area
//! [start ip: u32][record: u24] ...    index, sorted by start ip
//! ```

mod database;
mod index;
mod reader;
mod storage;
mod utils;

#[cfg(test)]
pub(crate) mod testutil;

pub use database::{Entries, QQwryDatabase};
pub use index::{Index, INDEX_ENTRY_LEN};
pub use reader::{RawLabel, Reader, MAX_REDIRECT_DEPTH, NOT_AVAILABLE};
pub use storage::Storage;
