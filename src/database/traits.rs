//! Trait definitions for the database module
//!
//! This module defines the narrow query interface collaborators consume.

use crate::error::Result;
use std::net::IpAddr;

use super::types::GeoLocation;

/// Query interface over an opened IP database
pub trait Database: Send + Sync {
    fn name(&self) -> &str;

    /// Look up IP geolocation information
    ///
    /// Returns `Ok(None)` for address families the database does not cover.
    fn lookup_ip(&self, ip: IpAddr) -> Result<Option<GeoLocation>>;

    /// Human-readable database version string
    fn version(&self) -> Result<String>;
}
