//! Type definitions for the database module
//!
//! This module contains the result types handed to collaborators.

use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

/// Geolocation result for a single address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoLocation {
    pub ip: IpAddr,
    pub country: Option<String>,
    pub isp: Option<String>,
}

/// One index entry materialized as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
    pub area: String,
    pub detail: String,
}
