//! Utility modules

pub mod encoding;
pub mod path;
