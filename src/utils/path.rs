//! Locations of the config file and the default database
//!
//! Nothing here touches the filesystem. The config directory is created by
//! [`AppConfig::save`](crate::config::AppConfig::save) when it first writes the
//! defaults; the data directory is only ever read from.

use crate::error::{QQwryError, Result};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "qqwry-rs";

/// First set variable among `vars`, else `base/qqwry-rs`
fn resolve_dir<F>(vars: &[&str], lookup: F, base: Option<PathBuf>) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter()
        .find_map(|var| lookup(var).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .or_else(|| base.map(|dir| dir.join(APP_DIR)))
}

fn env_lookup(var: &str) -> Option<String> {
    env::var(var).ok()
}

/// Path to `config.yaml`
///
/// `QQWRY_CONFIG_HOME`, then `QQWRY_HOME`, then the platform config dir.
pub fn config_file() -> Result<PathBuf> {
    resolve_dir(&["QQWRY_CONFIG_HOME", "QQWRY_HOME"], env_lookup, dirs::config_dir())
        .map(|dir| dir.join("config.yaml"))
        .ok_or_else(|| QQwryError::config("Unable to determine config directory"))
}

/// Default location of the database file `name`
///
/// `QQWRY_DB_HOME`, then `QQWRY_HOME`, then the platform data dir.
pub fn database_file(name: &str) -> Result<PathBuf> {
    resolve_dir(&["QQWRY_DB_HOME", "QQWRY_HOME"], env_lookup, dirs::data_dir())
        .map(|dir| dir.join(name))
        .ok_or_else(|| QQwryError::config("Unable to determine data directory"))
}

/// Expand a leading `~/` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
