//! Database manager - owns the shared reader handle

use crate::config::AppConfig;
use crate::database::{Database, GeoLocation, QQwryDatabase};
use crate::error::{QQwryError, Result};
use std::net::IpAddr;
use std::sync::{Arc, RwLock};

/// Database manager handles loading and sharing of the database
///
/// The database is opened on first use and handed out as `Arc` clones, so
/// every caller reads from the same mapping.
///
/// # Reloads
///
/// [`DatabaseManager::reload`] opens a brand-new reader and swaps it in.
/// Lookups that already hold the previous `Arc` keep reading the old mapping
/// until they drop it.
pub struct DatabaseManager {
    config: AppConfig,
    database: RwLock<Option<Arc<QQwryDatabase>>>,
}

impl DatabaseManager {
    /// Create a new database manager with configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            database: RwLock::new(None),
        }
    }

    /// Create a manager around an already opened database
    pub fn with_database(config: AppConfig, database: QQwryDatabase) -> Self {
        Self {
            config,
            database: RwLock::new(Some(Arc::new(database))),
        }
    }

    /// Get the shared database, opening it on first use
    pub fn handle(&self) -> Result<Arc<QQwryDatabase>> {
        {
            let db = self
                .database
                .read()
                .map_err(|e| QQwryError::Other(format!("Failed to acquire read lock: {}", e)))?;
            if let Some(db) = db.as_ref() {
                return Ok(Arc::clone(db));
            }
        }

        let mut slot = self
            .database
            .write()
            .map_err(|e| QQwryError::Other(format!("Failed to acquire write lock: {}", e)))?;

        // Another caller may have loaded it while we waited
        if let Some(db) = slot.as_ref() {
            return Ok(Arc::clone(db));
        }

        let db = Arc::new(self.open_database()?);
        *slot = Some(Arc::clone(&db));
        Ok(db)
    }

    /// Replace the shared database with a freshly opened reader
    pub fn reload(&self) -> Result<Arc<QQwryDatabase>> {
        let db = Arc::new(self.open_database()?);

        let mut slot = self
            .database
            .write()
            .map_err(|e| QQwryError::Other(format!("Failed to acquire write lock: {}", e)))?;
        *slot = Some(Arc::clone(&db));

        log::info!("Database reloaded: {} records", db.total_entries());
        Ok(db)
    }

    pub fn is_loaded(&self) -> bool {
        self.database
            .read()
            .map(|db| db.is_some())
            .unwrap_or(false)
    }

    /// Query a dotted-quad address, returning (area, detail)
    pub fn query(&self, ip: &str) -> Result<(String, String)> {
        self.handle()?.query(ip)
    }

    /// Query IP geolocation
    ///
    /// * `Ok(Some(GeoLocation))` - IPv4 address resolved
    /// * `Ok(None)` - address family not covered (IPv6)
    /// * `Err(QQwryError)` - database missing or record corrupt
    pub fn query_ip(&self, ip: IpAddr) -> Result<Option<GeoLocation>> {
        self.handle()?.lookup_ip(ip)
    }

    fn open_database(&self) -> Result<QQwryDatabase> {
        let db_path = self.config.get_database_path()?;

        if !db_path.exists() {
            return Err(QQwryError::DatabaseNotFound(format!(
                "{}\nHint: pass --dbpath, set QQWRY_DB_PATH, or set database.path in config.yaml",
                db_path.display()
            )));
        }

        QQwryDatabase::open(&db_path)
    }
}
