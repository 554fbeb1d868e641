//! QQwry database implementation core

use crate::database::{Database, GeoLocation, IpRange};
use crate::error::{QQwryError, Result};
use crate::utils::encoding::gbk_to_utf8;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use super::index::Index;
use super::reader::Reader;
use super::storage::Storage;

/// Filler text the database appends to labels with no real detail
const CZ88_FILLER: &str = "CZ88.NET";

/// QQwry database implementation
///
/// Immutable after construction; share it behind an `Arc` to serve
/// concurrent lookups from a single mapping.
pub struct QQwryDatabase {
    name: String,
    storage: Storage,
    index: Index,
}

impl QQwryDatabase {
    /// Open and memory map a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading QQwry database from: {}", path.display());

        let db = Self::with_storage(Storage::open(path)?)?;
        log::info!(
            "Successfully loaded QQwry database: {} records",
            db.total_entries()
        );
        Ok(db)
    }

    /// Build a database over an in-memory copy of the file
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_storage(Storage::from_bytes(data)?)
    }

    fn with_storage(storage: Storage) -> Result<Self> {
        let index = Index::from_header(&storage)?;
        Ok(Self {
            name: "qqwry".to_string(),
            storage,
            index,
        })
    }

    /// Number of index entries
    pub fn total_entries(&self) -> u32 {
        self.index.total_entries()
    }

    /// Index of the entry whose range could contain `ip`
    pub fn find(&self, ip: u32) -> Result<u32> {
        self.index.find(&self.storage, ip)
    }

    /// Look up a dotted-quad address, returning (area, detail)
    pub fn query(&self, ip: &str) -> Result<(String, String)> {
        let addr: Ipv4Addr = ip
            .trim()
            .parse()
            .map_err(|_| QQwryError::InvalidAddress(ip.to_string()))?;
        self.query_ipv4(addr)
    }

    /// Look up an IPv4 address, returning (area, detail)
    pub fn query_ipv4(&self, ip: Ipv4Addr) -> Result<(String, String)> {
        let entry = self.find(u32::from(ip))?;
        let record = self.index.record_offset(&self.storage, entry)?;

        // Skip the end IP (4 bytes) and parse labels
        let (area, detail) = self.reader().read_record(record + 4)?;
        Ok((gbk_to_utf8(area), gbk_to_utf8(detail)))
    }

    /// Database version, stored as the labels of the last record
    pub fn version(&self) -> Result<String> {
        let record = self.storage.read_offset(self.index.end() + 4)?;
        let (area, detail) = self.reader().read_record(record + 4)?;

        let mut raw = Vec::with_capacity(area.len() + detail.len());
        raw.extend_from_slice(area);
        raw.extend_from_slice(detail);
        Ok(gbk_to_utf8(&raw))
    }

    /// Iterate every index entry in ascending order
    ///
    /// Each call starts a fresh iteration.
    pub fn dump(&self) -> Entries<'_> {
        Entries {
            db: self,
            next: 0,
            total: self.total_entries(),
        }
    }

    /// Write every range as a line of text, returning the number of lines
    pub fn export<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut lines = 0;
        for range in self.dump() {
            let range = range?;
            writeln!(
                writer,
                "{:>15}\t{:>15}\t{},{}",
                range.start.to_string(),
                range.end.to_string(),
                range.area,
                range.detail
            )?;
            lines += 1;
        }
        writer.flush()?;
        Ok(lines)
    }

    fn entry(&self, i: u32) -> Result<IpRange> {
        let start = self.index.start_ip(&self.storage, i)?;
        let record = self.index.record_offset(&self.storage, i)?;
        let end = self.storage.read_u32(record)?;
        let (area, detail) = self.reader().read_record(record + 4)?;

        Ok(IpRange {
            start: Ipv4Addr::from(start),
            end: Ipv4Addr::from(end),
            area: gbk_to_utf8(area),
            detail: gbk_to_utf8(detail),
        })
    }

    fn reader(&self) -> Reader<'_> {
        Reader::new(&self.storage)
    }
}

/// Lazy iterator over all ranges, see [`QQwryDatabase::dump`]
pub struct Entries<'a> {
    db: &'a QQwryDatabase,
    next: u32,
    total: u32,
}

impl Iterator for Entries<'_> {
    type Item = Result<IpRange>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let item = self.db.entry(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Strip the filler text and map empty labels to `None`
fn clean_label(label: &str) -> Option<String> {
    let label = label.replace(CZ88_FILLER, "").trim().to_string();
    if label.is_empty() { None } else { Some(label) }
}

impl Database for QQwryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_ip(&self, ip: IpAddr) -> Result<Option<GeoLocation>> {
        match ip {
            IpAddr::V4(ipv4) => {
                let (area, detail) = self.query_ipv4(ipv4)?;
                Ok(Some(GeoLocation {
                    ip,
                    country: clean_label(&area),
                    isp: clean_label(&detail),
                }))
            }
            IpAddr::V6(_) => {
                // QQwry doesn't support IPv6
                Ok(None)
            }
        }
    }

    fn version(&self) -> Result<String> {
        QQwryDatabase::version(self)
    }
}
