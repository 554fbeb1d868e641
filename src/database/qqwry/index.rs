//! Sorted index of 7-byte entries (4-byte start IP + 3-byte record offset)

use crate::error::{QQwryError, Result};

use super::storage::Storage;

/// Index entry length: 4 bytes IP + 3 bytes offset
pub const INDEX_ENTRY_LEN: u32 = 7;

/// Header length: two little-endian u32 offsets
pub const HEADER_LEN: usize = 8;

/// Location of the index region, read once from the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    start: u32,
    end: u32,
}

impl Index {
    /// Read and validate the header
    pub fn from_header(storage: &Storage) -> Result<Self> {
        if storage.len() < HEADER_LEN {
            return Err(QQwryError::header(format!(
                "file too small: {} bytes",
                storage.len()
            )));
        }

        let start = storage.read_u32(0)?;
        let end = storage.read_u32(4)?;
        log::debug!("QQwry header: idx_start={}, idx_end={}", start, end);

        if end < start {
            return Err(QQwryError::header(format!(
                "index end {} precedes index start {}",
                end, start
            )));
        }
        if (end as usize) + (INDEX_ENTRY_LEN as usize) > storage.len() {
            return Err(QQwryError::header(format!(
                "index end {} exceeds file size {}",
                end,
                storage.len()
            )));
        }
        if (end - start) % INDEX_ENTRY_LEN != 0 {
            log::warn!(
                "QQwry index span {} is not a multiple of {}",
                end - start,
                INDEX_ENTRY_LEN
            );
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn total_entries(&self) -> u32 {
        (self.end - self.start) / INDEX_ENTRY_LEN + 1
    }

    fn entry_offset(&self, i: u32) -> u32 {
        self.start + i * INDEX_ENTRY_LEN
    }

    /// Start address of entry `i`, as an unsigned integer
    pub fn start_ip(&self, storage: &Storage, i: u32) -> Result<u32> {
        storage.read_u32(self.entry_offset(i))
    }

    /// Offset of entry `i`'s record (end IP followed by label payload)
    pub fn record_offset(&self, storage: &Storage, i: u32) -> Result<u32> {
        storage.read_offset(self.entry_offset(i) + 4)
    }

    /// Find the rightmost entry whose start IP is <= `ip`
    ///
    /// Addresses in a gap, or below the first entry, map to the nearest
    /// preceding entry (entry 0 at worst); this is never an error.
    pub fn find(&self, storage: &Storage, ip: u32) -> Result<u32> {
        let mut l = 0u32;
        let mut r = self.total_entries();

        while r - l > 1 {
            let mid = l + (r - l) / 2;
            if ip < self.start_ip(storage, mid)? {
                r = mid;
            } else {
                l = mid;
            }
        }

        Ok(l)
    }
}
