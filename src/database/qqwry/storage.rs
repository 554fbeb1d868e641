//! Random-access byte storage backing a QQwry database
//!
//! All reads take an explicit offset; there is no cursor, so a single
//! `Storage` can be shared across threads.

use crate::error::{QQwryError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

use super::utils::{bytes3_to_u32, bytes4_to_u32};

/// Where the database bytes live
enum Backing {
    /// Read-only memory map of the database file
    Mapped(Mmap),
    /// Owned buffer, same byte semantics as the mapped variant
    Owned(Vec<u8>),
}

/// Read-only, bounds-checked view over the database bytes
pub struct Storage {
    backing: Backing,
}

impl Storage {
    /// Open and memory map a database file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            return Err(QQwryError::IoError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("database file is empty: {}", path.display()),
            )));
        }

        let mmap = unsafe { Mmap::map(&file) }?;

        Ok(Self {
            backing: Backing::Mapped(mmap),
        })
    }

    /// Wrap an in-memory copy of a database
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(QQwryError::IoError(io::Error::new(
                io::ErrorKind::InvalidData,
                "database buffer is empty",
            )));
        }

        Ok(Self {
            backing: Backing::Owned(data),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => mmap,
            Backing::Owned(data) => data,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn read_at(&self, offset: u32, len: usize) -> Result<&[u8]> {
        let data = self.as_bytes();
        let start = offset as usize;
        start
            .checked_add(len)
            .and_then(|end| data.get(start..end))
            .ok_or_else(|| QQwryError::out_of_bounds(start, len, data.len()))
    }

    /// Read a single byte
    pub fn read_u8(&self, offset: u32) -> Result<u8> {
        Ok(self.read_at(offset, 1)?[0])
    }

    /// Read a 4-byte little-endian value (IP addresses and header offsets)
    pub fn read_u32(&self, offset: u32) -> Result<u32> {
        Ok(bytes4_to_u32(self.read_at(offset, 4)?.try_into()?))
    }

    /// Read a 3-byte little-endian offset
    pub fn read_offset(&self, offset: u32) -> Result<u32> {
        Ok(bytes3_to_u32(self.read_at(offset, 3)?.try_into()?))
    }

    /// Borrow the bytes from `offset` up to, not including, the next zero byte
    pub fn read_cstr(&self, offset: u32) -> Result<&[u8]> {
        let data = self.as_bytes();
        let start = offset as usize;
        let tail = data
            .get(start..)
            .ok_or_else(|| QQwryError::out_of_bounds(start, 1, data.len()))?;

        match tail.iter().position(|&b| b == 0) {
            Some(end) => Ok(&tail[..end]),
            None => Err(QQwryError::corrupt(format!(
                "unterminated string at offset {}",
                offset
            ))),
        }
    }
}
