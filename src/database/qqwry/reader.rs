//! QQwry record decoder
//!
//! Resolves the two raw label strings of a record, following the 1- and
//! 2-byte redirect flags. Offsets are plain integers into the storage buffer;
//! nothing is copied and no cursor is kept.

use crate::error::{QQwryError, Result};

use super::storage::Storage;

/// Redirect mode constants
pub const REDIRECT_MODE_1: u8 = 0x01;
pub const REDIRECT_MODE_2: u8 = 0x02;

/// Raw bytes returned for an intentionally empty field
///
/// The placeholder stands in for a single zero byte on disk, so it counts as
/// zero inline bytes: an empty area at `offset` puts the detail label at
/// `offset + 1`. `[\0]ABCD\0` therefore reads as (`N/A`, `ABCD`). Advancing
/// past the placeholder text instead would land inside the next label.
pub const NOT_AVAILABLE: &[u8] = b"N/A";

/// Upper bound on string pointer-to-pointer hops before the data is
/// considered cyclic
pub const MAX_REDIRECT_DEPTH: usize = 4;

/// A resolved string and the number of bytes it occupies inline at the
/// position it was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLabel<'a> {
    pub bytes: &'a [u8],
    inline_len: u32,
}

/// Reader for parsing QQwry records
pub struct Reader<'a> {
    storage: &'a Storage,
}

impl<'a> Reader<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Resolve the (area, detail) label pair of the record payload at
    /// `offset`, i.e. just past the record's 4-byte end IP
    pub fn read_record(&self, offset: u32) -> Result<(&'a [u8], &'a [u8])> {
        match self.storage.read_u8(offset)? {
            REDIRECT_MODE_1 => {
                // [0x01][offset] - both labels live at the target
                let target = self.storage.read_offset(offset + 1)?;
                let area = self.read_string(target)?;

                // A target that is itself a mode 2 pointer keeps its detail
                // label right after its own 4-byte header
                let detail_at = if self.flag(target)? == REDIRECT_MODE_2 {
                    target + 4
                } else {
                    target + area.inline_len + 1
                };
                let detail = self.read_string(detail_at)?;
                Ok((area.bytes, detail.bytes))
            }
            REDIRECT_MODE_2 => {
                // [0x02][area offset][detail...]
                let target = self.storage.read_offset(offset + 1)?;
                let area = self.read_string(target)?;
                let detail = self.read_string(offset + 4)?;
                Ok((area.bytes, detail.bytes))
            }
            _ => {
                // [area\0][detail\0]
                let area = self.read_string(offset)?;
                let detail = self.read_string(offset + area.inline_len + 1)?;
                Ok((area.bytes, detail.bytes))
            }
        }
    }

    /// Resolve a string at `offset`, following mode 2 string pointers
    pub fn read_string(&self, offset: u32) -> Result<RawLabel<'a>> {
        self.read_string_at_depth(offset, 0)
    }

    fn read_string_at_depth(&self, offset: u32, depth: usize) -> Result<RawLabel<'a>> {
        if offset == 0 {
            return Ok(Self::not_available());
        }

        match self.flag(offset)? {
            0 => Ok(Self::not_available()),
            REDIRECT_MODE_2 => {
                if depth >= MAX_REDIRECT_DEPTH {
                    return Err(QQwryError::corrupt(format!(
                        "string redirects nested deeper than {} at offset {}",
                        MAX_REDIRECT_DEPTH, offset
                    )));
                }
                let target = self.storage.read_offset(offset + 1)?;
                let resolved = self.read_string_at_depth(target, depth + 1)?;
                Ok(RawLabel {
                    bytes: resolved.bytes,
                    inline_len: 0,
                })
            }
            _ => {
                let bytes = self.storage.read_cstr(offset)?;
                Ok(RawLabel {
                    bytes,
                    inline_len: bytes.len() as u32,
                })
            }
        }
    }

    fn flag(&self, offset: u32) -> Result<u8> {
        self.storage.read_u8(offset)
    }

    fn not_available() -> RawLabel<'a> {
        RawLabel {
            bytes: NOT_AVAILABLE,
            inline_len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::qqwry::testutil::{off3, BEIJING, CHINA, TELECOM, UNICOM};

    fn storage(data: Vec<u8>) -> Storage {
        Storage::from_bytes(data).unwrap()
    }

    #[test]
    fn test_inline_record() {
        let mut data = vec![0xee; 4];
        data.extend_from_slice(CHINA);
        data.push(0);
        data.extend_from_slice(TELECOM);
        data.push(0);
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, CHINA);
        assert_eq!(detail, TELECOM);
    }

    #[test]
    fn test_inline_string_round_trip() {
        let storage = storage(b"\xff\xffhello\0world".to_vec());
        let label = Reader::new(&storage).read_string(2).unwrap();
        assert_eq!(label.bytes, b"hello");
    }

    #[test]
    fn test_mode2_record_detail_relative_to_call_site() {
        // 4: [0x02][-> 20][UNICOM\0], 20: BEIJING\0
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(20));
        data.extend_from_slice(UNICOM);
        data.push(0);
        data.resize(20, 0xee);
        data.extend_from_slice(BEIJING);
        data.push(0);
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, BEIJING);
        assert_eq!(detail, UNICOM);
    }

    #[test]
    fn test_mode1_record_with_inline_target() {
        // 4: [0x01][-> 10], 10: CHINA\0 TELECOM\0
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_1);
        data.extend_from_slice(&off3(10));
        data.resize(10, 0xee);
        data.extend_from_slice(CHINA);
        data.push(0);
        data.extend_from_slice(TELECOM);
        data.push(0);
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, CHINA);
        assert_eq!(detail, TELECOM);
    }

    #[test]
    fn test_mode1_record_with_mode2_target() {
        // 4:  [0x01][-> 10]
        // 10: [0x02][-> 30][UNICOM\0]   detail must come from 10 + 4
        // 30: BEIJING\0
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_1);
        data.extend_from_slice(&off3(10));
        data.resize(10, 0xee);
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(30));
        data.extend_from_slice(UNICOM);
        data.push(0);
        data.resize(30, 0xee);
        data.extend_from_slice(BEIJING);
        data.push(0);
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, BEIJING);
        assert_eq!(detail, UNICOM);
    }

    #[test]
    fn test_detail_may_be_a_string_pointer() {
        // 4: [CHINA\0][0x02][-> 20], 20: TELECOM\0
        let mut data = vec![0xee; 4];
        data.extend_from_slice(CHINA);
        data.push(0);
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(20));
        data.resize(20, 0xee);
        data.extend_from_slice(TELECOM);
        data.push(0);
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, CHINA);
        assert_eq!(detail, TELECOM);
    }

    #[test]
    fn test_empty_fields_become_placeholder() {
        // 4: [\0][0x02][-> 0]
        let mut data = vec![0xee; 4];
        data.push(0);
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(0));
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, NOT_AVAILABLE);
        assert_eq!(detail, NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_area_detail_follows_terminator() {
        // 4: [\0]ABCD\0XY\0
        let mut data = vec![0xee; 4];
        data.extend_from_slice(b"\0ABCD\0XY\0");
        let storage = storage(data);

        let (area, detail) = Reader::new(&storage).read_record(4).unwrap();
        assert_eq!(area, NOT_AVAILABLE);
        assert_eq!(detail, b"ABCD");
    }

    #[test]
    fn test_string_cycle_is_corrupt_record() {
        // 4: [0x02][-> 4]
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(4));
        let storage = storage(data);

        let result = Reader::new(&storage).read_string(4);
        assert!(matches!(result, Err(QQwryError::CorruptRecord(_))));
    }

    #[test]
    fn test_record_with_cyclic_labels_is_corrupt_record() {
        // 4: [0x01][-> 8], 8: [0x02][-> 8]
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_1);
        data.extend_from_slice(&off3(8));
        data.push(REDIRECT_MODE_2);
        data.extend_from_slice(&off3(8));
        let storage = storage(data);

        let result = Reader::new(&storage).read_record(4);
        assert!(matches!(result, Err(QQwryError::CorruptRecord(_))));
    }

    #[test]
    fn test_pointer_past_end_is_corrupt_record() {
        let mut data = vec![0xee; 4];
        data.push(REDIRECT_MODE_1);
        data.extend_from_slice(&off3(0x00ff_ffff));
        let storage = storage(data);

        let result = Reader::new(&storage).read_record(4);
        assert!(matches!(result, Err(QQwryError::CorruptRecord(_))));
    }

    #[test]
    fn test_truncated_string_is_corrupt_record() {
        let mut data = vec![0xee; 4];
        data.extend_from_slice(CHINA);
        let storage = storage(data);

        let result = Reader::new(&storage).read_record(4);
        assert!(matches!(result, Err(QQwryError::CorruptRecord(_))));
    }
}
