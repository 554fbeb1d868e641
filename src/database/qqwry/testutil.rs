//! Test-only builder for small QQwry files
//!
//! Layout: 8-byte header, record area, index area at the end.

use std::net::Ipv4Addr;

pub fn ip(s: &str) -> u32 {
    u32::from(s.parse::<Ipv4Addr>().unwrap())
}

pub struct Builder {
    buf: Vec<u8>,
    entries: Vec<(u32, u32)>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            buf: vec![0; 8],
            entries: Vec::new(),
        }
    }

    /// Current end of the buffer, i.e. the offset the next push lands at
    pub fn pos(&self) -> u32 {
        self.buf.len() as u32
    }

    /// Append raw bytes, returning their offset
    pub fn push(&mut self, bytes: &[u8]) -> u32 {
        let at = self.pos();
        self.buf.extend_from_slice(bytes);
        at
    }

    /// Append `bytes` followed by a terminator
    pub fn push_str(&mut self, bytes: &[u8]) -> u32 {
        let at = self.push(bytes);
        self.buf.push(0);
        at
    }

    /// Append a record (end IP then `payload`) and index it under `start`
    pub fn record(&mut self, start: u32, end: u32, payload: &[u8]) -> u32 {
        let at = self.push(&end.to_le_bytes());
        self.push(payload);
        self.entries.push((start, at));
        at
    }

    /// Record with both labels stored inline
    pub fn inline(&mut self, start: u32, end: u32, area: &[u8], detail: &[u8]) -> u32 {
        let mut payload = Vec::new();
        payload.extend_from_slice(area);
        payload.push(0);
        payload.extend_from_slice(detail);
        payload.push(0);
        self.record(start, end, &payload)
    }

    pub fn finish(self) -> Vec<u8> {
        let Self { mut buf, entries } = self;
        let idx_start = buf.len() as u32;
        for (start, offset) in &entries {
            buf.extend_from_slice(&start.to_le_bytes());
            buf.extend_from_slice(&offset.to_le_bytes()[..3]);
        }
        let idx_end = idx_start + (entries.len() as u32 - 1) * 7;
        buf[0..4].copy_from_slice(&idx_start.to_le_bytes());
        buf[4..8].copy_from_slice(&idx_end.to_le_bytes());
        buf
    }
}

/// 3-byte little-endian encoding of `offset`
pub fn off3(offset: u32) -> [u8; 3] {
    let b = offset.to_le_bytes();
    [b[0], b[1], b[2]]
}

// GBK samples
pub const CHINA: &[u8] = &[0xd6, 0xd0, 0xb9, 0xfa];
pub const BEIJING: &[u8] = &[0xb1, 0xb1, 0xbe, 0xa9, 0xca, 0xd0];
pub const TELECOM: &[u8] = &[0xb5, 0xe7, 0xd0, 0xc5];
pub const UNICOM: &[u8] = &[0xc1, 0xaa, 0xcd, 0xa8];
pub const USA: &[u8] = &[0xc3, 0xc0, 0xb9, 0xfa];
pub const CZ_NETWORK: &[u8] = &[0xb4, 0xbf, 0xd5, 0xe6, 0xcd, 0xf8, 0xc2, 0xe7];

/// A four-range database with every record layout the decoder knows:
///
/// - `1.0.0.0`   inline        中国 / 电信
/// - `2.0.0.0`   flag 0x02     美国 (redirected) / 联通 (inline)
/// - `3.0.0.0`   flag 0x01     北京市 / 电信, both behind one redirect
/// - `255.255.255.0` version   纯真网络 / "2024 data"
pub fn sample() -> Vec<u8> {
    let mut b = Builder::new();

    let usa = b.push_str(USA);
    let shared = b.push_str(BEIJING);
    b.push_str(TELECOM);

    b.inline(ip("1.0.0.0"), ip("1.255.255.255"), CHINA, TELECOM);

    let mut mode2 = vec![0x02];
    mode2.extend_from_slice(&off3(usa));
    mode2.extend_from_slice(UNICOM);
    mode2.push(0);
    b.record(ip("2.0.0.0"), ip("2.255.255.255"), &mode2);

    let mut mode1 = vec![0x01];
    mode1.extend_from_slice(&off3(shared));
    b.record(ip("3.0.0.0"), ip("255.255.254.255"), &mode1);

    b.inline(ip("255.255.255.0"), ip("255.255.255.255"), CZ_NETWORK, b"2024 data");
    b.finish()
}
