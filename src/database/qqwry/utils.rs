//! Utility functions for QQwry database

/// Convert 3 bytes to u32 (little-endian)
pub fn bytes3_to_u32(data: [u8; 3]) -> u32 {
    u32::from(data[0]) | (u32::from(data[1]) << 8) | (u32::from(data[2]) << 16)
}

/// Convert 4 bytes to u32 (little-endian)
pub fn bytes4_to_u32(data: [u8; 4]) -> u32 {
    u32::from_le_bytes(data)
}
