//! Character encoding utilities
//!
//! Labels in the QQwry database are stored in GBK. Decoding never fails:
//! a record that cannot be decoded degrades to a marker string instead.

use encoding_rs::GBK;

/// Returned when a label cannot be decoded at all
pub const INVALID_LABEL: &str = "Invalid";

/// Dangling lead byte left behind by truncated source records
const TRUNCATION_ARTIFACT: u8 = 0x96;

/// Convert GBK encoded bytes to a UTF-8 string
///
/// Strict decoding is attempted first. If that fails and the last byte is
/// `0x96`, the byte is dropped and a trailing `?` marks the repair. Anything
/// else becomes [`INVALID_LABEL`].
pub fn gbk_to_utf8(data: &[u8]) -> String {
    if let Some(text) = decode_strict(data) {
        return text;
    }

    if let Some((&TRUNCATION_ARTIFACT, head)) = data.split_last() {
        if let Some(text) = decode_strict(head) {
            log::debug!("Repaired truncated GBK label from bytes: {:?}", data);
            return format!("{}?", text);
        }
    }

    log::warn!("Undecodable GBK label: {:?}", data);
    INVALID_LABEL.to_string()
}

fn decode_strict(data: &[u8]) -> Option<String> {
    GBK.decode_without_bom_handling_and_without_replacement(data)
        .map(|cow| cow.into_owned())
}
