//! Decoding of nozomi response bodies and `Content-Range` headers.

use byteorder::{BigEndian, ByteOrder};
use tracing::warn;

use crate::error::FetchError;

use super::structures::{ContentRange, ENTRY_SIZE};

/// Decode a body of big-endian `i32` entries.
///
/// Entries come out in body order. A trailing fragment shorter than one
/// entry cannot be an identifier and is dropped.
///
/// # Examples
///
/// ```
/// let ids = nozomi::decode_identifiers(&[0, 0, 0x03, 0xe9, 0xff, 0xff, 0xff, 0xff]);
/// assert_eq!(ids, vec![1001, -1]);
/// ```
pub fn decode_identifiers(body: &[u8]) -> Vec<i32> {
    let chunks = body.chunks_exact(ENTRY_SIZE as usize);

    let remainder = chunks.remainder().len();
    if remainder != 0 {
        warn!(
            body_len = body.len(),
            dropped = remainder,
            "index body is not a whole number of entries"
        );
    }

    chunks.map(BigEndian::read_i32).collect()
}

/// Parse a `Content-Range` value of the form `bytes <start>-<end>/<total>`.
///
/// The unit is matched case-insensitively; the total must be a number, so
/// the `bytes */<total>` form of a 416 reply is rejected.
///
/// # Errors
///
/// Returns [`FetchError::MalformedContentRange`] carrying the raw value.
pub fn parse_content_range(value: &str) -> Result<ContentRange, FetchError> {
    let malformed = || FetchError::MalformedContentRange(value.to_string());

    let (unit, rest) = value.trim().split_once(' ').ok_or_else(malformed)?;
    if !unit.eq_ignore_ascii_case("bytes") {
        return Err(malformed());
    }

    let (range, total) = rest.trim_start().split_once('/').ok_or_else(malformed)?;
    let (start, end) = range.split_once('-').ok_or_else(malformed)?;

    let start = parse_number(start).ok_or_else(malformed)?;
    let end = parse_number(end).ok_or_else(malformed)?;
    let total = parse_number(total).ok_or_else(malformed)?;

    if end < start {
        return Err(malformed());
    }

    Ok(ContentRange { start, end, total })
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
