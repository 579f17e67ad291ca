mod http;
mod local;

pub use http::HttpRangeSource;
pub use local::LocalIndexSource;

use async_trait::async_trait;
use std::fmt;

use crate::error::TransportError;

/// Inclusive byte range, as carried by the HTTP `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte (inclusive).
    pub start: u64,
    /// Last byte (inclusive).
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered.
    pub fn byte_count(&self) -> u64 {
        self.end.saturating_sub(self.start) + 1
    }

    /// `Range` request header value: `bytes=start-end`.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// What a source answered: status, raw `Content-Range` and the body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResponse {
    pub status: u16,
    pub content_range: Option<String>,
    pub body: Vec<u8>,
}

impl RangeResponse {
    /// A bodiless answer such as 404.
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            content_range: None,
            body: Vec::new(),
        }
    }
}

/// Trait for fetching (part of) an index file from some root
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Fetch the file at `path`, relative to the source root.
    ///
    /// With `range` set the source should answer 206 with only those bytes;
    /// without it, the whole file. Non-success statuses are returned, not
    /// raised, so the caller decides what counts as success.
    async fn get(
        &self,
        path: &str,
        range: Option<ByteRange>,
    ) -> Result<RangeResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_header_is_inclusive() {
        let r = ByteRange { start: 200, end: 299 };
        assert_eq!(r.header_value(), "bytes=200-299");
        assert_eq!(r.byte_count(), 100);
        assert_eq!(r.to_string(), "200-299");
    }
}
