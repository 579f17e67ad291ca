//! Error types for path resolution and index fetching.
//!
//! Resolution failures are raised before any network traffic; fetch failures
//! mean nothing was delivered to the consumer. Both are terminal for the call.

use thiserror::Error;

/// A listing path that does not match any recognised shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// `?page=` carried zero or a number too large to address.
    #[error("invalid page number: {0:?}")]
    InvalidPage(String),

    /// Path has no `-` separating tag and language.
    #[error("path has no language segment")]
    TooFewSegments,

    /// The `/`-separated area chain did not collapse to `area/tag`.
    #[error("area chain has {0} parts after popular collapsing, expected 2")]
    AreaChainLength(usize),

    /// Chain starts with `popular/popular/...`, which matches both popular forms.
    #[error("ambiguous popular chain")]
    AmbiguousPopularChain,

    #[error("invalid area: {0:?}")]
    InvalidArea(String),

    #[error("invalid tag: {0:?}")]
    InvalidTag(String),

    #[error("invalid language: {0:?}")]
    InvalidLanguage(String),

    /// Percent-decoding a pasted URL produced invalid UTF-8.
    #[error("path is not valid UTF-8 after percent-decoding")]
    InvalidEncoding,
}

/// Failure of the underlying byte source, before any status is known.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A range fetch that produced no usable result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Anything other than 200 or 206.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("response carries no Content-Range header")]
    MissingContentRange,

    #[error("malformed Content-Range header: {0:?}")]
    MalformedContentRange(String),

    /// Byte offsets for the page do not fit in 64 bits.
    #[error("page {0} lies outside the addressable index")]
    RangeOverflow(u32),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FetchError {
    /// HTTP status that caused the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
