//! Nozomi index access.
//!
//! A nozomi file is a flat array of big-endian `i32` gallery identifiers,
//! one file per tag/language pair. Pages are read by asking the host for the
//! byte range that holds them; the host's `Content-Range` reply carries the
//! total file length, which gives the number of entries for pagination.
//!
//! - [`structures`]: addresses, ranges and fetch results
//! - [`parser`]: body and `Content-Range` decoding
//! - [`fetcher`]: the [`IndexFetcher`] that reads a query through a
//!   [`RangeSource`](crate::io::RangeSource)

mod fetcher;
mod parser;
mod structures;

pub use fetcher::{FetchSettings, IndexFetcher, ResultSink};
pub use parser::{decode_identifiers, parse_content_range};
pub use structures::*;
