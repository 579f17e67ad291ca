//! # nozomi
//!
//! Resolve gallery listing paths and page through remote nozomi indexes
//! using HTTP Range requests.
//!
//! A listing such as `series/popular/today/female:filming-german.html?page=2`
//! is backed by a nozomi file: a flat array of big-endian 32-bit gallery
//! identifiers. Rather than downloading the whole file, this library asks the
//! host for just the bytes of the requested page and reads the total entry
//! count off the `Content-Range` reply.
//!
//! ## Features
//!
//! - Resolve every listing path shape the site uses (plain, area, popular, nested)
//! - Fetch one page of an index with a single Range request
//! - Fetch a whole index for bulk walks
//! - Read from a local mirror directory instead of the network
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nozomi::{FetchSettings, HttpRangeSource, IndexFetcher, resolve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let query = resolve("tag/female:filming-english.html?page=2")?;
//!
//!     let source = Arc::new(HttpRangeSource::new("https://ltn.hitomi.la", None)?);
//!     let fetcher = IndexFetcher::new(source, FetchSettings::default());
//!
//!     let page = fetcher.fetch(&query).await?;
//!     for id in &page {
//!         println!("{}", id);
//!     }
//!     println!("{} galleries in total", page.total_items);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod logging;
pub mod query;
pub mod site;

pub use cli::Cli;
pub use config::NozomiConfig;
pub use error::{FetchError, ResolveError, TransportError};
pub use index::{
    FetchSettings, IndexAddress, IndexFetchResult, IndexFetcher, ResultSink, decode_identifiers,
    page_range, parse_content_range,
};
pub use io::{ByteRange, HttpRangeSource, LocalIndexSource, RangeResponse, RangeSource};
pub use query::{QueryDescriptor, resolve};
pub use site::path_from_url;
