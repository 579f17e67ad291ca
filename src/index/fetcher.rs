use std::sync::Arc;
use tracing::{debug, info};

use crate::config::NozomiConfig;
use crate::error::FetchError;
use crate::io::{RangeResponse, RangeSource};
use crate::query::QueryDescriptor;

use super::parser::{decode_identifiers, parse_content_range};
use super::structures::{DEFAULT_EXTENSION, IndexAddress, IndexFetchResult, page_range};

/// Consumer of fetched pages, e.g. a renderer that lays out gallery blocks.
pub trait ResultSink {
    fn put_results(&mut self, query: &QueryDescriptor, result: &IndexFetchResult);
}

/// Fixed parameters of a fetch: page size and index file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub entries_per_page: u32,
    pub extension: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            entries_per_page: 25,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl From<&NozomiConfig> for FetchSettings {
    fn from(config: &NozomiConfig) -> Self {
        Self {
            entries_per_page: config.entries_per_page,
            extension: config.extension.clone(),
        }
    }
}

/// Reads pages of nozomi indexes from a [`RangeSource`].
///
/// Holds no per-request state; one fetcher can serve any number of
/// concurrent fetches.
pub struct IndexFetcher<S: RangeSource> {
    source: Arc<S>,
    settings: FetchSettings,
}

impl<S: RangeSource> IndexFetcher<S> {
    pub fn new(source: Arc<S>, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Address of the index file behind a query.
    pub fn address(&self, query: &QueryDescriptor) -> IndexAddress {
        IndexAddress::for_query(query, &self.settings.extension)
    }

    /// Fetch the page named by `query.page_number()`.
    ///
    /// Requests only the bytes of that page. The server may answer 206 with
    /// the range or 200 with the whole file; either way the body is decoded
    /// as-is and the total comes from `Content-Range`.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Status`] for any status other than 200 or 206
    /// * [`FetchError::MissingContentRange`] / [`FetchError::MalformedContentRange`]
    ///   when a non-empty body comes without a usable total
    /// * [`FetchError::RangeOverflow`] when the page lies beyond 64-bit offsets
    /// * [`FetchError::Transport`] when the source itself fails
    pub async fn fetch(&self, query: &QueryDescriptor) -> Result<IndexFetchResult, FetchError> {
        let address = self.address(query);
        let page = query.page_number();
        let range = page_range(page, self.settings.entries_per_page)
            .ok_or(FetchError::RangeOverflow(page))?;

        debug!(%address, %range, page, "fetching index page");

        let response = self.source.get(address.as_str(), Some(range)).await?;
        check_status(&response)?;

        let identifiers = decode_identifiers(&response.body);
        let total_items = match response.content_range.as_deref() {
            Some(value) => parse_content_range(value)?.total_entries(),
            // Nothing to paginate; the header is only needed alongside entries
            None if response.body.is_empty() => 0,
            None => return Err(FetchError::MissingContentRange),
        };

        Ok(IndexFetchResult {
            identifiers,
            total_items,
        })
    }

    /// Fetch every entry of the index behind `query`, ignoring its page.
    ///
    /// `total_items` is the number of decoded entries.
    pub async fn fetch_all(
        &self,
        query: &QueryDescriptor,
    ) -> Result<IndexFetchResult, FetchError> {
        let address = self.address(query);
        debug!(%address, "fetching whole index");

        let response = self.source.get(address.as_str(), None).await?;
        check_status(&response)?;

        let identifiers = decode_identifiers(&response.body);
        let total_items = identifiers.len() as u64;

        Ok(IndexFetchResult {
            identifiers,
            total_items,
        })
    }

    /// Fetch a page and hand it to `sink`.
    ///
    /// The sink is only called for a page that holds at least one entry.
    /// Returns whether it was called.
    pub async fn fetch_into<K: ResultSink + ?Sized>(
        &self,
        query: &QueryDescriptor,
        sink: &mut K,
    ) -> Result<bool, FetchError> {
        let result = self.fetch(query).await?;
        if result.is_empty() {
            info!(
                tag = query.tag(),
                page = query.page_number(),
                "index page holds no entries"
            );
            return Ok(false);
        }

        sink.put_results(query, &result);
        Ok(true)
    }
}

fn check_status(response: &RangeResponse) -> Result<(), FetchError> {
    match response.status {
        200 | 206 => Ok(()),
        status => Err(FetchError::Status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::io::ByteRange;
    use crate::query::resolve;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Source that replays one canned response and records requests.
    struct CannedSource {
        response: RangeResponse,
        requests: Mutex<Vec<(String, Option<ByteRange>)>>,
    }

    impl CannedSource {
        fn new(response: RangeResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Option<ByteRange>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RangeSource for CannedSource {
        async fn get(
            &self,
            path: &str,
            range: Option<ByteRange>,
        ) -> Result<RangeResponse, TransportError> {
            self.requests.lock().unwrap().push((path.to_string(), range));
            Ok(self.response.clone())
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        delivered: Vec<(String, Vec<i32>, u64)>,
    }

    impl ResultSink for CollectingSink {
        fn put_results(&mut self, query: &QueryDescriptor, result: &IndexFetchResult) {
            self.delivered
                .push((query.tag().to_string(), result.identifiers.clone(), result.total_items));
        }
    }

    fn body_of(ids: &[i32]) -> Vec<u8> {
        ids.iter().flat_map(|id| id.to_be_bytes()).collect()
    }

    fn partial(ids: &[i32], content_range: &str) -> RangeResponse {
        RangeResponse {
            status: 206,
            content_range: Some(content_range.to_string()),
            body: body_of(ids),
        }
    }

    #[tokio::test]
    async fn fetch_decodes_page_and_total() {
        let source = CannedSource::new(partial(&[1001, 1002, 1003, 1004], "bytes 0-15/4000"));
        let fetcher = IndexFetcher::new(source.clone(), FetchSettings::default());

        let q = resolve("tag/female:filming-english.html").unwrap();
        let result = fetcher.fetch(&q).await.unwrap();

        assert_eq!(result.identifiers, vec![1001, 1002, 1003, 1004]);
        assert_eq!(result.total_items, 1000);
        assert_eq!(
            source.requests(),
            vec![(
                "tag/female:filming-english.nozomi".to_string(),
                Some(ByteRange { start: 0, end: 99 })
            )]
        );
    }

    #[tokio::test]
    async fn fetch_requests_page_range() {
        let source = CannedSource::new(partial(&[1], "bytes 200-203/204"));
        let settings = FetchSettings {
            entries_per_page: 25,
            extension: ".nozomi".to_string(),
        };
        let fetcher = IndexFetcher::new(source.clone(), settings);

        let q = resolve("series/popular/today/female:filming-german.html?page=2").unwrap();
        fetcher.fetch(&q).await.unwrap();

        assert_eq!(
            source.requests(),
            vec![(
                "series/popular/today/female:filming-german.nozomi".to_string(),
                Some(ByteRange { start: 200, end: 299 })
            )]
        );
    }

    #[tokio::test]
    async fn fetch_accepts_full_content() {
        let mut response = partial(&[5, 6], "bytes 0-7/8");
        response.status = 200;
        let fetcher = IndexFetcher::new(CannedSource::new(response), FetchSettings::default());

        let result = fetcher.fetch(&resolve("").unwrap()).await.unwrap();
        assert_eq!(result.identifiers, vec![5, 6]);
        assert_eq!(result.total_items, 2);
    }

    #[tokio::test]
    async fn fetch_rejects_other_status() {
        let fetcher = IndexFetcher::new(
            CannedSource::new(RangeResponse::status_only(404)),
            FetchSettings::default(),
        );
        let err = fetcher.fetch(&resolve("").unwrap()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn fetch_requires_content_range_with_entries() {
        let response = RangeResponse {
            status: 206,
            content_range: None,
            body: body_of(&[1, 2]),
        };
        let fetcher = IndexFetcher::new(CannedSource::new(response), FetchSettings::default());
        assert!(matches!(
            fetcher.fetch(&resolve("").unwrap()).await,
            Err(FetchError::MissingContentRange)
        ));
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_content_range() {
        let fetcher = IndexFetcher::new(
            CannedSource::new(partial(&[1], "bytes 0-3")),
            FetchSettings::default(),
        );
        assert!(matches!(
            fetcher.fetch(&resolve("").unwrap()).await,
            Err(FetchError::MalformedContentRange(_))
        ));
    }

    #[tokio::test]
    async fn fetch_empty_body_is_empty_result() {
        let response = RangeResponse {
            status: 200,
            content_range: None,
            body: Vec::new(),
        };
        let fetcher = IndexFetcher::new(CannedSource::new(response), FetchSettings::default());
        let result = fetcher.fetch(&resolve("").unwrap()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_items, 0);
    }

    #[tokio::test]
    async fn fetch_range_overflow() {
        let source = CannedSource::new(RangeResponse::status_only(206));
        let settings = FetchSettings {
            entries_per_page: u32::MAX,
            extension: ".nozomi".to_string(),
        };
        let fetcher = IndexFetcher::new(source.clone(), settings);

        let q = resolve(&format!("?page={}", u32::MAX)).unwrap();
        assert!(matches!(
            fetcher.fetch(&q).await,
            Err(FetchError::RangeOverflow(p)) if p == u32::MAX
        ));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn fetch_all_sends_no_range() {
        let response = RangeResponse {
            status: 200,
            content_range: None,
            body: body_of(&[9, 8, 7]),
        };
        let source = CannedSource::new(response);
        let fetcher = IndexFetcher::new(source.clone(), FetchSettings::default());

        let result = fetcher
            .fetch_all(&resolve("artist/someone-all.html?page=3").unwrap())
            .await
            .unwrap();
        assert_eq!(result.identifiers, vec![9, 8, 7]);
        assert_eq!(result.total_items, 3);
        assert_eq!(
            source.requests(),
            vec![("artist/someone-all.nozomi".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn fetch_into_delivers_non_empty_page() {
        let fetcher = IndexFetcher::new(
            CannedSource::new(partial(&[42], "bytes 0-3/400")),
            FetchSettings::default(),
        );
        let mut sink = CollectingSink::default();

        let delivered = fetcher
            .fetch_into(&resolve("tag/x-english.html").unwrap(), &mut sink)
            .await
            .unwrap();
        assert!(delivered);
        assert_eq!(sink.delivered, vec![("x".to_string(), vec![42], 100)]);
    }

    #[tokio::test]
    async fn fetch_into_skips_sink_on_failure_and_empty() {
        let mut sink = CollectingSink::default();

        let failing = IndexFetcher::new(
            CannedSource::new(RangeResponse::status_only(404)),
            FetchSettings::default(),
        );
        assert!(failing.fetch_into(&resolve("").unwrap(), &mut sink).await.is_err());

        let empty = IndexFetcher::new(
            CannedSource::new(partial(&[], "bytes 0-0/0")),
            FetchSettings::default(),
        );
        assert!(!empty.fetch_into(&resolve("").unwrap(), &mut sink).await.unwrap());

        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn settings_from_config() {
        let config = NozomiConfig {
            entries_per_page: 10,
            extension: ".idx".to_string(),
            ..NozomiConfig::default()
        };
        let settings = FetchSettings::from(&config);
        assert_eq!(settings.entries_per_page, 10);
        assert_eq!(settings.extension, ".idx");
    }
}
