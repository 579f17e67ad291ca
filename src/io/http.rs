use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_RANGE, RANGE};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use super::{ByteRange, RangeResponse, RangeSource};
use crate::config::NozomiConfig;
use crate::error::TransportError;

/// HTTP Range source for remote nozomi files
pub struct HttpRangeSource {
    client: Client,
    base_url: String,
    transferred_bytes: AtomicU64,
}

impl HttpRangeSource {
    /// Create a source rooted at `base_url` (scheme and host, no trailing slash)
    ///
    /// No timeout is applied unless one is given; a stalled request stays
    /// pending until the caller gives up on it.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            transferred_bytes: AtomicU64::new(0),
        })
    }

    /// Create a source for the configured scheme and domain
    pub fn from_config(config: &NozomiConfig) -> Result<Self, TransportError> {
        Self::new(config.base_url(), config.timeout())
    }

    /// Get total body bytes received from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RangeSource for HttpRangeSource {
    async fn get(
        &self,
        path: &str,
        range: Option<ByteRange>,
    ) -> Result<RangeResponse, TransportError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.get(&url);
        if let Some(range) = range {
            request = request.header(RANGE, range.header_value());
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();

        let content_range = resp
            .headers()
            .get(CONTENT_RANGE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        let body = resp.bytes().await?.to_vec();
        self.transferred_bytes
            .fetch_add(body.len() as u64, Ordering::Relaxed);

        debug!(%url, status, bytes = body.len(), ?content_range, "index response");

        Ok(RangeResponse {
            status,
            content_range,
            body,
        })
    }
}
