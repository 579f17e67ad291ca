use async_trait::async_trait;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Component, Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::{ByteRange, RangeResponse, RangeSource};
use crate::error::TransportError;

/// Local mirror of the index tree, answering like a range-capable server
///
/// Files are looked up under `root` with the same relative paths the remote
/// host uses. Ranged reads answer 206 with a synthesized `Content-Range`,
/// reads past the end answer 416, and missing files answer 404.
pub struct LocalIndexSource {
    root: PathBuf,
}

impl LocalIndexSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve_path(&self, path: &str) -> Result<PathBuf, TransportError> {
        let relative = Path::new(path);
        // Keep lookups inside the mirror
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("index path escapes mirror root: {}", path),
            )
            .into());
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl RangeSource for LocalIndexSource {
    async fn get(
        &self,
        path: &str,
        range: Option<ByteRange>,
    ) -> Result<RangeResponse, TransportError> {
        let full_path = self.resolve_path(path)?;

        let mut file = match File::open(&full_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(RangeResponse::status_only(404));
            }
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata().await?.len();

        let Some(range) = range else {
            let mut body = Vec::with_capacity(size as usize);
            file.read_to_end(&mut body).await?;
            return Ok(RangeResponse {
                status: 200,
                content_range: None,
                body,
            });
        };

        if range.start >= size || range.start > range.end {
            return Ok(RangeResponse {
                status: 416,
                content_range: Some(format!("bytes */{}", size)),
                body: Vec::new(),
            });
        }

        // Clamp to the file like a server serving a short final page
        let end = range.end.min(size - 1);
        let mut body = vec![0u8; (end - range.start + 1) as usize];
        file.seek(SeekFrom::Start(range.start)).await?;
        file.read_exact(&mut body).await?;

        Ok(RangeResponse {
            status: 206,
            content_range: Some(format!("bytes {}-{}/{}", range.start, end, size)),
            body,
        })
    }
}
