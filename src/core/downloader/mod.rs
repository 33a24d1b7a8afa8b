mod client;

use std::path::Path;

use async_trait::async_trait;

pub use client::{FsSink, HttpFetcher};

use crate::core::error::MatrixResult;

/// Downloads a whole resource. Non-2xx answers become
/// `MatrixError::DownloadFailed` carrying the status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> MatrixResult<Vec<u8>>;
}

/// Destination for downloaded files.
#[async_trait]
pub trait FileSink: Send + Sync {
    async fn write(&self, path: &Path, bytes: &[u8]) -> MatrixResult<()>;
}
