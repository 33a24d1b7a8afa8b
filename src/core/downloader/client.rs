use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{FileSink, Fetcher};
use crate::core::error::{MatrixError, MatrixResult};

/// Downloads whole bodies into memory over HTTP.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> MatrixResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatrixError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// Writes files to the local filesystem, creating parent directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

#[async_trait]
impl FileSink for FsSink {
    async fn write(&self, path: &Path, bytes: &[u8]) -> MatrixResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MatrixError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        // Scoped so the handle is closed before we report success.
        {
            let mut file = tokio::fs::File::create(path)
                .await
                .map_err(|e| MatrixError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            file.write_all(bytes).await.map_err(|e| MatrixError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            file.flush().await.map_err(|e| MatrixError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mods").join("sodium.jar");

        FsSink.write(&dest, b"jar bytes").await.unwrap();

        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"jar bytes");
    }

    #[tokio::test]
    async fn fs_sink_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.jar");

        FsSink.write(&dest, b"old contents").await.unwrap();
        FsSink.write(&dest, b"new").await.unwrap();

        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn fs_sink_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        tokio::fs::write(&blocker, b"x").await.unwrap();

        let err = FsSink
            .write(&blocker.join("child.jar"), b"y")
            .await
            .unwrap_err();

        match err {
            MatrixError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }
    }
}
