use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the resolution engine.
/// Every module returns `Result<T, MatrixError>`.
#[derive(Debug, Error)]
pub enum MatrixError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Resolution ──────────────────────────────────────
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Versions ────────────────────────────────────────
    #[error("Cannot parse '{input}' as a version: {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("{context}: {message}")]
    Rewrite { context: String, message: String },
}

/// Convenience alias used throughout the crate.
pub type MatrixResult<T> = Result<T, MatrixError>;

impl MatrixError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            MatrixError::DownloadFailed { status, .. } => Some(*status),
            MatrixError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `403 Forbidden`, the one failure tolerated for external artifacts.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}
