//! Upload gateway abstraction trait.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Gateway operation errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("download of {url} failed with status {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("download failed: {0}")]
    DownloadFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A file handed to the gateway for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl MediaFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Event emitted while an upload is in flight.
///
/// `Completed` and `Failed` are terminal and mutually exclusive by
/// construction; `Progress` values are in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progress(u8),
    Completed { url: String },
    Failed { error: String },
}

impl UploadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadEvent::Progress(_))
    }
}

/// Blob upload gateway abstraction.
///
/// `upload` returns immediately with the event channel; the transfer runs in
/// a background task. Cancelling the token abandons the local wait; the
/// remote upload is not guaranteed to halt.
#[async_trait]
pub trait UploadGateway: Send + Sync {
    /// Start an upload. The channel delivers intermediate progress followed
    /// by exactly one terminal event, unless the token is cancelled first.
    fn upload(&self, file: MediaFile, cancel: CancellationToken) -> mpsc::Receiver<UploadEvent>;

    /// Fetch raw bytes from a public URL on the blob host.
    async fn fetch(&self, url: &str) -> GatewayResult<Bytes>;
}
