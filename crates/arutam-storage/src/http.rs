//! HTTP gateway backend for an unsigned-upload blob host.
//!
//! The upload is a multipart POST against the configured endpoint. The file
//! body is streamed in chunks and a progress event is emitted as each chunk
//! is handed to the transport, so callers get the same progress feedback the
//! portal shows during submission.

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use async_trait::async_trait;

use crate::traits::{GatewayError, GatewayResult, MediaFile, UploadEvent, UploadGateway};

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Configuration for the HTTP upload gateway, loaded from the environment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Full URL of the unsigned upload endpoint.
    pub upload_url: String,
    /// Upload preset name sent with each request.
    pub upload_preset: String,
    /// Optional folder the host files uploads under.
    pub folder: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> GatewayResult<Self> {
        dotenvy::dotenv().ok();
        let upload_url = std::env::var("ARUTAM_UPLOAD_URL")
            .map_err(|_| GatewayError::ConfigError("ARUTAM_UPLOAD_URL is not set".to_string()))?;
        let upload_preset = std::env::var("ARUTAM_UPLOAD_PRESET").map_err(|_| {
            GatewayError::ConfigError("ARUTAM_UPLOAD_PRESET is not set".to_string())
        })?;
        let folder = std::env::var("ARUTAM_UPLOAD_FOLDER").ok();
        Ok(Self {
            upload_url,
            upload_preset,
            folder,
        })
    }
}

/// Gateway backend talking to the real blob host over HTTP.
#[derive(Clone)]
pub struct HttpUploadGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpUploadGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn run_upload(
        client: reqwest::Client,
        config: GatewayConfig,
        file: MediaFile,
        events: mpsc::Sender<UploadEvent>,
    ) {
        let total = file.data.len().max(1);
        let mut sent = 0usize;
        let mut chunks = Vec::new();
        for chunk in file.data.chunks(UPLOAD_CHUNK_SIZE) {
            sent += chunk.len();
            let pct = ((sent * 100) / total) as u8;
            chunks.push((Bytes::copy_from_slice(chunk), pct));
        }

        // Progress is emitted as the transport consumes each chunk; values
        // are dropped rather than awaited if the caller falls behind.
        let progress = events.clone();
        let body = reqwest::Body::wrap_stream(futures::stream::iter(chunks.into_iter().map(
            move |(chunk, pct)| {
                let _ = progress.try_send(UploadEvent::Progress(pct));
                Ok::<Bytes, std::io::Error>(chunk)
            },
        )));

        let part = match reqwest::multipart::Part::stream_with_length(body, file.data.len() as u64)
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
        {
            Ok(part) => part,
            Err(e) => {
                let _ = events
                    .send(UploadEvent::Failed {
                        error: format!("invalid content type '{}': {}", file.content_type, e),
                    })
                    .await;
                return;
            }
        };

        let mut form = reqwest::multipart::Form::new()
            .text("upload_preset", config.upload_preset.clone())
            .part("file", part);
        if let Some(folder) = config.folder.clone() {
            form = form.text("folder", folder);
        }

        let response = client.post(&config.upload_url).multipart(form).send().await;
        let event = match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<serde_json::Value>().await {
                    Ok(payload) => match upload_url_from_payload(&payload) {
                        Some(url) => {
                            tracing::info!(
                                filename = %file.filename,
                                url = %url,
                                "blob upload successful"
                            );
                            UploadEvent::Completed { url }
                        }
                        None => UploadEvent::Failed {
                            error: "upload response carried no file URL".to_string(),
                        },
                    },
                    Err(e) => UploadEvent::Failed {
                        error: format!("invalid upload response: {}", e),
                    },
                }
            }
            Ok(response) => {
                tracing::error!(
                    filename = %file.filename,
                    status = %response.status(),
                    "blob host rejected upload"
                );
                UploadEvent::Failed {
                    error: format!("upload endpoint returned {}", response.status()),
                }
            }
            Err(e) => {
                tracing::error!(filename = %file.filename, error = %e, "blob upload failed");
                UploadEvent::Failed {
                    error: e.to_string(),
                }
            }
        };
        let _ = events.send(event).await;
    }
}

fn upload_url_from_payload(payload: &serde_json::Value) -> Option<String> {
    payload["secure_url"]
        .as_str()
        .or_else(|| payload["url"].as_str())
        .map(ToOwned::to_owned)
}

#[async_trait]
impl UploadGateway for HttpUploadGateway {
    fn upload(&self, file: MediaFile, cancel: CancellationToken) -> mpsc::Receiver<UploadEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let client = self.client.clone();
        let config = self.config.clone();
        tokio::spawn(async move {
            let filename = file.filename.clone();
            tokio::select! {
                _ = cancel.cancelled() => {
                    // Local wait abandoned; the remote transfer may still finish.
                    tracing::info!(filename = %filename, "upload cancelled by caller");
                }
                _ = Self::run_upload(client, config, file, tx.clone()) => {}
            }
        });
        rx
    }

    async fn fetch(&self, url: &str) -> GatewayResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "file download rejected");
            return Err(GatewayError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| GatewayError::DownloadFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_url_prefers_secure() {
        let payload = serde_json::json!({
            "secure_url": "https://blobs.example/a.jpg",
            "url": "http://blobs.example/a.jpg"
        });
        assert_eq!(
            upload_url_from_payload(&payload).as_deref(),
            Some("https://blobs.example/a.jpg")
        );
    }

    #[test]
    fn test_payload_without_url() {
        assert_eq!(upload_url_from_payload(&serde_json::json!({})), None);
    }

    #[test]
    fn test_config_from_env_requires_endpoint() {
        std::env::remove_var("ARUTAM_UPLOAD_URL");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(GatewayError::ConfigError(_))
        ));
    }
}
