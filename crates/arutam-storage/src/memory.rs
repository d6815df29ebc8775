//! In-memory gateway backend for tests.
//!
//! Uploads are recorded before any event is emitted, so tests can assert that
//! a rejected form never reached the gateway. The terminal outcome is
//! scripted: succeed (with a generated or fixed URL), fail, or stall without
//! ever terminating (to exercise cancellation).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::traits::{GatewayError, GatewayResult, MediaFile, UploadEvent, UploadGateway};

/// Scripted terminal behavior for the next uploads.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Emit progress then `Completed`; `url` overrides the generated one.
    Succeed { url: Option<String> },
    /// Emit progress then `Failed`.
    Fail { error: String },
    /// Never emit a terminal event; parks until the token is cancelled.
    Stall,
}

pub struct MemoryUploadGateway {
    outcome: Mutex<ScriptedOutcome>,
    progress_steps: Vec<u8>,
    uploads: Arc<Mutex<Vec<MediaFile>>>,
    hosted: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryUploadGateway {
    pub fn new() -> Self {
        Self {
            outcome: Mutex::new(ScriptedOutcome::Succeed { url: None }),
            progress_steps: vec![25, 50, 75, 100],
            uploads: Arc::new(Mutex::new(Vec::new())),
            hosted: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn succeed_with(&self, url: impl Into<String>) {
        *self.outcome.lock().unwrap() = ScriptedOutcome::Succeed {
            url: Some(url.into()),
        };
    }

    pub fn fail_with(&self, error: impl Into<String>) {
        *self.outcome.lock().unwrap() = ScriptedOutcome::Fail {
            error: error.into(),
        };
    }

    pub fn stall(&self) {
        *self.outcome.lock().unwrap() = ScriptedOutcome::Stall;
    }

    /// Number of uploads the gateway was asked to perform.
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Files handed to the gateway, in call order.
    pub fn uploaded(&self) -> Vec<MediaFile> {
        self.uploads.lock().unwrap().clone()
    }

    /// Host bytes under a URL so `fetch` can serve them.
    pub fn host_file(&self, url: impl Into<String>, data: Bytes) {
        self.hosted.lock().unwrap().insert(url.into(), data);
    }
}

impl Default for MemoryUploadGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadGateway for MemoryUploadGateway {
    fn upload(&self, file: MediaFile, cancel: CancellationToken) -> mpsc::Receiver<UploadEvent> {
        self.uploads.lock().unwrap().push(file.clone());
        let outcome = self.outcome.lock().unwrap().clone();
        let steps = self.progress_steps.clone();
        let hosted = self.hosted.clone();

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            match outcome {
                ScriptedOutcome::Succeed { url } => {
                    for pct in steps {
                        let _ = tx.send(UploadEvent::Progress(pct)).await;
                    }
                    let url = url
                        .unwrap_or_else(|| format!("https://blobs.example/{}", file.filename));
                    hosted.lock().unwrap().insert(url.clone(), file.data);
                    let _ = tx.send(UploadEvent::Completed { url }).await;
                }
                ScriptedOutcome::Fail { error } => {
                    for pct in steps {
                        let _ = tx.send(UploadEvent::Progress(pct)).await;
                    }
                    let _ = tx.send(UploadEvent::Failed { error }).await;
                }
                ScriptedOutcome::Stall => {
                    cancel.cancelled().await;
                }
            }
        });
        rx
    }

    async fn fetch(&self, url: &str) -> GatewayResult<Bytes> {
        let hosted = self.hosted.lock().unwrap();
        hosted
            .get(url)
            .cloned()
            .ok_or_else(|| GatewayError::DownloadStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}
