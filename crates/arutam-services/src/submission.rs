//! Submission pipeline: validate, upload, persist.
//!
//! Ordering is strict within one submission: the store write is only issued
//! after the upload has terminated successfully, never concurrently.
//! Independent submissions are unordered and get independent ids.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use arutam_core::models::{ModerationRecord, NewContribution};
use arutam_core::submission::{Session, SubmissionForm};
use arutam_core::SubmissionError;
use arutam_db::ContributionStore;
use arutam_storage::{MediaFile, UploadEvent, UploadGateway};

/// Confirmation shown to the submitter; the caller is expected to discard
/// the form state on receipt.
pub const SUBMISSION_RECEIVED: &str =
    "¡Tu contribución ha sido enviada con éxito para su revisión!";

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub contribution_id: Uuid,
    pub message: &'static str,
}

pub struct SubmissionPipeline {
    gateway: Arc<dyn UploadGateway>,
    store: Arc<dyn ContributionStore>,
}

impl SubmissionPipeline {
    pub fn new(gateway: Arc<dyn UploadGateway>, store: Arc<dyn ContributionStore>) -> Self {
        Self { gateway, store }
    }

    /// Submit a contribution.
    ///
    /// Progress values from the gateway are forwarded on `progress` for UI
    /// feedback; they are not persisted. Cancelling the token abandons the
    /// wait while the upload is in flight; once the store write is issued it
    /// runs to completion.
    ///
    /// A `Persistence` error means the blob was uploaded but no record
    /// exists. The pipeline performs no cleanup or retry for that window;
    /// the user message warns against resubmitting.
    pub async fn submit(
        &self,
        form: SubmissionForm,
        file: MediaFile,
        session: &Session,
        progress: Option<mpsc::UnboundedSender<u8>>,
        cancel: CancellationToken,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let form = form.into_validated()?;
        let contributor = form.contributor_name(session);

        let mut events = self.gateway.upload(file, cancel.clone());
        let file_url = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("submission cancelled while upload in flight");
                    return Err(SubmissionError::Cancelled);
                }
                event = events.recv() => match event {
                    Some(UploadEvent::Progress(pct)) => {
                        if let Some(tx) = &progress {
                            let _ = tx.send(pct);
                        }
                    }
                    Some(UploadEvent::Completed { url }) => break url,
                    Some(UploadEvent::Failed { error }) => {
                        tracing::warn!(error = %error, "upload gateway reported failure");
                        return Err(SubmissionError::Upload(error));
                    }
                    None => {
                        return Err(SubmissionError::Upload(
                            "upload ended without a terminal event".to_string(),
                        ));
                    }
                }
            }
        };

        let new = NewContribution {
            title: form.title,
            shuar_title: form.shuar_title,
            description: form.description,
            shuar_description: form.shuar_description,
            category: form.category,
            content_type: form.content_type,
            contributor,
            tags: form.tags,
            file_url,
            view_count: 0,
            duration_minutes: None,
            location: form.location,
            cultural_importance: form.cultural_importance,
            age_restriction: form.age_restriction,
            submission_date: Utc::now(),
            moderation: ModerationRecord::pending(),
        };

        let contribution = self.store.add(new).await.map_err(|e| {
            tracing::error!(error = %e, "record write failed after successful upload");
            SubmissionError::Persistence(e.to_string())
        })?;

        tracing::info!(
            contribution_id = %contribution.id,
            category = %contribution.category,
            content_type = %contribution.content_type,
            "contribution submitted for review"
        );

        Ok(SubmissionReceipt {
            contribution_id: contribution.id,
            message: SUBMISSION_RECEIVED,
        })
    }
}
