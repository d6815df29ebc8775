//! Error taxonomy for the contribution lifecycle.
//!
//! All errors are caught at the component boundary and converted to a
//! user-facing message via `user_message()`; none propagate as panics.

use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Outcome of a failed submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Local, pre-network; always recoverable by fixing the form.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The upload failed before any record existed; fully recoverable.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The upload succeeded but the record write failed. Not cleanly
    /// recoverable: resubmitting would duplicate the uploaded blob, so the
    /// user message points at support instead.
    #[error("contribution write failed after successful upload: {0}")]
    Persistence(String),

    /// Caller abandoned the wait while the upload was in flight.
    #[error("submission cancelled")]
    Cancelled,
}

impl SubmissionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Validation(_) => {
                "Revisa el formulario: faltan campos obligatorios o no se aceptaron los consentimientos."
            }
            SubmissionError::Upload(_) => {
                "Hubo un error al subir el archivo. Por favor, inténtalo de nuevo."
            }
            SubmissionError::Persistence(_) => {
                "El archivo se subió, pero no se pudo guardar la contribución. Contacta a soporte."
            }
            SubmissionError::Cancelled => "El envío fue cancelado.",
        }
    }
}

/// Outcome of a failed moderation action.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("contribution {0} not found")]
    NotFound(Uuid),

    #[error("store error: {0}")]
    Store(String),
}

impl ModerationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ModerationError::NotFound(_) => "La contribución ya no existe.",
            ModerationError::Store(_) => {
                "No se pudo completar la acción de moderación. Inténtalo de nuevo."
            }
        }
    }
}

/// Outcome of a failed public-view operation.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("store error: {0}")]
    Store(String),

    /// Fetching the file for download failed (non-success HTTP status or
    /// transport error). No side effect on the contribution record.
    #[error("download failed: {0}")]
    Download(String),
}

impl LibraryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LibraryError::Store(_) => "No se pudo cargar el contenido. Inténtalo de nuevo.",
            LibraryError::Download(_) => "No se pudo descargar el archivo.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_message_points_at_support() {
        let err = SubmissionError::Persistence("write failed".to_string());
        assert!(err.user_message().contains("Contacta a soporte"));
    }

    #[test]
    fn test_upload_message_invites_retry() {
        let err = SubmissionError::Upload("boom".to_string());
        assert!(err.user_message().contains("inténtalo de nuevo"));
    }
}
