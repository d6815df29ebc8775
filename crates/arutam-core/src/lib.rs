//! Arutam Core Library
//!
//! This crate provides the domain models, the moderation state machine,
//! submission form validation, and the error taxonomy shared across all
//! Arutam components.

pub mod constants;
pub mod error;
pub mod models;
pub mod submission;

// Re-export commonly used types
pub use error::{LibraryError, ModerationError, SubmissionError};
pub use models::{
    Category, ContentType, Contribution, LibraryItem, ModerationRecord, ModerationStatus,
    NewContribution, Presentation, StoryCard,
};
pub use submission::{Session, SubmissionForm, ValidatedSubmission};
