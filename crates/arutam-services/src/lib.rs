//! Arutam Services
//!
//! The contribution lifecycle: the submission pipeline that orchestrates
//! upload gateway and store, the moderation controller over the live listing,
//! and the public view projectors (content library and stories).

pub mod library;
pub mod moderation;
pub mod stories;
pub mod submission;

// Re-export commonly used types
pub use library::{Library, LibraryFilter};
pub use moderation::{
    Confirmation, DeleteOutcome, ModerationCounts, ModerationQuery, ModerationService,
};
pub use stories::{CompletedStories, StoryShelf, STORY_CATEGORY_ALL};
pub use submission::{SubmissionPipeline, SubmissionReceipt, SUBMISSION_RECEIVED};
