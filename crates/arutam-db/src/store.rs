//! Store abstraction trait.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use arutam_core::models::{Contribution, ModerationStatus, NewContribution};

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contribution not found: {0}")]
    NotFound(Uuid),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Status predicate for queries over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ModerationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ModerationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Document-collection semantics over contribution records.
///
/// Backends assign ids, preserve submission order in query results, and
/// publish a full snapshot to subscribers after every committed mutation
/// (last writer wins; no version check is performed).
#[async_trait]
pub trait ContributionStore: Send + Sync {
    /// Insert a new document. The store assigns the id, exactly once.
    async fn add(&self, new: NewContribution) -> StoreResult<Contribution>;

    /// Fetch a single document by id.
    async fn get(&self, id: Uuid) -> StoreResult<Contribution>;

    /// List documents matching the status predicate, in submission order.
    async fn query(&self, filter: StatusFilter) -> StoreResult<Vec<Contribution>>;

    /// Single-field write scoped to `moderation.status`; no side effects on
    /// other fields.
    async fn update_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> StoreResult<Contribution>;

    /// Bump the view counter by one and return the new count.
    async fn increment_views(&self, id: Uuid) -> StoreResult<u64>;

    /// Remove a document permanently. Reports `NotFound` for absent ids
    /// rather than succeeding silently.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Live query: the receiver always holds the latest full snapshot; a new
    /// one is published after every committed mutation.
    fn subscribe(&self) -> watch::Receiver<Vec<Contribution>>;
}
