//! Moderation controller over the live contribution listing.
//!
//! The listing is push-updated: the store publishes a full snapshot after
//! every committed mutation, including ones made by other moderator sessions.
//! Search, status filtering and the derived counts are pure functions over a
//! snapshot; they never touch the store and never fail.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use arutam_core::models::{Contribution, ModerationStatus};
use arutam_core::ModerationError;
use arutam_db::{ContributionStore, StatusFilter, StoreError};

/// Explicit confirmation gate for destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Confirmation was declined; no store call was issued.
    NotConfirmed,
}

/// Local search and status filter applied to a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ModerationQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring over title, native title, category label
    /// and contributor. Empty matches everything.
    pub search: String,
}

/// Derived counts, recomputed from each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModerationCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

impl ModerationCounts {
    pub fn of(items: &[Contribution]) -> Self {
        let mut counts = ModerationCounts {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            match item.moderation.status {
                ModerationStatus::Pending => counts.pending += 1,
                ModerationStatus::Approved => counts.approved += 1,
                ModerationStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

pub struct ModerationService {
    store: Arc<dyn ContributionStore>,
    snapshot: watch::Receiver<Vec<Contribution>>,
}

impl ModerationService {
    pub fn new(store: Arc<dyn ContributionStore>) -> Self {
        let snapshot = store.subscribe();
        Self { store, snapshot }
    }

    /// Latest full set, every status included.
    pub fn snapshot(&self) -> Vec<Contribution> {
        self.snapshot.borrow().clone()
    }

    /// Fresh receiver for callers that want to await pushed changes.
    pub fn watch(&self) -> watch::Receiver<Vec<Contribution>> {
        self.store.subscribe()
    }

    pub fn counts(&self) -> ModerationCounts {
        ModerationCounts::of(&self.snapshot.borrow())
    }

    /// Pure filter over a snapshot; the input set is never mutated.
    pub fn filter(items: &[Contribution], query: &ModerationQuery) -> Vec<Contribution> {
        let term = query.search.trim().to_lowercase();
        items
            .iter()
            .filter(|item| query.status.matches(item.moderation.status))
            .filter(|item| {
                if term.is_empty() {
                    return true;
                }
                item.title.to_lowercase().contains(&term)
                    || item
                        .shuar_title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&term))
                    || item.category.label().to_lowercase().contains(&term)
                    || item.contributor.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    pub async fn approve(&self, id: Uuid) -> Result<(), ModerationError> {
        self.set_status(id, ModerationStatus::Approved).await
    }

    pub async fn reject(&self, id: Uuid) -> Result<(), ModerationError> {
        self.set_status(id, ModerationStatus::Rejected).await
    }

    async fn set_status(&self, id: Uuid, status: ModerationStatus) -> Result<(), ModerationError> {
        match self.store.update_status(id, status).await {
            Ok(_) => {
                tracing::info!(contribution_id = %id, status = %status, "moderation action applied");
                Ok(())
            }
            Err(e) => {
                // Reported to the caller; the prior listing state stands.
                tracing::warn!(contribution_id = %id, status = %status, error = %e, "moderation action failed");
                Err(map_store_error(e))
            }
        }
    }

    /// Irreversible. A declined confirmation issues no store call.
    pub async fn delete(
        &self,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ModerationError> {
        if confirmation != Confirmation::Confirmed {
            return Ok(DeleteOutcome::NotConfirmed);
        }
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(contribution_id = %id, "contribution deleted by moderator");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                tracing::warn!(contribution_id = %id, error = %e, "delete failed, record left intact");
                Err(map_store_error(e))
            }
        }
    }
}

fn map_store_error(err: StoreError) -> ModerationError {
    match err {
        StoreError::NotFound(id) => ModerationError::NotFound(id),
        StoreError::Backend(msg) => ModerationError::Store(msg),
    }
}
