//! Stories shelf: the second public projection over approved contributions.
//!
//! Reading progress is a local convenience, tracked per device in a small
//! JSON file. It is best-effort on purpose: a failed write keeps the
//! in-memory state and logs a warning, it never surfaces to the reader.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use uuid::Uuid;

use arutam_core::constants::COMPLETED_STORIES_KEY;
use arutam_core::models::{ModerationStatus, StoryCard};
use arutam_core::LibraryError;
use arutam_db::{ContributionStore, StatusFilter};

/// Category label that disables category filtering on the shelf.
pub const STORY_CATEGORY_ALL: &str = "Todos";

/// Per-device record of stories the reader finished.
///
/// Ids are kept in completion order, deduplicated. The backing file is
/// created lazily on the first mark.
pub struct CompletedStories {
    path: PathBuf,
    ids: Vec<Uuid>,
}

impl CompletedStories {
    /// Open the progress record stored under `dir`. A missing or unreadable
    /// file starts an empty record; corruption is not worth failing a page
    /// load over.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let path = dir
            .as_ref()
            .join(format!("{}.json", COMPLETED_STORIES_KEY));
        let ids = match Self::load(&path) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "starting with empty reading progress");
                Vec::new()
            }
        };
        Self { path, ids }
    }

    fn load(path: &Path) -> anyhow::Result<Vec<Uuid>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    /// Record `id` as completed. Marking twice is a no-op; order of first
    /// completion is preserved.
    pub fn mark(&mut self, id: Uuid) {
        if self.contains(id) {
            return;
        }
        self.ids.push(id);
        if let Err(e) = self.persist() {
            tracing::warn!(path = %self.path.display(), error = %e, "could not persist reading progress");
        }
    }

    fn persist(&self) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.ids).context("serializing reading progress")?;
        std::fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))
    }
}

pub struct StoryShelf {
    store: Arc<dyn ContributionStore>,
    progress: CompletedStories,
}

impl StoryShelf {
    pub fn new(store: Arc<dyn ContributionStore>, progress: CompletedStories) -> Self {
        Self { store, progress }
    }

    /// Approved contributions as story cards, flagged with local progress.
    pub async fn fetch(&self) -> Result<Vec<StoryCard>, LibraryError> {
        let approved = self
            .store
            .query(StatusFilter::Only(ModerationStatus::Approved))
            .await
            .map_err(|e| LibraryError::Store(e.to_string()))?;
        Ok(approved
            .into_iter()
            .map(|c| {
                let completed = self.progress.contains(c.id);
                StoryCard::from_contribution(c, completed)
            })
            .collect())
    }

    pub fn mark_completed(&mut self, id: Uuid) {
        self.progress.mark(id);
    }

    pub fn completed(&self, id: Uuid) -> bool {
        self.progress.contains(id)
    }

    /// Pure category filter over fetched cards; [`STORY_CATEGORY_ALL`]
    /// matches everything.
    pub fn filter_by_category(cards: &[StoryCard], label: &str) -> Vec<StoryCard> {
        if label == STORY_CATEGORY_ALL {
            return cards.to_vec();
        }
        cards
            .iter()
            .filter(|card| card.category_label == label)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_preserves_order_and_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let mut progress = CompletedStories::open(dir.path());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        progress.mark(a);
        progress.mark(b);
        progress.mark(a);
        assert_eq!(progress.ids(), &[a, b]);
    }

    #[test]
    fn test_progress_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        {
            let mut progress = CompletedStories::open(dir.path());
            progress.mark(id);
        }
        let reopened = CompletedStories::open(dir.path());
        assert!(reopened.contains(id));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join(format!("{}.json", COMPLETED_STORIES_KEY));
        std::fs::write(&path, "no es json").unwrap();
        let progress = CompletedStories::open(dir.path());
        assert!(progress.ids().is_empty());
    }

    #[test]
    fn test_failed_persist_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-subdir");
        let mut progress = CompletedStories::open(&missing);
        let id = Uuid::new_v4();
        // the write fails (parent directory does not exist), the mark stays
        progress.mark(id);
        assert!(progress.contains(id));
    }
}
