//! Public view projector for the content library.
//!
//! Only approved contributions are visible here; `moderation.status` is the
//! single visibility gate. The view counter is a fire-and-forget best-effort
//! metric: the store increment is issued before the item is presented and the
//! optimistic local bump is never rolled back if that write fails.

use std::sync::Arc;

use bytes::Bytes;

use arutam_core::models::{Category, ContentType, LibraryItem, ModerationStatus, Presentation};
use arutam_core::LibraryError;
use arutam_db::{ContributionStore, StatusFilter, StoreError};
use arutam_storage::UploadGateway;

/// Local filter criteria for the fetched set. Applied as a pure function on
/// every criterion change; the underlying set is never mutated.
#[derive(Debug, Clone, Default)]
pub struct LibraryFilter {
    pub category: Option<Category>,
    pub content_type: Option<ContentType>,
    /// Free text over title, description and contributor; case-insensitive.
    pub search: String,
}

pub struct Library {
    store: Arc<dyn ContributionStore>,
    gateway: Arc<dyn UploadGateway>,
}

impl Library {
    pub fn new(store: Arc<dyn ContributionStore>, gateway: Arc<dyn UploadGateway>) -> Self {
        Self { store, gateway }
    }

    /// Query approved records and map them to their display shape.
    pub async fn fetch_approved(&self) -> Result<Vec<LibraryItem>, LibraryError> {
        let approved = self
            .store
            .query(StatusFilter::Only(ModerationStatus::Approved))
            .await
            .map_err(map_store_error)?;
        Ok(approved.into_iter().map(LibraryItem::from).collect())
    }

    /// Open an item: bump the view counter, then report how to present it.
    ///
    /// The local count advances even when the store write fails; view counts
    /// are a soft metric, not billing-grade.
    pub async fn open(&self, item: &mut LibraryItem) -> Presentation {
        if let Err(e) = self.store.increment_views(item.id).await {
            tracing::warn!(
                contribution_id = %item.id,
                error = %e,
                "view counter write failed, keeping optimistic local count"
            );
        }
        item.views += 1;
        item.presentation()
    }

    /// Fetch the raw file bytes for download. No side effects on the record;
    /// in particular the view counter is not touched.
    pub async fn download(&self, item: &LibraryItem) -> Result<Bytes, LibraryError> {
        self.gateway.fetch(&item.file_url).await.map_err(|e| {
            tracing::warn!(contribution_id = %item.id, error = %e, "download failed");
            LibraryError::Download(e.to_string())
        })
    }

    /// Pure filter over the fetched set; returns the derived visible subset.
    pub fn apply_filter(items: &[LibraryItem], filter: &LibraryFilter) -> Vec<LibraryItem> {
        let term = filter.search.trim().to_lowercase();
        items
            .iter()
            .filter(|item| filter.category.map_or(true, |c| item.category == c))
            .filter(|item| filter.content_type.map_or(true, |t| item.content_type == t))
            .filter(|item| {
                if term.is_empty() {
                    return true;
                }
                item.title.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
                    || item.contributor.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }
}

fn map_store_error(err: StoreError) -> LibraryError {
    LibraryError::Store(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arutam_core::models::{Contribution, ModerationRecord, NewContribution};
    use chrono::Utc;
    use uuid::Uuid;

    fn item(
        title: &str,
        category: Category,
        content_type: ContentType,
        contributor: &str,
    ) -> LibraryItem {
        LibraryItem::from(Contribution::from_new(
            Uuid::new_v4(),
            NewContribution {
                title: title.to_string(),
                shuar_title: None,
                description: format!("Acerca de {}", title),
                shuar_description: None,
                category,
                content_type,
                contributor: contributor.to_string(),
                tags: vec![],
                file_url: "https://blobs.example/f".to_string(),
                view_count: 0,
                duration_minutes: None,
                location: None,
                cultural_importance: None,
                age_restriction: "all".to_string(),
                submission_date: Utc::now(),
                moderation: ModerationRecord::pending().approved(),
            },
        ))
    }

    fn sample_set() -> Vec<LibraryItem> {
        vec![
            item("Medicina", Category::Medicine, ContentType::Video, "Taish"),
            item("Tsantsa", Category::Ritual, ContentType::Audio, "Yawi"),
            item("Ayahuasca", Category::Ritual, ContentType::Video, "Panki"),
            item("Anent", Category::Music, ContentType::Audio, "Nantu"),
            item("Historia", Category::History, ContentType::Document, "Shikiya"),
        ]
    }

    #[test]
    fn test_category_filter_returns_exactly_matching_items() {
        let items = sample_set();
        let filter = LibraryFilter {
            category: Some(Category::Ritual),
            ..Default::default()
        };
        let visible = Library::apply_filter(&items, &filter);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|i| i.category == Category::Ritual));
    }

    #[test]
    fn test_filters_compose_independently_of_order() {
        let items = sample_set();
        let filter = LibraryFilter {
            category: Some(Category::Ritual),
            content_type: Some(ContentType::Video),
            search: String::new(),
        };
        let visible = Library::apply_filter(&items, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Ayahuasca");
    }

    #[test]
    fn test_free_text_matches_contributor() {
        let items = sample_set();
        let filter = LibraryFilter {
            search: "yawi".to_string(),
            ..Default::default()
        };
        let visible = Library::apply_filter(&items, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Tsantsa");
    }

    #[test]
    fn test_filter_never_mutates_source() {
        let items = sample_set();
        let filter = LibraryFilter {
            search: "nada-que-coincida".to_string(),
            ..Default::default()
        };
        assert!(Library::apply_filter(&items, &filter).is_empty());
        assert_eq!(items.len(), 5);
    }
}
