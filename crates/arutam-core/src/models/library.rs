use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, ContentType, Contribution};

/// How an item is opened in the portal.
///
/// Playable and visual media embed in the in-page viewer; documents and any
/// content type the client does not recognize open as a direct external
/// reference instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    Embedded,
    External,
}

impl Presentation {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Video | ContentType::Audio | ContentType::Image => {
                Presentation::Embedded
            }
            ContentType::Document | ContentType::Unknown => Presentation::External,
        }
    }
}

/// Display projection of an approved contribution for the content library.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryItem {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuar_title: Option<String>,
    pub description: String,
    pub category: Category,
    pub category_label: &'static str,
    pub content_type: ContentType,
    /// Display name of the content type ("type" in the page model).
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub contributor: String,
    /// Raw minutes rendered with a unit suffix, e.g. "30 min".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub views: u64,
    pub file_url: String,
}

impl LibraryItem {
    pub fn presentation(&self) -> Presentation {
        Presentation::for_content_type(self.content_type)
    }
}

impl From<Contribution> for LibraryItem {
    fn from(c: Contribution) -> Self {
        LibraryItem {
            id: c.id,
            title: c.title,
            shuar_title: c.shuar_title,
            description: c.description,
            category: c.category,
            category_label: c.category.label(),
            content_type: c.content_type,
            kind: c.content_type.label(),
            contributor: c.contributor,
            duration: c.duration_minutes.map(|m| format!("{} min", m)),
            views: c.view_count,
            file_url: c.file_url,
        }
    }
}

/// Display projection of an approved contribution for the stories page.
#[derive(Debug, Clone, Serialize)]
pub struct StoryCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub category_label: &'static str,
    pub image_url: String,
    pub completed: bool,
}

impl StoryCard {
    pub fn from_contribution(c: Contribution, completed: bool) -> Self {
        StoryCard {
            id: c.id,
            title: c.title,
            description: c.description,
            author: c.contributor,
            category_label: c.category.label(),
            image_url: c.file_url,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModerationRecord, NewContribution};
    use chrono::Utc;

    fn contribution(content_type: ContentType, duration: Option<u32>) -> Contribution {
        Contribution::from_new(
            Uuid::new_v4(),
            NewContribution {
                title: "Medicina Tradicional Shuar".to_string(),
                shuar_title: None,
                description: "Plantas medicinales y prácticas curativas.".to_string(),
                shuar_description: None,
                category: Category::Medicine,
                content_type,
                contributor: "Taish Nunkai".to_string(),
                tags: vec![],
                file_url: "https://blobs.example/medicina.mp4".to_string(),
                view_count: 560,
                duration_minutes: duration,
                location: None,
                cultural_importance: None,
                age_restriction: "all".to_string(),
                submission_date: Utc::now(),
                moderation: ModerationRecord::pending().approved(),
            },
        )
    }

    #[test]
    fn test_playable_media_embeds() {
        assert_eq!(
            Presentation::for_content_type(ContentType::Video),
            Presentation::Embedded
        );
        assert_eq!(
            Presentation::for_content_type(ContentType::Audio),
            Presentation::Embedded
        );
        assert_eq!(
            Presentation::for_content_type(ContentType::Image),
            Presentation::Embedded
        );
    }

    #[test]
    fn test_documents_and_unknown_open_externally() {
        assert_eq!(
            Presentation::for_content_type(ContentType::Document),
            Presentation::External
        );
        assert_eq!(
            Presentation::for_content_type(ContentType::Unknown),
            Presentation::External
        );
    }

    #[test]
    fn test_library_item_maps_display_fields() {
        let item = LibraryItem::from(contribution(ContentType::Video, Some(30)));
        assert_eq!(item.kind, "Video");
        assert_eq!(item.category_label, "Medicina Tradicional");
        assert_eq!(item.duration.as_deref(), Some("30 min"));
        assert_eq!(item.views, 560);
    }

    #[test]
    fn test_library_item_without_duration() {
        let item = LibraryItem::from(contribution(ContentType::Image, None));
        assert_eq!(item.duration, None);
        assert_eq!(item.presentation(), Presentation::Embedded);
    }
}
