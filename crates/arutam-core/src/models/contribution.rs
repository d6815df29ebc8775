use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Thematic category of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medicine,
    Ritual,
    Music,
    History,
    Language,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Medicine => "medicine",
            Category::Ritual => "ritual",
            Category::Music => "music",
            Category::History => "history",
            Category::Language => "language",
        }
    }

    /// Display label shown in the portal.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Medicine => "Medicina Tradicional",
            Category::Ritual => "Rituales y Ceremonias",
            Category::Music => "Música y Danza",
            Category::History => "Historia Oral",
            Category::Language => "Lengua y Vocabulario",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media kind of the uploaded file.
///
/// Documents written by older clients may carry values this enum does not
/// know; those deserialize as `Unknown` and are presented as external
/// references, never embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Audio,
    Video,
    Image,
    Document,
    #[serde(other)]
    Unknown,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Audio => "audio",
            ContentType::Video => "video",
            ContentType::Image => "image",
            ContentType::Document => "document",
            ContentType::Unknown => "unknown",
        }
    }

    /// Display label shown in the portal.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Audio => "Audio",
            ContentType::Video => "Video",
            ContentType::Image => "Imagen",
            ContentType::Document => "Documento",
            ContentType::Unknown => "Contenido",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Moderation sub-record stored inside each contribution document.
///
/// Transitions return a new record rather than mutating in place. There is no
/// terminal state: approved and rejected records may be re-moderated, and
/// re-applying the current state is a no-op by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRecord {
    pub status: ModerationStatus,
}

impl ModerationRecord {
    /// Initial state for every new submission.
    pub fn pending() -> Self {
        Self {
            status: ModerationStatus::Pending,
        }
    }

    pub fn approved(self) -> Self {
        Self {
            status: ModerationStatus::Approved,
        }
    }

    pub fn rejected(self) -> Self {
        Self {
            status: ModerationStatus::Rejected,
        }
    }

    pub fn with_status(self, status: ModerationStatus) -> Self {
        Self { status }
    }
}

impl Default for ModerationRecord {
    fn default() -> Self {
        Self::pending()
    }
}

/// A community contribution document, one per submitted media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    /// Assigned by the store exactly once, at creation.
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuar_title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuar_description: Option<String>,
    pub category: Category,
    pub content_type: ContentType,
    pub contributor: String,
    /// Ordered, may be empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Absolute URL into the blob host; never persisted empty.
    pub file_url: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_importance: Option<String>,
    pub age_restriction: String,
    /// Set once at creation, immutable thereafter.
    pub submission_date: DateTime<Utc>,
    pub moderation: ModerationRecord,
}

impl Contribution {
    pub fn from_new(id: Uuid, new: NewContribution) -> Self {
        Self {
            id,
            title: new.title,
            shuar_title: new.shuar_title,
            description: new.description,
            shuar_description: new.shuar_description,
            category: new.category,
            content_type: new.content_type,
            contributor: new.contributor,
            tags: new.tags,
            file_url: new.file_url,
            view_count: new.view_count,
            duration_minutes: new.duration_minutes,
            location: new.location,
            cultural_importance: new.cultural_importance,
            age_restriction: new.age_restriction,
            submission_date: new.submission_date,
            moderation: new.moderation,
        }
    }

    /// New record with the given moderation status; all other fields untouched.
    pub fn with_status(mut self, status: ModerationStatus) -> Self {
        self.moderation = self.moderation.with_status(status);
        self
    }

    /// Publicly visible iff approved; no other field gates visibility.
    pub fn is_public(&self) -> bool {
        self.moderation.status == ModerationStatus::Approved
    }
}

/// A contribution document before the store has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContribution {
    pub title: String,
    pub shuar_title: Option<String>,
    pub description: String,
    pub shuar_description: Option<String>,
    pub category: Category,
    pub content_type: ContentType,
    pub contributor: String,
    pub tags: Vec<String>,
    pub file_url: String,
    pub view_count: u64,
    pub duration_minutes: Option<u32>,
    pub location: Option<String>,
    pub cultural_importance: Option<String>,
    pub age_restriction: String,
    pub submission_date: DateTime<Utc>,
    pub moderation: ModerationRecord,
}

/// Parse a comma-separated free-text tag field into an ordered sequence,
/// trimmed and with empty entries dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags("a, b ,, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_tags_empty_input() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_tags_preserves_order() {
        assert_eq!(
            parse_tags("medicina, ayahuasca, selva"),
            vec!["medicina", "ayahuasca", "selva"]
        );
    }

    #[test]
    fn test_moderation_starts_pending() {
        assert_eq!(ModerationRecord::default().status, ModerationStatus::Pending);
    }

    #[test]
    fn test_all_transitions_are_valid() {
        let record = ModerationRecord::pending();
        assert_eq!(record.approved().status, ModerationStatus::Approved);
        assert_eq!(record.rejected().status, ModerationStatus::Rejected);
        // approved and rejected are not terminal
        assert_eq!(record.approved().rejected().status, ModerationStatus::Rejected);
        assert_eq!(record.rejected().approved().status, ModerationStatus::Approved);
    }

    #[test]
    fn test_reapplying_state_is_idempotent() {
        let record = ModerationRecord::pending().approved();
        assert_eq!(record.approved(), record);
    }

    #[test]
    fn test_unknown_content_type_deserializes() {
        let parsed: ContentType = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(parsed, ContentType::Unknown);
    }

    #[test]
    fn test_content_type_round_trip() {
        let json = serde_json::to_string(&ContentType::Image).unwrap();
        assert_eq!(json, "\"image\"");
        assert_eq!(
            serde_json::from_str::<ContentType>(&json).unwrap(),
            ContentType::Image
        );
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Ritual.label(), "Rituales y Ceremonias");
        assert_eq!(Category::Medicine.as_str(), "medicine");
    }
}
