#![allow(dead_code)]

use std::sync::{Arc, Once};

use bytes::Bytes;
use chrono::Utc;

use arutam_core::models::{
    Category, ContentType, Contribution, ModerationRecord, ModerationStatus, NewContribution,
};
use arutam_core::submission::{Session, SubmissionForm};
use arutam_db::{ContributionStore, MemoryContributionStore};
use arutam_services::SubmissionPipeline;
use arutam_storage::{MediaFile, MemoryUploadGateway};

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn test_pipeline() -> (
    SubmissionPipeline,
    Arc<MemoryUploadGateway>,
    Arc<MemoryContributionStore>,
) {
    init_tracing();
    let gateway = Arc::new(MemoryUploadGateway::new());
    let store = Arc::new(MemoryContributionStore::new());
    let pipeline = SubmissionPipeline::new(gateway.clone(), store.clone());
    (pipeline, gateway, store)
}

pub fn sample_form() -> SubmissionForm {
    SubmissionForm {
        title: "Medicina Tradicional Shuar".to_string(),
        shuar_title: String::new(),
        description: "Plantas medicinales y prácticas curativas.".to_string(),
        shuar_description: String::new(),
        category: Some(Category::Medicine),
        content_type: ContentType::Video,
        tags: "medicina, plantas".to_string(),
        contributor: String::new(),
        location: String::new(),
        cultural_importance: String::new(),
        age_restriction: String::new(),
        permissions: true,
        respect: true,
    }
}

pub fn sample_file() -> MediaFile {
    MediaFile::new("medicina.mp4", "video/mp4", Bytes::from_static(b"mp4"))
}

pub fn session() -> Session {
    Session::new("Yawi Entsakua")
}

pub fn new_contribution(title: &str, status: ModerationStatus) -> NewContribution {
    NewContribution {
        title: title.to_string(),
        shuar_title: None,
        description: format!("Acerca de {}", title),
        shuar_description: None,
        category: Category::Ritual,
        content_type: ContentType::Video,
        contributor: "Taish Nunkai".to_string(),
        tags: vec![],
        file_url: format!("https://blobs.example/{}", title),
        view_count: 0,
        duration_minutes: None,
        location: None,
        cultural_importance: None,
        age_restriction: "all".to_string(),
        submission_date: Utc::now(),
        moderation: ModerationRecord::pending().with_status(status),
    }
}

pub async fn seed(
    store: &MemoryContributionStore,
    title: &str,
    status: ModerationStatus,
) -> Contribution {
    store.add(new_contribution(title, status)).await.unwrap()
}
