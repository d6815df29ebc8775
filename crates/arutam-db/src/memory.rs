//! In-memory store backend.
//!
//! Keeps documents in submission order behind a mutex and publishes the full
//! set through a `watch` channel after every committed mutation, which gives
//! every subscriber push-updated listings without polling.
//!
//! `inject_fault` scripts a one-shot transport failure for the next matching
//! operation; tests use it to exercise the partial-failure paths.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use arutam_core::models::{Contribution, ModerationStatus, NewContribution};

use crate::store::{ContributionStore, StatusFilter, StoreError, StoreResult};

/// One-shot fault injected into the next matching operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    Add,
    UpdateStatus,
    IncrementViews,
    Delete,
}

struct Inner {
    docs: Vec<Contribution>,
    fault: Option<StoreFault>,
}

pub struct MemoryContributionStore {
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<Vec<Contribution>>,
}

impl MemoryContributionStore {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(Inner {
                docs: Vec::new(),
                fault: None,
            }),
            snapshot_tx,
        }
    }

    /// Script a transport failure for the next operation of the given kind.
    pub fn inject_fault(&self, fault: StoreFault) {
        self.inner.lock().unwrap().fault = Some(fault);
    }

    fn take_fault(inner: &mut Inner, op: StoreFault) -> StoreResult<()> {
        if inner.fault == Some(op) {
            inner.fault = None;
            return Err(StoreError::Backend("injected store failure".to_string()));
        }
        Ok(())
    }

    fn publish(&self, docs: &[Contribution]) {
        self.snapshot_tx.send_replace(docs.to_vec());
    }
}

impl Default for MemoryContributionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContributionStore for MemoryContributionStore {
    async fn add(&self, new: NewContribution) -> StoreResult<Contribution> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_fault(&mut inner, StoreFault::Add)?;

        let contribution = Contribution::from_new(Uuid::new_v4(), new);
        inner.docs.push(contribution.clone());
        let docs = inner.docs.clone();
        drop(inner);
        self.publish(&docs);

        tracing::info!(
            contribution_id = %contribution.id,
            status = %contribution.moderation.status,
            "contribution stored"
        );
        Ok(contribution)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Contribution> {
        let inner = self.inner.lock().unwrap();
        inner
            .docs
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn query(&self, filter: StatusFilter) -> StoreResult<Vec<Contribution>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .docs
            .iter()
            .filter(|doc| filter.matches(doc.moderation.status))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> StoreResult<Contribution> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_fault(&mut inner, StoreFault::UpdateStatus)?;

        let doc = inner
            .docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;
        doc.moderation = doc.moderation.with_status(status);
        let updated = doc.clone();
        let docs = inner.docs.clone();
        drop(inner);
        self.publish(&docs);

        tracing::info!(contribution_id = %id, status = %status, "moderation status updated");
        Ok(updated)
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_fault(&mut inner, StoreFault::IncrementViews)?;

        let doc = inner
            .docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;
        doc.view_count += 1;
        let count = doc.view_count;
        let docs = inner.docs.clone();
        drop(inner);
        self.publish(&docs);

        tracing::debug!(contribution_id = %id, view_count = count, "view counter incremented");
        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_fault(&mut inner, StoreFault::Delete)?;

        let position = inner
            .docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.docs.remove(position);
        let docs = inner.docs.clone();
        drop(inner);
        self.publish(&docs);

        tracing::info!(contribution_id = %id, "contribution deleted");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Contribution>> {
        self.snapshot_tx.subscribe()
    }
}
