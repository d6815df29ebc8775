//! Arutam Contribution Store
//!
//! Document-collection abstraction for contribution records: add, query,
//! single-field status updates, view-counter bumps, delete, and a live-query
//! subscription that re-delivers the full matching set on every committed
//! mutation.

pub mod memory;
pub mod store;

pub use memory::{MemoryContributionStore, StoreFault};
pub use store::{ContributionStore, StatusFilter, StoreError, StoreResult};
