//! Data models for the contribution platform.
//!
//! `contribution` holds the stored document shape and the moderation state
//! machine; `library` holds the public display projections derived from it.

mod contribution;
mod library;

pub use contribution::*;
pub use library::*;
