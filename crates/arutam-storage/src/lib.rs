//! Arutam Blob Upload Gateway
//!
//! This crate provides the upload gateway abstraction and its backends: an
//! HTTP backend for a Cloudinary-style unsigned upload endpoint, and an
//! in-memory backend with scripted outcomes for tests.
//!
//! An upload yields a stream of events: intermediate progress values followed
//! by exactly one terminal event carrying either the public URL or an error.

pub mod http;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use http::{GatewayConfig, HttpUploadGateway};
pub use memory::{MemoryUploadGateway, ScriptedOutcome};
pub use traits::{GatewayError, GatewayResult, MediaFile, UploadEvent, UploadGateway};
