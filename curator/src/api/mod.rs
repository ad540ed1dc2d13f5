//! Backend integration for curator.
//!
//! All network I/O runs in one background tokio task that owns the
//! `ApiClient`. Communication is via channels: `ApiRequest` in,
//! `AppEvent::Api(ApiOutcome)` out, so the UI thread never awaits a
//! request directly.

pub mod types;
pub mod worker;
