//! Shared core for curator: wire types, review selection state, the diff
//! segment renderer, and the HTTP client for the curation backend.
//!
//! Nothing in this crate touches the terminal. The TUI crate consumes these
//! types and drives `ApiClient` from its background worker task.

pub mod client;
pub mod error;
pub mod segments;
pub mod selection;
pub mod types;
