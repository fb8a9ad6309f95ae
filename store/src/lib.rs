//! Assessment persistence and lifecycle engine.
//!
//! Owns the durable record of assessment sessions: a key/byte storage
//! abstraction ([`StorageBackend`]), a one-time migration from the legacy
//! single-assessment layout, and the [`SessionStore`] with its answer/evidence
//! mutation API.
//!
//! The engine is synchronous and single-writer: every mutation completes its
//! persistence write before returning, so readers always observe the
//! post-mutation state. Concurrent writers against the same backend are an
//! acknowledged last-writer-wins race and are not guarded here.

mod backend;
mod docs;
mod error;
mod keys;
mod migration;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{Result, StoreError};
pub use store::{AnswerPatch, SessionStore};

/// Current wall-clock time in Unix milliseconds, the timestamp unit of every
/// persisted document.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
