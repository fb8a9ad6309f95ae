//! Read/write helpers for the persisted JSON documents.
//!
//! Read paths degrade: a document that fails to decode is treated as absent
//! and logged, never propagated as a fatal error. Availability over
//! visibility, per the engine's error design.

use serde::de::DeserializeOwned;
use surveyor_types::{AssessmentSession, SessionId};

use crate::backend::StorageBackend;
use crate::error::Result;
use crate::keys;

pub(crate) fn read_json<B: StorageBackend, T: DeserializeOwned>(
    backend: &B,
    key: &str,
) -> Result<Option<T>> {
    let Some(bytes) = backend.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, "Treating unreadable persisted document as absent: {e}");
            Ok(None)
        }
    }
}

pub(crate) fn read_sessions<B: StorageBackend>(backend: &B) -> Result<Vec<AssessmentSession>> {
    Ok(read_json(backend, keys::SESSIONS)?.unwrap_or_default())
}

pub(crate) fn write_sessions<B: StorageBackend>(
    backend: &mut B,
    sessions: &[AssessmentSession],
) -> Result<()> {
    let bytes = serde_json::to_vec(sessions)?;
    backend.set(keys::SESSIONS, &bytes)?;
    Ok(())
}

pub(crate) fn read_active_id<B: StorageBackend>(backend: &B) -> Result<Option<SessionId>> {
    let Some(bytes) = backend.get(keys::ACTIVE)? else {
        return Ok(None);
    };
    match String::from_utf8(bytes) {
        Ok(id) => Ok(Some(SessionId::new(id))),
        Err(e) => {
            tracing::warn!("Treating unreadable active pointer as absent: {e}");
            Ok(None)
        }
    }
}

pub(crate) fn write_active_id<B: StorageBackend>(backend: &mut B, id: &SessionId) -> Result<()> {
    backend.set(keys::ACTIVE, id.as_str().as_bytes())?;
    Ok(())
}

pub(crate) fn clear_active_id<B: StorageBackend>(backend: &mut B) -> Result<()> {
    backend.remove(keys::ACTIVE)?;
    Ok(())
}
