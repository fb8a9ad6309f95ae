//! The session store: CRUD over assessment sessions, the active pointer, and
//! the answer/evidence mutation API.
//!
//! One store instance is the sole writer for its backend. Every mutation of
//! the active session rewrites that session's record in the sessions document
//! (whole-document replace) before returning, and bumps `updated_at`.

use surveyor_types::{
    AnswerRecord, AnswerStatus, AssessmentConfig, AssessmentSession, AssessmentStatus, EvidenceId,
    EvidenceItem, EvidenceKind, QuestionId, RiskRating, SessionId, StandardSelection,
};

use crate::backend::StorageBackend;
use crate::error::{Result, StoreError};
use crate::{docs, migration, now_ms};

/// Optional fields of a [`set_answer`](SessionStore::set_answer) call.
///
/// `None` means "leave the record's previous value alone"; only supplied
/// fields overwrite. Status and timestamp are always overwritten and so are
/// not part of the patch.
#[derive(Debug, Clone, Default)]
pub struct AnswerPatch {
    pub notes: Option<String>,
    pub recommendation: Option<String>,
    pub risk_rating: Option<RiskRating>,
    pub selected_standards: Option<Vec<StandardSelection>>,
}

/// Durable store of assessment sessions plus the in-memory active session.
pub struct SessionStore<B: StorageBackend> {
    backend: B,
    active: Option<AssessmentSession>,
}

impl<B: StorageBackend> SessionStore<B> {
    /// Open the store: run the legacy migration if needed, then load the
    /// active session named by the pointer, if any.
    ///
    /// A pointer referencing a session that no longer exists is cleared
    /// rather than propagated.
    pub fn open(mut backend: B) -> Result<Self> {
        migration::run(&mut backend, now_ms())?;

        let mut active = None;
        if let Some(id) = docs::read_active_id(&backend)? {
            let sessions = docs::read_sessions(&backend)?;
            match sessions.into_iter().find(|s| s.id == id) {
                Some(session) => active = Some(session),
                None => {
                    tracing::warn!(id = %id, "Active pointer references a missing session; clearing");
                    docs::clear_active_id(&mut backend)?;
                }
            }
        }

        Ok(Self { backend, active })
    }

    /// Consume the store and hand the backend back.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// All sessions, most recently updated first.
    pub fn list(&self) -> Result<Vec<AssessmentSession>> {
        let mut sessions = docs::read_sessions(&self.backend)?;
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    /// Create and persist a fresh in-progress session and make it active.
    pub fn start_new(&mut self, config: AssessmentConfig) -> Result<SessionId> {
        let session = AssessmentSession::new(config, now_ms());
        let id = session.id.clone();

        // List before pointer: an interruption in between leaves an inactive
        // session rather than a dangling pointer.
        let mut sessions = docs::read_sessions(&self.backend)?;
        sessions.push(session.clone());
        docs::write_sessions(&mut self.backend, &sessions)?;
        docs::write_active_id(&mut self.backend, &id)?;

        self.active = Some(session);
        Ok(id)
    }

    /// Make the named session active. On `NotFound` the current active state
    /// is left unchanged.
    pub fn load(&mut self, id: &SessionId) -> Result<()> {
        let sessions = docs::read_sessions(&self.backend)?;
        let session = sessions
            .into_iter()
            .find(|s| s.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        docs::write_active_id(&mut self.backend, id)?;
        self.active = Some(session);
        Ok(())
    }

    /// The in-memory active session, if one is loaded.
    #[must_use]
    pub fn active(&self) -> Option<&AssessmentSession> {
        self.active.as_ref()
    }

    /// Remove a session from the list. Deleting the active session also
    /// clears the in-memory state and the pointer; deleting an unknown id is
    /// tolerated so callers can retry after a partial failure.
    pub fn delete(&mut self, id: &SessionId) -> Result<()> {
        if self.active.as_ref().is_some_and(|s| s.id == *id) {
            // Pointer first: if interrupted here the session is still listed
            // and merely inactive, never dangling.
            docs::clear_active_id(&mut self.backend)?;
            self.active = None;
        }

        let mut sessions = docs::read_sessions(&self.backend)?;
        sessions.retain(|s| s.id != *id);
        docs::write_sessions(&mut self.backend, &sessions)
    }

    /// Mark a session completed (one-way) and bump its `updated_at`.
    ///
    /// The in-memory active state is deliberately untouched, even when `id`
    /// is the active session; completed sessions stay mutable through this
    /// store while active.
    pub fn complete(&mut self, id: &SessionId) -> Result<()> {
        let mut sessions = docs::read_sessions(&self.backend)?;
        let session = sessions
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        session.status = AssessmentStatus::Completed;
        session.updated_at = now_ms();
        docs::write_sessions(&mut self.backend, &sessions)
    }

    /// Clear the in-memory active state and the pointer without deleting the
    /// persisted record. "Close", as opposed to [`delete`](Self::delete).
    pub fn reset_active(&mut self) -> Result<()> {
        self.active = None;
        docs::clear_active_id(&mut self.backend)
    }

    /// Replace the active session's config.
    pub fn set_config(&mut self, config: AssessmentConfig) -> Result<()> {
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;
        active.config = config;
        self.persist_active()
    }

    // ------------------------------------------------------------------
    // Mutation API over the active session's answers
    // ------------------------------------------------------------------

    /// Upsert the answer for one question.
    ///
    /// `status` and the record timestamp are always overwritten; everything
    /// in `patch` merges field-by-field (see [`AnswerPatch`]). The record is
    /// created on first write.
    ///
    /// No status transition is restricted, and a `No`/`Unsure` status is
    /// accepted without a risk rating - pairing the two is the caller's
    /// business rule, not a store invariant.
    pub fn set_answer(
        &mut self,
        question_id: &QuestionId,
        status: AnswerStatus,
        patch: AnswerPatch,
    ) -> Result<()> {
        let now = now_ms();
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;

        let record = active
            .answers
            .entry(question_id.clone())
            .or_insert_with(|| AnswerRecord::new(question_id.clone(), status, now));
        record.status = status;
        record.timestamp = now;
        if let Some(notes) = patch.notes {
            record.notes = Some(notes);
        }
        if let Some(recommendation) = patch.recommendation {
            record.recommendation = Some(recommendation);
        }
        if let Some(risk_rating) = patch.risk_rating {
            record.risk_rating = Some(risk_rating);
        }
        if let Some(selected) = patch.selected_standards {
            record.selected_standards = selected;
        }

        self.persist_active()
    }

    /// Append an evidence attachment to a question's list, creating an
    /// `Unanswered` record if the question has none yet.
    pub fn add_image(
        &mut self,
        question_id: &QuestionId,
        payload: String,
        kind: EvidenceKind,
        file_name: Option<String>,
        thumbnail: Option<String>,
    ) -> Result<EvidenceId> {
        let now = now_ms();
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;

        let record = active
            .answers
            .entry(question_id.clone())
            .or_insert_with(|| AnswerRecord::new(question_id.clone(), AnswerStatus::Unanswered, now));
        let mut item = EvidenceItem::new(payload, kind);
        item.file_name = file_name;
        item.thumbnail = thumbnail;
        let id = item.id.clone();
        record.images.push(item);

        self.persist_active()?;
        Ok(id)
    }

    /// Update an attachment's caption in place. A missing answer or image id
    /// is a no-op, not an error: captions are edited from surfaces that may
    /// race a removal.
    pub fn update_image_caption(
        &mut self,
        question_id: &QuestionId,
        image_id: &EvidenceId,
        caption: &str,
    ) -> Result<()> {
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;

        let image = active
            .answers
            .get_mut(question_id)
            .and_then(|record| record.images.iter_mut().find(|i| i.id == *image_id));
        let Some(image) = image else {
            return Ok(());
        };
        if image.caption == caption {
            return Ok(());
        }

        caption.clone_into(&mut image.caption);
        self.persist_active()
    }

    /// Remove the attachment at `index`. Out-of-range indices are rejected
    /// and leave the list unchanged.
    pub fn remove_image(&mut self, question_id: &QuestionId, index: usize) -> Result<()> {
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;

        // A question with no record has an empty evidence list.
        let record = active.answers.get_mut(question_id);
        let len = record.as_ref().map_or(0, |r| r.images.len());
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }

        if let Some(record) = record {
            record.images.remove(index);
        }
        self.persist_active()
    }

    /// Reorder the attachment list by extracting `from` and reinserting at
    /// `to`. Both indices are validated against the current length.
    pub fn move_image(&mut self, question_id: &QuestionId, from: usize, to: usize) -> Result<()> {
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;

        let record = active.answers.get_mut(question_id);
        let len = record.as_ref().map_or(0, |r| r.images.len());
        if from >= len {
            return Err(StoreError::IndexOutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(StoreError::IndexOutOfBounds { index: to, len });
        }
        if from == to {
            return Ok(());
        }

        if let Some(record) = record {
            let item = record.images.remove(from);
            record.images.insert(to, item);
        }
        self.persist_active()
    }

    /// Rewrite the active session's record in the sessions document.
    ///
    /// Config, answers, and `updated_at` come from memory; `status` and
    /// `created_at` stay as stored so a `complete(id)` of the active session
    /// is not reverted by a later answer edit.
    fn persist_active(&mut self) -> Result<()> {
        let active = self.active.as_mut().ok_or(StoreError::NoActiveSession)?;
        active.updated_at = now_ms();

        let mut sessions = docs::read_sessions(&self.backend)?;
        match sessions.iter_mut().find(|s| s.id == active.id) {
            Some(stored) => {
                stored.config = active.config.clone();
                stored.answers = active.answers.clone();
                stored.updated_at = active.updated_at;
            }
            None => {
                // Should not happen under the single-writer assumption.
                tracing::warn!(id = %active.id, "Active session missing from list; re-appending");
                sessions.push(active.clone());
            }
        }
        docs::write_sessions(&mut self.backend, &sessions)
    }
}
