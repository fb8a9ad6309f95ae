//! Storage keys for the persisted documents.
//!
//! Two live documents (sessions list + active pointer), one marker, and the
//! two legacy keys the migration consumes. Keys double as file names under the
//! file backend, so they stay path-safe.

/// List of all assessment sessions, serialized as a JSON array.
pub(crate) const SESSIONS: &str = "assessments";

/// Id of the active session, stored apart from the list. Absent when no
/// session is active.
pub(crate) const ACTIVE: &str = "active-assessment";

/// Written once the legacy migration has run; its presence alone guards
/// against re-migration (the legacy keys are deleted too early to re-check).
pub(crate) const MIGRATED: &str = "assessments-migrated";

/// Legacy single-assessment layout: the per-question answer bag.
pub(crate) const LEGACY_ANSWERS: &str = "assessment-answers";

/// Legacy single-assessment layout: the config object.
pub(crate) const LEGACY_CONFIG: &str = "assessment-config";
