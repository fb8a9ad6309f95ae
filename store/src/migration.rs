//! One-time migration of the legacy single-assessment layout.
//!
//! The pre-multi-session frontend kept two documents: a bag of per-question
//! answers and a config object. This module folds them into one fresh
//! in-progress session appended to the session list.
//!
//! Ordering matters: the legacy keys are deleted and the completion marker
//! written *before* the new record is constructed, so a crash mid-migration
//! can never produce a second session. After the first run the marker alone
//! guards against re-migration - the legacy keys are already gone, so their
//! absence proves nothing.

use std::collections::HashMap;

use serde::Deserialize;
use surveyor_types::{
    AnswerMap, AnswerRecord, AnswerStatus, AssessmentConfig, AssessmentSession, EvidenceId,
    EvidenceItem, EvidenceKind, QuestionId, RiskRating, StandardSelection,
};

use crate::backend::StorageBackend;
use crate::error::Result;
use crate::{docs, keys};

/// Per-question answer as the legacy frontend wrote it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyAnswer {
    #[serde(default = "default_status")]
    status: AnswerStatus,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    recommendation: Option<String>,
    /// String-encoded selections: `"osha"`, `"osha__2"`, `"customstd:..."`.
    #[serde(default)]
    selected_standards: Vec<String>,
    #[serde(default)]
    images: Vec<LegacyImage>,
    #[serde(default)]
    risk_rating: Option<RiskRating>,
    #[serde(default)]
    timestamp: i64,
}

fn default_status() -> AnswerStatus {
    AnswerStatus::Unanswered
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyImage {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    base64: String,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    file_type: Option<EvidenceKind>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

/// Run the migration if it has not run before.
pub(crate) fn run<B: StorageBackend>(backend: &mut B, now_ms: i64) -> Result<()> {
    if backend.get(keys::MIGRATED)?.is_some() {
        return Ok(());
    }
    let has_legacy_answers = backend.get(keys::LEGACY_ANSWERS)?.is_some();
    let has_legacy_config = backend.get(keys::LEGACY_CONFIG)?.is_some();
    if !has_legacy_answers && !has_legacy_config {
        return Ok(());
    }

    let legacy_answers: Option<HashMap<String, LegacyAnswer>> =
        docs::read_json(backend, keys::LEGACY_ANSWERS)?;
    let legacy_config: Option<AssessmentConfig> = docs::read_json(backend, keys::LEGACY_CONFIG)?;

    backend.remove(keys::LEGACY_ANSWERS)?;
    backend.remove(keys::LEGACY_CONFIG)?;
    backend.set(keys::MIGRATED, b"1")?;

    if let Some(config) = legacy_config {
        let mut session = AssessmentSession::new(config, now_ms);
        if let Some(answers) = legacy_answers {
            session.answers = convert_answers(answers);
        }
        let mut sessions = docs::read_sessions(backend)?;
        sessions.push(session);
        docs::write_sessions(backend, &sessions)?;
        tracing::info!("Migrated legacy assessment into the session list");
    } else if has_legacy_answers {
        // Answers with no config cannot form a usable session.
        tracing::warn!("Discarding legacy answers found without a legacy config");
    }

    Ok(())
}

fn convert_answers(legacy: HashMap<String, LegacyAnswer>) -> AnswerMap {
    let mut answers = AnswerMap::new();
    for (question_id, answer) in legacy {
        let question_id = QuestionId::new(question_id);
        let mut record = AnswerRecord::new(question_id.clone(), answer.status, answer.timestamp);
        record.notes = answer.notes;
        record.recommendation = answer.recommendation;
        record.risk_rating = answer.risk_rating;
        record.selected_standards = answer
            .selected_standards
            .iter()
            .map(|raw| parse_selection(raw))
            .collect();
        record.images = answer.images.into_iter().map(convert_image).collect();
        answers.insert(question_id, record);
    }
    answers
}

fn convert_image(image: LegacyImage) -> EvidenceItem {
    EvidenceItem {
        id: image
            .id
            .map_or_else(EvidenceId::generate, EvidenceId::new),
        payload: image.base64,
        caption: image.caption,
        kind: image.file_type.unwrap_or(EvidenceKind::Image),
        file_name: image.file_name,
        thumbnail: image.thumbnail,
    }
}

/// Decode one legacy selection string into the tagged model.
///
/// `"customstd:<text>"` is a custom entry, `"<key>__<n>"` with a numeric
/// suffix selects one line of a reference, anything else is a bare reference
/// key.
fn parse_selection(raw: &str) -> StandardSelection {
    if let Some(text) = raw.strip_prefix("customstd:") {
        return StandardSelection::Custom {
            text: text.to_string(),
        };
    }
    if let Some((key, suffix)) = raw.rsplit_once("__")
        && !key.is_empty()
        && let Ok(line_index) = suffix.parse::<usize>()
    {
        return StandardSelection::Reference {
            standard_key: key.to_string(),
            line_index: Some(line_index),
        };
    }
    StandardSelection::Reference {
        standard_key: raw.to_string(),
        line_index: None,
    }
}
