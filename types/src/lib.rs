//! Core domain types for Surveyor.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the application.
//!
//! The serialized field spellings (camelCase keys, `"NA"`, `"in-progress"`, ...)
//! are load-bearing: persisted assessment documents written by earlier releases
//! must keep deserializing.

mod answer;
mod catalog;
mod ids;
mod session;

pub use answer::{
    AnswerRecord, AnswerStatus, EvidenceItem, EvidenceKind, RiskRating, StandardSelection,
};
pub use catalog::{Catalog, Category, Question};
pub use ids::{EvidenceId, QuestionId, SessionId};
pub use session::{
    AccountManager, AssessmentConfig, AssessmentSession, AssessmentStatus, Assessor, Customer,
};

/// Map of answers keyed by catalog question id.
///
/// A `BTreeMap` keeps persisted documents deterministic. Keys are not required
/// to exist in the catalog: imported or pre-migration data may carry answers
/// for questions that have since been removed, and those are tolerated.
pub type AnswerMap = std::collections::BTreeMap<QuestionId, AnswerRecord>;
