//! Assessment sessions: one run through the catalog with its config and answers.

use serde::{Deserialize, Serialize};

use crate::AnswerMap;
use crate::ids::SessionId;

/// Who performed the assessment and when.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessor {
    pub name: String,
    pub date: String,
}

/// The account manager on record for the engagement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountManager {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The assessed customer site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sap_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtrack_code: Option<String>,
}

/// Engagement metadata captured when an assessment is started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentConfig {
    pub assessor: Assessor,
    pub account_manager: AccountManager,
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Vec<String>>,
    #[serde(default)]
    pub standards: Vec<String>,
}

/// Lifecycle state of a session. Completion is one-way; there is no revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl AssessmentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// One durable assessment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSession {
    pub id: SessionId,
    pub config: AssessmentConfig,
    #[serde(default)]
    pub answers: AnswerMap,
    pub status: AssessmentStatus,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Unix milliseconds; bumped on every answer or config mutation.
    pub updated_at: i64,
}

impl AssessmentSession {
    /// Fresh in-progress session with no answers.
    #[must_use]
    pub fn new(config: AssessmentConfig, now_ms: i64) -> Self {
        Self {
            id: SessionId::generate(),
            config,
            answers: AnswerMap::new(),
            status: AssessmentStatus::InProgress,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}
