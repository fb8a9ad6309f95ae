//! Answer records: the mutable compliance state for one question.

use serde::{Deserialize, Serialize};

use crate::ids::{EvidenceId, QuestionId};

/// Compliance answer for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerStatus {
    Yes,
    No,
    #[serde(rename = "NA")]
    NotApplicable,
    Unsure,
    Unanswered,
}

impl AnswerStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotApplicable => "NA",
            Self::Unsure => "Unsure",
            Self::Unanswered => "Unanswered",
        }
    }

    /// True for every status except `Unanswered` - the definition of
    /// "completed" used by progress calculations.
    #[must_use]
    pub fn is_answered(self) -> bool {
        !matches!(self, Self::Unanswered)
    }
}

/// Assessor-assigned severity for a non-compliant or unsure answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRating {
    Good,
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskRating {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }
}

/// Which regulatory text an answer cites.
///
/// Replaces the old string-encoded forms (`"osha__3"`, `"customstd:..."`,
/// bare `"osha"`) with an explicit variant; only the legacy migration still
/// understands the string encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StandardSelection {
    /// A catalog reference, optionally narrowed to one line of its text block.
    #[serde(rename_all = "camelCase")]
    Reference {
        standard_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line_index: Option<usize>,
    },
    /// Free-text standard supplied by the assessor.
    Custom { text: String },
}

/// Kind of an evidence attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Image,
    Pdf,
}

/// One attached image or PDF. List position is significant: it is the order
/// evidence appears in reports and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub id: EvidenceId,
    /// Base64 payload or an external reference, depending on the frontend.
    pub payload: String,
    pub caption: String,
    pub kind: EvidenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl EvidenceItem {
    /// New attachment with a fresh id and an empty caption, appended-ready.
    #[must_use]
    pub fn new(payload: String, kind: EvidenceKind) -> Self {
        Self {
            id: EvidenceId::generate(),
            payload,
            caption: String::new(),
            kind,
            file_name: None,
            thumbnail: None,
        }
    }
}

/// The answer, notes, risk rating, and evidence for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub status: AnswerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_standards: Vec<StandardSelection>,
    #[serde(default)]
    pub images: Vec<EvidenceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_rating: Option<RiskRating>,
    /// Unix milliseconds of the last `set_answer` write.
    pub timestamp: i64,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(question_id: QuestionId, status: AnswerStatus, timestamp: i64) -> Self {
        Self {
            question_id,
            status,
            notes: None,
            recommendation: None,
            selected_standards: Vec::new(),
            images: Vec::new(),
            risk_rating: None,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_spellings_match_persisted_documents() {
        assert_eq!(
            serde_json::to_string(&AnswerStatus::NotApplicable).expect("json"),
            "\"NA\""
        );
        assert_eq!(
            serde_json::from_str::<AnswerStatus>("\"Unsure\"").expect("json"),
            AnswerStatus::Unsure
        );
        assert_eq!(
            serde_json::to_string(&RiskRating::High).expect("json"),
            "\"High\""
        );
    }

    #[test]
    fn selection_serializes_as_tagged_variant() {
        let reference = StandardSelection::Reference {
            standard_key: "osha".to_string(),
            line_index: Some(2),
        };
        let json = serde_json::to_value(&reference).expect("json");
        assert_eq!(json["kind"], "reference");
        assert_eq!(json["standardKey"], "osha");
        assert_eq!(json["lineIndex"], 2);

        let custom: StandardSelection =
            serde_json::from_str(r#"{"kind":"custom","text":"site policy 7"}"#).expect("json");
        assert_eq!(
            custom,
            StandardSelection::Custom {
                text: "site policy 7".to_string()
            }
        );
    }

    #[test]
    fn record_roundtrip_keeps_evidence_order() {
        let mut record = AnswerRecord::new(QuestionId::from("1.1"), AnswerStatus::Yes, 42);
        record
            .images
            .push(EvidenceItem::new("aaa".to_string(), EvidenceKind::Image));
        record
            .images
            .push(EvidenceItem::new("bbb".to_string(), EvidenceKind::Pdf));

        let json = serde_json::to_string(&record).expect("encode");
        let decoded: AnswerRecord = serde_json::from_str(&json).expect("decode");
        let payloads: Vec<&str> = decoded.images.iter().map(|i| i.payload.as_str()).collect();
        assert_eq!(payloads, ["aaa", "bbb"]);
    }
}
