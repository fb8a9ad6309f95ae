//! Compliance scoring and risk bucket counts.

use surveyor_types::{AnswerMap, AnswerStatus, Catalog, RiskRating};

/// Aggregate compliance picture for one assessment.
///
/// `applicable` counts only Yes/No/Unsure answers; NA, Unanswered, and absent
/// answers are excluded from both the numerator and the denominator. `good`
/// always equals `compliant` - it is the "no risk" bucket of the report's
/// risk breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceStats {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
    pub good: usize,
    pub total_risks: usize,
    /// `round(compliant / applicable * 100)`, `0` when nothing is applicable.
    pub compliance_score: u8,
    pub applicable: usize,
    pub compliant: usize,
}

/// Walk every catalog question and bucket its answer.
///
/// A No/Unsure answer with no risk rating still counts as applicable but
/// lands in no risk bucket; the store does not force a rating on those
/// statuses.
#[must_use]
pub fn compliance_stats(catalog: &Catalog, answers: &AnswerMap) -> ComplianceStats {
    let mut stats = ComplianceStats::default();

    for (_, question) in catalog.questions() {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        match answer.status {
            AnswerStatus::Yes => {
                stats.compliant += 1;
                stats.applicable += 1;
            }
            AnswerStatus::No | AnswerStatus::Unsure => {
                stats.applicable += 1;
                match answer.risk_rating {
                    Some(RiskRating::High) => stats.high += 1,
                    Some(RiskRating::Medium) => stats.medium += 1,
                    Some(RiskRating::Low) => stats.low += 1,
                    Some(RiskRating::Unknown) => stats.unknown += 1,
                    Some(RiskRating::Good) | None => {}
                }
            }
            AnswerStatus::NotApplicable | AnswerStatus::Unanswered => {}
        }
    }

    stats.good = stats.compliant;
    stats.total_risks = stats.high + stats.medium + stats.low + stats.unknown;
    stats.compliance_score = if stats.applicable == 0 {
        0
    } else {
        ((stats.compliant as f64 / stats.applicable as f64) * 100.0).round() as u8
    };
    stats
}

#[cfg(test)]
mod tests {
    use surveyor_types::{AnswerRecord, QuestionId};

    use super::*;

    fn catalog(question_ids: &[&str]) -> Catalog {
        let questions: Vec<String> = question_ids
            .iter()
            .map(|id| format!(r#"{{"id": "{id}", "text": "?"}}"#))
            .collect();
        serde_json::from_str(&format!(
            r#"[{{"id": "c", "title": "C", "questions": [{}]}}]"#,
            questions.join(",")
        ))
        .expect("catalog")
    }

    fn answer(id: &str, status: AnswerStatus, risk: Option<RiskRating>) -> (QuestionId, AnswerRecord) {
        let qid = QuestionId::from(id);
        let mut record = AnswerRecord::new(qid.clone(), status, 0);
        record.risk_rating = risk;
        (qid, record)
    }

    #[test]
    fn three_question_reference_scenario() {
        let catalog = catalog(&["q1", "q2", "q3"]);
        let answers: AnswerMap = [
            answer("q1", AnswerStatus::Yes, None),
            answer("q2", AnswerStatus::No, Some(RiskRating::High)),
            answer("q3", AnswerStatus::NotApplicable, None),
        ]
        .into_iter()
        .collect();

        let stats = compliance_stats(&catalog, &answers);
        assert_eq!(stats.applicable, 2, "NA excluded");
        assert_eq!(stats.compliant, 1);
        assert_eq!(stats.compliance_score, 50);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.total_risks, 1);
        assert_eq!(stats.good, stats.compliant);
    }

    #[test]
    fn missing_risk_rating_counts_in_no_bucket() {
        let catalog = catalog(&["q1", "q2"]);
        let answers: AnswerMap = [
            answer("q1", AnswerStatus::Unsure, None),
            answer("q2", AnswerStatus::No, Some(RiskRating::Unknown)),
        ]
        .into_iter()
        .collect();

        let stats = compliance_stats(&catalog, &answers);
        assert_eq!(stats.applicable, 2);
        assert_eq!(stats.total_risks, 1, "unrated Unsure lands nowhere");
        assert_eq!(stats.unknown, 1);
        assert_eq!(stats.compliance_score, 0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        let stats = compliance_stats(&catalog(&[]), &AnswerMap::new());
        assert_eq!(stats, ComplianceStats::default());
    }

    #[test]
    fn answers_outside_the_catalog_are_ignored() {
        let catalog = catalog(&["q1"]);
        let answers: AnswerMap = [
            answer("q1", AnswerStatus::Yes, None),
            answer("orphan", AnswerStatus::No, Some(RiskRating::High)),
        ]
        .into_iter()
        .collect();

        let stats = compliance_stats(&catalog, &answers);
        assert_eq!(stats.applicable, 1);
        assert_eq!(stats.compliance_score, 100);
        assert_eq!(stats.high, 0);
    }
}
