//! The question catalog: immutable reference data loaded once at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;

/// One regulatory question.
///
/// `references` maps a standard key (e.g. `"osha"`) to the text block quoted
/// from that standard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub references: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub updated: bool,
}

/// An ordered group of questions under one heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

/// The full catalog, read-only at runtime.
///
/// Produced by an external ingestion step as an ordered JSON array of
/// categories; category and question order is significant for reports and
/// exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Category>);

impl Catalog {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.0
    }

    #[must_use]
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.id == category_id)
    }

    /// All questions in catalog order, paired with their category.
    pub fn questions(&self) -> impl Iterator<Item = (&Category, &Question)> {
        self.0
            .iter()
            .flat_map(|c| c.questions.iter().map(move |q| (c, q)))
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.0.iter().map(|c| c.questions.len()).sum()
    }

    #[must_use]
    pub fn contains_question(&self, id: &QuestionId) -> bool {
        self.questions().any(|(_, q)| q.id == *id)
    }

    /// Union of reference standard keys across the catalog, in first-seen
    /// order. Drives the per-standard columns of the CSV export.
    #[must_use]
    pub fn standard_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for (_, question) in self.questions() {
            for key in question.references.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"[
                {
                    "id": "fire",
                    "title": "Fire Safety",
                    "questions": [
                        {"id": "1.1", "text": "Are exits marked?", "references": {"osha": "1910.37", "tjc": "EC.02.03.01"}, "notes": "", "updated": false},
                        {"id": "1.2", "text": "Are extinguishers inspected?", "references": {"dnv": "PE.1"}, "notes": "", "updated": true}
                    ]
                },
                {
                    "id": "electrical",
                    "title": "Electrical",
                    "questions": [
                        {"id": "2.1", "text": "Are panels labeled?", "references": {"osha": "1910.303"}}
                    ]
                }
            ]"#,
        )
        .expect("catalog json")
    }

    #[test]
    fn questions_iterate_in_catalog_order() {
        let catalog = catalog();
        let ids: Vec<String> = catalog
            .questions()
            .map(|(_, q)| q.id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["1.1", "1.2", "2.1"]);
        assert_eq!(catalog.question_count(), 3);
    }

    #[test]
    fn standard_keys_first_seen_order() {
        // BTreeMap orders within a question; across questions it is first-seen.
        assert_eq!(catalog().standard_keys(), ["osha", "tjc", "dnv"]);
    }

    #[test]
    fn category_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.category("fire").map(|c| c.title.as_str()), Some("Fire Safety"));
        assert!(catalog.category("missing").is_none());
        assert!(catalog.contains_question(&QuestionId::from("2.1")));
        assert!(!catalog.contains_question(&QuestionId::from("9.9")));
    }

    #[test]
    fn missing_optional_fields_default() {
        let catalog = catalog();
        let (_, q) = catalog.questions().nth(2).expect("third question");
        assert_eq!(q.notes, "");
        assert!(!q.updated);
    }
}
