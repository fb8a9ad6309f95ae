//! Answer-count progress per category and catalog-wide.

use surveyor_types::{AnswerMap, Catalog, Category};

/// How far through a set of questions the assessor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Questions whose answer has any status other than `Unanswered`.
    pub completed: usize,
    pub total: usize,
    /// `round(completed / total * 100)`, `0` when there are no questions.
    pub percentage: u8,
}

impl Progress {
    fn from_counts(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

fn count_answered(category: &Category, answers: &AnswerMap) -> usize {
    category
        .questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|a| a.status.is_answered()))
        .count()
}

/// Progress over one category's questions. An unknown category id is empty.
#[must_use]
pub fn category_progress(catalog: &Catalog, answers: &AnswerMap, category_id: &str) -> Progress {
    match catalog.category(category_id) {
        Some(category) => {
            Progress::from_counts(count_answered(category, answers), category.questions.len())
        }
        None => Progress::from_counts(0, 0),
    }
}

/// Progress over the whole catalog.
#[must_use]
pub fn overall_progress(catalog: &Catalog, answers: &AnswerMap) -> Progress {
    let mut completed = 0;
    let mut total = 0;
    for category in catalog.categories() {
        completed += count_answered(category, answers);
        total += category.questions.len();
    }
    Progress::from_counts(completed, total)
}
