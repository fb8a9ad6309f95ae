//! CSV export: one row per catalog question, in catalog order.
//!
//! Quoting follows the original export: string fields are wrapped in double
//! quotes with embedded quotes doubled, so notes with commas and newlines
//! stay Excel-safe. Status and risk columns are bare.

use std::fmt::Write;

use surveyor_types::{AnswerMap, Catalog};

fn quoted(out: &mut String, field: &str) {
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Render the full export. Reference columns are the union of the catalog's
/// standard keys in first-seen order; missing answers render as `Unanswered`
/// with empty risk and notes.
#[must_use]
pub fn export_csv(catalog: &Catalog, answers: &AnswerMap) -> String {
    let standard_keys = catalog.standard_keys();

    let mut out = String::from("Question ID,Category,Question Text");
    for key in &standard_keys {
        let _ = write!(out, ",Ref {}", key.to_uppercase());
    }
    out.push_str(",Status,Risk Rating,Comments\n");

    for (category, question) in catalog.questions() {
        let answer = answers.get(&question.id);

        out.push_str(question.id.as_str());
        out.push(',');
        quoted(&mut out, &category.title);
        out.push(',');
        quoted(&mut out, &question.text);
        for key in &standard_keys {
            out.push(',');
            quoted(
                &mut out,
                question.references.get(key).map_or("", String::as_str),
            );
        }
        out.push(',');
        out.push_str(answer.map_or("Unanswered", |a| a.status.as_str()));
        out.push(',');
        if let Some(risk) = answer.and_then(|a| a.risk_rating) {
            out.push_str(risk.as_str());
        }
        out.push(',');
        quoted(
            &mut out,
            answer.and_then(|a| a.notes.as_deref()).unwrap_or(""),
        );
        out.push('\n');
    }

    out
}
