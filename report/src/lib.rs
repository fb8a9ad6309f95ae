//! Derived reporting over (catalog, answers): progress, compliance stats, and
//! the CSV export.
//!
//! Everything here is a pure function of its inputs - no stored state, no IO.
//! Callers hand in the catalog and the active session's answer map.

mod csv;
mod progress;
mod stats;

pub use csv::export_csv;
pub use progress::{Progress, category_progress, overall_progress};
pub use stats::{ComplianceStats, compliance_stats};
