//! End-to-end engine flow over a real file-backed store: legacy migration,
//! session lifecycle, mutations, and derived reporting.

use surveyor_report::{compliance_stats, export_csv, overall_progress};
use surveyor_store::{AnswerPatch, FileBackend, SessionStore, StorageBackend};
use surveyor_types::{AnswerStatus, AssessmentStatus, Catalog, EvidenceKind, QuestionId, RiskRating};

fn catalog() -> Catalog {
    serde_json::from_str(
        r#"[
            {"id": "fire", "title": "Fire Safety", "questions": [
                {"id": "q1", "text": "Are exits marked?", "references": {"osha": "1910.37"}},
                {"id": "q2", "text": "Are extinguishers inspected?", "references": {"osha": "1910.157", "tjc": "EC.02"}},
                {"id": "q3", "text": "Is signage current?", "references": {"dnv": "PE.1"}}
            ]}
        ]"#,
    )
    .expect("catalog")
}

const LEGACY_CONFIG: &str = r#"{
    "assessor": {"name": "R. Diaz", "date": "2025-03-01"},
    "accountManager": {"name": "P. Singh", "email": "p@example.com", "phone": "555-0100"},
    "customer": {"name": "Mercy General", "location": "Sacramento"},
    "standards": ["osha", "tjc"]
}"#;

#[test]
fn legacy_data_migrates_once_and_flows_through_reports() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Seed the pre-multi-session layout on disk.
    let mut backend = FileBackend::open(dir.path()).expect("open backend");
    backend
        .set(
            "assessment-answers",
            br#"{"q1": {"status": "Yes", "selectedStandards": ["osha__1"], "timestamp": 5}}"#,
        )
        .expect("seed answers");
    backend
        .set("assessment-config", LEGACY_CONFIG.as_bytes())
        .expect("seed config");

    let store = SessionStore::open(backend).expect("open store");
    let sessions = store.list().expect("list");
    assert_eq!(sessions.len(), 1, "legacy pair becomes exactly one session");
    let migrated_id = sessions[0].id.clone();
    assert_eq!(sessions[0].config.customer.name, "Mercy General");

    // Re-opening must not migrate again.
    let backend = store.into_backend();
    assert!(backend.get("assessment-answers").expect("get").is_none());
    assert!(backend.get("assessment-config").expect("get").is_none());
    let mut store = SessionStore::open(backend).expect("reopen");
    assert_eq!(store.list().expect("list").len(), 1);

    // Work the migrated session through the mutation API.
    store.load(&migrated_id).expect("load");
    store
        .set_answer(
            &QuestionId::from("q2"),
            AnswerStatus::No,
            AnswerPatch {
                risk_rating: Some(RiskRating::High),
                notes: Some("two units past due".to_string()),
                ..AnswerPatch::default()
            },
        )
        .expect("answer q2");
    store
        .set_answer(
            &QuestionId::from("q3"),
            AnswerStatus::NotApplicable,
            AnswerPatch::default(),
        )
        .expect("answer q3");
    store
        .add_image(
            &QuestionId::from("q2"),
            "AAAA".to_string(),
            EvidenceKind::Image,
            None,
            None,
        )
        .expect("attach evidence");

    let catalog = catalog();
    let session = store.active().expect("active");

    let progress = overall_progress(&catalog, &session.answers);
    assert_eq!((progress.completed, progress.total, progress.percentage), (3, 3, 100));

    let stats = compliance_stats(&catalog, &session.answers);
    assert_eq!(stats.compliance_score, 50);
    assert_eq!(stats.high, 1);
    assert_eq!(stats.total_risks, 1);

    let csv = export_csv(&catalog, &session.answers);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Question ID,Category,Question Text,Ref OSHA,Ref TJC,Ref DNV,Status,Risk Rating,Comments")
    );
    assert!(csv.contains(r#"q2,"Fire Safety","Are extinguishers inspected?","1910.157","EC.02","",No,High,"two units past due""#));

    // Completion is durable; the active copy keeps accepting edits.
    store.complete(&migrated_id).expect("complete");
    let store = SessionStore::open(store.into_backend()).expect("reopen again");
    let sessions = store.list().expect("list");
    assert_eq!(sessions[0].status, AssessmentStatus::Completed);
    assert_eq!(sessions[0].answers.len(), 3);
}
