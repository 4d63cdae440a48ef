//! Prediction store integration tests
//!
//! Exercises the store through its public API against a real document:
//! - Sequential id assignment
//! - Round-trip through the persisted JSON
//! - Evaluate semantics, including unknown ids
//! - Statistics and pending ordering

use chrono::{NaiveDate, TimeDelta};
use prediction_tracker::{Outcome, PredictionDraft, PredictionStore, StoreError, Urgency};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(statement: &str, confidence: i32, due_in_days: i64) -> PredictionDraft {
    PredictionDraft {
        statement: statement.to_string(),
        domain: "Security".to_string(),
        confidence,
        due_in_days,
        verification: "Confirmed by two outlets".to_string(),
        falsification: "Denied by officials".to_string(),
        sources: vec!["https://example.org/report".to_string()],
    }
}

fn temp_store() -> (TempDir, PredictionStore) {
    let dir = TempDir::new().unwrap();
    let store = PredictionStore::open(dir.path().join("predictions.json")).unwrap();
    (dir, store)
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_sequential_ids_without_gaps() {
    let (_dir, mut store) = temp_store();
    let today = date(2025, 8, 20);

    let ids: Vec<String> = (0..12)
        .map(|i| store.add_on(draft(&format!("p{}", i), 70, 3), today).unwrap())
        .collect();

    let expected: Vec<String> = (1..=12).map(|n| format!("PRED-2025-{:03}", n)).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_ids_continue_after_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("predictions.json");
    let today = date(2025, 8, 20);

    {
        let mut store = PredictionStore::open(&path).unwrap();
        store.add_on(draft("first", 60, 1), today).unwrap();
        store.add_on(draft("second", 60, 1), today).unwrap();
    }

    let mut store = PredictionStore::open(&path).unwrap();
    assert_eq!(store.add_on(draft("third", 60, 1), today).unwrap(), "PRED-2025-003");
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_add_round_trips_through_document() {
    let (dir, mut store) = temp_store();
    let id = store.add_on(draft("Border reopens", 85, 14), date(2025, 5, 1)).unwrap();
    let in_memory = store.get(&id).unwrap().clone();

    let reloaded = PredictionStore::open(dir.path().join("predictions.json")).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(&id), Some(&in_memory));
}

#[test]
fn test_document_field_order_and_nulls() {
    let (_dir, mut store) = temp_store();
    store.add_on(draft("x", 55, 2), date(2025, 5, 1)).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let keys = [
        "\"id\"",
        "\"statement\"",
        "\"domain\"",
        "\"confidence\"",
        "\"created_date\"",
        "\"due_date\"",
        "\"verification\"",
        "\"falsification\"",
        "\"sources\"",
        "\"outcome\"",
        "\"evaluated_date\"",
        "\"outcome_notes\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| content.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(content.contains("\"created_date\": \"2025-05-01\""));
    assert!(content.contains("\"due_date\": \"2025-05-03\""));
    assert!(content.contains("\"outcome\": \"pending\""));
    assert!(content.contains("\"evaluated_date\": null"));
    assert!(content.contains("\"outcome_notes\": null"));
}

#[test]
fn test_loads_document_written_by_previous_tool() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("predictions.json");
    std::fs::write(
        &path,
        r#"[
    {
        "id": "PRED-2024-001",
        "prediction": "Summit communique mentions Arctic",
        "domain": "Canada",
        "confidence": 80,
        "created_date": "2024-06-01",
        "due_date": "2024-06-10",
        "verification": "Text includes Arctic",
        "falsification": "No mention",
        "sources": [],
        "outcome": "correct",
        "evaluated_date": "2024-06-11",
        "outcome_notes": "Paragraph 14"
    }
]"#,
    )
    .unwrap();

    let store = PredictionStore::open(&path).unwrap();
    let p = store.get("PRED-2024-001").unwrap();
    assert_eq!(p.statement, "Summit communique mentions Arctic");
    assert_eq!(p.outcome, Outcome::Correct);
    assert_eq!(p.evaluated_date, Some(date(2024, 6, 11)));
}

#[test]
fn test_malformed_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("predictions.json");
    std::fs::write(&path, r#"[{"id": "PRED-2025-001"}]"#).unwrap();

    match PredictionStore::open(&path) {
        Err(StoreError::Corrupt { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Corrupt, got {:?}", other),
    }
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_unknown_id_leaves_document_unchanged() {
    let (_dir, mut store) = temp_store();
    store.add_on(draft("x", 60, 1), date(2025, 1, 1)).unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let found = store
        .evaluate_on("PRED-2025-999", Outcome::Correct, Some("n/a".into()), date(2025, 1, 5))
        .unwrap();

    assert!(!found);
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_evaluate_sets_only_outcome_fields() {
    let (dir, mut store) = temp_store();
    let id = store.add_on(draft("Sanctions extended", 75, 10), date(2025, 1, 1)).unwrap();
    let before = store.get(&id).unwrap().clone();

    let found = store
        .evaluate_on(&id, Outcome::Correct, None, date(2025, 1, 9))
        .unwrap();
    assert!(found);

    let reloaded = PredictionStore::open(dir.path().join("predictions.json")).unwrap();
    let after = reloaded.get(&id).unwrap();

    assert_eq!(after.outcome, Outcome::Correct);
    assert_eq!(after.evaluated_date, Some(date(2025, 1, 9)));
    assert_eq!(after.outcome_notes, None);

    let mut expected = before;
    expected.outcome = Outcome::Correct;
    expected.evaluated_date = Some(date(2025, 1, 9));
    assert_eq!(after, &expected);
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn test_stats_on_empty_store() {
    let (_dir, store) = temp_store();
    let stats = store.stats();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.accuracy, 0.0);
    assert_eq!(stats.brier_score, 0.0);
}

#[test]
fn test_stats_accuracy_and_brier() {
    let (_dir, mut store) = temp_store();
    let today = date(2025, 2, 1);
    let a = store.add_on(draft("a", 80, 1), today).unwrap();
    let b = store.add_on(draft("b", 60, 1), today).unwrap();
    store.add_on(draft("c", 90, 1), today).unwrap();

    store.evaluate_on(&a, Outcome::Correct, None, today).unwrap();
    store.evaluate_on(&b, Outcome::Incorrect, None, today).unwrap();

    let stats = store.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.evaluated, 2);
    assert_eq!(stats.correct, 1);
    assert_eq!(stats.incorrect, 1);
    assert_eq!(stats.pending, 1);
    assert!((stats.accuracy - 50.0).abs() < 1e-9);
    assert!((stats.brier_score - 0.2).abs() < 1e-9);
}

// =============================================================================
// Pending list
// =============================================================================

#[test]
fn test_pending_sorted_with_urgency() {
    let (_dir, mut store) = temp_store();
    let today = date(2025, 9, 15);
    let past_offset = (date(2025, 1, 1) - today).num_days();

    // Inserted out of due-date order
    let later = store.add_on(draft("later", 60, 10), today).unwrap();
    let tomorrow = store.add_on(draft("tomorrow", 60, 1), today).unwrap();
    let past = store.add_on(draft("past", 60, past_offset), today).unwrap();
    let due_today = store.add_on(draft("today", 60, 0), today).unwrap();
    let resolved = store.add_on(draft("resolved", 60, 0), today).unwrap();
    store.evaluate_on(&resolved, Outcome::Incorrect, None, today).unwrap();

    let pending = store.list_pending_on(today);
    let ids: Vec<&str> = pending.iter().map(|e| e.prediction.id.as_str()).collect();
    assert_eq!(ids, vec![past.as_str(), due_today.as_str(), tomorrow.as_str(), later.as_str()]);

    assert_eq!(pending[0].prediction.due_date, date(2025, 1, 1));
    assert_eq!(pending[0].urgency, Some(Urgency::Overdue));
    assert_eq!(pending[1].urgency, Some(Urgency::DueToday));
    assert_eq!(pending[2].urgency, Some(Urgency::DueSoon(1)));
    assert_eq!(pending[3].urgency, None);
    assert_eq!(pending[3].days_left, 10);
}

#[test]
fn test_pending_ties_keep_insertion_order() {
    let (_dir, mut store) = temp_store();
    let today = date(2025, 9, 15);
    let first = store.add_on(draft("first", 60, 4), today).unwrap();
    let second = store.add_on(draft("second", 60, 4), today).unwrap();

    let pending = store.list_pending_on(today + TimeDelta::days(1));
    assert_eq!(pending[0].prediction.id, first);
    assert_eq!(pending[1].prediction.id, second);
    assert_eq!(pending[0].days_left, 3);
}
