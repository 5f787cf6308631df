use quality_gate::core::check::{CheckResult, WeightedResult};
use quality_gate::core::ratchet::{BaselineStore, FileBaselineStore, Ratchet, SaveOutcome};
use quality_gate::core::score::GateReport;
use std::fs;
use tempfile::tempdir;

fn report(checks: &[(&str, f64, u32)]) -> GateReport {
    GateReport::from_results(
        checks
            .iter()
            .map(|(name, score, weight)| WeightedResult::new(CheckResult::new(*name, *score), *weight))
            .collect(),
    )
}

#[test]
fn missing_file_means_no_history() {
    let tmp = tempdir().expect("tempdir");
    let store = FileBaselineStore::new(tmp.path().join("nope/ratchet.json"));
    assert!(store.load().is_none());

    let ratchet = Ratchet::load(&store);
    let outcome = ratchet.compare(&report(&[("A", 10.0, 100)]));
    assert!(outcome.passed);
    assert!(outcome.regressions.is_empty());
}

#[test]
fn malformed_file_is_treated_as_absent() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("ratchet.json");
    fs::write(&path, "{ not json").expect("write");
    let store = FileBaselineStore::new(&path);
    assert!(store.load().is_none());

    // The next passing run overwrites the garbage.
    let outcome = Ratchet::load(&store)
        .save(&report(&[("A", 50.0, 100)]), "2026-01-01T00:00:00.000Z".into())
        .expect("save");
    assert_eq!(outcome, SaveOutcome::Created { total: 50.0 });
    assert_eq!(store.load().expect("baseline").total_score, 50.0);
}

#[test]
fn write_creates_parent_dirs_and_leaves_no_temp_file() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path().join(".quality-gate");
    let store = FileBaselineStore::new(dir.join("ratchet.json"));

    Ratchet::load(&store)
        .save(&report(&[("A", 80.0, 60), ("B", 70.0, 40)]), "t0".into())
        .expect("save");

    let names: Vec<String> = fs::read_dir(&dir)
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["ratchet.json".to_string()]);
}

#[test]
fn persisted_schema_uses_camel_case_keys() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("ratchet.json");
    let store = FileBaselineStore::new(&path);
    let with_errors = WeightedResult::new(
        CheckResult::new("A", 50.0).with_errors(vec!["one".into(), "two".into()]),
        100,
    );
    Ratchet::load(&store)
        .save(&GateReport::from_results(vec![with_errors]), "t0".into())
        .expect("save");

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(raw["totalScore"], 50.0);
    assert_eq!(raw["updatedAt"], "t0");
    assert_eq!(raw["checks"]["A"]["score"], 50.0);
    assert_eq!(raw["checks"]["A"]["errors"], 2);
    assert_eq!(raw["checks"]["A"]["warnings"], 0);
}

#[test]
fn baseline_only_moves_up_across_runs() {
    let tmp = tempdir().expect("tempdir");
    let store = FileBaselineStore::new(tmp.path().join("ratchet.json"));

    let first = report(&[("A", 60.0, 50), ("B", 60.0, 50)]);
    Ratchet::load(&store).save(&first, "t0".into()).expect("save");

    let worse = report(&[("A", 40.0, 50), ("B", 60.0, 50)]);
    let ratchet = Ratchet::load(&store);
    let outcome = ratchet.compare(&worse);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.regressions,
        vec![
            "Total score dropped from 60 to 50".to_string(),
            "A: score dropped from 60 to 40".to_string(),
        ]
    );
    let kept = ratchet.save(&worse, "t1".into()).expect("save");
    assert!(matches!(kept, SaveOutcome::Kept { .. }));
    assert_eq!(store.load().expect("baseline").updated_at, "t0");

    let better = report(&[("A", 90.0, 50), ("B", 60.0, 50)]);
    let ratchet = Ratchet::load(&store);
    assert!(ratchet.compare(&better).passed);
    let raised = ratchet.save(&better, "t2".into()).expect("save");
    assert_eq!(raised, SaveOutcome::Raised { from: 60.0, to: 75.0 });
    assert_eq!(store.load().expect("baseline").checks["A"].score, 90.0);
}

#[test]
fn fractional_scores_survive_a_disk_round_trip() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("ratchet.json");
    let mut regressed = Vec::new();

    for n in 1..=200u32 {
        for k in 0..=n {
            let score = 100.0 * f64::from(k) / f64::from(n);
            let current = report(&[("A", score, 60), ("B", 100.0 - score, 40)]);
            let _ = fs::remove_file(&path);
            let store = FileBaselineStore::new(&path);
            Ratchet::load(&store).save(&current, "t0".into()).expect("save");

            let outcome = Ratchet::load(&store).compare(&current);
            if !outcome.passed {
                regressed.push((k, n, outcome.regressions));
            }
        }
    }
    assert!(regressed.is_empty(), "{} spurious, first {:?}", regressed.len(), regressed.first());
}
