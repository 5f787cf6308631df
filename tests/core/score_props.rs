use proptest::prelude::*;
use quality_gate::core::check::{CheckResult, WeightedResult, weighted_score};
use quality_gate::core::score::{GateReport, ScoreAggregator};

/// Split 100 into `n` positive-or-zero weights.
fn weights(n: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..=100, n.saturating_sub(1)).prop_map(move |mut cuts| {
        cuts.push(0);
        cuts.push(100);
        cuts.sort_unstable();
        cuts.windows(2).map(|w| w[1] - w[0]).collect()
    })
}

fn scored() -> impl Strategy<Value = Vec<(f64, u32)>> {
    (1usize..8).prop_flat_map(|n| (prop::collection::vec(-50.0f64..150.0, n), weights(n)))
        .prop_map(|(scores, weights)| scores.into_iter().zip(weights).collect())
}

fn build(pairs: &[(f64, u32)]) -> Vec<WeightedResult> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (score, weight))| WeightedResult::new(CheckResult::new(format!("c{}", i), *score), *weight))
        .collect()
}

proptest! {
    #[test]
    fn composite_stays_within_bounds(pairs in scored()) {
        let report = GateReport::from_results(build(&pairs));
        prop_assert!(report.total_weighted_score <= 100);
    }

    #[test]
    fn composite_is_order_independent(pairs in scored()) {
        let forward = ScoreAggregator::totals(&build(&pairs));
        let mut reversed = build(&pairs);
        reversed.reverse();
        prop_assert_eq!(forward, ScoreAggregator::totals(&reversed));
    }

    #[test]
    fn per_check_contribution_never_exceeds_weight(score in -1000.0f64..1000.0, weight in 0u32..=100) {
        prop_assert!(weighted_score(score, weight) <= weight);
    }
}

#[test]
fn perfect_scores_reach_exactly_100() {
    let report = GateReport::from_results(build(&[(100.0, 33), (100.0, 33), (100.0, 34)]));
    assert_eq!(report.total_weighted_score, 100);
}

#[test]
fn nan_scores_contribute_nothing() {
    let report = GateReport::from_results(build(&[(f64::NAN, 40), (100.0, 60)]));
    assert_eq!(report.total_weighted_score, 60);
}
