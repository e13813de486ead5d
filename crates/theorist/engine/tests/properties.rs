//! Property tests: scoring bounds, clustering partition and proposal limits
//! hold for arbitrary batches.

use proptest::prelude::*;
use trts_theorist_engine::analyzer::{trailing_mean, variation};
use trts_theorist_engine::hypothesis::contradiction_penalty;
use trts_theorist_engine::types::{
    MicrotickRecord, RationalValue, RunAnalysis, RunConfiguration, RunRecord, Symmetry,
};
use trts_theorist_engine::{
    ContradictionTracker, EntropyScorer, HypothesisBuilder, MutationProposer, RunAnalyzer,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A value row with a non-zero, well-defined β.
fn arb_row() -> impl Strategy<Value = (u64, u64, i64, i64, i64, i64)> {
    (
        0u64..20,
        0u64..8,
        -50i64..50,
        1i64..20,
        prop_oneof![-20i64..-1, 1i64..20],
        1i64..20,
    )
}

/// Convergence values drawn from a few well-separated levels so that
/// clusters with several members are common.
fn arb_convergence() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => prop_oneof![Just(0.5), Just(1.0), Just(1.618034), Just(2.414214)].prop_map(Some),
        1 => Just(None),
        1 => Just(Some(f64::INFINITY)),
    ]
}

fn arb_analysis(index: usize) -> impl Strategy<Value = RunAnalysis> {
    (
        arb_convergence(),
        0.0f64..3.0,
        prop_oneof![Just("none"), Just("T1:1"), Just("T1:2+T2:1")],
        any::<bool>(),
    )
        .prop_map(move |(convergence, spread, psi, seeded)| RunAnalysis {
            run_id: format!("run-{index}"),
            ratios: convergence.into_iter().collect(),
            psi_pattern: psi.to_string(),
            rho_pattern: "none".into(),
            triple_psi_count: 0,
            mu_zero_count: 0,
            psi_density: 0.5,
            rho_density: 0.0,
            convergence_value: convergence,
            ratio_variation: spread,
            symmetry: Symmetry::Unknown,
            configuration: RunConfiguration::default(),
            initial_upsilon: seeded.then(|| RationalValue::new(3, 5)),
            initial_beta: seeded.then(|| RationalValue::new(5, 7)),
        })
}

fn arb_batch() -> impl Strategy<Value = Vec<RunAnalysis>> {
    (1usize..12).prop_flat_map(|n| (0..n).map(arb_analysis).collect::<Vec<_>>())
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Convergence is the trailing mean and variation the full spread of the
    /// ratios the analyzer extracts.
    #[test]
    fn analyzer_summaries_match_ratios(rows in prop::collection::vec(arb_row(), 1..30)) {
        let microticks = rows
            .iter()
            .map(|&(tick, mt, un, ud, bn, bd)| MicrotickRecord {
                tick,
                microtick: mt,
                upsilon: RationalValue::new(un, ud),
                beta: RationalValue::new(bn, bd),
                koppa: RationalValue::default(),
                memory: None,
            })
            .collect();
        let analysis = RunAnalyzer::default().analyze(&RunRecord::new("r").with_microticks(microticks));

        prop_assert_eq!(analysis.ratios.len(), rows.len());
        prop_assert_eq!(analysis.convergence_value, trailing_mean(&analysis.ratios, 5));
        prop_assert_eq!(analysis.ratio_variation, variation(&analysis.ratios));
        prop_assert!(analysis.ratio_variation >= 0.0);
        prop_assert!(analysis.symmetry != Symmetry::Unknown);
    }

    /// Confidence stays within [0, 100] and coverage within [0, 1].
    #[test]
    fn confidence_is_bounded(batch in arb_batch()) {
        let hyps = HypothesisBuilder::default()
            .build(&batch, &mut ContradictionTracker::new())
            .unwrap();
        for h in &hyps {
            prop_assert!((0.0..=100.0).contains(&h.confidence));
            prop_assert!((0.0..=1.0).contains(&h.coverage));
            prop_assert!(h.entropy >= 0.0);
        }
    }

    /// The fallback hypothesis appears exactly when no run converged.
    #[test]
    fn fallback_iff_nothing_converges(batch in arb_batch()) {
        let hyps = HypothesisBuilder::default()
            .build(&batch, &mut ContradictionTracker::new())
            .unwrap();
        let any_finite = batch.iter().any(|a| a.finite_convergence().is_some());
        prop_assert_eq!(hyps.iter().any(|h| h.is_fallback()), !any_finite);
        if !any_finite {
            prop_assert_eq!(hyps.len(), 1);
            prop_assert_eq!(hyps[0].support_runs.len(), batch.len());
        }
    }

    /// Every converged run supports exactly one hypothesis; contradictions
    /// are always members of the same cluster.
    #[test]
    fn clusters_partition_converged_runs(batch in arb_batch()) {
        let mut tracker = ContradictionTracker::new();
        let hyps = HypothesisBuilder::default().build(&batch, &mut tracker).unwrap();
        if hyps.iter().any(|h| h.is_fallback()) {
            return Ok(());
        }

        for a in batch.iter().filter(|a| a.finite_convergence().is_some()) {
            let owners = hyps.iter().filter(|h| h.support_runs.contains(&a.run_id)).count();
            prop_assert_eq!(owners, 1);
        }
        for (i, h) in hyps.iter().enumerate() {
            prop_assert_eq!(h.id.as_str(), format!("H{}", i + 1));
            prop_assert_eq!(tracker.contradictions_for(&h.id), h.contradiction_runs.as_slice());
            for run in &h.contradiction_runs {
                prop_assert!(h.support_runs.contains(run));
            }
        }
        for w in hyps.windows(2) {
            prop_assert!(w[0].convergence_value < w[1].convergence_value);
        }
    }

    /// The contradiction penalty never drops below its floor.
    #[test]
    fn penalty_respects_floor(contradictions in 0usize..50, members in 0usize..50) {
        let penalty = contradiction_penalty(contradictions.min(members), members, 0.1);
        prop_assert!(penalty >= 0.1);
        prop_assert!(penalty <= 1.0);
    }

    /// n distinct patterns seen once each have entropy log2(n).
    #[test]
    fn uniform_patterns_have_log2_entropy(n in 1usize..64) {
        let patterns: Vec<String> = (0..n).map(|i| format!("T{i}:1")).collect();
        let entropy = EntropyScorer.score(&patterns);
        prop_assert!((entropy - (n as f64).log2()).abs() < 1e-9);
    }

    /// Proposals never exceed the limit; seeded runs yield four each.
    #[test]
    fn proposals_respect_limit(batch in arb_batch(), limit in prop::option::of(0usize..40)) {
        let hyps = HypothesisBuilder::default()
            .build(&batch, &mut ContradictionTracker::new())
            .unwrap();
        let proposals = MutationProposer::default().propose(&hyps, &batch, limit);

        let unlimited: usize = hyps
            .iter()
            .flat_map(|h| &h.support_runs)
            .filter_map(|id| batch.iter().find(|a| &a.run_id == id))
            .map(|a| if a.initial_pair().is_some() { 4 } else { 1 })
            .sum();
        let expected = limit.map_or(unlimited, |l| unlimited.min(l));
        prop_assert_eq!(proposals.len(), expected);
        for p in &proposals {
            prop_assert!((0.0..=1.0).contains(&p.novelty_score));
        }
    }
}
