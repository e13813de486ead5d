//! # trts-theorist-engine
//!
//! Hypothesis synthesis for TRTS simulator runs.
//!
//! Each run is reduced to numeric and symbolic signatures, runs that settle on
//! the same trailing ratio are grouped, and each group becomes a scored,
//! falsifiable hypothesis with supporting and contradicting runs. The
//! strongest hypotheses then seed parameter mutations for follow-up runs.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────┐
//!   │  RunRecord          │  rows + metadata per run
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  RunAnalyzer        │  ← ratios, ψ/ρ patterns, convergence, symmetry
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  Convergence        │  ← first-representative clustering (1e-5)
//!   │  Clusterer          │
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐     ┌──────────────────────┐
//!   │  HypothesisBuilder  │ ──▶ │ ContradictionTracker │  written once per hypothesis
//!   │  + EntropyScorer    │     └──────────────────────┘
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  MutationProposer   │  → follow-up configurations + novelty
//!   └─────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **Deterministic order**: clusters ascend by convergence value, runs and
//!   hypotheses keep input order, so the same batch always yields the same
//!   identifiers and proposals.
//! - **Degrade, don't fail**: malformed rows, missing metadata and
//!   non-converging runs fall back to documented defaults. Only an empty
//!   batch is an error.
//! - **No hidden state**: the contradiction tracker is an explicit value
//!   threaded through the single hypothesis pass.

#![deny(unsafe_code)]

pub mod analyzer;
pub mod clustering;
pub mod config;
pub mod contradiction;
pub mod engine;
pub mod error;
pub mod hypothesis;
pub mod mutation;
pub mod pattern_map;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use analyzer::RunAnalyzer;
pub use clustering::{Cluster, ConvergenceClusterer, EntropyScorer};
pub use config::TheoristConfig;
pub use contradiction::ContradictionTracker;
pub use engine::{parse_target, SynthesisReport, TheoristEngine};
pub use error::{TheoristError, TheoristResult};
pub use hypothesis::{describe_convergence, HypothesisBuilder, FALLBACK_DESCRIPTION};
pub use mutation::{MutationProposer, GENERIC_SUGGESTION, PERTURBATIONS};
pub use pattern_map::{build_pattern_map, PatternMap};

pub use trts_theorist_types as types;

#[cfg(test)]
mod tests {
    use super::*;
    use trts_theorist_types::{EventRecord, MicrotickRecord, RationalValue, RunRecord};

    fn run(id: &str, ratios: &[(i64, i64)], psi_ticks: &[u64]) -> RunRecord {
        let microticks = ratios
            .iter()
            .enumerate()
            .map(|(i, &(n, d))| MicrotickRecord {
                tick: i as u64,
                microtick: 0,
                upsilon: RationalValue::new(n, d),
                beta: RationalValue::new(1, 1),
                koppa: RationalValue::default(),
                memory: None,
            })
            .collect();
        let events = psi_ticks
            .iter()
            .map(|&tick| EventRecord {
                tick,
                microtick: 0,
                event_type: "psi".into(),
                rho_event: false,
                psi_fired: true,
                mu_zero: false,
                triple_psi: false,
            })
            .collect();
        RunRecord::new(id)
            .with_microticks(microticks)
            .with_events(events)
            .with_metadata("engine_mode", "add")
    }

    #[test]
    fn integration_full_pipeline() {
        let engine = TheoristEngine::with_defaults();
        let records = vec![
            run("fib-a", &[(13, 8), (21, 13), (34, 21)], &[1]),
            run("fib-b", &[(21, 13), (34, 21), (34, 21)], &[1]),
            run("flat", &[(1, 2), (1, 2)], &[]),
        ];

        let report = engine
            .synthesize(&records, Some(types::TargetConstant::Phi), None)
            .unwrap();

        assert_eq!(report.analyses.len(), 3);
        assert!(!report.hypotheses.is_empty());
        assert_eq!(report.pattern_map.len(), 3);
        for h in &report.hypotheses {
            assert!((0.0..=100.0).contains(&h.confidence));
            assert!(h.description.contains("Engine: add"));
            assert!(h.description.contains("Δ vs target"));
        }
        // Every supported run with seeds yields exactly four proposals.
        let supported: usize = report.hypotheses.iter().map(|h| h.support_runs.len()).sum();
        assert_eq!(report.proposals.len(), supported * 4);
    }

    #[test]
    fn integration_all_public_types_accessible() {
        let _config = TheoristConfig::default();
        let _engine = TheoristEngine::default();
        let _analyzer = RunAnalyzer::default();
        let _clusterer = ConvergenceClusterer::default();
        let _scorer = EntropyScorer;
        let _builder = HypothesisBuilder::default();
        let _proposer = MutationProposer::default();
        let _tracker = ContradictionTracker::new();
        let _map: PatternMap = build_pattern_map(&[]);
        let _err = TheoristError::NoAnalyzableRuns;
        assert_eq!(PERTURBATIONS.len(), 4);
        assert!(!GENERIC_SUGGESTION.is_empty());
        assert!(!FALLBACK_DESCRIPTION.is_empty());
    }
}
