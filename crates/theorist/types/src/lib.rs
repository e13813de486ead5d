//! # trts-theorist-types
//!
//! Data model shared by the TRTS theorist crates: exact rational values,
//! typed simulator rows, run records with their resolved configuration,
//! per-run analyses, hypotheses and mutation proposals.
//!
//! Everything here is plain data. Deriving signatures from runs lives in
//! `trts-theorist-engine`.

#![deny(unsafe_code)]

pub mod analysis;
pub mod hypothesis;
pub mod rational;
pub mod records;
pub mod run;
pub mod target;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use analysis::{PatternEntry, RunAnalysis, Symmetry, NO_PATTERN};
pub use hypothesis::{cluster_key, Hypothesis, HypothesisId, MutationProposal, NO_CLUSTER_KEY};
pub use rational::RationalValue;
pub use records::{parse_bool, parse_int, EventRecord, MicrotickRecord, Row};
pub use run::{RunConfiguration, RunRecord, OBSERVED, UNSPECIFIED};
pub use target::TargetConstant;
