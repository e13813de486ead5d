//! Central synthesis engine.
//!
//! The `TheoristEngine` runs one batch through the full pipeline:
//! run records → analyses → clusters → hypotheses → mutation proposals, and
//! collects everything a renderer needs into a `SynthesisReport`.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use trts_theorist_types::{Hypothesis, MutationProposal, RunAnalysis, RunRecord, TargetConstant};

use crate::analyzer::RunAnalyzer;
use crate::config::TheoristConfig;
use crate::contradiction::ContradictionTracker;
use crate::error::{TheoristError, TheoristResult};
use crate::hypothesis::HypothesisBuilder;
use crate::mutation::{rank_by_confidence, MutationProposer};
use crate::pattern_map::{build_pattern_map, PatternMap};

// ── Synthesis Report ────────────────────────────────────────────────────

/// Everything one synthesis pass produced.
#[derive(Clone, Debug)]
pub struct SynthesisReport {
    /// Analyses of the runs that had value rows, in input order.
    pub analyses: Vec<RunAnalysis>,
    /// Hypotheses in ascending convergence order (`H1` first).
    pub hypotheses: Vec<Hypothesis>,
    pub proposals: Vec<MutationProposal>,
    pub pattern_map: PatternMap,
    /// Contradictions recorded while building hypotheses. Read-only here.
    pub contradictions: ContradictionTracker,
    pub generated_at: DateTime<Utc>,
}

impl SynthesisReport {
    /// Hypotheses by descending confidence.
    pub fn ranked_hypotheses(&self) -> Vec<&Hypothesis> {
        rank_by_confidence(&self.hypotheses)
    }

    pub fn analysis(&self, run_id: &str) -> Option<&RunAnalysis> {
        self.analyses.iter().find(|a| a.run_id == run_id)
    }
}

// ── Theorist Engine ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TheoristEngine {
    analyzer: RunAnalyzer,
    builder: HypothesisBuilder,
    proposer: MutationProposer,
    config: TheoristConfig,
}

impl TheoristEngine {
    /// Create an engine; fails if the configuration does not validate.
    pub fn new(config: TheoristConfig) -> TheoristResult<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: RunAnalyzer::from_config(&config),
            builder: HypothesisBuilder::from_config(&config),
            proposer: MutationProposer::from_config(&config),
            config,
        })
    }

    pub fn with_defaults() -> Self {
        let config = TheoristConfig::default();
        Self {
            analyzer: RunAnalyzer::from_config(&config),
            builder: HypothesisBuilder::from_config(&config),
            proposer: MutationProposer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &TheoristConfig {
        &self.config
    }

    /// Analyse every record that has value rows, in input order.
    ///
    /// Records without value rows are dropped with a warning.
    pub fn analyze_all(&self, records: &[RunRecord]) -> Vec<RunAnalysis> {
        records
            .iter()
            .filter(|record| {
                if !record.has_values() {
                    warn!(run_id = %record.run_id, "Run has no value rows, excluded");
                }
                record.has_values()
            })
            .map(|record| self.analyzer.analyze(record))
            .collect()
    }

    /// Run the full pipeline over one batch.
    ///
    /// The pipeline:
    /// 1. Analyse runs with value rows
    /// 2. Fail with `NoAnalyzableRuns` if none remain
    /// 3. Build hypotheses, filling a fresh contradiction tracker
    /// 4. Truncate hypotheses to `max_hypotheses` and to `limit`
    /// 5. Propose mutations for the kept hypotheses, at most `limit`
    /// 6. Build the pattern map
    ///
    /// `target` only annotates descriptions.
    pub fn synthesize(
        &self,
        records: &[RunRecord],
        target: Option<TargetConstant>,
        limit: Option<usize>,
    ) -> TheoristResult<SynthesisReport> {
        let analyses = self.analyze_all(records);
        if analyses.is_empty() {
            return Err(TheoristError::NoAnalyzableRuns);
        }

        let mut contradictions = ContradictionTracker::new();
        let mut hypotheses = self
            .builder
            .clone()
            .with_target(target)
            .build(&analyses, &mut contradictions)?;

        let keep = [self.config.max_hypotheses, limit]
            .into_iter()
            .flatten()
            .min();
        if let Some(keep) = keep {
            hypotheses.truncate(keep);
        }

        let proposals = self.proposer.propose(&hypotheses, &analyses, limit);
        let pattern_map = build_pattern_map(&analyses);

        info!(
            runs = records.len(),
            analysed = analyses.len(),
            hypotheses = hypotheses.len(),
            contradictions = contradictions.total_contradictions(),
            proposals = proposals.len(),
            target = ?target,
            "Synthesis complete"
        );

        Ok(SynthesisReport {
            analyses,
            hypotheses,
            proposals,
            pattern_map,
            contradictions,
            generated_at: Utc::now(),
        })
    }
}

impl Default for TheoristEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Resolve a target name strictly.
pub fn parse_target(name: &str) -> TheoristResult<TargetConstant> {
    TargetConstant::from_name(name).ok_or_else(|| TheoristError::UnknownTarget(name.to_string()))
}
