//! Mutation proposer: follow-up configurations that test a hypothesis.
//!
//! Hypotheses are visited by descending confidence, their supporting runs in
//! order. A run with known initial υ and β yields four numeric neighbours: the
//! same offset is added to υ's numerator and to β's denominator, so each
//! proposal moves both seeds in different components. A run without initial
//! values yields one generic suggestion instead.

use std::collections::HashMap;

use tracing::{debug, warn};

use trts_theorist_types::{Hypothesis, MutationProposal, RunAnalysis};

use crate::config::TheoristConfig;

/// Offsets applied to υ's numerator and β's denominator.
pub const PERTURBATIONS: [i64; 4] = [-2, -1, 1, 2];

/// Suggestion used when a run's initial values are unknown.
pub const GENERIC_SUGGESTION: &str =
    "Adjust ψ toggle pattern while holding engine parameters constant.";

#[derive(Clone, Debug)]
pub struct MutationProposer {
    novelty_scale: f64,
}

impl Default for MutationProposer {
    fn default() -> Self {
        Self::from_config(&TheoristConfig::default())
    }
}

impl MutationProposer {
    pub fn from_config(config: &TheoristConfig) -> Self {
        Self {
            novelty_scale: config.novelty_scale,
        }
    }

    /// Propose mutations, stopping once `limit` proposals exist.
    ///
    /// `None` means unlimited. Supporting runs missing from `analyses` are
    /// skipped.
    pub fn propose(
        &self,
        hypotheses: &[Hypothesis],
        analyses: &[RunAnalysis],
        limit: Option<usize>,
    ) -> Vec<MutationProposal> {
        let by_id: HashMap<&str, &RunAnalysis> =
            analyses.iter().map(|a| (a.run_id.as_str(), a)).collect();
        let reached = |count: usize| limit.is_some_and(|l| count >= l);

        let mut proposals = Vec::new();
        'hypotheses: for hypothesis in rank_by_confidence(hypotheses) {
            if reached(proposals.len()) {
                break;
            }
            for run_id in &hypothesis.support_runs {
                if reached(proposals.len()) {
                    break 'hypotheses;
                }
                let Some(analysis) = by_id.get(run_id.as_str()) else {
                    warn!(run_id = %run_id, hypothesis = %hypothesis.id, "Supporting run has no analysis");
                    continue;
                };

                let rationale = rationale(analysis, hypothesis);
                let predicted_behavior = prediction(analysis, hypothesis);
                for mutation in mutate(analysis) {
                    proposals.push(MutationProposal {
                        base_run: run_id.clone(),
                        hypothesis_id: hypothesis.id.clone(),
                        novelty_score: self.novelty_score(&mutation),
                        mutation,
                        rationale: rationale.clone(),
                        predicted_behavior: predicted_behavior.clone(),
                    });
                    if reached(proposals.len()) {
                        break 'hypotheses;
                    }
                }
            }
        }

        debug!(
            hypotheses = hypotheses.len(),
            proposals = proposals.len(),
            limit = ?limit,
            "Proposed mutations"
        );
        proposals
    }

    /// `min(1, (digits + distinct whitespace tokens) / scale)`.
    ///
    /// A lexical proxy for how much a proposal encodes, not a semantic
    /// novelty measure.
    pub fn novelty_score(&self, mutation: &str) -> f64 {
        let digits = mutation.chars().filter(char::is_ascii_digit).count();
        let mut tokens: Vec<&str> = mutation.split_whitespace().collect();
        tokens.sort_unstable();
        tokens.dedup();
        ((digits + tokens.len()) as f64 / self.novelty_scale).min(1.0)
    }
}

/// Hypotheses by descending confidence; ties keep their input order.
pub fn rank_by_confidence(hypotheses: &[Hypothesis]) -> Vec<&Hypothesis> {
    let mut ranked: Vec<&Hypothesis> = hypotheses.iter().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Mutation strings for one run: four numeric ones, or the generic hint.
pub fn mutate(analysis: &RunAnalysis) -> Vec<String> {
    let Some((upsilon, beta)) = analysis.initial_pair() else {
        return vec![GENERIC_SUGGESTION.to_string()];
    };
    let cfg = &analysis.configuration;
    PERTURBATIONS
        .iter()
        .map(|&delta| {
            format!(
                "upsilon={} | beta={} | engine={} | ψ={}",
                upsilon.with_numerator_offset(delta),
                beta.with_denominator_offset(delta),
                cfg.engine_mode(),
                cfg.psi_mode()
            )
        })
        .collect()
}

fn rationale(analysis: &RunAnalysis, hypothesis: &Hypothesis) -> String {
    format!(
        "Extend {} rhythm; hypothesis {} predicts stability within convergence window {}.",
        analysis.psi_pattern, hypothesis.id, hypothesis.cluster_key
    )
}

fn prediction(analysis: &RunAnalysis, hypothesis: &Hypothesis) -> String {
    let convergence = match hypothesis.convergence_value {
        Some(v) => format!("{v:.6}"),
        None => "undetermined".to_string(),
    };
    format!(
        "Expect ψ density ≈ {:.3} with convergence near {}.",
        analysis.psi_density, convergence
    )
}
