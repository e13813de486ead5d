//! Hypothesis builder: turns convergence clusters into scored claims.
//!
//! One hypothesis per cluster, numbered `H1, H2, …` in ascending order of
//! convergence value. Confidence is the product of three bounded factors:
//!
//! ```text
//!   confidence = 100 · coverage · stability · contradiction_penalty
//!
//!   coverage              = |members| / analysed runs
//!   stability             = 1 − min(1, max member variation)
//!   contradiction_penalty = max(floor, 1 − |contradictions| / |members|)
//! ```
//!
//! Members whose ratio variation exceeds the contradiction threshold are the
//! cluster's contradictions; they are recorded in the `ContradictionTracker`
//! under the hypothesis id.

use tracing::debug;

use trts_theorist_types::{
    cluster_key, Hypothesis, HypothesisId, RunAnalysis, TargetConstant, NO_CLUSTER_KEY,
    NO_PATTERN, UNSPECIFIED,
};

use crate::clustering::{Cluster, ConvergenceClusterer, EntropyScorer};
use crate::config::TheoristConfig;
use crate::contradiction::ContradictionTracker;
use crate::error::TheoristResult;

/// Description of the hypothesis emitted when no cluster exists.
pub const FALLBACK_DESCRIPTION: &str = "Insufficient convergence clusters detected. \
Existing runs either lack data or diverge beyond the tolerance window.";

#[derive(Clone, Debug)]
pub struct HypothesisBuilder {
    clusterer: ConvergenceClusterer,
    scorer: EntropyScorer,
    contradiction_variation: f64,
    min_contradiction_penalty: f64,
    target: Option<TargetConstant>,
}

impl Default for HypothesisBuilder {
    fn default() -> Self {
        Self::from_config(&TheoristConfig::default())
    }
}

impl HypothesisBuilder {
    pub fn from_config(config: &TheoristConfig) -> Self {
        Self {
            clusterer: ConvergenceClusterer::from_config(config),
            scorer: EntropyScorer,
            contradiction_variation: config.contradiction_variation,
            min_contradiction_penalty: config.min_contradiction_penalty,
            target: None,
        }
    }

    /// Annotate descriptions with the distance to a named constant.
    /// Has no effect on clustering or confidence.
    pub fn with_target(mut self, target: Option<TargetConstant>) -> Self {
        self.target = target;
        self
    }

    /// Build hypotheses for all analyses in one pass.
    ///
    /// `tracker` is written once per hypothesis during this call and must not
    /// be written by anyone else meanwhile; the `&mut` borrow enforces that.
    /// If no analysis has a finite convergence value a single fallback `H1`
    /// is returned, supported by every run.
    pub fn build(
        &self,
        analyses: &[RunAnalysis],
        tracker: &mut ContradictionTracker,
    ) -> TheoristResult<Vec<Hypothesis>> {
        let clusters = self.clusterer.cluster(analyses);
        let total_runs = analyses.len().max(1);

        let mut hypotheses = Vec::with_capacity(clusters.len().max(1));
        for (index, cluster) in clusters.iter().enumerate() {
            let id = HypothesisId::numbered(index + 1);
            let hypothesis = self.build_one(id, cluster, total_runs, tracker)?;
            debug!(
                hypothesis = %hypothesis.id,
                members = hypothesis.support_runs.len(),
                contradictions = hypothesis.contradiction_runs.len(),
                confidence = hypothesis.confidence,
                "Built hypothesis"
            );
            hypotheses.push(hypothesis);
        }

        if hypotheses.is_empty() {
            let fallback = fallback_hypothesis(analyses);
            tracker.record(&fallback.id, Vec::new())?;
            hypotheses.push(fallback);
        }

        Ok(hypotheses)
    }

    fn build_one(
        &self,
        id: HypothesisId,
        cluster: &Cluster<'_>,
        total_runs: usize,
        tracker: &mut ContradictionTracker,
    ) -> TheoristResult<Hypothesis> {
        let members = cluster.members.len();
        let contradiction_runs: Vec<String> = cluster
            .members
            .iter()
            .filter(|m| m.ratio_variation > self.contradiction_variation)
            .map(|m| m.run_id.clone())
            .collect();
        tracker.record(&id, contradiction_runs.clone())?;

        let coverage = members as f64 / total_runs as f64;
        let stability = stability_factor(cluster.max_variation());
        let penalty = contradiction_penalty(
            contradiction_runs.len(),
            members,
            self.min_contradiction_penalty,
        );
        let confidence = clamp_confidence(100.0 * coverage * stability * penalty);
        let entropy = self.scorer.score(&cluster.psi_patterns());

        // `cluster` always has at least its founding member.
        let representative = cluster.members[0];
        let description = describe_convergence(
            representative,
            cluster.representative,
            self.target.map(|t| t.value()),
        );
        let cfg = &representative.configuration;

        Ok(Hypothesis {
            id,
            description,
            cluster_key: cluster_key(cluster.representative),
            support_runs: cluster.run_ids(),
            contradiction_runs,
            confidence,
            coverage,
            entropy,
            psi_signature: representative.psi_pattern.clone(),
            engine_mode: cfg.engine_mode().to_string(),
            koppa_mode: cfg.koppa_mode().to_string(),
            convergence_value: Some(cluster.representative),
        })
    }
}

// ── Scoring ─────────────────────────────────────────────────────────────

/// `max(0, 1 − min(1, variation))`.
pub fn stability_factor(max_variation: f64) -> f64 {
    (1.0 - max_variation.min(1.0)).max(0.0)
}

/// `max(floor, 1 − contradictions / max(1, members))`.
pub fn contradiction_penalty(contradictions: usize, members: usize, floor: f64) -> f64 {
    (1.0 - contradictions as f64 / members.max(1) as f64).max(floor)
}

/// Clamp to `[0, 100]`; NaN collapses to 0.
pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

// ── Description ─────────────────────────────────────────────────────────

/// Compose the natural-language claim for a cluster from its first member.
///
/// Fragments appear in a fixed order and each one only when its field is
/// present or non-default; they are joined with single spaces.
pub fn describe_convergence(
    analysis: &RunAnalysis,
    value: f64,
    target_value: Option<f64>,
) -> String {
    let cfg = &analysis.configuration;
    let mut parts: Vec<String> = Vec::new();

    let config_pieces: Vec<String> = [
        ("Engine", cfg.engine_mode()),
        ("ψ mode", cfg.psi_mode()),
        ("κ mode", cfg.koppa_mode()),
        ("κ trigger", cfg.koppa_trigger()),
    ]
    .into_iter()
    .filter(|(_, v)| *v != UNSPECIFIED)
    .map(|(label, v)| format!("{label}: {v}"))
    .collect();
    if !config_pieces.is_empty() {
        parts.push(format!("Configuration → {}", config_pieces.join(", ")));
    }

    parts.push(format!("Observed convergence window around {value:.6}."));

    if let Some(target) = target_value {
        parts.push(format!("Δ vs target ≈ {:.6e}.", (value - target).abs()));
    }

    parts.push(format!(
        "ψ rhythm signature: {} (density {:.3}).",
        analysis.psi_pattern, analysis.psi_density
    ));
    if analysis.rho_pattern != NO_PATTERN {
        parts.push(format!("ρ flags recorded at {}.", analysis.rho_pattern));
    }
    if analysis.mu_zero_count > 0 {
        parts.push(format!("μ = 0 excursions: {}.", analysis.mu_zero_count));
    }
    parts.push(format!(
        "Engine symmetry classified as {}.",
        analysis.symmetry
    ));

    parts.join(" ")
}

fn fallback_hypothesis(analyses: &[RunAnalysis]) -> Hypothesis {
    Hypothesis {
        id: HypothesisId::numbered(1),
        description: FALLBACK_DESCRIPTION.to_string(),
        cluster_key: NO_CLUSTER_KEY.to_string(),
        support_runs: analyses.iter().map(|a| a.run_id.clone()).collect(),
        contradiction_runs: Vec::new(),
        confidence: 0.0,
        coverage: 0.0,
        entropy: 0.0,
        psi_signature: NO_PATTERN.to_string(),
        engine_mode: UNSPECIFIED.to_string(),
        koppa_mode: UNSPECIFIED.to_string(),
        convergence_value: None,
    }
}
