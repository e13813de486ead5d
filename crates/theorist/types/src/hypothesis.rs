//! Hypotheses about convergence clusters and the mutations that test them.

use serde::{Deserialize, Serialize};

/// Cluster key of the fallback hypothesis.
pub const NO_CLUSTER_KEY: &str = "convergence::none";

// ── Identifier Types ────────────────────────────────────────────────────

/// Sequential hypothesis identifier (`H1`, `H2`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HypothesisId(pub String);

impl HypothesisId {
    /// Identifier for the `index`-th hypothesis (1-based).
    pub fn numbered(index: usize) -> Self {
        Self(format!("H{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cluster key for a convergence value, `convergence::<value:.6>`.
pub fn cluster_key(value: f64) -> String {
    format!("convergence::{value:.6}")
}

// ── Hypothesis ──────────────────────────────────────────────────────────

/// A scored claim that a group of runs shares one convergence behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    /// Human-readable, falsifiable statement.
    pub description: String,
    pub cluster_key: String,
    pub support_runs: Vec<String>,
    pub contradiction_runs: Vec<String>,
    /// Percent, `[0, 100]`.
    pub confidence: f64,
    /// Share of analysed runs in the cluster, `[0, 1]`.
    pub coverage: f64,
    /// Shannon entropy of the members' ψ patterns, in bits.
    pub entropy: f64,
    pub psi_signature: String,
    pub engine_mode: String,
    pub koppa_mode: String,
    pub convergence_value: Option<f64>,
}

impl Hypothesis {
    /// Whether this is the no-cluster fallback.
    pub fn is_fallback(&self) -> bool {
        self.convergence_value.is_none()
    }
}

// ── Mutation Proposal ───────────────────────────────────────────────────

/// A follow-up configuration derived from a supporting run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationProposal {
    pub base_run: String,
    pub hypothesis_id: HypothesisId,
    pub mutation: String,
    pub rationale: String,
    pub predicted_behavior: String,
    /// Lexical information density in `[0, 1]`. A cheap proxy only.
    pub novelty_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_ids() {
        assert_eq!(HypothesisId::numbered(1).to_string(), "H1");
        assert_eq!(HypothesisId::numbered(12).as_str(), "H12");
    }

    #[test]
    fn cluster_key_has_six_decimals() {
        assert_eq!(cluster_key(1.6180339), "convergence::1.618034");
        assert_eq!(cluster_key(0.5), "convergence::0.500000");
    }

    #[test]
    fn hypothesis_serializes_id_as_plain_string() {
        let h = Hypothesis {
            id: HypothesisId::numbered(3),
            description: "d".into(),
            cluster_key: NO_CLUSTER_KEY.into(),
            support_runs: vec!["a".into()],
            contradiction_runs: vec![],
            confidence: 0.0,
            coverage: 0.0,
            entropy: 0.0,
            psi_signature: "none".into(),
            engine_mode: "unspecified".into(),
            koppa_mode: "unspecified".into(),
            convergence_value: None,
        };
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["id"], "H3");
        assert!(h.is_fallback());
    }
}
