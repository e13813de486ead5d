//! Per-run signatures derived by the analyzer.

use serde::{Deserialize, Serialize};

use crate::rational::RationalValue;
use crate::run::RunConfiguration;

/// Pattern text used when no flagged event occurred.
pub const NO_PATTERN: &str = "none";

// ── Symmetry ────────────────────────────────────────────────────────────

/// Shape of the ratio sequence judged from its last sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    /// No finite samples.
    Unknown,
    /// Last sample is infinite or zero.
    Singular,
    /// Last sample is (nearly) its own reciprocal.
    Reciprocal,
    /// Last sample sits on the sequence mean.
    Steady,
    Skewed,
}

impl std::fmt::Display for Symmetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Singular => write!(f, "singular"),
            Self::Reciprocal => write!(f, "reciprocal"),
            Self::Steady => write!(f, "steady"),
            Self::Skewed => write!(f, "skewed"),
        }
    }
}

// ── Run Analysis ────────────────────────────────────────────────────────

/// Numeric and symbolic signature of one run. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunAnalysis {
    pub run_id: String,
    /// Finite υ/β samples in `(tick, microtick)` order.
    pub ratios: Vec<f64>,
    /// ψ firings per tick, e.g. `T1:2+T4:1`, or `none`.
    pub psi_pattern: String,
    /// ρ detections per tick, same format as `psi_pattern`.
    pub rho_pattern: String,
    pub triple_psi_count: usize,
    pub mu_zero_count: usize,
    pub psi_density: f64,
    pub rho_density: f64,
    /// Mean of the trailing window of ratio samples.
    pub convergence_value: Option<f64>,
    /// `max - min` of the ratio samples.
    pub ratio_variation: f64,
    pub symmetry: Symmetry,
    pub configuration: RunConfiguration,
    pub initial_upsilon: Option<RationalValue>,
    pub initial_beta: Option<RationalValue>,
}

impl RunAnalysis {
    /// Convergence value, if present and finite.
    pub fn finite_convergence(&self) -> Option<f64> {
        self.convergence_value.filter(|v| v.is_finite())
    }

    /// Initial υ and β, when both are known.
    pub fn initial_pair(&self) -> Option<(RationalValue, RationalValue)> {
        self.initial_upsilon.zip(self.initial_beta)
    }
}

// ── Pattern Map ─────────────────────────────────────────────────────────

/// One row of the per-run pattern map handed to renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub convergence_value: Option<f64>,
    pub psi_pattern: String,
    pub rho_pattern: String,
    pub psi_density: f64,
    pub rho_density: f64,
    pub mu_zero_count: usize,
    pub engine_symmetry: Symmetry,
    pub engine_mode: String,
    pub psi_mode: String,
    pub koppa_mode: String,
    pub koppa_trigger: String,
    pub triple_psi_count: usize,
    pub initial_upsilon: Option<String>,
    pub initial_beta: Option<String>,
}

impl From<&RunAnalysis> for PatternEntry {
    fn from(analysis: &RunAnalysis) -> Self {
        let cfg = &analysis.configuration;
        Self {
            convergence_value: analysis.convergence_value,
            psi_pattern: analysis.psi_pattern.clone(),
            rho_pattern: analysis.rho_pattern.clone(),
            psi_density: analysis.psi_density,
            rho_density: analysis.rho_density,
            mu_zero_count: analysis.mu_zero_count,
            engine_symmetry: analysis.symmetry,
            engine_mode: cfg.engine_mode().to_string(),
            psi_mode: cfg.psi_mode().to_string(),
            koppa_mode: cfg.koppa_mode().to_string(),
            koppa_trigger: cfg.koppa_trigger().to_string(),
            triple_psi_count: analysis.triple_psi_count,
            initial_upsilon: analysis.initial_upsilon.map(|v| v.to_text()),
            initial_beta: analysis.initial_beta.map(|v| v.to_text()),
        }
    }
}
