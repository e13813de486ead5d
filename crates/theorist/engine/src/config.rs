//! Tunables for the synthesis pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{TheoristError, TheoristResult};

/// Configuration for the theorist engine.
///
/// The defaults reproduce the simulator team's established analysis; callers
/// normally only touch `max_hypotheses`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoristConfig {
    /// Number of trailing ratio samples averaged into the convergence value.
    pub convergence_window: usize,
    /// Absolute distance to a cluster representative that still joins it.
    pub cluster_tolerance: f64,
    /// Ratio variation above which a member contradicts its cluster.
    pub contradiction_variation: f64,
    /// Floor of the contradiction penalty factor.
    pub min_contradiction_penalty: f64,
    /// `|r - 1/r|` below this classifies a run as reciprocal.
    pub reciprocal_tolerance: f64,
    /// `|mean - r|` below this classifies a run as steady.
    pub steady_tolerance: f64,
    /// Divisor of the lexical novelty score.
    pub novelty_scale: f64,
    /// Keep at most this many hypotheses in a report.
    pub max_hypotheses: Option<usize>,
}

impl Default for TheoristConfig {
    fn default() -> Self {
        Self {
            convergence_window: 5,
            cluster_tolerance: 1e-5,
            contradiction_variation: 0.25,
            min_contradiction_penalty: 0.1,
            reciprocal_tolerance: 1e-3,
            steady_tolerance: 1e-4,
            novelty_scale: 25.0,
            max_hypotheses: None,
        }
    }
}

impl TheoristConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> TheoristResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| TheoristError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> TheoristResult<()> {
        if self.convergence_window == 0 {
            return Err(TheoristError::ConfigurationError(
                "convergence_window must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("cluster_tolerance", self.cluster_tolerance),
            ("reciprocal_tolerance", self.reciprocal_tolerance),
            ("steady_tolerance", self.steady_tolerance),
            ("novelty_scale", self.novelty_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TheoristError::ConfigurationError(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.contradiction_variation.is_finite() || self.contradiction_variation < 0.0 {
            return Err(TheoristError::ConfigurationError(format!(
                "contradiction_variation must be non-negative, got {}",
                self.contradiction_variation
            )));
        }
        if !(self.min_contradiction_penalty > 0.0 && self.min_contradiction_penalty <= 1.0) {
            return Err(TheoristError::ConfigurationError(format!(
                "min_contradiction_penalty must lie in (0, 1], got {}",
                self.min_contradiction_penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = TheoristConfig::default();
        assert_eq!(cfg.convergence_window, 5);
        assert!((cfg.cluster_tolerance - 1e-5).abs() < f64::EPSILON);
        assert!((cfg.contradiction_variation - 0.25).abs() < f64::EPSILON);
        assert!((cfg.min_contradiction_penalty - 0.1).abs() < f64::EPSILON);
        assert!((cfg.reciprocal_tolerance - 1e-3).abs() < f64::EPSILON);
        assert!((cfg.steady_tolerance - 1e-4).abs() < f64::EPSILON);
        assert!((cfg.novelty_scale - 25.0).abs() < f64::EPSILON);
        assert!(cfg.max_hypotheses.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let cfg = TheoristConfig::from_json(r#"{"max_hypotheses": 3}"#).unwrap();
        assert_eq!(cfg.max_hypotheses, Some(3));
        assert_eq!(cfg.convergence_window, 5);
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = TheoristConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, TheoristError::ConfigurationError(_)));
    }

    #[test]
    fn validate_rejects_zero_window() {
        let cfg = TheoristConfig {
            convergence_window: 0,
            ..TheoristConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_tolerance() {
        let cfg = TheoristConfig {
            cluster_tolerance: f64::NAN,
            ..TheoristConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = TheoristConfig {
            steady_tolerance: -1.0,
            ..TheoristConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_penalty_floor_outside_unit_interval() {
        for floor in [0.0, 1.5, f64::NAN] {
            let cfg = TheoristConfig {
                min_contradiction_penalty: floor,
                ..TheoristConfig::default()
            };
            assert!(cfg.validate().is_err(), "floor {floor} should be rejected");
        }
    }
}
