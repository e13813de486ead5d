//! Run analyzer: reduces one run's rows to comparable signatures.
//!
//! The analyzer is a pure function of a `RunRecord`: it orders the rows by
//! `(tick, microtick)`, extracts the finite υ/β ratio sequence, summarises it
//! (trailing-window convergence, spread, symmetry) and folds the event flags
//! into per-tick ψ/ρ patterns and densities.

use std::collections::BTreeMap;

use tracing::debug;

use trts_theorist_types::{
    EventRecord, MicrotickRecord, RunAnalysis, RunRecord, Symmetry, NO_PATTERN,
};

use crate::config::TheoristConfig;

/// Derives a `RunAnalysis` from a `RunRecord`.
#[derive(Clone, Debug)]
pub struct RunAnalyzer {
    convergence_window: usize,
    reciprocal_tolerance: f64,
    steady_tolerance: f64,
}

impl Default for RunAnalyzer {
    fn default() -> Self {
        Self::from_config(&TheoristConfig::default())
    }
}

impl RunAnalyzer {
    pub fn from_config(config: &TheoristConfig) -> Self {
        Self {
            convergence_window: config.convergence_window.max(1),
            reciprocal_tolerance: config.reciprocal_tolerance,
            steady_tolerance: config.steady_tolerance,
        }
    }

    /// Analyse one run. Never fails; missing data degrades to defaults.
    pub fn analyze(&self, run: &RunRecord) -> RunAnalysis {
        let mut microticks: Vec<&MicrotickRecord> = run.microticks.iter().collect();
        microticks.sort_by(|a, b| a.cmp_position(b));
        let mut events: Vec<&EventRecord> = run.events.iter().collect();
        events.sort_by(|a, b| a.cmp_position(b));

        let ratios = ratio_sequence(&microticks);

        let mut psi_by_tick: BTreeMap<u64, usize> = BTreeMap::new();
        let mut rho_by_tick: BTreeMap<u64, usize> = BTreeMap::new();
        let mut triple_psi_count = 0;
        let mut mu_zero_count = 0;
        for event in &events {
            if event.psi_fired {
                *psi_by_tick.entry(event.tick).or_insert(0) += 1;
            }
            if event.rho_event {
                *rho_by_tick.entry(event.tick).or_insert(0) += 1;
            }
            if event.triple_psi {
                triple_psi_count += 1;
            }
            if event.mu_zero {
                mu_zero_count += 1;
            }
        }

        let total_events = events.len().max(1) as f64;
        let psi_density = psi_by_tick.values().sum::<usize>() as f64 / total_events;
        let rho_density = rho_by_tick.values().sum::<usize>() as f64 / total_events;

        let analysis = RunAnalysis {
            run_id: run.run_id.clone(),
            convergence_value: trailing_mean(&ratios, self.convergence_window),
            ratio_variation: variation(&ratios),
            symmetry: self.classify_symmetry(&ratios),
            ratios,
            psi_pattern: pattern_string(&psi_by_tick),
            rho_pattern: pattern_string(&rho_by_tick),
            triple_psi_count,
            mu_zero_count,
            psi_density,
            rho_density,
            configuration: run.configuration(),
            initial_upsilon: microticks.first().map(|r| r.upsilon),
            initial_beta: microticks.first().map(|r| r.beta),
        };

        debug!(
            run_id = %analysis.run_id,
            samples = analysis.ratios.len(),
            convergence = ?analysis.convergence_value,
            symmetry = %analysis.symmetry,
            "Analysed run"
        );
        analysis
    }

    /// Classify the ratio sequence by its last sample.
    ///
    /// Checks run in a fixed order and the first match wins, so a singular
    /// tail is never reported as reciprocal or steady.
    pub fn classify_symmetry(&self, ratios: &[f64]) -> Symmetry {
        let Some(&last) = ratios.last() else {
            return Symmetry::Unknown;
        };
        if last.is_infinite() || last == 0.0 {
            return Symmetry::Singular;
        }
        if (last - 1.0 / last).abs() < self.reciprocal_tolerance {
            return Symmetry::Reciprocal;
        }
        let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
        if (mean - last).abs() < self.steady_tolerance {
            return Symmetry::Steady;
        }
        Symmetry::Skewed
    }
}

/// υ/β for every row with a usable β, keeping only finite results.
fn ratio_sequence(rows: &[&MicrotickRecord]) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| {
            if row.beta.is_undefined() {
                return None;
            }
            let beta = row.beta.as_f64();
            if !beta.is_finite() || beta == 0.0 {
                return None;
            }
            let ratio = row.upsilon.as_f64() / beta;
            ratio.is_finite().then_some(ratio)
        })
        .collect()
}

/// Mean of the last `window` samples, or of all of them when fewer exist.
pub fn trailing_mean(ratios: &[f64], window: usize) -> Option<f64> {
    if ratios.is_empty() {
        return None;
    }
    let tail = &ratios[ratios.len().saturating_sub(window)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

/// `max - min`, or 0 for fewer than two samples.
pub fn variation(ratios: &[f64]) -> f64 {
    if ratios.len() < 2 {
        return 0.0;
    }
    let max = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = ratios.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Render per-tick counts as `T<tick>:<count>` joined by `+`.
pub fn pattern_string(counts: &BTreeMap<u64, usize>) -> String {
    if counts.is_empty() {
        return NO_PATTERN.to_string();
    }
    counts
        .iter()
        .map(|(tick, count)| format!("T{tick}:{count}"))
        .collect::<Vec<_>>()
        .join("+")
}
