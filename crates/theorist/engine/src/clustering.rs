//! Convergence clustering and signature entropy.
//!
//! Runs whose trailing ratios land on the same value are grouped into one
//! cluster. Assignment is a single pass in input order against a
//! representative fixed when the cluster is founded; the representative is
//! never moved towards the running mean, so borderline runs cluster
//! differently depending on arrival order.

use std::collections::BTreeMap;

use tracing::debug;

use trts_theorist_types::RunAnalysis;

use crate::config::TheoristConfig;

/// A group of runs sharing one convergence value.
#[derive(Clone, Debug)]
pub struct Cluster<'a> {
    /// Convergence value of the founding member.
    pub representative: f64,
    /// Members in arrival order; the first one founded the cluster.
    pub members: Vec<&'a RunAnalysis>,
}

impl<'a> Cluster<'a> {
    pub fn run_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.run_id.clone()).collect()
    }

    pub fn psi_patterns(&self) -> Vec<&'a str> {
        self.members.iter().map(|m| m.psi_pattern.as_str()).collect()
    }

    /// Largest ratio variation among members.
    pub fn max_variation(&self) -> f64 {
        self.members
            .iter()
            .map(|m| m.ratio_variation)
            .fold(0.0, f64::max)
    }
}

// ── Convergence Clusterer ───────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ConvergenceClusterer {
    tolerance: f64,
}

impl Default for ConvergenceClusterer {
    fn default() -> Self {
        Self::from_config(&TheoristConfig::default())
    }
}

impl ConvergenceClusterer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn from_config(config: &TheoristConfig) -> Self {
        Self::new(config.cluster_tolerance)
    }

    /// Cluster analyses by convergence value, ascending by representative.
    ///
    /// Analyses without a finite convergence value are left out entirely.
    pub fn cluster<'a>(&self, analyses: &'a [RunAnalysis]) -> Vec<Cluster<'a>> {
        let mut clusters: Vec<Cluster<'a>> = Vec::new();

        for analysis in analyses {
            let Some(value) = analysis.finite_convergence() else {
                continue;
            };
            match clusters
                .iter_mut()
                .find(|c| (c.representative - value).abs() < self.tolerance)
            {
                Some(cluster) => cluster.members.push(analysis),
                None => clusters.push(Cluster {
                    representative: value,
                    members: vec![analysis],
                }),
            }
        }

        clusters.sort_by(|a, b| a.representative.total_cmp(&b.representative));
        debug!(
            analyses = analyses.len(),
            clusters = clusters.len(),
            "Clustered runs by convergence"
        );
        clusters
    }
}

// ── Entropy Scorer ──────────────────────────────────────────────────────

/// Shannon entropy over signature strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropyScorer;

impl EntropyScorer {
    /// `-Σ p·log2(p)` over the distinct signatures; 0 for no input.
    pub fn score<S: AsRef<str>>(&self, signatures: &[S]) -> f64 {
        if signatures.is_empty() {
            return 0.0;
        }
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for signature in signatures {
            *counts.entry(signature.as_ref()).or_insert(0) += 1;
        }
        let total = signatures.len() as f64;
        counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum::<f64>()
            .max(0.0)
    }
}
