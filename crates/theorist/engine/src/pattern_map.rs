//! Per-run pattern map handed to renderers.

use std::collections::BTreeMap;

use trts_theorist_types::{PatternEntry, RunAnalysis};

/// Run id → pattern entry, ordered by run id.
pub type PatternMap = BTreeMap<String, PatternEntry>;

pub fn build_pattern_map(analyses: &[RunAnalysis]) -> PatternMap {
    analyses
        .iter()
        .map(|a| (a.run_id.clone(), PatternEntry::from(a)))
        .collect()
}
