//! Contradiction tracker: which runs undermine which hypothesis.
//!
//! The tracker is an ordinary value. The hypothesis builder receives it by
//! `&mut` for the duration of its single pass and records each hypothesis
//! exactly once; after that pass it is only read. There is no shared or
//! global instance, so no second writer can exist during the pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use trts_theorist_types::HypothesisId;

use crate::error::{TheoristError, TheoristResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionTracker {
    records: BTreeMap<HypothesisId, Vec<String>>,
}

impl ContradictionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the contradicting runs of one hypothesis, in order.
    ///
    /// An empty list is still recorded so that a hypothesis cannot be
    /// written twice.
    pub fn record(
        &mut self,
        hypothesis_id: &HypothesisId,
        run_ids: Vec<String>,
    ) -> TheoristResult<()> {
        if self.records.contains_key(hypothesis_id) {
            return Err(TheoristError::ContradictionAlreadyRecorded(
                hypothesis_id.clone(),
            ));
        }
        self.records.insert(hypothesis_id.clone(), run_ids);
        Ok(())
    }

    /// Contradicting runs for a hypothesis; empty if unknown.
    pub fn contradictions_for(&self, hypothesis_id: &HypothesisId) -> &[String] {
        self.records
            .get(hypothesis_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_recorded(&self, hypothesis_id: &HypothesisId) -> bool {
        self.records.contains_key(hypothesis_id)
    }

    /// Total contradicting runs across all hypotheses.
    pub fn total_contradictions(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HypothesisId, &[String])> {
        self.records.iter().map(|(id, runs)| (id, runs.as_slice()))
    }
}
