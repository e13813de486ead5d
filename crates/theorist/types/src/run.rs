//! Run records and their resolved configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::{EventRecord, MicrotickRecord};

/// Default for configuration fields the run metadata does not mention.
pub const UNSPECIFIED: &str = "unspecified";

/// Default for the triple-ψ mode, which the simulator treats as observed-only.
pub const OBSERVED: &str = "observed";

/// Everything known about one simulator run.
///
/// Rows may arrive in any order; the analyzer sorts them by
/// `(tick, microtick)` before deriving anything.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub microticks: Vec<MicrotickRecord>,
    pub events: Vec<EventRecord>,
    pub metadata: BTreeMap<String, String>,
}

impl RunRecord {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Self::default()
        }
    }

    pub fn with_microticks(mut self, rows: Vec<MicrotickRecord>) -> Self {
        self.microticks = rows;
        self
    }

    pub fn with_events(mut self, rows: Vec<EventRecord>) -> Self {
        self.events = rows;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// A run without value rows cannot be analysed.
    pub fn has_values(&self) -> bool {
        !self.microticks.is_empty()
    }

    /// Resolve the typed configuration from the metadata map.
    pub fn configuration(&self) -> RunConfiguration {
        RunConfiguration::from_metadata(&self.metadata)
    }
}

// ── Run Configuration ───────────────────────────────────────────────────

/// Discrete configuration choices of a run.
///
/// Each field is `None` when the metadata does not mention it; the accessor
/// methods apply the default table (`unspecified`, or `observed` for the
/// triple mode).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub engine_mode: Option<String>,
    pub psi_mode: Option<String>,
    pub koppa_mode: Option<String>,
    pub koppa_trigger: Option<String>,
    pub triple_mode: Option<String>,
}

impl RunConfiguration {
    /// Metadata keys accept both the snake_case name and the camelCase
    /// alias; snake_case wins when both are present.
    pub fn from_metadata(metadata: &BTreeMap<String, String>) -> Self {
        let lookup = |snake: &str, camel: &str| {
            metadata
                .get(snake)
                .or_else(|| metadata.get(camel))
                .cloned()
        };

        Self {
            engine_mode: lookup("engine_mode", "engineMode"),
            psi_mode: lookup("psi_mode", "psiMode"),
            koppa_mode: lookup("koppa_mode", "koppaMode"),
            koppa_trigger: lookup("koppa_trigger", "koppaTrigger"),
            triple_mode: lookup("triple_mode", "tripleMode"),
        }
    }

    pub fn engine_mode(&self) -> &str {
        self.engine_mode.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn psi_mode(&self) -> &str {
        self.psi_mode.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn koppa_mode(&self) -> &str {
        self.koppa_mode.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn koppa_trigger(&self) -> &str {
        self.koppa_trigger.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn triple_mode(&self) -> &str {
        self.triple_mode.as_deref().unwrap_or(OBSERVED)
    }
}
