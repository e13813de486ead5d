//! Typed simulator rows and the lenient row boundary.
//!
//! The simulator writes two kinds of tables: a value table (one row per
//! microtick with υ, β, κ and optional memory rationals) and an event table
//! (one row per event with ρ/ψ/μ flags). Whatever reads those tables hands
//! each row over as a string map; `from_row` turns it into a typed record.
//! Malformed fields never fail: they fall back to neutral defaults.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rational::RationalValue;

/// One raw table row, keyed by column name.
pub type Row = HashMap<String, String>;

// ── Field parsing ───────────────────────────────────────────────────────

/// Parse an integer field, accepting `"7"` and `"7.9"` (truncated).
/// Missing, blank or unparsable input yields `default`.
pub fn parse_int(value: Option<&str>, default: i64) -> i64 {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    if let Ok(v) = raw.parse::<i64>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => default,
    }
}

/// Parse a boolean flag. Only `1, true, yes, on, y` count as set.
pub fn parse_bool(value: Option<&str>) -> bool {
    match value {
        Some(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "y"
        ),
        None => false,
    }
}

fn field<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).map(String::as_str)
}

fn parse_tick(row: &Row, key: &str) -> u64 {
    parse_int(field(row, key), 0).max(0) as u64
}

fn parse_rational(row: &Row, prefix: &str) -> RationalValue {
    RationalValue::new(
        parse_int(field(row, &format!("{prefix}_num")), 0),
        parse_int(field(row, &format!("{prefix}_den")), 1),
    )
}

// ── Microtick Record ────────────────────────────────────────────────────

/// One row of the value table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MicrotickRecord {
    pub tick: u64,
    pub microtick: u64,
    pub upsilon: RationalValue,
    pub beta: RationalValue,
    pub koppa: RationalValue,
    pub memory: Option<RationalValue>,
}

impl MicrotickRecord {
    /// Build a record from a value-table row.
    ///
    /// Memory is only present when both `memory_num` and `memory_den`
    /// columns exist in the row.
    pub fn from_row(row: &Row) -> Self {
        let memory = if row.contains_key("memory_num") && row.contains_key("memory_den") {
            Some(parse_rational(row, "memory"))
        } else {
            None
        };

        Self {
            tick: parse_tick(row, "tick"),
            microtick: parse_tick(row, "mt"),
            upsilon: parse_rational(row, "upsilon"),
            beta: parse_rational(row, "beta"),
            koppa: parse_rational(row, "koppa"),
            memory,
        }
    }

    /// Position in the run; all sequence metrics depend on this order.
    pub fn position(&self) -> (u64, u64) {
        (self.tick, self.microtick)
    }

    /// Compare two records by `(tick, microtick)`.
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

// ── Event Record ────────────────────────────────────────────────────────

/// One row of the event table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: u64,
    pub microtick: u64,
    pub event_type: String,
    pub rho_event: bool,
    pub psi_fired: bool,
    pub mu_zero: bool,
    pub triple_psi: bool,
}

impl EventRecord {
    /// Build a record from an event-table row. A missing `event_type`
    /// becomes `"?"`.
    pub fn from_row(row: &Row) -> Self {
        Self {
            tick: parse_tick(row, "tick"),
            microtick: parse_tick(row, "mt"),
            event_type: field(row, "event_type").unwrap_or("?").to_string(),
            rho_event: parse_bool(field(row, "rho_event")),
            psi_fired: parse_bool(field(row, "psi_fired")),
            mu_zero: parse_bool(field(row, "mu_zero")),
            triple_psi: parse_bool(field(row, "triple_psi")),
        }
    }

    pub fn position(&self) -> (u64, u64) {
        (self.tick, self.microtick)
    }

    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}
