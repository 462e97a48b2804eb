// src/analysis/function.rs

//! The canonical logic functions a simulated circuit can be scored
//! against, with their fixed input→output tables.

use crate::core::state::LogicState;
use std::fmt;
use std::str::FromStr;

/// The logic function a truth table is expected to realize.
///
/// Each variant fixes a row arity and an input→output mapping; scoring
/// compares observed outputs against that mapping after state folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicFunction {
    /// A propagation chain: every downstream tap mirrors the source.
    /// Rows are `[input, output_1, ..., output_k]`.
    Wire,
    /// A single-input inverter: `A↔B`, `C` fixed. Rows are
    /// `[input, ..., output]`; intermediate columns are informational.
    Inverter,
    /// A three-input majority voter. Rows are `[in1, in2, in3, output]`.
    Majority,
    /// A feedback cell that retains its previous state. Rows are
    /// `[x, w, q]`: new input, stored state, observed output.
    MemoryCell,
}

impl LogicFunction {
    /// Stable lower-case name, used in error context and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            LogicFunction::Wire => "wire",
            LogicFunction::Inverter => "inverter",
            LogicFunction::Majority => "majority",
            LogicFunction::MemoryCell => "memory-cell",
        }
    }
}

impl fmt::Display for LogicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogicFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wire" | "line" => Ok(LogicFunction::Wire),
            "inverter" | "not" => Ok(LogicFunction::Inverter),
            "majority" => Ok(LogicFunction::Majority),
            "memory-cell" => Ok(LogicFunction::MemoryCell),
            _ => Err(format!("Unknown logic function: '{}'", s)),
        }
    }
}

/// The full three-input majority table over the folded alphabet.
///
/// Ties between all-distinct inputs resolve to `C`; otherwise the state
/// appearing at least twice wins. The enumeration is deliberately
/// exhaustive so the mapping is auditable entry by entry.
///
/// Callers must fold inputs first; `D` never reaches this table.
pub(crate) fn majority_output(a: LogicState, b: LogicState, c: LogicState) -> LogicState {
    use LogicState::{A, B, C};
    match (a, b, c) {
        (A, A, A) => A,
        (A, A, B) => A,
        (A, A, C) => A,
        (A, B, A) => A,
        (A, B, B) => B,
        (A, B, C) => C,
        (A, C, A) => A,
        (A, C, B) => C,
        (A, C, C) => C,
        (B, A, A) => A,
        (B, A, B) => B,
        (B, A, C) => C,
        (B, B, A) => B,
        (B, B, B) => B,
        (B, B, C) => B,
        (B, C, A) => C,
        (B, C, B) => B,
        (B, C, C) => C,
        (C, A, A) => A,
        (C, A, B) => C,
        (C, A, C) => C,
        (C, B, A) => C,
        (C, B, B) => B,
        (C, B, C) => C,
        (C, C, A) => C,
        (C, C, B) => C,
        (C, C, C) => C,
        _ => unreachable!("state folding guarantees the {{A,B,C}} alphabet"),
    }
}

/// The memory-cell table keyed `(w, x)`: previous state first, new input
/// second. The expected output is the retained previous state `w`,
/// independent of `x`. The key order is load-bearing; swapping it
/// silently turns retention into tracking.
pub(crate) fn memory_cell_output(w: LogicState, x: LogicState) -> LogicState {
    use LogicState::{A, B, C};
    match (w, x) {
        (A, A) => A,
        (A, B) => A,
        (A, C) => A,
        (B, A) => B,
        (B, B) => B,
        (B, C) => B,
        (C, A) => C,
        (C, B) => C,
        (C, C) => C,
        _ => unreachable!("state folding guarantees the {{A,B,C}} alphabet"),
    }
}
