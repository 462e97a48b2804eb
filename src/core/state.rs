// src/core/state.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic logic state read out of a simulated cell.
///
/// Single-polarization cells resolve to `A` (positive polarization) or
/// `B` (negative); two-polarization cells additionally resolve the
/// second channel to `C` (positive) or `D` (negative). `D` is a
/// degenerate reading of the same quality as `C`, which is why every
/// comparison folds it away first (see [`LogicState::folded`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicState {
    /// First polarization channel, positive.
    A,
    /// First polarization channel, negative.
    B,
    /// Second polarization channel, positive.
    C,
    /// Second polarization channel, negative. Equivalent to `C` for all
    /// logic comparisons.
    D,
}

impl LogicState {
    /// Collapses the degenerate `D` reading into `C`.
    ///
    /// This folding must be applied before any logic comparison; after
    /// folding, the working alphabet is exactly `{A, B, C}`.
    pub fn folded(self) -> LogicState {
        match self {
            LogicState::D => LogicState::C,
            other => other,
        }
    }
}

impl fmt::Display for LogicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            LogicState::A => "A",
            LogicState::B => "B",
            LogicState::C => "C",
            LogicState::D => "D",
        };
        write!(f, "{}", symbol)
    }
}

/// One observed value in a truth table: a resolved [`LogicState`], or
/// `None` when the cell never settled on a value during its clock region
/// (rendered as `NaN` in the text format).
pub type TruthValue = Option<LogicState>;

/// One row of a truth table: the ordered cell readings for a single
/// clock cycle. Leading element(s) are excitation inputs, trailing
/// element(s) the observed outputs; the exact arity depends on the logic
/// function being analyzed.
pub type TruthRow = Vec<TruthValue>;

/// Folds a truth value, preserving the undefined marker.
pub fn folded_value(value: TruthValue) -> TruthValue {
    value.map(LogicState::folded)
}

/// Renders a truth value the way the tabular text format does.
pub fn value_symbol(value: TruthValue) -> String {
    match value {
        Some(state) => state.to_string(),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folding_collapses_d_only() {
        assert_eq!(LogicState::D.folded(), LogicState::C);
        assert_eq!(LogicState::A.folded(), LogicState::A);
        assert_eq!(LogicState::B.folded(), LogicState::B);
        assert_eq!(LogicState::C.folded(), LogicState::C);
    }

    #[test]
    fn test_folded_value_keeps_undefined() {
        assert_eq!(folded_value(None), None);
        assert_eq!(folded_value(Some(LogicState::D)), Some(LogicState::C));
    }

    #[test]
    fn test_value_symbols() {
        assert_eq!(value_symbol(Some(LogicState::A)), "A");
        assert_eq!(value_symbol(None), "NaN");
    }
}
