// src/analysis/score.rs

//! Scores truth-table rows against a canonical logic function.
//!
//! All comparisons happen on folded values (`D` collapsed into `C`), so
//! the working alphabet inside every variant is exactly `{A, B, C}` plus
//! the undefined marker. Per-row rules differ by variant; the aggregate
//! is always the arithmetic mean of the per-row scores.

use crate::analysis::function::{LogicFunction, majority_output, memory_cell_output};
use crate::core::error::ScoreError;
use crate::core::state::{LogicState, TruthRow, folded_value, value_symbol};
use std::fmt;
use tracing::debug;

/// Accuracy of a scored truth table: one score in `[0, 1]` per row plus
/// their arithmetic mean.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    row_scores: Vec<f64>,
    overall: f64,
}

impl AccuracyReport {
    fn from_scores(row_scores: Vec<f64>) -> Self {
        // An empty table is vacuously correct.
        let overall = if row_scores.is_empty() {
            1.0
        } else {
            row_scores.iter().sum::<f64>() / row_scores.len() as f64
        };
        Self {
            row_scores,
            overall,
        }
    }

    /// Mean of the per-row scores; `1.0` for an empty row set.
    pub fn overall(&self) -> f64 {
        self.overall
    }

    /// Per-row scores in input order.
    pub fn row_scores(&self) -> &[f64] {
        &self.row_scores
    }

    /// Number of scored rows.
    pub fn len(&self) -> usize {
        self.row_scores.len()
    }

    /// Returns `true` if no rows were scored.
    pub fn is_empty(&self) -> bool {
        self.row_scores.is_empty()
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy {:.4} over {} row(s)",
            self.overall,
            self.row_scores.len()
        )
    }
}

/// Wire: fraction of output columns mirroring the input column.
///
/// Undefined values participate in the comparison (two undefined
/// readings count as a match), mirroring the propagation-chain check's
/// historical semantics.
fn score_wire(row: &TruthRow) -> Result<f64, ScoreError> {
    if row.len() < 2 {
        return Err(ScoreError::ArityMismatch {
            function: LogicFunction::Wire.name(),
            expected: 2,
            actual: row.len(),
        });
    }
    let input = folded_value(row[0]);
    let matching = row[1..]
        .iter()
        .filter(|value| folded_value(**value) == input)
        .count();
    Ok(matching as f64 / (row.len() - 1) as f64)
}

/// Inverter: `A↔B` with `C` fixed, checked between the first and last
/// columns. An undefined input is outside the variant's alphabet; an
/// undefined output simply fails to match.
fn score_inverter(row: &TruthRow) -> Result<f64, ScoreError> {
    if row.len() < 2 {
        return Err(ScoreError::ArityMismatch {
            function: LogicFunction::Inverter.name(),
            expected: 2,
            actual: row.len(),
        });
    }
    let input = folded_value(row[0]).ok_or_else(|| ScoreError::UnexpectedState {
        function: LogicFunction::Inverter.name(),
        value: value_symbol(row[0]),
    })?;
    let expected = match input {
        LogicState::A => LogicState::B,
        LogicState::B => LogicState::A,
        LogicState::C => LogicState::C,
        LogicState::D => unreachable!("state folding guarantees the {{A,B,C}} alphabet"),
    };
    let output = folded_value(row[row.len() - 1]);
    Ok(if output == Some(expected) { 1.0 } else { 0.0 })
}

/// Majority: exact four-column rows; a non-resolving value anywhere in
/// the row scores it 0.0 outright rather than excluding it.
fn score_majority(row: &TruthRow) -> Result<f64, ScoreError> {
    if row.len() != 4 {
        return Err(ScoreError::ArityMismatch {
            function: LogicFunction::Majority.name(),
            expected: 4,
            actual: row.len(),
        });
    }
    let folded: Vec<Option<LogicState>> = row.iter().map(|value| folded_value(*value)).collect();
    let [Some(a), Some(b), Some(c), Some(observed)] = folded.as_slice() else {
        return Ok(0.0);
    };
    let expected = majority_output(*a, *b, *c);
    Ok(if *observed == expected { 1.0 } else { 0.0 })
}

/// Memory cell: rows are `[x, w, q]` and the lookup key is `(w, x)`,
/// previous state first. The alphabet is exactly `{A, B, C}` after
/// folding, so undefined values are contract violations here.
fn score_memory_cell(row: &TruthRow) -> Result<f64, ScoreError> {
    if row.len() != 3 {
        return Err(ScoreError::ArityMismatch {
            function: LogicFunction::MemoryCell.name(),
            expected: 3,
            actual: row.len(),
        });
    }
    let mut resolved = Vec::with_capacity(3);
    for value in row {
        resolved.push(folded_value(*value).ok_or_else(|| {
            ScoreError::UnexpectedState {
                function: LogicFunction::MemoryCell.name(),
                value: value_symbol(*value),
            }
        })?);
    }
    let [x, w, q] = resolved.as_slice() else {
        unreachable!("resolved exactly three values above")
    };
    let expected = memory_cell_output(*w, *x);
    Ok(if *q == expected { 1.0 } else { 0.0 })
}

/// Scores a sequence of truth-table rows against a logic function.
///
/// Pure and total over well-formed input; the first malformed row fails
/// the whole call rather than being silently averaged in. An empty row
/// set yields an overall accuracy of `1.0`.
///
/// # Arguments
/// * `rows` - Truth-table rows, already parsed into the symbolic
///   alphabet.
/// * `function` - The logic function the table is expected to realize.
///
/// # Returns
/// * `Ok(AccuracyReport)` with one score per row and their mean.
/// * `Err(ScoreError::ArityMismatch)` if a row has the wrong column
///   count for `function`.
/// * `Err(ScoreError::UnexpectedState)` if a value outside the
///   function's alphabet survives folding.
pub fn score_rows(rows: &[TruthRow], function: LogicFunction) -> Result<AccuracyReport, ScoreError> {
    let mut row_scores = Vec::with_capacity(rows.len());
    for row in rows {
        let score = match function {
            LogicFunction::Wire => score_wire(row)?,
            LogicFunction::Inverter => score_inverter(row)?,
            LogicFunction::Majority => score_majority(row)?,
            LogicFunction::MemoryCell => score_memory_cell(row)?,
        };
        row_scores.push(score);
    }
    let report = AccuracyReport::from_scores(row_scores);
    debug!(
        function = function.name(),
        rows = report.len(),
        overall = report.overall(),
        "scored truth table"
    );
    Ok(report)
}
