// src/analysis/table.rs

//! The tabular truth-table representation and its text format.
//!
//! A table holds one labelled column per analyzed cell; each column is
//! the sequence of logic values that cell settled on, one per clock
//! cycle. The text rendering is a header line of labels followed by
//! tab-separated value rows, every field (including the last) terminated
//! by a tab, with `NaN` marking values that never resolved. Parsing
//! therefore drops the header line and each row's final empty token.

use crate::analysis::function::LogicFunction;
use crate::analysis::score::{AccuracyReport, score_rows};
use crate::core::error::ScoreError;
use crate::core::state::{LogicState, TruthRow, TruthValue, value_symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A labelled, column-major truth table extracted from a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthTable {
    /// One `(label, values)` entry per analyzed cell, in analysis order.
    pub entries: Vec<(String, Vec<TruthValue>)>,
}

impl TruthTable {
    /// Number of rows the table spans: the longest column's length.
    pub fn cycle_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0)
    }

    /// Transposes the columns into scoreable rows. Columns shorter than
    /// the longest are padded with the undefined marker, matching the
    /// text rendering.
    pub fn rows(&self) -> Vec<TruthRow> {
        (0..self.cycle_count())
            .map(|i| {
                self.entries
                    .iter()
                    .map(|(_, values)| values.get(i).copied().flatten())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, _) in &self.entries {
            f.write_str(label)?;
            f.write_str("\t")?;
        }
        for i in 0..self.cycle_count() {
            f.write_str("\n")?;
            for (_, values) in &self.entries {
                let value = values.get(i).copied().flatten();
                f.write_str(&value_symbol(value))?;
                f.write_str("\t")?;
            }
        }
        Ok(())
    }
}

/// Decodes one tab-delimited field into the canonical symbolic alphabet.
///
/// Both encodings the tooling ecosystem produces are accepted: symbolic
/// tokens `A`–`D`, and integer codes `0`/`1`/`2` with `-1` as the
/// undefined sentinel. Integer decoding happens only here, at the text
/// boundary; everything downstream works on the symbolic alphabet.
pub fn parse_state_token(token: &str) -> Result<TruthValue, ScoreError> {
    match token.trim() {
        "A" | "0" => Ok(Some(LogicState::A)),
        "B" | "1" => Ok(Some(LogicState::B)),
        "C" | "2" => Ok(Some(LogicState::C)),
        "D" => Ok(Some(LogicState::D)),
        "NaN" | "-1" => Ok(None),
        other => Err(ScoreError::UnexpectedState {
            function: "truth-table",
            value: other.to_string(),
        }),
    }
}

/// Parses the truth-table text format into rows.
///
/// The first line is the header and is discarded; each remaining
/// non-empty line is split on tabs and its final token (the artifact of
/// the trailing delimiter) is dropped before field decoding.
///
/// # Arguments
/// * `text` - The raw tabular output of a truth-table extraction run.
///
/// # Returns
/// * `Ok(Vec<TruthRow>)` ready for [`score_rows`](crate::analysis::score_rows).
/// * `Err(ScoreError::UnexpectedState)` on a token outside both
///   accepted encodings.
pub fn parse_truth_table(text: &str) -> Result<Vec<TruthRow>, ScoreError> {
    let mut rows = Vec::new();
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split('\t').collect();
        let row = tokens[..tokens.len() - 1]
            .iter()
            .map(|token| parse_state_token(token))
            .collect::<Result<TruthRow, ScoreError>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parses truth-table text and scores it in one step.
pub fn score_table_text(
    text: &str,
    function: LogicFunction,
) -> Result<AccuracyReport, ScoreError> {
    let rows = parse_truth_table(text)?;
    score_rows(&rows, function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicState::{A, B, C};

    fn sample_table() -> TruthTable {
        TruthTable {
            entries: vec![
                ("IN".to_string(), vec![Some(A), Some(B), None]),
                ("OUT".to_string(), vec![Some(A), Some(C)]),
            ],
        }
    }

    #[test]
    fn test_display_format() {
        let rendered = sample_table().to_string();
        assert_eq!(rendered, "IN\tOUT\t\nA\tA\t\nB\tC\t\nNaN\tNaN\t");
    }

    #[test]
    fn test_rows_transpose_and_pad() {
        let rows = sample_table().rows();
        assert_eq!(
            rows,
            vec![
                vec![Some(A), Some(A)],
                vec![Some(B), Some(C)],
                vec![None, None],
            ]
        );
    }

    #[test]
    fn test_render_parse_round_trip() {
        let table = sample_table();
        let parsed = parse_truth_table(&table.to_string()).unwrap();
        assert_eq!(parsed, table.rows());
    }

    #[test]
    fn test_parse_symbolic_and_integer_tokens() {
        let text = "IN\tOUT\t\nA\t0\t\nD\t-1\t\n2\tNaN\t";
        let rows = parse_truth_table(text).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Some(A), Some(A)],
                vec![Some(LogicState::D), None],
                vec![Some(C), None],
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        let result = parse_truth_table("H\t\nQ\t");
        assert!(matches!(result, Err(ScoreError::UnexpectedState { .. })));
    }

    #[test]
    fn test_parse_empty_table_has_no_rows() {
        assert!(parse_truth_table("IN\tOUT\t").unwrap().is_empty());
        assert!(parse_truth_table("").unwrap().is_empty());
    }
}
