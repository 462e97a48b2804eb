// src/batch/mod.rs

//! Embarrassingly parallel helpers over many independent inputs.
//!
//! Decoding and scoring are pure functions, so batches fan out with no
//! coordination: each input is processed on its own and yields its own
//! `Result`, and one corrupt archive never aborts the rest of the batch.
//! File discovery and I/O stay with the caller; everything here operates
//! on in-memory bytes.

use crate::analysis::extract::{ExtractionSettings, extract_truth_table};
use crate::analysis::function::LogicFunction;
use crate::analysis::score::{AccuracyReport, score_rows};
use crate::archive::{DecodedSimulation, decode};
use crate::core::cell::CellIndex;
use crate::core::error::{AnalysisError, DecodeError};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::info;

/// Decodes many archives in parallel, one `Result` per input.
pub fn decode_many<B>(archives: &[B]) -> Vec<Result<DecodedSimulation, DecodeError>>
where
    B: AsRef<[u8]> + Sync,
{
    archives
        .par_iter()
        .map(|bytes| decode(bytes.as_ref()))
        .collect()
}

/// Runs the full pipeline on one archive: decode, extract a truth table
/// over all stored cells (in stored order), and score it against
/// `function`.
///
/// # Arguments
/// * `bytes` - Raw `.qcs` contents.
/// * `function` - Logic function to score against.
/// * `clock_delays` - Per-cell clock delays for the extraction pass.
/// * `settings` - Extraction thresholds.
///
/// # Returns
/// * `Ok(AccuracyReport)` for the archive.
/// * `Err(AnalysisError)` wrapping whichever stage failed.
pub fn analyze_archive(
    bytes: &[u8],
    function: LogicFunction,
    clock_delays: &HashMap<CellIndex, usize>,
    settings: &ExtractionSettings,
) -> Result<AccuracyReport, AnalysisError> {
    let decoded = decode(bytes)?;
    let cells = decoded.metadata.stored_cells.clone();
    let table = extract_truth_table(&decoded, &cells, clock_delays, settings)?;
    let report = score_rows(&table.rows(), function)?;
    Ok(report)
}

/// Runs [`analyze_archive`] over many archives in parallel.
///
/// Results are positionally parallel to the input slice; failures stay
/// local to their input.
pub fn analyze_many<B>(
    archives: &[B],
    function: LogicFunction,
    clock_delays: &HashMap<CellIndex, usize>,
    settings: &ExtractionSettings,
) -> Vec<Result<AccuracyReport, AnalysisError>>
where
    B: AsRef<[u8]> + Sync,
{
    let results: Vec<_> = archives
        .par_iter()
        .map(|bytes| analyze_archive(bytes.as_ref(), function, clock_delays, settings))
        .collect();
    let failures = results.iter().filter(|result| result.is_err()).count();
    info!(
        total = results.len(),
        failures,
        function = function.name(),
        "analyzed archive batch"
    );
    results
}
