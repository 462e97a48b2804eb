// src/analysis/extract.rs

//! Recovers a symbolic truth table from decoded simulation series.
//!
//! Each cell is read out during the hold windows of its driving clock
//! phase: the phase's series is segmented into regions where the clock
//! sits near its maximum, every sample inside a region is classified
//! into a logic state by polarization thresholds, and the region's value
//! is the majority vote provided it clears the value threshold.
//! Cells driven by later phases settle later, so leading regions are
//! dropped from faster phases until the four phases are causally
//! aligned; per-cell clock delays shift a cell's readout further by
//! whole regions.

use crate::analysis::table::TruthTable;
use crate::archive::{ClockSeries, DecodedSimulation};
use crate::core::cell::CellIndex;
use crate::core::constants::{CLOCK_PHASE_COUNT, PHASE_SHIFT_STEP_DEGREES};
use crate::core::error::ExtractError;
use crate::core::state::{LogicState, TruthValue};
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_CLOCK_THRESHOLD: f64 = 0.05;
const DEFAULT_LOGICAL_THRESHOLD: f64 = 0.05;
const DEFAULT_VALUE_THRESHOLD: f64 = 0.8;

/// Thresholds steering the extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// Relative distance below a clock's maximum that still counts as
    /// the hold window, as a fraction of the clock's full swing.
    pub clock_threshold: f64,
    /// Distance from full polarization within which a sample still
    /// reads as a definite logic state.
    pub logical_threshold: f64,
    /// Minimum fraction of a region's samples that must agree for the
    /// region to resolve to a value.
    pub value_threshold: f64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            clock_threshold: DEFAULT_CLOCK_THRESHOLD,
            logical_threshold: DEFAULT_LOGICAL_THRESHOLD,
            value_threshold: DEFAULT_VALUE_THRESHOLD,
        }
    }
}

/// A half-open sample range `[start, end)` where a clock holds high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockRegion {
    start: usize,
    end: usize,
}

impl ClockRegion {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Segments each clock phase into its hold-window regions.
fn clock_regions(
    clock_data: &ClockSeries,
    clock_threshold: f64,
) -> [Vec<ClockRegion>; CLOCK_PHASE_COUNT] {
    std::array::from_fn(|phase| {
        let series = &clock_data[phase];

        let clock_high = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let clock_low = series.iter().cloned().fold(f64::INFINITY, f64::min);
        let high_threshold = clock_high - (clock_high - clock_low) * clock_threshold;

        let mut regions = Vec::new();
        let mut current: Option<ClockRegion> = None;
        for (i, value) in series.iter().enumerate() {
            if *value > high_threshold {
                match current {
                    None => current = Some(ClockRegion { start: i, end: i }),
                    Some(ref mut region) => region.end = i,
                }
            } else if let Some(region) = current.take() {
                regions.push(region);
            }
        }
        if let Some(region) = current {
            regions.push(region);
        }

        regions
    })
}

/// Drops leading regions from phases that start ahead of any later
/// phase, so region `k` of every phase belongs to the same clock cycle.
fn align_clock_regions(regions: &mut [Vec<ClockRegion>; CLOCK_PHASE_COUNT]) {
    for i in (0..CLOCK_PHASE_COUNT).rev() {
        for j in (0..i).rev() {
            let (left, right) = regions.split_at_mut(i);
            let current = &mut right[0];
            let other = &left[j];

            if !current.is_empty() && !other.is_empty() && current[0].start < other[0].start {
                current.remove(0);
            }
        }
    }
}

/// Classifies one sample of a cell's polarization channels.
fn classify_sample(
    channels: &[Vec<f64>],
    sample: usize,
    polarization_high: f64,
    polarization_low: f64,
) -> TruthValue {
    match channels.len() {
        1 => {
            let value = channels[0][sample];
            if value > polarization_high {
                Some(LogicState::A)
            } else if value < polarization_low {
                Some(LogicState::B)
            } else {
                None
            }
        }
        2 => {
            let value_a = channels[0][sample];
            let value_b = channels[1][sample];
            if value_a > polarization_high {
                Some(LogicState::A)
            } else if value_a < polarization_low {
                Some(LogicState::B)
            } else if value_b > polarization_high {
                Some(LogicState::C)
            } else if value_b < polarization_low {
                Some(LogicState::D)
            } else {
                None
            }
        }
        _ => unreachable!("channel count validated before classification"),
    }
}

/// Resolves one clock region of one cell to a logic value by majority
/// vote over the region's samples.
///
/// Vote ties break on `(count, value)` ordering so the result is a pure
/// function of the series. A region whose winning vote falls below the
/// value threshold, or an empty region, yields the undefined marker.
fn region_value(
    channels: &[Vec<f64>],
    region: &ClockRegion,
    settings: &ExtractionSettings,
) -> TruthValue {
    let polarization_high = 1f64 - (2f64 * settings.logical_threshold);
    let polarization_low = -1f64 + (2f64 * settings.logical_threshold);

    let mut votes: HashMap<TruthValue, usize> = HashMap::new();
    for sample in region.start..region.end {
        let value = classify_sample(channels, sample, polarization_high, polarization_low);
        *votes.entry(value).or_insert(0) += 1;
    }

    let winner = votes
        .into_iter()
        .max_by_key(|(value, count)| (*count, *value))?;
    let (value, count) = winner;
    let partial = count as f64 / region.len() as f64;
    if partial >= settings.value_threshold {
        value
    } else {
        None
    }
}

/// Extracts a labelled truth table for `cells` from a decoded
/// simulation.
///
/// Each requested cell must have a recorded series; its clock phase is
/// derived from the cell's `clock_phase_shift` (90° per phase). A
/// per-cell entry in `clock_delays` skips that many leading regions and
/// pads the column's tail with undefined values, keeping every column
/// the same length.
///
/// # Arguments
/// * `decoded` - The decoded archive to analyze.
/// * `cells` - Cells to tabulate, in output column order.
/// * `clock_delays` - Optional per-cell delay in whole clock cycles.
/// * `settings` - Extraction thresholds.
///
/// # Returns
/// * `Ok(TruthTable)` with one column per requested cell.
/// * `Err(ExtractError)` if a cell is unknown, unrecorded, or backed by
///   an architecture with more than two polarization channels.
pub fn extract_truth_table(
    decoded: &DecodedSimulation,
    cells: &[CellIndex],
    clock_delays: &HashMap<CellIndex, usize>,
    settings: &ExtractionSettings,
) -> Result<TruthTable, ExtractError> {
    let mut regions = clock_regions(&decoded.clock_data, settings.clock_threshold);
    align_clock_regions(&mut regions);
    debug!(
        region_counts = ?regions.iter().map(|r| r.len()).collect::<Vec<_>>(),
        "aligned clock regions"
    );

    let entries = cells
        .iter()
        .map(|cell| {
            let stored_position = decoded
                .metadata
                .stored_cells
                .iter()
                .position(|stored| stored == cell)
                .ok_or(ExtractError::MissingCellData { index: *cell })?;
            let channels = &decoded.cell_data[stored_position];
            if channels.is_empty() || channels.len() > 2 {
                let dot_count = decoded
                    .design
                    .architecture_for_layer(cell.layer)
                    .map(|arch| arch.dot_count)
                    .unwrap_or(0);
                return Err(ExtractError::UnsupportedArchitecture { dot_count });
            }

            let design_cell = decoded
                .design
                .cell(*cell)
                .ok_or(ExtractError::UnknownCell { index: *cell })?;
            let clock_index = (design_cell.clock_phase_shift / PHASE_SHIFT_STEP_DEGREES).round()
                as usize
                % CLOCK_PHASE_COUNT;
            let delay = clock_delays.get(cell).copied().unwrap_or(0);

            let values: Vec<TruthValue> = regions[clock_index]
                .iter()
                .skip(delay)
                .map(|region| region_value(channels, region, settings))
                .chain((0..delay).map(|_| None))
                .collect();

            Ok((decoded.design.cell_label(*cell), values))
        })
        .collect::<Result<Vec<_>, ExtractError>>()?;

    Ok(TruthTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_clock(cycles: usize, samples_per_cycle: usize, phase: usize) -> Vec<f64> {
        // High for the second half of each cycle, shifted a quarter
        // cycle per phase.
        let total = cycles * samples_per_cycle;
        let shift = phase * samples_per_cycle / 4;
        (0..total)
            .map(|i| {
                let pos = (i + samples_per_cycle - shift) % samples_per_cycle;
                if pos >= samples_per_cycle / 2 { 0.0 } else { -1.0 }
            })
            .collect()
    }

    #[test]
    fn test_clock_regions_found_per_cycle() {
        let clock_data: ClockSeries = std::array::from_fn(|p| square_clock(3, 40, p));
        let regions = clock_regions(&clock_data, 0.05);
        for phase_regions in &regions {
            assert!(
                phase_regions.len() >= 2,
                "expected repeated hold windows, found {:?}",
                phase_regions
            );
        }
    }

    #[test]
    fn test_align_drops_early_leading_regions() {
        // Phases 1..3 wrap around and open a hold window before phase 0
        // does; those leading windows belong to no complete cycle.
        let mut regions: [Vec<ClockRegion>; 4] = [
            vec![ClockRegion { start: 30, end: 40 }, ClockRegion { start: 70, end: 80 }],
            vec![ClockRegion { start: 0, end: 10 }, ClockRegion { start: 40, end: 50 }],
            vec![ClockRegion { start: 10, end: 20 }, ClockRegion { start: 50, end: 60 }],
            vec![ClockRegion { start: 20, end: 30 }, ClockRegion { start: 60, end: 70 }],
        ];
        align_clock_regions(&mut regions);

        assert_eq!(regions[0].first(), Some(&ClockRegion { start: 30, end: 40 }));
        assert_eq!(regions[1].first(), Some(&ClockRegion { start: 40, end: 50 }));
        assert_eq!(regions[2].first(), Some(&ClockRegion { start: 50, end: 60 }));
        assert_eq!(regions[3].first(), Some(&ClockRegion { start: 60, end: 70 }));
        // No later phase may start before an earlier one once aligned.
        for i in 1..4 {
            for j in 0..i {
                if let (Some(current), Some(other)) = (regions[i].first(), regions[j].first()) {
                    assert!(current.start >= other.start);
                }
            }
        }
    }

    #[test]
    fn test_region_value_unanimous_vote() {
        let channels = vec![vec![1.0; 20]];
        let region = ClockRegion { start: 5, end: 15 };
        let value = region_value(&channels, &region, &ExtractionSettings::default());
        assert_eq!(value, Some(LogicState::A));
    }

    #[test]
    fn test_region_value_below_threshold_is_undefined() {
        // Half the region reads A, half B: nothing clears the 0.8 bar.
        let mut samples = vec![1.0; 10];
        samples.extend(vec![-1.0; 10]);
        let channels = vec![samples];
        let region = ClockRegion { start: 0, end: 20 };
        let value = region_value(&channels, &region, &ExtractionSettings::default());
        assert_eq!(value, None);
    }

    #[test]
    fn test_region_value_second_channel_states() {
        let channels = vec![vec![0.0; 10], vec![-1.0; 10]];
        let region = ClockRegion { start: 0, end: 10 };
        let value = region_value(&channels, &region, &ExtractionSettings::default());
        assert_eq!(value, Some(LogicState::D));
    }

    #[test]
    fn test_empty_region_is_undefined() {
        let channels = vec![vec![1.0; 10]];
        let region = ClockRegion { start: 4, end: 4 };
        let value = region_value(&channels, &region, &ExtractionSettings::default());
        assert_eq!(value, None);
    }
}
