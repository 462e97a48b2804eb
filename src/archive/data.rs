// src/archive/data.rs

//! Decodes the raw sample stream of an archive into per-phase clock
//! series and per-cell polarization series.
//!
//! The stream layout is fixed by the archive format: 4 clock-phase
//! channels of `num_samples` little-endian doubles each, channel-major,
//! followed by one block per stored cell (in `stored_cells` order) of
//! `dot_count / 4` sub-channels of `num_samples` doubles each,
//! sub-channel-major. There is no padding anywhere; the stream must end
//! exactly after the last cell block.

use crate::archive::metadata::SimulationMetadata;
use crate::archive::{DESIGN_ENTRY_NAME, METADATA_ENTRY_NAME, SimulationArchive};
use crate::core::constants::{CLOCK_PHASE_COUNT, SAMPLE_BYTES};
use crate::core::error::DecodeError;
use crate::design::QcaDesign;
use byteorder::{LittleEndian, ReadBytesExt};
use tracing::debug;

/// The four clock-phase series, in phase order 0..3.
pub type ClockSeries = [Vec<f64>; CLOCK_PHASE_COUNT];

/// Per-cell polarization series, parallel to `stored_cells`: one entry
/// per cell, each holding one `Vec<f64>` per polarization channel in
/// architecture-declared order.
pub type CellSeries = Vec<Vec<Vec<f64>>>;

/// The fully decoded contents of a simulation archive.
///
/// Constructed once per decode call and owned solely by the caller; the
/// decoder keeps no residual state.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSimulation {
    /// The parsed design document.
    pub design: QcaDesign,
    /// The parsed metadata document.
    pub metadata: SimulationMetadata,
    /// Clock series, phases 0..3.
    pub clock_data: ClockSeries,
    /// Cell series, in `stored_cells` order.
    pub cell_data: CellSeries,
}

/// Reads consecutive little-endian f64 channels off a byte slice.
struct SampleReader<'a> {
    cursor: &'a [u8],
    expected: usize,
    total: usize,
}

impl<'a> SampleReader<'a> {
    fn new(data: &'a [u8], expected: usize) -> Self {
        SampleReader {
            cursor: data,
            expected,
            total: data.len(),
        }
    }

    fn read_channel(&mut self, num_samples: usize) -> Result<Vec<f64>, DecodeError> {
        let mut channel = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let value = self
                .cursor
                .read_f64::<LittleEndian>()
                .map_err(|_| DecodeError::LengthMismatch {
                    expected: self.expected,
                    actual: self.total,
                })?;
            channel.push(value);
        }
        Ok(channel)
    }

    fn remaining(&self) -> usize {
        self.cursor.len()
    }
}

/// Derives the polarization channel count for every stored cell, in
/// declaration order, validating the layer/architecture references and
/// the dot-count invariant along the way.
pub(crate) fn polarization_counts(
    design: &QcaDesign,
    metadata: &SimulationMetadata,
) -> Result<Vec<usize>, DecodeError> {
    metadata
        .stored_cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let layer = design.layers.get(cell.layer).ok_or_else(|| {
                DecodeError::SchemaViolation {
                    member: METADATA_ENTRY_NAME,
                    detail: format!(
                        "stored_cells[{}].layer = {} exceeds the design's {} layer(s)",
                        i,
                        cell.layer,
                        design.layers.len()
                    ),
                }
            })?;
            let arch = design
                .cell_architectures
                .get(&layer.cell_architecture_id)
                .ok_or_else(|| DecodeError::SchemaViolation {
                    member: DESIGN_ENTRY_NAME,
                    detail: format!(
                        "layers[{}].cell_architecture_id = '{}' has no matching architecture",
                        cell.layer, layer.cell_architecture_id
                    ),
                })?;
            arch.polarization_count()
                .ok_or_else(|| DecodeError::SchemaViolation {
                    member: DESIGN_ENTRY_NAME,
                    detail: format!(
                        "cell_architectures['{}'].dot_count = {} is not a positive multiple of 4",
                        layer.cell_architecture_id, arch.dot_count
                    ),
                })
        })
        .collect()
}

/// Decodes an already-extracted archive into structured time series.
///
/// Pure function of the archive's bytes: no global state, no mutation of
/// the input, deterministic, and safe to invoke concurrently across
/// independent archives.
///
/// # Arguments
/// * `archive` - The three raw members of a `.qcs` container.
///
/// # Returns
/// * `Ok(DecodedSimulation)` on success.
/// * `Err(DecodeError::SchemaViolation)` if either JSON member is
///   malformed or internally inconsistent.
/// * `Err(DecodeError::LengthMismatch)` if `DATA.bin` is shorter or
///   longer than the documents imply.
pub fn decode_archive(archive: &SimulationArchive) -> Result<DecodedSimulation, DecodeError> {
    let design: QcaDesign =
        serde_json::from_slice(&archive.design).map_err(|error| DecodeError::SchemaViolation {
            member: DESIGN_ENTRY_NAME,
            detail: error.to_string(),
        })?;
    let metadata: SimulationMetadata =
        serde_json::from_slice(&archive.metadata).map_err(|error| {
            DecodeError::SchemaViolation {
                member: METADATA_ENTRY_NAME,
                detail: error.to_string(),
            }
        })?;

    let num_samples = metadata.num_samples;
    let counts = polarization_counts(&design, &metadata)?;
    let channel_total: usize = CLOCK_PHASE_COUNT + counts.iter().sum::<usize>();
    let expected = SAMPLE_BYTES * channel_total * num_samples;

    if archive.data.len() != expected {
        return Err(DecodeError::LengthMismatch {
            expected,
            actual: archive.data.len(),
        });
    }
    debug!(
        num_samples,
        cells = counts.len(),
        bytes = expected,
        "decoding sample stream"
    );

    let mut reader = SampleReader::new(&archive.data, expected);

    // Clock channels come first, one contiguous run per phase.
    let mut clock_data: ClockSeries = Default::default();
    for channel in clock_data.iter_mut() {
        *channel = reader.read_channel(num_samples)?;
    }

    // Then one block per stored cell, sub-channel-major within the block.
    let mut cell_data: CellSeries = Vec::with_capacity(counts.len());
    for count in &counts {
        let mut channels = Vec::with_capacity(*count);
        for _ in 0..*count {
            channels.push(reader.read_channel(num_samples)?);
        }
        cell_data.push(channels);
    }

    // The length precheck guarantees this, but the cursor position is
    // the authoritative end-of-stream invariant.
    if reader.remaining() != 0 {
        return Err(DecodeError::LengthMismatch {
            expected,
            actual: expected + reader.remaining(),
        });
    }

    Ok(DecodedSimulation {
        design,
        metadata,
        clock_data,
        cell_data,
    })
}
