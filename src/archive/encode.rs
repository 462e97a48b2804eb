// src/archive/encode.rs

//! Builds `.qcs` archives from a design, metadata, and decoded-form
//! series. The writer is the exact inverse of the decoder: pretty JSON
//! documents, raw little-endian doubles in channel order, deterministic
//! tar headers so identical inputs produce identical archives.

use crate::archive::data::{ClockSeries, polarization_counts};
use crate::archive::metadata::SimulationMetadata;
use crate::archive::{DATA_ENTRY_NAME, DESIGN_ENTRY_NAME, METADATA_ENTRY_NAME};
use crate::core::constants::SAMPLE_BYTES;
use crate::core::error::EncodeError;
use crate::design::QcaDesign;
use byteorder::{LittleEndian, WriteBytesExt};
use tar::{Builder, Header, HeaderMode};

fn check_channel(
    series: String,
    channel: &[f64],
    num_samples: usize,
) -> Result<(), EncodeError> {
    if channel.len() != num_samples {
        return Err(EncodeError::SeriesShapeMismatch {
            series,
            expected: num_samples,
            actual: channel.len(),
        });
    }
    Ok(())
}

fn sample_stream(
    clock_data: &ClockSeries,
    cell_data: &[Vec<Vec<f64>>],
    counts: &[usize],
    num_samples: usize,
) -> Result<Vec<u8>, EncodeError> {
    let channel_total = clock_data.len() + counts.iter().sum::<usize>();
    let mut output = Vec::with_capacity(SAMPLE_BYTES * channel_total * num_samples);

    for (phase, channel) in clock_data.iter().enumerate() {
        check_channel(format!("clock[{}]", phase), channel, num_samples)?;
        for value in channel {
            output
                .write_f64::<LittleEndian>(*value)
                .map_err(|error| EncodeError::Serialization {
                    message: error.to_string(),
                })?;
        }
    }

    for (i, (channels, count)) in cell_data.iter().zip(counts).enumerate() {
        if channels.len() != *count {
            return Err(EncodeError::SeriesShapeMismatch {
                series: format!("cell[{}] channels", i),
                expected: *count,
                actual: channels.len(),
            });
        }
        for (p, channel) in channels.iter().enumerate() {
            check_channel(format!("cell[{}][{}]", i, p), channel, num_samples)?;
            for value in channel {
                output
                    .write_f64::<LittleEndian>(*value)
                    .map_err(|error| EncodeError::Serialization {
                        message: error.to_string(),
                    })?;
            }
        }
    }

    Ok(output)
}

fn append_member(
    builder: &mut Builder<Vec<u8>>,
    entry_name: &str,
    data: Vec<u8>,
) -> Result<(), EncodeError> {
    let mut header = Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();

    builder
        .append_data(&mut header, entry_name, data.as_slice())
        .map_err(|error| EncodeError::Container {
            message: error.to_string(),
        })
}

/// Serializes a simulation into a `.qcs` archive byte stream.
///
/// Series shapes are validated against the metadata and design before
/// anything is written: every channel must hold exactly
/// `metadata.num_samples` values, there must be one cell block per
/// `stored_cells` entry, and each block must carry its architecture's
/// polarization channel count.
///
/// # Arguments
/// * `design` - The design document to embed.
/// * `metadata` - The metadata document; fixes `num_samples` and the
///   stored-cell order.
/// * `clock_data` - The four clock-phase series.
/// * `cell_data` - Per-cell polarization series in `stored_cells` order.
///
/// # Returns
/// * `Ok(Vec<u8>)` - the complete archive, decodable by the archive
///   decoder back into value-identical series.
/// * `Err(EncodeError)` on shape violations or serialization failures.
pub fn encode_archive(
    design: &QcaDesign,
    metadata: &SimulationMetadata,
    clock_data: &ClockSeries,
    cell_data: &[Vec<Vec<f64>>],
) -> Result<Vec<u8>, EncodeError> {
    let counts = polarization_counts(design, metadata).map_err(|error| {
        EncodeError::InconsistentDocuments {
            detail: error.to_string(),
        }
    })?;
    if cell_data.len() != metadata.stored_cells.len() {
        return Err(EncodeError::SeriesShapeMismatch {
            series: "cells".to_string(),
            expected: metadata.stored_cells.len(),
            actual: cell_data.len(),
        });
    }

    let design_raw =
        serde_json::to_vec_pretty(design).map_err(|error| EncodeError::Serialization {
            message: error.to_string(),
        })?;
    let metadata_raw =
        serde_json::to_vec_pretty(metadata).map_err(|error| EncodeError::Serialization {
            message: error.to_string(),
        })?;
    let data_raw = sample_stream(clock_data, cell_data, &counts, metadata.num_samples)?;

    let mut builder = Builder::new(Vec::new());
    builder.mode(HeaderMode::Deterministic);

    append_member(&mut builder, DESIGN_ENTRY_NAME, design_raw)?;
    append_member(&mut builder, METADATA_ENTRY_NAME, metadata_raw)?;
    append_member(&mut builder, DATA_ENTRY_NAME, data_raw)?;

    builder.into_inner().map_err(|error| EncodeError::Container {
        message: error.to_string(),
    })
}
