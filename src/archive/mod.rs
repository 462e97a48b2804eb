// src/archive/mod.rs

//! Reading and writing `.qcs` simulation-result archives.
//!
//! An archive is a tar container holding exactly three named members: a
//! design document, a metadata document, and a raw binary sample stream.
//! This module extracts the members ([`SimulationArchive`]) and decodes
//! them into structured time series ([`DecodedSimulation`]); the
//! `encode` submodule provides the inverse for producing archives.

mod data;
pub mod encode;
pub mod metadata;

pub use data::{CellSeries, ClockSeries, DecodedSimulation, decode_archive};
pub use encode::encode_archive;
pub use metadata::{SimDuration, SimulationMetadata};

use crate::core::error::DecodeError;
use std::io::Read;
use tracing::debug;

/// File extension used by simulation-result archives.
pub const SIMULATION_FILE_EXTENSION: &str = "qcs";

/// Archive member holding the design document.
pub const DESIGN_ENTRY_NAME: &str = "DESIGN.json";
/// Archive member holding the simulation metadata document.
pub const METADATA_ENTRY_NAME: &str = "METADATA.json";
/// Archive member holding the raw sample stream.
pub const DATA_ENTRY_NAME: &str = "DATA.bin";

/// The three raw members extracted from a `.qcs` container, before any
/// parsing. All three must be present; a container missing any member is
/// rejected as a whole rather than decoded partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationArchive {
    /// Raw bytes of `DESIGN.json`.
    pub design: Vec<u8>,
    /// Raw bytes of `METADATA.json`.
    pub metadata: Vec<u8>,
    /// Raw bytes of `DATA.bin`.
    pub data: Vec<u8>,
}

impl SimulationArchive {
    /// Extracts the three required members from a tar byte stream.
    ///
    /// Member lookup is by exact name match; unrelated members are
    /// ignored. Missing members yield `DecodeError::MissingMember`, an
    /// unreadable container `DecodeError::MalformedContainer`.
    pub fn read(bytes: &[u8]) -> Result<SimulationArchive, DecodeError> {
        let mut container = tar::Archive::new(bytes);

        let mut design: Option<Vec<u8>> = None;
        let mut metadata: Option<Vec<u8>> = None;
        let mut data: Option<Vec<u8>> = None;

        let entries = container
            .entries()
            .map_err(|error| DecodeError::MalformedContainer {
                message: error.to_string(),
            })?;

        for entry in entries {
            let mut entry = entry.map_err(|error| DecodeError::MalformedContainer {
                message: error.to_string(),
            })?;
            let name = match entry.path() {
                Ok(path) => path.to_string_lossy().into_owned(),
                Err(error) => {
                    return Err(DecodeError::MalformedContainer {
                        message: error.to_string(),
                    });
                }
            };

            let slot = match name.as_str() {
                DESIGN_ENTRY_NAME => &mut design,
                METADATA_ENTRY_NAME => &mut metadata,
                DATA_ENTRY_NAME => &mut data,
                _ => continue,
            };

            let mut content = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut content)
                .map_err(|error| DecodeError::MalformedContainer {
                    message: error.to_string(),
                })?;
            debug!(member = name.as_str(), bytes = content.len(), "extracted archive member");
            *slot = Some(content);
        }

        Ok(SimulationArchive {
            design: design.ok_or(DecodeError::MissingMember {
                name: DESIGN_ENTRY_NAME,
            })?,
            metadata: metadata.ok_or(DecodeError::MissingMember {
                name: METADATA_ENTRY_NAME,
            })?,
            data: data.ok_or(DecodeError::MissingMember {
                name: DATA_ENTRY_NAME,
            })?,
        })
    }
}

/// Decodes a complete `.qcs` byte stream into structured time series.
///
/// This is the composition of [`SimulationArchive::read`] and
/// [`decode_archive`]: container extraction, JSON parsing of the two
/// documents, and cursor-streamed decoding of the sample data. It is a
/// pure function of `bytes` and may be called concurrently over
/// independent archives.
///
/// # Arguments
/// * `bytes` - The raw contents of a `.qcs` file.
///
/// # Returns
/// * `Ok(DecodedSimulation)` with clock and cell series in declaration
///   order.
/// * `Err(DecodeError)` if any member is missing, either JSON document
///   violates the schema, or the sample stream length disagrees with
///   the schema-implied length.
pub fn decode(bytes: &[u8]) -> Result<DecodedSimulation, DecodeError> {
    let archive = SimulationArchive::read(bytes)?;
    decode_archive(&archive)
}
