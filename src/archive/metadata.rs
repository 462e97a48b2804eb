// src/archive/metadata.rs

//! The metadata member of a simulation archive: run provenance, sample
//! count, wall-clock duration, and the ordered list of recorded cells.

use crate::core::cell::CellIndex;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

fn default_version() -> String {
    "unknown".to_string()
}

/// Simulation wall-clock duration, stored as whole seconds plus a
/// nanosecond remainder. Serializes as the two-element array the
/// external format uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimDuration(pub i64, pub u32);

impl SimDuration {
    /// Whole-second component.
    pub fn secs(&self) -> i64 {
        self.0
    }

    /// Nanosecond remainder.
    pub fn subsec_nanos(&self) -> u32 {
        self.1
    }

    /// Duration in seconds as a floating-point value.
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 + self.1 as f64 / 1e9
    }
}

impl From<Duration> for SimDuration {
    fn from(d: Duration) -> Self {
        SimDuration(d.as_secs() as i64, d.subsec_nanos())
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// The parsed `METADATA.json` member.
///
/// `num_samples` fixes the length of every channel in the sample stream;
/// `stored_cells` fixes the order and identity of the per-cell blocks
/// that follow the clock channels. Field names are part of the archive
/// format contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationMetadata {
    /// Version string of the simulator that produced the archive.
    #[serde(default = "default_version")]
    pub qca_core_version: String,

    /// Local wall-clock time the simulation started.
    pub start_time: DateTime<Local>,

    /// Wall-clock duration of the simulation run.
    pub duration: SimDuration,

    /// Length of every time series in the archive.
    pub num_samples: usize,

    /// Cells whose polarization series were recorded, in stream order.
    #[serde(default)]
    pub stored_cells: Vec<CellIndex>,
}
