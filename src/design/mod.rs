// src/design/mod.rs

//! The design document model: layers of cells, each layer referencing a
//! cell architecture that fixes how many charge dots (and therefore how
//! many polarization channels) its cells carry.
//!
//! Field names in this module are a compatibility contract with the
//! external simulator's JSON output and must not be renamed.

pub mod sweep;

use crate::core::cell::CellIndex;
use crate::core::constants::DOTS_PER_POLARIZATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::HashMap;
use std::f64::consts::PI;

/// File extension used by standalone design documents.
pub const DESIGN_FILE_EXTENSION: &str = "qcd";

fn default_version() -> String {
    "unknown".to_string()
}

/// The role a cell plays in the simulated circuit.
#[derive(Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum CellKind {
    /// Ordinary propagating cell.
    Normal,
    /// Externally driven excitation cell.
    Input,
    /// Cell whose settled value is the circuit's output.
    Output,
    /// Cell pinned to a constant polarization.
    Fixed,
}

/// A physical layout template for cells: dot count, geometry, and the
/// tunnel junctions between neighbouring dots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CellArchitecture {
    /// Optional human-readable architecture name.
    #[serde(default)]
    pub name: Option<String>,
    /// Cell side length in nanometers.
    pub side_length: f64,
    /// Diameter of a single charge dot in nanometers.
    pub dot_diameter: f64,
    /// Number of charge dots per cell. Must be a positive multiple of 4.
    pub dot_count: u8,
    /// Dot centre positions relative to the cell centre.
    pub dot_positions: Vec<[f64; 2]>,
    /// Tunnel junction pairs `(from, to)` between dot indices.
    pub dot_tunnels: Vec<(u8, u8)>,
}

impl CellArchitecture {
    /// Builds an architecture with `dot_count` dots evenly spaced on a
    /// ring of radius `dot_radius`, each dot tunnel-coupled to its ring
    /// neighbours.
    pub fn new(side_length: f64, dot_diameter: f64, dot_count: u8, dot_radius: f64) -> Self {
        CellArchitecture {
            name: None,
            side_length,
            dot_diameter,
            dot_count,
            dot_positions: (0..dot_count)
                .map(|i| {
                    let angle = (2.0 * PI / dot_count as f64) * i as f64;
                    [angle.cos() * dot_radius, angle.sin() * dot_radius]
                })
                .collect(),
            dot_tunnels: (0..dot_count)
                .map(|i| {
                    (
                        (i as i16 - 1).rem_euclid(dot_count as i16) as u8,
                        (i as i16 + 1).rem_euclid(dot_count as i16) as u8,
                    )
                })
                .collect(),
        }
    }

    /// Number of polarization channels recorded for cells of this
    /// architecture, one per group of 4 dots.
    ///
    /// Returns `None` when the dot count is zero or not a multiple of 4,
    /// which violates the format invariant.
    pub fn polarization_count(&self) -> Option<usize> {
        if self.dot_count == 0 || self.dot_count % DOTS_PER_POLARIZATION != 0 {
            None
        } else {
            Some((self.dot_count / DOTS_PER_POLARIZATION) as usize)
        }
    }
}

/// A single cell placed within a layer.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Cell {
    /// Cell centre position in nanometers.
    pub position: [f64; 2],
    /// In-plane rotation in degrees.
    pub rotation: f64,
    /// Role of the cell in the circuit.
    pub typ: CellKind,
    /// Phase shift of the driving clock in degrees; divides by 90° to
    /// select one of the four clock phases.
    pub clock_phase_shift: f64,
    /// Initial charge distribution over the architecture's dots.
    pub dot_probability_distribution: Vec<f64>,
    /// Optional user-facing label, preferred over the positional index
    /// when naming truth-table columns.
    #[serde(default)]
    pub label: Option<String>,
}

/// An ordered layer of cells sharing one cell architecture.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name.
    pub name: String,
    /// Key into the design's architecture map.
    pub cell_architecture_id: String,
    /// Cells placed on this layer.
    pub cells: Vec<Cell>,
    /// Layer elevation in nanometers.
    pub z_position: f64,
}

impl Layer {
    /// Creates an empty layer bound to an architecture.
    pub fn new(name: String, cell_architecture_id: String, z_position: f64) -> Self {
        Layer {
            name,
            cell_architecture_id,
            cells: Vec::new(),
            z_position,
        }
    }
}

/// The full physical design embedded in archives and `.qcd` files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QcaDesign {
    /// Version string of the tool that produced the document.
    #[serde(default = "default_version")]
    pub qca_core_version: String,

    /// Ordered cell layers.
    #[serde(default)]
    pub layers: Vec<Layer>,

    /// Opaque per-model simulation settings, keyed by model id.
    #[serde(default)]
    pub simulation_model_settings: HashMap<String, Value>,

    /// Which entry of `simulation_model_settings` the simulation used.
    #[serde(default)]
    pub selected_simulation_model_id: Option<String>,

    /// Cell architectures referenced by the layers.
    #[serde(default)]
    pub cell_architectures: HashMap<String, CellArchitecture>,
}

impl QcaDesign {
    /// Looks up the architecture backing the given layer.
    pub fn architecture_for_layer(&self, layer: usize) -> Option<&CellArchitecture> {
        let layer = self.layers.get(layer)?;
        self.cell_architectures.get(&layer.cell_architecture_id)
    }

    /// Looks up a cell by index.
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.layers.get(index.layer)?.cells.get(index.cell)
    }

    /// Returns the display label for a cell: its user-facing label when
    /// present, its positional index otherwise.
    pub fn cell_label(&self, index: CellIndex) -> String {
        match self.cell(index).and_then(|cell| cell.label.as_ref()) {
            Some(label) => label.clone(),
            None => index.to_string(),
        }
    }
}

/// The standalone `.qcd` document: the design under a `design` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DesignFile {
    /// The wrapped design.
    pub design: QcaDesign,
}
