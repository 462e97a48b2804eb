// src/core/cell.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Addresses a single cell within a design as a `(layer, cell)` pair.
///
/// The layer index selects an entry in the design's ordered layer list;
/// the cell index selects a cell within that layer. Both are positional,
/// so an index is only meaningful relative to the design it was taken
/// from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellIndex {
    /// Index into the design's layer list.
    pub layer: usize,
    /// Index into the layer's cell list.
    pub cell: usize,
}

impl CellIndex {
    /// Creates a new cell index.
    pub fn new(layer: usize, cell: usize) -> Self {
        CellIndex { layer, cell }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.layer, self.cell)
    }
}

impl FromStr for CellIndex {
    type Err = String;

    /// Parses the `Display` form, with or without the surrounding
    /// parentheses (`"0,3"` and `"(0,3)"` are both accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').collect();
        let [layer_str, cell_str] = parts.as_slice() else {
            return Err(format!("'{}' is not a '<layer>,<cell>' pair", s));
        };
        let layer = layer_str
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a valid layer index", layer_str))?;
        let cell = cell_str
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a valid cell index", cell_str))?;
        Ok(CellIndex { layer, cell })
    }
}
