// src/design/sweep.rs

//! Pure transforms for design-space sweeps.
//!
//! Parameter sweeps vary one geometric quantity at a time across copies
//! of a base design (intercell spacing, dot-ring radius) so a batch of
//! simulations can map accuracy over the design space. Every transform
//! returns a new document and leaves its input untouched.

use super::{CellArchitecture, QcaDesign};

/// Returns a copy of `design` with every cell position rescaled so that
/// cells whose edges originally touched sit `spacing` nanometers apart.
///
/// Positions are assumed to lie on a grid pitched at `side_length`; the
/// rescale factor is `(side_length + spacing) / side_length`, applied
/// uniformly to every coordinate on every layer.
pub fn with_intercell_spacing(design: &QcaDesign, side_length: f64, spacing: f64) -> QcaDesign {
    let factor = (side_length + spacing) / side_length;
    let mut result = design.clone();
    for layer in &mut result.layers {
        for cell in &mut layer.cells {
            cell.position = [cell.position[0] * factor, cell.position[1] * factor];
        }
    }
    result
}

/// Returns a copy of `arch` with its dot ring rescaled to `radius`,
/// preserving each dot's angular position.
///
/// Dots at the exact cell centre are left in place; there is no angle to
/// preserve for them.
pub fn with_dot_radius(arch: &CellArchitecture, radius: f64) -> CellArchitecture {
    let mut result = arch.clone();
    for pos in &mut result.dot_positions {
        let current = (pos[0] * pos[0] + pos[1] * pos[1]).sqrt();
        if current > 0.0 {
            let scale = radius / current;
            *pos = [pos[0] * scale, pos[1] * scale];
        }
    }
    result
}

/// Current dot-ring radius of an architecture, taken from its first dot.
///
/// Returns `None` for architectures without dots.
pub fn dot_radius(arch: &CellArchitecture) -> Option<f64> {
    arch.dot_positions
        .first()
        .map(|pos| (pos[0] * pos[0] + pos[1] * pos[1]).sqrt())
}
