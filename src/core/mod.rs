// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod cell;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qca_analysis::core::TypeName`
pub use cell::CellIndex;
pub use error::{AnalysisError, DecodeError, EncodeError, ExtractError, ScoreError};
pub use state::{LogicState, TruthRow, TruthValue, folded_value, value_symbol};

pub mod constants;
pub use constants::{CLOCK_PHASE_COUNT, DOTS_PER_POLARIZATION};
