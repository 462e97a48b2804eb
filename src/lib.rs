// src/lib.rs

//! `qca-analysis` - decoding and accuracy analysis for QCA simulation
//! results
//!
//! This library reads the `.qcs` archives an external quantum-cellular-
//! automata simulator produces (a tar container holding a design
//! document, run metadata, and a raw sample stream), reconstructs the
//! recorded clock and polarization time series, extracts symbolic truth
//! tables from them, and scores those tables against canonical logic
//! functions (wire, inverter, majority voter, memory cell).
//!
//! Decoding and scoring are pure, synchronous functions of their inputs;
//! the `batch` module fans them out across many archives in parallel.
//! File discovery, CSV export, and plotting are left to callers.
//!
//! ```
//! use qca_analysis::{LogicFunction, parse_truth_table, score_rows};
//!
//! // Tabular output of a truth-table extraction run: header line,
//! // tab-separated fields, trailing tab per row.
//! let text = "IN\tOUT\t\nB\tA\t\nA\tB\t\nC\tC\t";
//!
//! let rows = parse_truth_table(text).expect("well-formed table");
//! let report = score_rows(&rows, LogicFunction::Inverter).expect("valid alphabet");
//! assert_eq!(report.overall(), 1.0);
//! ```

pub mod analysis;
pub mod archive;
pub mod batch;
pub mod core;
pub mod design;

// Re-export the most common types for easier top-level use
pub use crate::analysis::{
    AccuracyReport, ExtractionSettings, LogicFunction, TimingSummary, TruthTable,
    extract_truth_table, parse_truth_table, score_rows, score_table_text, summarize_timings,
};
pub use crate::archive::{
    DecodedSimulation, SimDuration, SimulationArchive, SimulationMetadata, decode, encode_archive,
};
pub use crate::batch::{analyze_archive, analyze_many, decode_many};
pub use crate::core::{
    AnalysisError, CellIndex, DecodeError, EncodeError, ExtractError, LogicState, ScoreError,
    TruthRow, TruthValue,
};
pub use crate::design::{Cell, CellArchitecture, CellKind, DesignFile, Layer, QcaDesign};
