//! Error handling logic

use crate::core::cell::CellIndex;
use std::fmt;

/// Errors raised while decoding a `.qcs` simulation archive.
///
/// Every variant is fatal to the single decode call that produced it and
/// carries enough context to diagnose producer/consumer skew without
/// re-running the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The container could not be read as a tar stream at all.
    MalformedContainer {
        /// Underlying container-level failure message
        message: String,
    },

    /// One of the three required archive members is absent.
    MissingMember {
        /// Name of the absent member (e.g. `DATA.bin`)
        name: &'static str,
    },

    /// A JSON member is present but does not match the expected schema.
    SchemaViolation {
        /// Archive member the violation was found in
        member: &'static str,
        /// Field path or parser detail locating the violation
        detail: String,
    },

    /// The binary sample stream disagrees with the schema-implied length.
    LengthMismatch {
        /// Byte count implied by the design and metadata
        expected: usize,
        /// Byte count actually present in `DATA.bin`
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedContainer { message } => {
                write!(f, "Malformed archive container: {}", message)
            }
            DecodeError::MissingMember { name } => {
                write!(f, "Archive is missing required member '{}'", name)
            }
            DecodeError::SchemaViolation { member, detail } => {
                write!(f, "Schema violation in '{}': {}", member, detail)
            }
            DecodeError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Sample stream length mismatch: expected {} bytes, found {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors raised while encoding a simulation into a `.qcs` archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A series does not have the shape declared by the metadata.
    SeriesShapeMismatch {
        /// Which series failed the shape check
        series: String,
        /// Expected number of samples per channel
        expected: usize,
        /// Actual number of samples found
        actual: usize,
    },

    /// The design and metadata documents disagree with each other, so no
    /// well-formed stream layout can be derived.
    InconsistentDocuments {
        /// What failed to line up
        detail: String,
    },

    /// A JSON member could not be serialized.
    Serialization {
        /// Serializer failure message
        message: String,
    },

    /// The tar container could not be assembled.
    Container {
        /// Container-level failure message
        message: String,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::SeriesShapeMismatch {
                series,
                expected,
                actual,
            } => write!(
                f,
                "Series '{}' has {} samples, metadata declares {}",
                series, actual, expected
            ),
            EncodeError::InconsistentDocuments { detail } => {
                write!(f, "Inconsistent design/metadata documents: {}", detail)
            }
            EncodeError::Serialization { message } => {
                write!(f, "Serialization failure: {}", message)
            }
            EncodeError::Container { message } => {
                write!(f, "Container assembly failure: {}", message)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Errors raised while scoring truth-table rows against a logic function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// A row has the wrong column count for the selected logic function.
    ArityMismatch {
        /// Human-readable name of the logic function being scored
        function: &'static str,
        /// Column count the function requires
        expected: usize,
        /// Column count the offending row has
        actual: usize,
    },

    /// A value outside the function's valid alphabet was encountered
    /// after folding.
    UnexpectedState {
        /// Human-readable name of the logic function being scored
        function: &'static str,
        /// Rendering of the offending value
        value: String,
    },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::ArityMismatch {
                function,
                expected,
                actual,
            } => write!(
                f,
                "Arity mismatch for {}: expected {} columns, row has {}",
                function, expected, actual
            ),
            ScoreError::UnexpectedState { function, value } => {
                write!(f, "Unexpected state '{}' for {}", value, function)
            }
        }
    }
}

impl std::error::Error for ScoreError {}

/// Errors raised while extracting a truth table from decoded series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The cell's architecture stores an unsupported number of
    /// polarization channels.
    UnsupportedArchitecture {
        /// Dot count declared by the offending architecture
        dot_count: u8,
    },

    /// A requested cell has no recorded series in the decoded data.
    MissingCellData {
        /// Index of the cell without data
        index: CellIndex,
    },

    /// A requested cell does not exist in the design.
    UnknownCell {
        /// Index that fell outside the design's layers/cells
        index: CellIndex,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::UnsupportedArchitecture { dot_count } => {
                write!(
                    f,
                    "Unsupported cell architecture with {} dots for logic extraction",
                    dot_count
                )
            }
            ExtractError::MissingCellData { index } => {
                write!(f, "No recorded series for cell {}", index)
            }
            ExtractError::UnknownCell { index } => {
                write!(f, "Cell {} does not exist in the design", index)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Umbrella error for end-to-end analysis pipelines (decode, then
/// extract, then score). Each stage's error converts into this via
/// `From`, so pipeline code can use `?` throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Archive decoding failed
    Decode(DecodeError),
    /// Truth-table extraction failed
    Extract(ExtractError),
    /// Truth-table scoring failed
    Score(ScoreError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Decode(e) => write!(f, "{}", e),
            AnalysisError::Extract(e) => write!(f, "{}", e),
            AnalysisError::Score(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<DecodeError> for AnalysisError {
    fn from(e: DecodeError) -> Self {
        AnalysisError::Decode(e)
    }
}

impl From<ExtractError> for AnalysisError {
    fn from(e: ExtractError) -> Self {
        AnalysisError::Extract(e)
    }
}

impl From<ScoreError> for AnalysisError {
    fn from(e: ScoreError) -> Self {
        AnalysisError::Score(e)
    }
}
