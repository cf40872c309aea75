//! Error taxonomy surfaced by the extraction engine.
use crate::types::Axis;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    /// The layout resolver could not produce six content spans on an axis,
    /// even from template proportions.
    #[error("grid geometry detection failed on {axis}: {reason}")]
    GeometryDetectionFailure { axis: Axis, reason: String },

    /// A resolved cell rectangle came out empty.
    #[error("cell {cell} has invalid dimensions {width}x{height}")]
    InvalidCellDimensions {
        cell: usize,
        width: i64,
        height: i64,
    },

    /// Sheet recomposition got sprites that do not tile a 6x6 grid.
    #[error("cannot compose sprite sheet: {0}")]
    ComposeMismatch(String),

    #[error("expected {expected} sprite labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error("invalid extraction config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
