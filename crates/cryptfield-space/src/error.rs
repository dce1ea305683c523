//! Error types for grid construction and aggregation.

use std::fmt;

/// Errors arising from grid construction or aggregation setup.
///
/// These are configuration mistakes, reported at the point of
/// construction. Reads and writes on a built grid never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension exceeds the maximum supported size.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// Aggregation cell size is zero.
    InvalidCellSize {
        /// The rejected cell size.
        cell_size: u32,
    },
    /// Grid dimensions are not exact multiples of the aggregation cell size.
    IndivisibleDimensions {
        /// Fine grid width.
        width: u32,
        /// Fine grid height.
        height: u32,
        /// Requested aggregation cell size.
        cell_size: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::InvalidCellSize { cell_size } => {
                write!(f, "aggregation cell size must be positive, got {cell_size}")
            }
            Self::IndivisibleDimensions {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "grid {width}x{height} is not divisible by aggregation cell size {cell_size}"
            ),
        }
    }
}

impl std::error::Error for SpaceError {}
