//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension is too large to address with `i32` offsets.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The offending value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
    /// A side length is not one of the supported map sizes.
    UnsupportedSize {
        /// The requested side length.
        side: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::UnsupportedSize { side } => {
                write!(f, "map side {side} is not one of 32, 40, 48, 56, 64")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
