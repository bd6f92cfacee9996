//! Map generation errors.

use std::error::Error;
use std::fmt;

/// Errors detected before any map is generated.
#[derive(Clone, Debug, PartialEq)]
pub enum MapGenError {
    /// Player count is not a power of two in `2..=16`.
    PlayerCount {
        /// The rejected count.
        num_players: u8,
    },
    /// The map side does not split evenly into the tile layout.
    Indivisible {
        /// Map side length.
        side: u32,
        /// Tiles along the failing axis.
        tiles: u32,
    },
    /// A generation constant is unusable.
    InvalidConstants {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerCount { num_players } => write!(
                f,
                "player count {num_players} must be a power of two between 2 and 16"
            ),
            Self::Indivisible { side, tiles } => {
                write!(f, "map side {side} does not split into {tiles} tiles")
            }
            Self::InvalidConstants { reason } => write!(f, "invalid constants: {reason}"),
        }
    }
}

impl Error for MapGenError {}
