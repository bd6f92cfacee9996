//! Error types shared across the workspace.
//!
//! Illegal game actions are never errors: they resolve as no-ops with a
//! reward penalty. The types here cover caller contract violations at step
//! time and internal invariant checks used by tests.

use std::error::Error;
use std::fmt;

use crate::id::PlayerId;

/// Errors returned when a step request breaks the caller contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// An action grid does not match the map shape.
    ActionGridShape {
        /// Player whose grid is malformed.
        player: PlayerId,
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Supplied `(rows, cols)`.
        actual: (usize, usize),
    },
    /// Actions were supplied for a player outside `1..=num_players`.
    UnknownPlayer {
        /// The offending player id.
        player: PlayerId,
        /// Number of players in the game.
        num_players: u8,
    },
    /// The episode reached its turn limit; call `reset()` first.
    EpisodeFinished {
        /// The tick at which the episode ended.
        tick: u64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActionGridShape {
                player,
                expected,
                actual,
            } => write!(
                f,
                "player {player}: action grid is {}x{}, map is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::UnknownPlayer {
                player,
                num_players,
            } => write!(f, "player {player} is not in 1..={num_players}"),
            Self::EpisodeFinished { tick } => {
                write!(f, "episode finished at tick {tick}; reset before stepping")
            }
        }
    }
}

impl Error for StepError {}

/// A broken world-state invariant.
///
/// Produced by the world's invariant check. It signals a resolver bug and
/// is never handled at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A cell without a unit holds carried resource.
    CargoWithoutUnit {
        /// Row-major cell index.
        index: usize,
        /// The stray cargo.
        carried: u32,
    },
    /// A cell with a unit or structure has no owner.
    MissingOwner {
        /// Row-major cell index.
        index: usize,
    },
    /// An empty cell still records an owner.
    StrayOwner {
        /// Row-major cell index.
        index: usize,
        /// The recorded owner.
        owner: PlayerId,
    },
    /// An owner id outside `1..=num_players`.
    OwnerOutOfRange {
        /// Row-major cell index.
        index: usize,
        /// The recorded owner.
        owner: PlayerId,
    },
    /// The bank table does not have exactly one entry per player.
    BankTable {
        /// Number of bank entries.
        entries: usize,
        /// Number of players.
        num_players: u8,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CargoWithoutUnit { index, carried } => {
                write!(f, "cell {index}: carries {carried} without a unit")
            }
            Self::MissingOwner { index } => {
                write!(f, "cell {index}: unit or structure has no owner")
            }
            Self::StrayOwner { index, owner } => {
                write!(f, "cell {index}: empty cell owned by player {owner}")
            }
            Self::OwnerOutOfRange { index, owner } => {
                write!(f, "cell {index}: owner {owner} out of range")
            }
            Self::BankTable {
                entries,
                num_players,
            } => write!(f, "{entries} bank entries for {num_players} players"),
        }
    }
}

impl Error for InvariantViolation {}
