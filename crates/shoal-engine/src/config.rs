//! Game configuration, validation, and error types.
//!
//! [`GameConfig`] is the constructor input for [`LockstepGame`](crate::LockstepGame).
//! [`validate()`](GameConfig::validate) checks everything that can be
//! rejected before a map is generated.

use std::error::Error;
use std::fmt;

use shoal_core::GameConstants;
use shoal_mapgen::{MapGenError, TileLayout};
use shoal_space::{MapSize, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`GameConfig::validate()`] or game construction.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Map generation rejected the setup.
    MapGen(MapGenError),
    /// The board geometry is unusable.
    Space(SpaceError),
    /// Player count is not a power of two in `2..=16`.
    PlayerCount {
        /// The rejected count.
        num_players: u8,
    },
    /// An explicit turn limit of zero.
    ZeroTurnLimit,
    /// A game constant violates its constraints.
    InvalidConstants {
        /// Description of which constraint was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapGen(e) => write!(f, "map generation: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::PlayerCount { num_players } => write!(
                f,
                "player count {num_players} must be a power of two between 2 and 16"
            ),
            Self::ZeroTurnLimit => write!(f, "max_turns must be at least 1"),
            Self::InvalidConstants { reason } => write!(f, "invalid constants: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MapGen(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapGenError> for ConfigError {
    fn from(e: MapGenError) -> Self {
        Self::MapGen(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── GameConfig ─────────────────────────────────────────────────────

/// Complete configuration for one episode stream.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Number of players: 2, 4, 8 or 16. Default: 2.
    pub num_players: u8,
    /// Board size. Default: [`MapSize::Medium`].
    pub map_size: MapSize,
    /// Draw a new map on every reset. When false, reset restores the
    /// first map. Default: true.
    pub regenerate_on_reset: bool,
    /// Seed for the first map. Default: 0.
    pub seed: u64,
    /// Explicit turn limit. `None` derives it from the map size.
    pub max_turns: Option<u32>,
    /// Rules and tuning.
    pub constants: GameConstants,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            map_size: MapSize::default(),
            regenerate_on_reset: true,
            seed: 0,
            max_turns: None,
            constants: GameConstants::default(),
        }
    }
}

impl GameConfig {
    /// Validate all settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Player count must tile the board.
        if TileLayout::for_players(self.num_players).is_err() {
            return Err(ConfigError::PlayerCount {
                num_players: self.num_players,
            });
        }
        // 2. Tiles must divide the side.
        TileLayout::for_players(self.num_players)?.quadrant(self.map_size.side())?;
        // 3. Constants.
        self.constants
            .validate()
            .map_err(|reason| ConfigError::InvalidConstants { reason })?;
        // 4. Turn limit.
        if self.max_turns == Some(0) {
            return Err(ConfigError::ZeroTurnLimit);
        }
        Ok(())
    }

    /// Turn limit for this configuration.
    pub fn turn_limit(&self) -> u32 {
        self.max_turns
            .unwrap_or_else(|| self.constants.turn_limit(self.map_size.side()))
    }
}
