//! Batched driver for vectorised training.
//!
//! [`BatchedGames`] owns N [`LockstepGame`]s and steps them all in one
//! call, writing observations into a single contiguous buffer. Games are
//! stepped sequentially and never share state.

use indexmap::IndexMap;
use shoal_core::{PlayerId, StepError, TickId};

use crate::actions::TurnActions;
use crate::config::{ConfigError, GameConfig};
use crate::lockstep::LockstepGame;
use crate::metrics::StepMetrics;

// ── Error type ──────────────────────────────────────────────────

/// Error from a batched operation, annotated with the failing game index.
#[derive(Debug, PartialEq)]
pub enum BatchError {
    /// A game's `step()` failed.
    Step {
        /// Index of the game that failed (0-based).
        game_index: usize,
        /// The underlying step error.
        error: StepError,
    },
    /// Configuration error during construction or reset.
    Config {
        /// Index of the game that failed (0-based).
        game_index: usize,
        /// The underlying configuration error.
        error: ConfigError,
    },
    /// Game index out of bounds.
    InvalidIndex {
        /// The requested index.
        game_index: usize,
        /// Total number of games.
        num_games: usize,
    },
    /// Batch-level argument validation failed.
    InvalidArgument {
        /// Human-readable description of what's wrong.
        reason: String,
    },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Step { game_index, error } => {
                write!(f, "game {game_index}: step failed: {error}")
            }
            BatchError::Config { game_index, error } => {
                write!(f, "game {game_index}: config error: {error}")
            }
            BatchError::InvalidIndex {
                game_index,
                num_games,
            } => write!(
                f,
                "game index {game_index} out of range (num_games={num_games})"
            ),
            BatchError::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Step { error, .. } => Some(error),
            BatchError::Config { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ── Result type ─────────────────────────────────────────────────

/// Result of stepping every game once.
#[derive(Clone, Debug)]
pub struct BatchStep {
    /// Per-game tick after stepping.
    pub ticks: Vec<TickId>,
    /// Per-game rewards.
    pub rewards: Vec<IndexMap<PlayerId, f64>>,
    /// Per-game finished flags.
    pub finished: Vec<bool>,
    /// Per-game step metrics.
    pub metrics: Vec<StepMetrics>,
}

// ── BatchedGames ────────────────────────────────────────────────

/// N independent games sharing one board shape.
pub struct BatchedGames {
    games: Vec<LockstepGame>,
    obs_len: usize,
}

impl BatchedGames {
    /// Build one game per config.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] for an empty batch or for
    /// configs whose boards differ in shape, and [`BatchError::Config`] if
    /// any game fails to construct.
    pub fn new(configs: Vec<GameConfig>) -> Result<Self, BatchError> {
        if configs.is_empty() {
            return Err(BatchError::InvalidArgument {
                reason: "BatchedGames requires at least one game config".into(),
            });
        }
        let mut games = Vec::with_capacity(configs.len());
        for (game_index, config) in configs.into_iter().enumerate() {
            let game = LockstepGame::new(config)
                .map_err(|error| BatchError::Config { game_index, error })?;
            games.push(game);
        }

        let obs_len = games[0].observe().tensor_len();
        for (i, game) in games.iter().enumerate().skip(1) {
            let len = game.observe().tensor_len();
            if len != obs_len {
                return Err(BatchError::InvalidArgument {
                    reason: format!(
                        "game {i} observation length {len} differs from game 0 ({obs_len})"
                    ),
                });
            }
        }
        Ok(Self { games, obs_len })
    }

    /// Step every game with its own actions.
    ///
    /// All actions are validated before any game advances, so on error
    /// every game is left at its previous tick.
    pub fn step(&mut self, actions: &[TurnActions]) -> Result<BatchStep, BatchError> {
        self.check_len(actions.len())?;
        for (game_index, (game, acts)) in self.games.iter().zip(actions).enumerate() {
            game.check_actions(acts)
                .map_err(|error| BatchError::Step { game_index, error })?;
        }
        let n = self.games.len();
        let mut out = BatchStep {
            ticks: Vec::with_capacity(n),
            rewards: Vec::with_capacity(n),
            finished: Vec::with_capacity(n),
            metrics: Vec::with_capacity(n),
        };
        for (game_index, (game, acts)) in self.games.iter_mut().zip(actions).enumerate() {
            let outcome = game
                .step(acts)
                .map_err(|error| BatchError::Step { game_index, error })?;
            out.ticks.push(game.current_tick());
            out.rewards.push(outcome.rewards);
            out.finished.push(outcome.finished);
            out.metrics.push(outcome.metrics);
        }
        Ok(out)
    }

    /// Step every game, then write all observations into `output`.
    pub fn step_and_observe(
        &mut self,
        actions: &[TurnActions],
        output: &mut [f32],
    ) -> Result<BatchStep, BatchError> {
        self.check_output(output.len())?;
        let result = self.step(actions)?;
        self.observe_all(output)?;
        Ok(result)
    }

    /// Write every game's observation tensor into `output`, game-major.
    pub fn observe_all(&self, output: &mut [f32]) -> Result<(), BatchError> {
        self.check_output(output.len())?;
        for (game, chunk) in self.games.iter().zip(output.chunks_exact_mut(self.obs_len)) {
            game.observe().write_tensor(chunk);
        }
        Ok(())
    }

    /// Reset one game.
    pub fn reset_game(&mut self, game_index: usize, seed: u64) -> Result<(), BatchError> {
        let num_games = self.games.len();
        let game = self
            .games
            .get_mut(game_index)
            .ok_or(BatchError::InvalidIndex {
                game_index,
                num_games,
            })?;
        game.reset(seed)
            .map_err(|error| BatchError::Config { game_index, error })?;
        Ok(())
    }

    /// Reset every game, game `i` with `seeds[i]`.
    pub fn reset_all(&mut self, seeds: &[u64]) -> Result<(), BatchError> {
        self.check_len(seeds.len())?;
        for (game_index, &seed) in seeds.iter().enumerate() {
            self.reset_game(game_index, seed)?;
        }
        Ok(())
    }

    /// Borrow one game.
    pub fn game(&self, game_index: usize) -> Result<&LockstepGame, BatchError> {
        self.games.get(game_index).ok_or(BatchError::InvalidIndex {
            game_index,
            num_games: self.games.len(),
        })
    }

    /// Number of games.
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    /// Observation length per game.
    pub fn obs_len(&self) -> usize {
        self.obs_len
    }

    fn check_len(&self, got: usize) -> Result<(), BatchError> {
        if got != self.games.len() {
            return Err(BatchError::InvalidArgument {
                reason: format!("expected {} entries, got {got}", self.games.len()),
            });
        }
        Ok(())
    }

    fn check_output(&self, got: usize) -> Result<(), BatchError> {
        let expected = self.obs_len * self.games.len();
        if got != expected {
            return Err(BatchError::InvalidArgument {
                reason: format!("output buffer has {got} floats, expected {expected}"),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for BatchedGames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedGames")
            .field("num_games", &self.games.len())
            .field("obs_len", &self.obs_len)
            .finish()
    }
}
