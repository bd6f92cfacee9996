//! Per-player action grids.

use indexmap::IndexMap;
use shoal_core::{Action, PlayerId, StepError};
use shoal_space::{Grid, Pos};

/// One action per cell for a single player, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionGrid {
    rows: usize,
    cols: usize,
    actions: Vec<Action>,
}

impl ActionGrid {
    /// A grid of [`Action::Idle`].
    pub fn idle(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            actions: vec![Action::Idle; rows * cols],
        }
    }

    /// Decode raw opcodes. Unknown opcodes become [`Action::Idle`].
    ///
    /// Returns `None` if `opcodes.len() != rows * cols`.
    pub fn from_opcodes(rows: usize, cols: usize, opcodes: &[i64]) -> Option<Self> {
        if opcodes.len() != rows * cols {
            return None;
        }
        Some(Self {
            rows,
            cols,
            actions: opcodes.iter().map(|&op| Action::from_opcode(op)).collect(),
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Action at `pos`.
    pub fn get(&self, pos: Pos) -> Action {
        self.actions[pos.row * self.cols + pos.col]
    }

    /// Action at a row-major index.
    pub fn at(&self, index: usize) -> Action {
        self.actions[index]
    }

    /// Set the action at `pos`.
    pub fn set(&mut self, pos: Pos, action: Action) {
        self.actions[pos.row * self.cols + pos.col] = action;
    }

    /// Row-major actions.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

/// Actions for one tick, keyed by player. Missing players idle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnActions {
    grids: IndexMap<PlayerId, ActionGrid>,
}

impl TurnActions {
    /// No actions for anyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `player`'s grid.
    pub fn insert(&mut self, player: PlayerId, grid: ActionGrid) {
        self.grids.insert(player, grid);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, player: PlayerId, grid: ActionGrid) -> Self {
        self.insert(player, grid);
        self
    }

    /// `player`'s grid, if one was supplied.
    pub fn grid(&self, player: PlayerId) -> Option<&ActionGrid> {
        self.grids.get(&player)
    }

    /// What `player` asked for at a row-major cell index.
    pub fn action(&self, player: PlayerId, index: usize) -> Action {
        self.grids
            .get(&player)
            .map_or(Action::Idle, |g| g.at(index))
    }

    /// Reject unknown players and grids that do not match `grid`.
    pub fn validate(&self, grid: Grid, num_players: u8) -> Result<(), StepError> {
        for (&player, actions) in &self.grids {
            if player.0 == 0 || player.0 > num_players {
                return Err(StepError::UnknownPlayer {
                    player,
                    num_players,
                });
            }
            let expected = (grid.rows(), grid.cols());
            if actions.shape() != expected {
                return Err(StepError::ActionGridShape {
                    player,
                    expected,
                    actual: actions.shape(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(PlayerId, ActionGrid)> for TurnActions {
    fn from_iter<I: IntoIterator<Item = (PlayerId, ActionGrid)>>(iter: I) -> Self {
        Self {
            grids: iter.into_iter().collect(),
        }
    }
}
