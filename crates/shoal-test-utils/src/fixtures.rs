//! Seeded action sources and standard configs.
//!
//! - [`random_turn`]: a random opcode on every cell the player controls.
//! - [`RandomAgents`]: the same, driven by an owned `ChaCha8Rng`.
//! - [`noisy_grid`]: raw opcodes across the whole board, out-of-range
//!   values included.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shoal_core::{Action, PlayerId};
use shoal_engine::{ActionGrid, GameConfig, TurnActions, WorldState};
use shoal_space::MapSize;

/// Two players on the smallest board.
pub fn tiny_config(seed: u64) -> GameConfig {
    GameConfig {
        map_size: MapSize::Tiny,
        seed,
        ..GameConfig::default()
    }
}

/// Random opcode for every unit and structure, per owner.
pub fn random_turn<R: Rng + ?Sized>(world: &WorldState, rng: &mut R) -> TurnActions {
    let grid = world.grid();
    let mut grids: Vec<ActionGrid> = PlayerId::all(world.num_players())
        .map(|_| ActionGrid::idle(grid.rows(), grid.cols()))
        .collect();
    for (i, cell) in world.cells().iter().enumerate() {
        if let Some(owner) = cell.owner {
            let op = rng.random_range(0..=6);
            grids[owner.index()].set(grid.pos(i), Action::from_opcode(op));
        }
    }
    grids
        .into_iter()
        .enumerate()
        .map(|(i, g)| (PlayerId::from_index(i), g))
        .collect()
}

/// Opcodes in `-2..=9` on every cell, so most decode to idle.
pub fn noisy_grid<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> ActionGrid {
    let ops: Vec<i64> = (0..rows * cols).map(|_| rng.random_range(-2..=9)).collect();
    ActionGrid::from_opcodes(rows, cols, &ops).expect("length matches")
}

/// Seeded random players.
pub struct RandomAgents {
    rng: ChaCha8Rng,
}

impl RandomAgents {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_turn(&mut self, world: &WorldState) -> TurnActions {
        random_turn(world, &mut self.rng)
    }
}
