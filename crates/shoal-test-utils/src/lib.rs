//! Test utilities and fixtures for Shoal development.
//!
//! Provides a [`WorldBuilder`] for hand-placed boards, a
//! [`ResourceLedger`] for conservation checks, and seeded random action
//! sources in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{noisy_grid, random_turn, tiny_config, RandomAgents};

use shoal_core::{GameConstants, PlayerId, Structure};
use shoal_engine::{StepMetrics, WorldState};
use shoal_space::{Grid, Pos};

/// Builder for boards with hand-placed units and structures.
///
/// Banks default to zero so scenarios state their funding explicitly.
pub struct WorldBuilder {
    world: WorldState,
}

impl WorldBuilder {
    pub fn new(rows: usize, cols: usize, num_players: u8) -> Self {
        let grid = Grid::new(rows, cols).expect("test grid dimensions");
        Self {
            world: WorldState::new(grid, num_players, 0),
        }
    }

    /// Square board of `side` cells.
    pub fn square(side: usize, num_players: u8) -> Self {
        Self::new(side, side, num_players)
    }

    pub fn bank(mut self, player: u8, amount: u64) -> Self {
        self.world.set_bank(PlayerId(player), amount);
        self
    }

    /// Same bank for every player.
    pub fn banks(mut self, amount: u64) -> Self {
        for p in PlayerId::all(self.world.num_players()) {
            self.world.set_bank(p, amount);
        }
        self
    }

    pub fn floor(mut self, row: usize, col: usize, floor: u32) -> Self {
        self.world.cell_mut(Pos::new(row, col)).floor = floor;
        self
    }

    /// Uniform floor everywhere.
    pub fn floor_everywhere(mut self, floor: u32) -> Self {
        for p in self.world.grid().positions() {
            self.world.cell_mut(p).floor = floor;
        }
        self
    }

    pub fn unit(mut self, row: usize, col: usize, owner: u8, carried: u32) -> Self {
        self.world
            .cell_mut(Pos::new(row, col))
            .place_unit(PlayerId(owner), carried);
        self
    }

    pub fn factory(self, row: usize, col: usize, owner: u8) -> Self {
        self.structure(row, col, owner, Structure::Factory)
    }

    pub fn dropoff(self, row: usize, col: usize, owner: u8) -> Self {
        self.structure(row, col, owner, Structure::Dropoff)
    }

    fn structure(mut self, row: usize, col: usize, owner: u8, kind: Structure) -> Self {
        let c = self.world.cell_mut(Pos::new(row, col));
        c.structure = kind;
        c.owner = Some(PlayerId(owner));
        self
    }

    /// Finish, asserting the board is consistent.
    pub fn build(self) -> WorldState {
        if let Err(v) = self.world.check_invariants() {
            panic!("WorldBuilder produced an inconsistent board: {v}");
        }
        self.world
    }
}

/// Tracks the resource total across ticks.
///
/// Floor, cargo and banks only change through explicit sources and sinks:
/// the inspiration bonus creates resource, while spawning and dropoff
/// construction destroy their cost. Every other transfer is conservative.
#[derive(Clone, Debug)]
pub struct ResourceLedger {
    expected: u64,
    dropoff_cost: u64,
    new_entity_cost: u64,
}

impl ResourceLedger {
    pub fn open(world: &WorldState, constants: &GameConstants) -> Self {
        Self {
            expected: world.total_resource(),
            dropoff_cost: constants.dropoff_cost,
            new_entity_cost: constants.new_entity_cost,
        }
    }

    /// Apply one tick's sources and sinks.
    pub fn record(&mut self, metrics: &StepMetrics) {
        self.expected += metrics.bonus_created;
        self.expected -= u64::from(metrics.conversions) * self.dropoff_cost;
        self.expected -= u64::from(metrics.spawns) * self.new_entity_cost;
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    /// Compare against the world; returns `(expected, actual)` on mismatch.
    pub fn check(&self, world: &WorldState) -> Result<(), (u64, u64)> {
        let actual = world.total_resource();
        if actual == self.expected {
            Ok(())
        } else {
            Err((self.expected, actual))
        }
    }
}
