//! One-tick state transition.
//!
//! [`TurnResolver::step`] runs the fixed phase order:
//!
//! 1. unit actions: conversions in row-major order, then the move batch
//!    (see [`movement`](crate::movement));
//! 2. structure actions (spawning);
//! 3. inspiration reset;
//! 4. extraction, with inspiration from [`InspirationScan`];
//! 5. rewards.
//!
//! Illegal actions never error. They leave the world untouched and cost
//! the acting player `invalid_action_penalty`.

use std::time::Instant;

use indexmap::IndexMap;
use shoal_core::{Action, DropoffFunding, GameConstants, PlayerId, StepError, Structure};

use crate::actions::TurnActions;
use crate::inspiration::InspirationScan;
use crate::metrics::StepMetrics;
use crate::movement::resolve_moves;
use crate::world::WorldState;

/// Result of one resolved tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Reward per player, in player order.
    pub rewards: IndexMap<PlayerId, f64>,
    /// Failed actions per player, in player order.
    pub failed_actions: IndexMap<PlayerId, u32>,
    /// Phase timings and counters.
    pub metrics: StepMetrics,
}

/// Applies one tick of game rules to a [`WorldState`].
#[derive(Clone, Debug)]
pub struct TurnResolver {
    constants: GameConstants,
}

impl TurnResolver {
    /// A resolver bound to `constants`.
    pub fn new(constants: GameConstants) -> Self {
        Self { constants }
    }

    /// The constants this resolver applies.
    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Advance `world` by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if `actions` names an unknown player or holds
    /// a grid of the wrong shape. The world is not modified in that case.
    pub fn step(
        &self,
        world: &mut WorldState,
        actions: &TurnActions,
    ) -> Result<TurnReport, StepError> {
        actions.validate(world.grid(), world.num_players())?;

        let tick_start = Instant::now();
        let mut metrics = StepMetrics::default();
        let mut failures: IndexMap<PlayerId, u32> =
            PlayerId::all(world.num_players()).map(|p| (p, 0)).collect();

        // 1. Unit actions.
        let unit_start = Instant::now();
        self.convert_units(world, actions, &mut failures, &mut metrics);
        let moves = resolve_moves(world, actions, &self.constants);
        for player in &moves.failed {
            *failures.entry(*player).or_default() += 1;
        }
        metrics.moves_applied = moves.relocated;
        metrics.deposits = moves.deposits;
        metrics.units_destroyed = moves.destroyed;
        metrics.collisions = moves.collision_cells;
        metrics.unit_actions_us = unit_start.elapsed().as_micros() as u64;

        // 2. Structure actions.
        let structure_start = Instant::now();
        self.spawn_units(world, actions, &mut failures, &mut metrics);
        metrics.structure_actions_us = structure_start.elapsed().as_micros() as u64;

        // 3. Inspiration reset. 4. Extraction.
        let extraction_start = Instant::now();
        world.clear_inspiration();
        self.extract(world, &mut metrics);
        metrics.extraction_us = extraction_start.elapsed().as_micros() as u64;

        // 5. Rewards.
        let rewards = failures
            .iter()
            .map(|(&p, &failed)| {
                let reward = world.bank(p) as f64 * self.constants.bank_reward_coefficient
                    - f64::from(failed) * self.constants.invalid_action_penalty;
                (p, reward)
            })
            .collect();
        metrics.failed_actions = failures.values().sum();
        metrics.total_us = tick_start.elapsed().as_micros() as u64;

        Ok(TurnReport {
            rewards,
            failed_actions: failures,
            metrics,
        })
    }

    fn convert_units(
        &self,
        world: &mut WorldState,
        actions: &TurnActions,
        failures: &mut IndexMap<PlayerId, u32>,
        metrics: &mut StepMetrics,
    ) {
        let cost = self.constants.dropoff_cost;
        for index in 0..world.cells().len() {
            let cell = world.cells()[index];
            let Some(owner) = cell.unit_owner() else {
                continue;
            };
            if actions.action(owner, index) != Action::ConvertToDropoff {
                continue;
            }
            let bank = world.bank(owner);
            let floor = u64::from(cell.floor);
            let carried = u64::from(cell.carried);
            let funds = match self.constants.dropoff_funding {
                DropoffFunding::BankAndFloor => bank + floor,
                DropoffFunding::BankFloorAndCargo => bank + floor + carried,
            };
            if cell.structure.is_some() || funds < cost {
                *failures.entry(owner).or_default() += 1;
                continue;
            }

            world.set_bank(owner, bank + floor + carried - cost);
            let c = &mut world.cells_mut()[index];
            c.floor = 0;
            c.take_unit();
            c.structure = Structure::Dropoff;
            c.owner = Some(owner);
            metrics.conversions += 1;
        }
    }

    fn spawn_units(
        &self,
        world: &mut WorldState,
        actions: &TurnActions,
        failures: &mut IndexMap<PlayerId, u32>,
        metrics: &mut StepMetrics,
    ) {
        let cost = self.constants.new_entity_cost;
        for index in 0..world.cells().len() {
            let cell = world.cells()[index];
            let Some(owner) = cell.structure_owner() else {
                continue;
            };
            if actions.action(owner, index) != Action::SpawnUnit {
                continue;
            }
            if cell.has_unit || world.bank(owner) < cost {
                *failures.entry(owner).or_default() += 1;
                continue;
            }
            world.debit(owner, cost);
            world.cells_mut()[index].place_unit(owner, 0);
            metrics.spawns += 1;
        }
    }

    fn extract(&self, world: &mut WorldState, metrics: &mut StepMetrics) {
        let c = &self.constants;
        let grid = world.grid();
        let mut scan = InspirationScan::from_constants(grid, c);
        for index in 0..grid.cell_count() {
            if !world.cells()[index].has_unit {
                continue;
            }
            let inspired = scan.is_inspired(world, grid.pos(index));
            let ratio = if inspired {
                c.inspired_extract_ratio
            } else {
                c.extract_ratio
            };

            let cell = &mut world.cells_mut()[index];
            let capacity = c.max_carry.saturating_sub(cell.carried);
            let extracted = cell.floor.div_ceil(ratio).min(capacity);
            let bonus = if inspired {
                (f64::from(extracted) * c.inspired_bonus_multiplier).floor() as u64
            } else {
                0
            };
            let gained = (u64::from(extracted) + bonus).min(u64::from(capacity)) as u32;
            cell.floor -= extracted;
            cell.carried += gained;

            metrics.resource_extracted += u64::from(extracted);
            metrics.bonus_created += u64::from(gained - extracted);
            if inspired {
                metrics.inspired_units += 1;
            }
        }
    }
}
