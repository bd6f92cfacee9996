//! Benchmark profiles and utilities for the Shoal simulator.
//!
//! Provides pre-built [`GameConfig`] profiles and a cheap scripted policy
//! for benchmarks and examples:
//!
//! - [`reference_config`]: medium board, two players, funded for a swarm
//! - [`stress_config`]: giant board, four players
//! - [`SwarmPolicy`]: spawns whenever affordable and wanders every unit
//! - [`populated_game`]: a game advanced until the board is crowded

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shoal_core::{Action, Direction, PlayerId, Structure};
use shoal_engine::{ActionGrid, GameConfig, LockstepGame, TurnActions, WorldState};
use shoal_space::MapSize;

/// Medium (48x48) two-player game with a deep starting bank.
pub fn reference_config(seed: u64) -> GameConfig {
    let mut config = GameConfig {
        num_players: 2,
        map_size: MapSize::Medium,
        regenerate_on_reset: false,
        seed,
        ..GameConfig::default()
    };
    config.constants.starting_bank = 100_000;
    config
}

/// Giant (64x64) four-player game.
///
/// Same funding as [`reference_config`], at roughly twice the cell count.
pub fn stress_config(seed: u64) -> GameConfig {
    GameConfig {
        num_players: 4,
        map_size: MapSize::Giant,
        ..reference_config(seed)
    }
}

/// Scripted players that grow a crowd of wandering units.
///
/// Every structure asks to spawn each turn; every unit moves in a random
/// direction with probability `move_chance` and stays put otherwise.
pub struct SwarmPolicy {
    rng: ChaCha8Rng,
    move_chance: f64,
}

impl SwarmPolicy {
    /// Seeded policy moving three units in four.
    pub fn new(seed: u64) -> Self {
        Self::with_move_chance(seed, 0.75)
    }

    /// Seeded policy with an explicit move probability in `[0, 1]`.
    pub fn with_move_chance(seed: u64, move_chance: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            move_chance: move_chance.clamp(0.0, 1.0),
        }
    }

    /// Orders for every player for the next turn.
    pub fn next_turn(&mut self, world: &WorldState) -> TurnActions {
        let grid = world.grid();
        let mut grids: Vec<ActionGrid> = PlayerId::all(world.num_players())
            .map(|_| ActionGrid::idle(grid.rows(), grid.cols()))
            .collect();
        for (i, cell) in world.cells().iter().enumerate() {
            let Some(owner) = cell.owner else { continue };
            let action = if cell.has_unit {
                if self.rng.random_bool(self.move_chance) {
                    let d = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
                    Action::Move(d)
                } else {
                    Action::Idle
                }
            } else if cell.structure != Structure::None {
                Action::SpawnUnit
            } else {
                Action::Idle
            };
            grids[owner.index()].set(grid.pos(i), action);
        }
        grids
            .into_iter()
            .enumerate()
            .map(|(i, g)| (PlayerId::from_index(i), g))
            .collect()
    }
}

/// Build a game from `config` and play `turns` turns of [`SwarmPolicy`].
///
/// Stops early if the episode ends. Returns the game and the policy so
/// benchmarks can keep driving both.
pub fn populated_game(
    config: GameConfig,
    policy_seed: u64,
    turns: u32,
) -> (LockstepGame, SwarmPolicy) {
    let mut game = LockstepGame::new(config).expect("benchmark config must be valid");
    let mut policy = SwarmPolicy::new(policy_seed);
    for _ in 0..turns {
        if game.is_finished() {
            break;
        }
        let actions = policy.next_turn(game.world());
        game.step(&actions).expect("scripted actions match the board");
    }
    (game, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_config(42).validate().unwrap();
        stress_config(42).validate().unwrap();
    }

    #[test]
    fn swarm_grows() {
        let (game, _) = populated_game(reference_config(1), 2, 30);
        let units: usize = PlayerId::all(2).map(|p| game.world().unit_count(p)).sum();
        assert!(units >= 10, "only {units} units after 30 turns");
        game.world().check_invariants().unwrap();
    }

    #[test]
    fn policy_is_reproducible() {
        let (a, _) = populated_game(reference_config(3), 4, 20);
        let (b, _) = populated_game(reference_config(3), 4, 20);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn still_policy_never_moves() {
        let (game, _) = populated_game(reference_config(5), 6, 5);
        assert!(game.world().units().next().is_some());
        let mut still = SwarmPolicy::with_move_chance(0, 0.0);
        let t = still.next_turn(game.world());
        for (pos, owner, _) in game.world().units() {
            assert_eq!(t.grid(owner).unwrap().get(pos), Action::Idle);
        }
    }
}
