//! Lockstep (synchronous) episode driver.
//!
//! [`LockstepGame`] is the primary user-facing API. Each call to
//! [`step()`](LockstepGame::step) resolves one turn from every player's
//! action grid and returns the resulting observation, rewards and metrics.
//!
//! # Ownership model
//!
//! `LockstepGame` is [`Send`] but holds no shared state: every mutating
//! method takes `&mut self`, and observations are owned copies. Dropping
//! the game (or calling [`close()`](LockstepGame::close)) releases it.

use indexmap::IndexMap;
use shoal_core::{PlayerId, StepError, TickId};
use shoal_mapgen::MapGenerator;

use crate::actions::TurnActions;
use crate::config::{ConfigError, GameConfig};
use crate::metrics::StepMetrics;
use crate::observation::Observation;
use crate::resolver::TurnResolver;
use crate::world::WorldState;

// Compile-time assertion: LockstepGame is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LockstepGame>();
    }
};

// ── StepOutcome ─────────────────────────────────────────────────

/// Result of a successful [`LockstepGame::step()`] call.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Visible state after this turn.
    pub observation: Observation,
    /// Reward per player for this turn, in player order.
    pub rewards: IndexMap<PlayerId, f64>,
    /// Whether the turn limit has been reached.
    pub finished: bool,
    /// Timings and counters for this turn.
    pub metrics: StepMetrics,
}

// ── LockstepGame ────────────────────────────────────────────────

/// A single game advanced one turn per call.
///
/// # Example
///
/// ```
/// use shoal_engine::{GameConfig, LockstepGame, TurnActions};
///
/// let mut game = LockstepGame::new(GameConfig::default()).unwrap();
/// let outcome = game.step(&TurnActions::new()).unwrap();
/// assert_eq!(outcome.observation.tick().0, 1);
/// assert!(!outcome.finished);
/// ```
pub struct LockstepGame {
    config: GameConfig,
    generator: MapGenerator,
    resolver: TurnResolver,
    first_layout: WorldState,
    world: WorldState,
    tick: TickId,
    turn_limit: u32,
    seed: u64,
    last_metrics: StepMetrics,
}

impl LockstepGame {
    /// Validate `config` and generate the first map from `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = MapGenerator::new(&config.constants)?;
        let map = generator.generate_seeded(config.map_size, config.num_players, config.seed)?;
        let world = WorldState::from_map(map, config.constants.starting_bank);
        Ok(Self {
            generator,
            resolver: TurnResolver::new(config.constants.clone()),
            first_layout: world.clone(),
            world,
            tick: TickId::default(),
            turn_limit: config.turn_limit(),
            seed: config.seed,
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    /// Resolve one turn.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::EpisodeFinished`] once the turn limit has been
    /// reached, and the shape/player errors of
    /// [`TurnActions::validate`]. The world is unchanged on error.
    pub fn step(&mut self, actions: &TurnActions) -> Result<StepOutcome, StepError> {
        self.check_actions(actions)?;
        let report = self.resolver.step(&mut self.world, actions)?;
        self.tick = self.tick.next();
        debug_assert!(
            self.world.check_invariants().is_ok(),
            "invariant broken at tick {}: {:?}",
            self.tick,
            self.world.check_invariants()
        );
        self.last_metrics = report.metrics.clone();
        Ok(StepOutcome {
            observation: self.observe(),
            rewards: report.rewards,
            finished: self.is_finished(),
            metrics: report.metrics,
        })
    }

    /// Check that [`step()`](Self::step) would accept `actions`, without
    /// touching the world.
    pub fn check_actions(&self, actions: &TurnActions) -> Result<(), StepError> {
        if self.is_finished() {
            return Err(StepError::EpisodeFinished { tick: self.tick.0 });
        }
        actions.validate(self.world.grid(), self.world.num_players())
    }

    /// Start a new episode at tick 0.
    ///
    /// With `regenerate_on_reset` a fresh map is drawn from `seed`;
    /// otherwise the first map is restored and `seed` is only recorded.
    pub fn reset(&mut self, seed: u64) -> Result<Observation, ConfigError> {
        self.world = if self.config.regenerate_on_reset {
            let map = self.generator.generate_seeded(
                self.config.map_size,
                self.config.num_players,
                seed,
            )?;
            WorldState::from_map(map, self.config.constants.starting_bank)
        } else {
            self.first_layout.clone()
        };
        self.seed = seed;
        self.tick = TickId::default();
        self.last_metrics = StepMetrics::default();
        Ok(self.observe())
    }

    /// Observation of the current state.
    pub fn observe(&self) -> Observation {
        Observation::from_world(&self.world, self.tick)
    }

    /// Full world state, including inspiration flags.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Current tick (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Turns per episode.
    pub fn turn_limit(&self) -> u32 {
        self.turn_limit
    }

    /// Whether the turn limit has been reached.
    pub fn is_finished(&self) -> bool {
        self.tick.0 >= u64::from(self.turn_limit)
    }

    /// Seed of the current map.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The configuration this game was built from.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// FNV-1a hash of the current world.
    pub fn state_hash(&self) -> u64 {
        self.world.state_hash()
    }

    /// End the game and release its state.
    ///
    /// Dropping the game is the whole teardown, since it holds no threads
    /// or external resources. `close` only marks the end of an episode
    /// loop explicitly.
    pub fn close(self) {}
}

impl std::fmt::Debug for LockstepGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockstepGame")
            .field("current_tick", &self.tick)
            .field("turn_limit", &self.turn_limit)
            .field("seed", &self.seed)
            .field("num_players", &self.config.num_players)
            .field("map_size", &self.config.map_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionGrid;
    use shoal_core::{Action, Structure};
    use shoal_space::MapSize;

    fn tiny(seed: u64) -> GameConfig {
        GameConfig {
            map_size: MapSize::Tiny,
            seed,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_game_starts_at_tick_zero() {
        let game = LockstepGame::new(tiny(1)).unwrap();
        assert_eq!(game.current_tick(), TickId(0));
        assert_eq!(game.turn_limit(), 400);
        let obs = game.observe();
        assert_eq!(obs.shape(), (32, 32));
        assert_eq!(obs.bank(PlayerId(1)), 5000);
        assert_eq!(obs.bank(PlayerId(2)), 5000);
        assert!(obs.cells().iter().all(|c| !c.has_unit));
    }

    #[test]
    fn invalid_config_rejected() {
        let c = GameConfig {
            num_players: 6,
            ..tiny(0)
        };
        assert!(matches!(
            LockstepGame::new(c),
            Err(ConfigError::PlayerCount { num_players: 6 })
        ));
    }

    #[test]
    fn episode_finishes_at_limit() {
        let mut game = LockstepGame::new(GameConfig {
            max_turns: Some(3),
            ..tiny(2)
        })
        .unwrap();
        let idle = TurnActions::new();
        assert!(!game.step(&idle).unwrap().finished);
        assert!(!game.step(&idle).unwrap().finished);
        assert!(game.step(&idle).unwrap().finished);
        assert_eq!(
            game.step(&idle).unwrap_err(),
            StepError::EpisodeFinished { tick: 3 }
        );
        game.reset(9).unwrap();
        assert!(game.step(&idle).is_ok());
    }

    #[test]
    fn spawn_from_factory_through_game() {
        let mut game = LockstepGame::new(tiny(4)).unwrap();
        let factory = game
            .world()
            .grid()
            .positions()
            .find(|&p| {
                let c = game.world().cell(p);
                c.structure == Structure::Factory && c.owner == Some(PlayerId(1))
            })
            .unwrap();
        let mut grid = ActionGrid::idle(32, 32);
        grid.set(factory, Action::SpawnUnit);
        let out = game
            .step(&TurnActions::new().with(PlayerId(1), grid))
            .unwrap();
        assert!(out.observation.cell(factory).has_unit);
        assert_eq!(out.observation.bank(PlayerId(1)), 4000);
        assert!((out.rewards[&PlayerId(1)] - 2.0).abs() < 1e-12);
        assert_eq!(out.metrics.spawns, 1);
    }

    #[test]
    fn reset_without_regeneration_restores_first_map() {
        let mut game = LockstepGame::new(GameConfig {
            regenerate_on_reset: false,
            ..tiny(5)
        })
        .unwrap();
        let first = game.state_hash();
        game.step(&TurnActions::new()).unwrap();
        game.reset(77).unwrap();
        assert_eq!(game.state_hash(), first);
        assert_eq!(game.seed(), 77);
    }

    #[test]
    fn reset_with_regeneration_follows_seed() {
        let mut a = LockstepGame::new(tiny(5)).unwrap();
        let mut b = LockstepGame::new(tiny(6)).unwrap();
        a.reset(123).unwrap();
        b.reset(123).unwrap();
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn bad_actions_do_not_advance_tick() {
        let mut game = LockstepGame::new(tiny(0)).unwrap();
        let bad = TurnActions::new().with(PlayerId(9), ActionGrid::idle(32, 32));
        assert!(game.step(&bad).is_err());
        assert_eq!(game.current_tick(), TickId(0));
    }

    #[test]
    fn check_actions_matches_step() {
        let mut game = LockstepGame::new(GameConfig {
            max_turns: Some(1),
            ..tiny(0)
        })
        .unwrap();
        let bad = TurnActions::new().with(PlayerId(1), ActionGrid::idle(3, 3));
        assert!(matches!(
            game.check_actions(&bad),
            Err(StepError::ActionGridShape { .. })
        ));
        game.check_actions(&TurnActions::new()).unwrap();
        game.step(&TurnActions::new()).unwrap();
        assert_eq!(
            game.check_actions(&TurnActions::new()),
            Err(StepError::EpisodeFinished { tick: 1 })
        );
    }

    #[test]
    fn close_consumes_game() {
        let mut game = LockstepGame::new(tiny(0)).unwrap();
        game.step(&TurnActions::new()).unwrap();
        game.close();
    }

    #[test]
    fn debug_shows_tick() {
        let game = LockstepGame::new(tiny(0)).unwrap();
        let s = format!("{game:?}");
        assert!(s.contains("current_tick"), "{s}");
    }
}
