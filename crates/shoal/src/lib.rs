//! Shoal: a headless resource-collection strategy simulator for
//! reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Shoal sub-crates. For most users, adding `shoal` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use shoal::prelude::*;
//!
//! let mut game = LockstepGame::new(GameConfig {
//!     map_size: MapSize::Tiny,
//!     seed: 42,
//!     ..GameConfig::default()
//! })
//! .unwrap();
//!
//! // Every player spawns from every structure it owns.
//! let world = game.world();
//! let mut actions = TurnActions::new();
//! for player in PlayerId::all(world.num_players()) {
//!     let mut grid = ActionGrid::idle(32, 32);
//!     for pos in world.grid().positions() {
//!         if world.cell(pos).structure_owner() == Some(player) {
//!             grid.set(pos, Action::SpawnUnit);
//!         }
//!     }
//!     actions.insert(player, grid);
//! }
//!
//! let outcome = game.step(&actions).unwrap();
//! assert_eq!(outcome.observation.tick(), TickId(1));
//! assert_eq!(outcome.observation.bank(PlayerId(1)), 4000);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `shoal-core` | IDs, cells, actions, game constants, errors |
//! | [`space`] | `shoal-space` | Board geometry and standard map sizes |
//! | [`mapgen`] | `shoal-mapgen` | Noise fields and symmetric map generation |
//! | [`engine`] | `shoal-engine` | World state, turn resolution, episode drivers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and constants (`shoal-core`).
///
/// Contains player and tick IDs, the [`types::Cell`] record, the
/// [`types::Action`] opcode set, and [`types::GameConstants`].
pub use shoal_core as types;

/// Board geometry (`shoal-space`).
///
/// Provides [`space::Grid`], [`space::Pos`], [`space::Rect`] and the
/// standard [`space::MapSize`] presets.
pub use shoal_space as space;

/// Map generation (`shoal-mapgen`).
///
/// [`mapgen::MapGenerator`] builds mirrored boards from fractal noise.
pub use shoal_mapgen as mapgen;

/// Simulation engine (`shoal-engine`).
///
/// [`engine::LockstepGame`] for single games, [`engine::BatchedGames`] for
/// vectorised training, and [`engine::TurnResolver`] for driving a
/// [`engine::WorldState`] directly.
pub use shoal_engine as engine;

/// Common imports for typical Shoal usage.
///
/// ```rust
/// use shoal::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use shoal_core::{
        Action, Cell, Direction, DropoffFunding, GameConstants, PlayerId, Structure, TickId,
    };

    // Errors
    pub use shoal_core::{InvariantViolation, StepError};
    pub use shoal_engine::{BatchError, ConfigError};
    pub use shoal_mapgen::MapGenError;

    // Space
    pub use shoal_space::{Grid, MapSize, Pos};

    // Map generation
    pub use shoal_mapgen::{GeneratedMap, MapGenerator};

    // Engine
    pub use shoal_engine::{
        ActionGrid, BatchedGames, GameConfig, LockstepGame, Observation, StepMetrics,
        StepOutcome, TurnActions, TurnResolver, WorldState,
    };
}
