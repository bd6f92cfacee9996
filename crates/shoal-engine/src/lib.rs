//! Turn resolution and episode drivers for Shoal simulations.
//!
//! [`WorldState`] holds the board and banks. [`TurnResolver`] advances it
//! by one tick from per-player [`TurnActions`]. [`LockstepGame`] wraps both
//! with map generation, turn limits and observation export, and
//! [`BatchedGames`] steps many games in one call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod actions;
pub mod batched;
pub mod config;
pub mod hash;
pub mod inspiration;
pub mod lockstep;
pub mod metrics;
pub mod movement;
pub mod observation;
pub mod resolver;
pub mod world;

pub use actions::{ActionGrid, TurnActions};
pub use batched::{BatchError, BatchStep, BatchedGames};
pub use config::{ConfigError, GameConfig};
pub use inspiration::InspirationScan;
pub use lockstep::{LockstepGame, StepOutcome};
pub use metrics::StepMetrics;
pub use observation::{CellView, Observation, OBS_CHANNELS};
pub use resolver::{TurnReport, TurnResolver};
pub use world::{Layer, WorldState};
