//! Procedural map generation for Shoal.
//!
//! A map is built from one player quadrant: fractal value noise shapes the
//! floor resource, a factory is placed near the quadrant centre, and the
//! quadrant is mirrored until every player has an identical copy.
//!
//! # Pipeline
//!
//! 1. [`TileLayout::for_players`]: how many quadrant copies across and down.
//! 2. [`noise::base_noise`]: squared uniform noise, quadrant-shaped.
//! 3. [`noise::fractal_field`]: octave sum of [`noise::smooth`] passes.
//! 4. [`MapGenerator`]: square, rescale and round the field, place the
//!    factory, mirror, then assign owners.
//!
//! Randomness is drawn only from the RNG passed in; seed a `ChaCha8Rng`
//! for reproducible maps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod noise;
pub mod tiling;

pub use error::MapGenError;
pub use generator::{GeneratedMap, MapGenerator};
pub use noise::NoiseField;
pub use tiling::TileLayout;
