//! Square grid geometry for Shoal simulations.
//!
//! The game board is a bounded square grid with hard walls: stepping off
//! an edge is refused rather than wrapped. Cells are stored row-major, so
//! a [`Pos`] maps to a flat index with [`Grid::index`], and scan windows
//! are expressed as [`Rect`]s clamped to the board.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod map_size;

pub use error::SpaceError;
pub use grid::{Grid, Pos, Rect};
pub use map_size::MapSize;
