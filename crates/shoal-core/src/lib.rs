//! Core types and constants for the Shoal simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the map generator and the turn engine:
//! player and tick IDs, the per-cell record, action opcodes, tunable
//! game constants, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod cell;
pub mod constants;
pub mod error;
pub mod id;

pub use action::{Action, Direction};
pub use cell::{Cell, Structure};
pub use constants::{DropoffFunding, GameConstants};
pub use error::{InvariantViolation, StepError};
pub use id::{PlayerId, TickId};
