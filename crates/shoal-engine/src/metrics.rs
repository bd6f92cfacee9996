//! Per-tick metrics for the turn resolver.
//!
//! [`StepMetrics`] captures phase timings and event counters for a single
//! tick. Every step returns one; nothing is logged.

/// Timing and event counters collected during a single tick.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent on conversions and moves, in microseconds.
    pub unit_actions_us: u64,
    /// Time spent on structure actions, in microseconds.
    pub structure_actions_us: u64,
    /// Time spent on inspiration and extraction, in microseconds.
    pub extraction_us: u64,
    /// Units that relocated to an empty cell.
    pub moves_applied: u32,
    /// Actions that failed and cost a penalty, all players.
    pub failed_actions: u32,
    /// Units destroyed in collisions.
    pub units_destroyed: u32,
    /// Cells on which at least one collision happened.
    pub collisions: u32,
    /// Units that unloaded into a friendly structure.
    pub deposits: u32,
    /// Units spawned by structures.
    pub spawns: u32,
    /// Units converted into dropoffs.
    pub conversions: u32,
    /// Units that extracted while inspired.
    pub inspired_units: u32,
    /// Floor resource removed by extraction.
    pub resource_extracted: u64,
    /// Resource created by the inspiration bonus.
    pub bonus_created: u64,
}
