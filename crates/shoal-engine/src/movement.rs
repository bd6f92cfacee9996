//! Batched, order-independent move resolution.
//!
//! Every move is judged against the board as it stands after conversions
//! and before any unit relocates, so the outcome does not depend on the
//! order units are visited. Resolution runs in three passes:
//!
//! 1. **Classify** each mover by what its destination holds.
//! 2. **Collide**: movers into enemy units destroy both sides; then the
//!    surviving movers that share an empty destination are grouped.
//! 3. **Apply** destructions, deposits and relocations.

use indexmap::IndexMap;
use shoal_core::{Action, GameConstants, PlayerId};
use smallvec::SmallVec;

use crate::actions::TurnActions;
use crate::world::WorldState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Mover {
    from: usize,
    to: usize,
    owner: PlayerId,
}

/// What happened to the moves of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// One entry per failed move, naming the player to penalise.
    pub failed: Vec<PlayerId>,
    /// Units that relocated to an empty cell.
    pub relocated: u32,
    /// Units that unloaded into a friendly structure.
    pub deposits: u32,
    /// Units destroyed in collisions.
    pub destroyed: u32,
    /// Distinct cells where a collision happened.
    pub collision_cells: u32,
}

// Lowest-index collision cell each destroyed unit took part in, keyed by
// the unit's current cell.
struct Wreckage {
    site: Vec<Option<usize>>,
    collided: Vec<bool>,
}

impl Wreckage {
    fn new(cells: usize) -> Self {
        Self {
            site: vec![None; cells],
            collided: vec![false; cells],
        }
    }

    fn destroy(&mut self, unit: usize, at: usize) {
        self.collided[at] = true;
        self.site[unit] = Some(self.site[unit].map_or(at, |s| s.min(at)));
    }

    fn is_destroyed(&self, unit: usize) -> bool {
        self.site[unit].is_some()
    }
}

/// Resolve every `Move` action of units on the board.
pub fn resolve_moves(
    world: &mut WorldState,
    actions: &TurnActions,
    constants: &GameConstants,
) -> MoveReport {
    let grid = world.grid();
    let mut report = MoveReport::default();
    let mut deposits: Vec<Mover> = Vec::new();
    let mut contests: Vec<Mover> = Vec::new();
    let mut empty: IndexMap<usize, SmallVec<[Mover; 4]>> = IndexMap::new();

    // ── Classify ────────────────────────────────────────────────
    let cells = world.cells();
    for (from, cell) in cells.iter().enumerate() {
        let Some(owner) = cell.unit_owner() else {
            continue;
        };
        let Action::Move(dir) = actions.action(owner, from) else {
            continue;
        };
        let Some(dest) = grid.step(grid.pos(from), dir) else {
            report.failed.push(owner);
            continue;
        };
        let ratio = if cell.inspired {
            constants.inspired_move_cost_ratio
        } else {
            constants.move_cost_ratio
        };
        if u64::from(cell.carried) * u64::from(ratio) < u64::from(cell.floor) {
            report.failed.push(owner);
            continue;
        }

        let to = grid.index(dest);
        let mover = Mover { from, to, owner };
        let target = &cells[to];
        // Occupants first: a unit on its own structure can still be rammed.
        match (target.unit_owner(), target.structure_owner()) {
            (Some(u), _) if u == owner => report.failed.push(owner),
            (Some(_), _) => contests.push(mover),
            (None, Some(s)) if s != owner => report.failed.push(owner),
            (None, Some(_)) => deposits.push(mover),
            (None, None) => empty.entry(to).or_default().push(mover),
        }
    }

    // ── Collide ─────────────────────────────────────────────────
    let mut wreck = Wreckage::new(grid.cell_count());
    for m in &contests {
        wreck.destroy(m.from, m.to);
        wreck.destroy(m.to, m.to);
    }

    let mut relocations: Vec<Mover> = Vec::new();
    for (&to, group) in &empty {
        let live: SmallVec<[Mover; 4]> = group
            .iter()
            .copied()
            .filter(|m| !wreck.is_destroyed(m.from))
            .collect();
        match live.as_slice() {
            [] => {}
            [single] => relocations.push(*single),
            [first, rest @ ..] if rest.iter().all(|m| m.owner == first.owner) => {
                report.failed.extend(live.iter().map(|m| m.owner));
            }
            _ => {
                for m in &live {
                    wreck.destroy(m.from, to);
                }
            }
        }
    }

    // ── Apply ───────────────────────────────────────────────────
    let mut credits: SmallVec<[(PlayerId, u64); 8]> = SmallVec::new();
    let cells = world.cells_mut();
    for (unit, site) in wreck.site.iter().enumerate() {
        if let Some(at) = *site {
            let cargo = cells[unit].take_unit();
            cells[at].floor = cells[at].floor.saturating_add(cargo);
            report.destroyed += 1;
        }
    }
    for m in deposits.iter().filter(|m| !wreck.is_destroyed(m.from)) {
        let cargo = cells[m.from].take_unit();
        credits.push((m.owner, u64::from(cargo)));
        report.deposits += 1;
    }
    for m in &relocations {
        let cargo = cells[m.from].take_unit();
        cells[m.to].place_unit(m.owner, cargo);
        report.relocated += 1;
    }
    report.collision_cells = wreck.collided.iter().filter(|&&c| c).count() as u32;

    for (player, amount) in credits {
        world.credit(player, amount);
    }
    report
}
