//! Agent-facing observations.
//!
//! An [`Observation`] is an owned copy of the visible state after a tick:
//! five per-cell channels plus the bank table. Inspiration flags are not
//! visible to agents.

use indexmap::IndexMap;
use shoal_core::{PlayerId, Structure, TickId};
use shoal_space::Pos;

use crate::world::WorldState;

/// Channels per cell in [`Observation::to_tensor`]: floor, carried,
/// structure, unit, owner.
pub const OBS_CHANNELS: usize = 5;

/// The visible part of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    /// Floor resource.
    pub floor: u32,
    /// Cargo of the unit on the cell.
    pub carried: u32,
    /// Structure on the cell.
    pub structure: Structure,
    /// Whether a unit stands on the cell.
    pub has_unit: bool,
    /// Owner of the unit and/or structure.
    pub owner: Option<PlayerId>,
}

/// Snapshot of the visible world after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    tick: TickId,
    rows: usize,
    cols: usize,
    cells: Vec<CellView>,
    banks: IndexMap<PlayerId, u64>,
}

impl Observation {
    /// Copy the visible state out of `world`.
    pub fn from_world(world: &WorldState, tick: TickId) -> Self {
        let grid = world.grid();
        Self {
            tick,
            rows: grid.rows(),
            cols: grid.cols(),
            cells: world
                .cells()
                .iter()
                .map(|c| CellView {
                    floor: c.floor,
                    carried: c.carried,
                    structure: c.structure,
                    has_unit: c.has_unit,
                    owner: c.owner,
                })
                .collect(),
            banks: world.banks().collect(),
        }
    }

    /// Tick at which the observation was taken.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell at `pos`.
    pub fn cell(&self, pos: Pos) -> &CellView {
        &self.cells[pos.row * self.cols + pos.col]
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    /// Bank of `player`, 0 if unknown.
    pub fn bank(&self, player: PlayerId) -> u64 {
        self.banks.get(&player).copied().unwrap_or(0)
    }

    /// Banks in player order.
    pub fn banks(&self) -> &IndexMap<PlayerId, u64> {
        &self.banks
    }

    /// Length of [`to_tensor`](Self::to_tensor): `rows * cols * OBS_CHANNELS`.
    pub fn tensor_len(&self) -> usize {
        self.cells.len() * OBS_CHANNELS
    }

    /// Export as an HWC `f32` tensor of shape `rows × cols × 5`.
    pub fn to_tensor(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.tensor_len()];
        self.write_tensor(&mut out);
        out
    }

    /// Write the HWC tensor into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.tensor_len()`.
    pub fn write_tensor(&self, out: &mut [f32]) {
        assert_eq!(out.len(), self.tensor_len(), "tensor buffer size mismatch");
        for (cell, chunk) in self.cells.iter().zip(out.chunks_exact_mut(OBS_CHANNELS)) {
            chunk[0] = cell.floor as f32;
            chunk[1] = cell.carried as f32;
            chunk[2] = cell.structure.code();
            chunk[3] = f32::from(u8::from(cell.has_unit));
            chunk[4] = f32::from(cell.owner.map_or(0, |p| p.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_space::Grid;

    #[test]
    fn tensor_is_hwc() {
        let mut w = WorldState::new(Grid::new(2, 3).unwrap(), 2, 7);
        let p = Pos::new(1, 2);
        w.cell_mut(p).floor = 9;
        w.cell_mut(p).structure = Structure::Factory;
        w.cell_mut(p).place_unit(PlayerId(2), 4);
        w.cell_mut(p).inspired = true;

        let obs = Observation::from_world(&w, TickId(3));
        let t = obs.to_tensor();
        assert_eq!(t.len(), 2 * 3 * OBS_CHANNELS);
        let base = w.grid().index(p) * OBS_CHANNELS;
        assert_eq!(&t[base..base + OBS_CHANNELS], &[9.0, 4.0, 1.0, 1.0, 2.0]);
        assert!(t[..base].iter().all(|&v| v == 0.0));
        assert_eq!(obs.bank(PlayerId(1)), 7);
        assert_eq!(obs.tick(), TickId(3));
    }

    #[test]
    fn dropoff_code_is_negative() {
        let mut w = WorldState::new(Grid::new(1, 1).unwrap(), 2, 0);
        w.cell_mut(Pos::new(0, 0)).structure = Structure::Dropoff;
        w.cell_mut(Pos::new(0, 0)).owner = Some(PlayerId(1));
        let t = Observation::from_world(&w, TickId(0)).to_tensor();
        assert_eq!(t[2], -1.0);
    }
}
