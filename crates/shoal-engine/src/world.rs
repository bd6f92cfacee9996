//! The mutable board and bank table.

use indexmap::IndexMap;
use shoal_core::{Cell, InvariantViolation, PlayerId, Structure};
use shoal_mapgen::GeneratedMap;
use shoal_space::{Grid, Pos};

use crate::hash;

/// A per-cell view for renderers and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Floor resource.
    Floor,
    /// Resource carried by the unit on the cell.
    Carried,
    /// Structure code: Factory = 1, Dropoff = -1, None = 0.
    Structure,
    /// 1 where a unit stands.
    Unit,
    /// Owner id, 0 for none.
    Owner,
    /// 1 where the last extraction pass flagged inspiration.
    Inspiration,
}

impl Layer {
    /// All layers in render order.
    pub const ALL: [Layer; 6] = [
        Layer::Floor,
        Layer::Carried,
        Layer::Structure,
        Layer::Unit,
        Layer::Owner,
        Layer::Inspiration,
    ];
}

/// The full simulation state between ticks.
///
/// Cells are stored row-major. Units and structures have no identity
/// beyond their position.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldState {
    grid: Grid,
    cells: Vec<Cell>,
    banks: IndexMap<PlayerId, u64>,
    num_players: u8,
}

impl WorldState {
    /// An empty board: no floor resource, no units, no structures.
    pub fn new(grid: Grid, num_players: u8, starting_bank: u64) -> Self {
        Self {
            grid,
            cells: vec![Cell::default(); grid.cell_count()],
            banks: PlayerId::all(num_players)
                .map(|p| (p, starting_bank))
                .collect(),
            num_players,
        }
    }

    /// Take ownership of a generated map and seed every bank.
    pub fn from_map(map: GeneratedMap, starting_bank: u64) -> Self {
        Self {
            grid: map.grid,
            cells: map.cells,
            banks: PlayerId::all(map.num_players)
                .map(|p| (p, starting_bank))
                .collect(),
            num_players: map.num_players,
        }
    }

    /// Board dimensions.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of players.
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// The cell at `pos`.
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.grid.index(pos)]
    }

    /// Mutable access to the cell at `pos`.
    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        let i = self.grid.index(pos);
        &mut self.cells[i]
    }

    /// Bank balance of `player`, 0 for players not in the game.
    pub fn bank(&self, player: PlayerId) -> u64 {
        self.banks.get(&player).copied().unwrap_or(0)
    }

    /// Overwrite the bank of an existing player. Unknown players are ignored.
    pub fn set_bank(&mut self, player: PlayerId, amount: u64) {
        if let Some(b) = self.banks.get_mut(&player) {
            *b = amount;
        }
    }

    pub(crate) fn credit(&mut self, player: PlayerId, amount: u64) {
        if let Some(b) = self.banks.get_mut(&player) {
            *b += amount;
        }
    }

    pub(crate) fn debit(&mut self, player: PlayerId, amount: u64) {
        if let Some(b) = self.banks.get_mut(&player) {
            *b = b.saturating_sub(amount);
        }
    }

    /// Banks in player order.
    pub fn banks(&self) -> impl Iterator<Item = (PlayerId, u64)> + '_ {
        self.banks.iter().map(|(&p, &b)| (p, b))
    }

    /// Every unit as `(position, owner, carried)`, row-major.
    pub fn units(&self) -> impl Iterator<Item = (Pos, PlayerId, u32)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            c.unit_owner().map(|owner| (self.grid.pos(i), owner, c.carried))
        })
    }

    /// Number of units owned by `player`.
    pub fn unit_count(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.unit_owner() == Some(player))
            .count()
    }

    /// Number of structures of `kind` owned by `player`.
    pub fn structure_count(&self, player: PlayerId, kind: Structure) -> usize {
        self.cells
            .iter()
            .filter(|c| c.structure == kind && c.owner == Some(player))
            .count()
    }

    /// Floor plus carried plus banked resource.
    pub fn total_resource(&self) -> u64 {
        let on_board: u64 = self
            .cells
            .iter()
            .map(|c| u64::from(c.floor) + u64::from(c.carried))
            .sum();
        on_board + self.banks.values().sum::<u64>()
    }

    /// One layer as a row-major `f32` plane.
    pub fn layer(&self, layer: Layer) -> Vec<f32> {
        self.cells
            .iter()
            .map(|c| match layer {
                Layer::Floor => c.floor as f32,
                Layer::Carried => c.carried as f32,
                Layer::Structure => c.structure.code(),
                Layer::Unit => f32::from(u8::from(c.has_unit)),
                Layer::Owner => f32::from(c.owner.map_or(0, |p| p.0)),
                Layer::Inspiration => f32::from(u8::from(c.inspired)),
            })
            .collect()
    }

    /// Clear every inspiration flag.
    pub fn clear_inspiration(&mut self) {
        for c in &mut self.cells {
            c.inspired = false;
        }
    }

    /// Deterministic FNV-1a hash of the full state.
    pub fn state_hash(&self) -> u64 {
        hash::state_hash(self)
    }

    /// Check the tick-boundary invariants.
    ///
    /// Reports the first violation found, scanning cells row-major and then
    /// the bank table.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (index, c) in self.cells.iter().enumerate() {
            if !c.has_unit && c.carried != 0 {
                return Err(InvariantViolation::CargoWithoutUnit {
                    index,
                    carried: c.carried,
                });
            }
            let occupied = c.has_unit || c.structure.is_some();
            match (occupied, c.owner) {
                (true, None) => return Err(InvariantViolation::MissingOwner { index }),
                (false, Some(owner)) => {
                    return Err(InvariantViolation::StrayOwner { index, owner })
                }
                (true, Some(owner)) if owner.0 == 0 || owner.0 > self.num_players => {
                    return Err(InvariantViolation::OwnerOutOfRange { index, owner })
                }
                _ => {}
            }
        }
        let well_formed = self.banks.len() == usize::from(self.num_players)
            && self
                .banks
                .keys()
                .zip(PlayerId::all(self.num_players))
                .all(|(a, b)| *a == b);
        if !well_formed {
            return Err(InvariantViolation::BankTable {
                entries: self.banks.len(),
                num_players: self.num_players,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        WorldState::new(Grid::new(4, 5).unwrap(), 2, 5000)
    }

    #[test]
    fn new_world_is_consistent() {
        let w = world();
        w.check_invariants().unwrap();
        assert_eq!(w.cells().len(), 20);
        assert_eq!(w.bank(PlayerId(1)), 5000);
        assert_eq!(w.bank(PlayerId(2)), 5000);
        assert_eq!(w.bank(PlayerId(3)), 0);
        assert_eq!(w.total_resource(), 10_000);
    }

    #[test]
    fn stray_cargo_detected() {
        let mut w = world();
        w.cell_mut(Pos::new(1, 2)).carried = 5;
        assert_eq!(
            w.check_invariants(),
            Err(InvariantViolation::CargoWithoutUnit {
                index: 7,
                carried: 5
            })
        );
    }

    #[test]
    fn ownerless_unit_detected() {
        let mut w = world();
        w.cell_mut(Pos::new(0, 1)).has_unit = true;
        assert_eq!(
            w.check_invariants(),
            Err(InvariantViolation::MissingOwner { index: 1 })
        );
    }

    #[test]
    fn stray_owner_detected() {
        let mut w = world();
        w.cell_mut(Pos::new(0, 0)).owner = Some(PlayerId(1));
        assert_eq!(
            w.check_invariants(),
            Err(InvariantViolation::StrayOwner {
                index: 0,
                owner: PlayerId(1)
            })
        );
    }

    #[test]
    fn out_of_range_owner_detected() {
        let mut w = world();
        w.cell_mut(Pos::new(0, 0)).place_unit(PlayerId(3), 0);
        assert_eq!(
            w.check_invariants(),
            Err(InvariantViolation::OwnerOutOfRange {
                index: 0,
                owner: PlayerId(3)
            })
        );
    }

    #[test]
    fn layers_cover_every_cell() {
        let mut w = world();
        let p = Pos::new(2, 3);
        w.cell_mut(p).structure = Structure::Dropoff;
        w.cell_mut(p).place_unit(PlayerId(2), 40);
        w.cell_mut(p).inspired = true;
        let i = w.grid().index(p);
        for layer in Layer::ALL {
            assert_eq!(w.layer(layer).len(), 20);
        }
        assert_eq!(w.layer(Layer::Carried)[i], 40.0);
        assert_eq!(w.layer(Layer::Structure)[i], -1.0);
        assert_eq!(w.layer(Layer::Unit)[i], 1.0);
        assert_eq!(w.layer(Layer::Owner)[i], 2.0);
        assert_eq!(w.layer(Layer::Inspiration)[i], 1.0);
        w.clear_inspiration();
        assert_eq!(w.layer(Layer::Inspiration)[i], 0.0);
    }

    #[test]
    fn units_listed_row_major() {
        let mut w = world();
        w.cell_mut(Pos::new(3, 0)).place_unit(PlayerId(1), 1);
        w.cell_mut(Pos::new(0, 4)).place_unit(PlayerId(2), 2);
        let units: Vec<_> = w.units().collect();
        assert_eq!(
            units,
            vec![
                (Pos::new(0, 4), PlayerId(2), 2),
                (Pos::new(3, 0), PlayerId(1), 1)
            ]
        );
        assert_eq!(w.unit_count(PlayerId(1)), 1);
    }
}
