//! Rectangle-cached inspiration detection.
//!
//! A unit is inspired when a unit of another player stands inside the
//! window `pos ± (half_height, half_width)`. Each scan marks its whole
//! window, so later queries inside it answer without rescanning: a hit
//! marks the window inspired, a miss marks it scanned. The cache ignores
//! which player asked, and corners of a true circular range are missed.
//! Both are accepted approximations that keep a tick close to linear.

use shoal_core::GameConstants;
use shoal_space::{Grid, Pos};

use crate::world::WorldState;

/// Per-tick scan state for one extraction pass.
#[derive(Clone, Debug)]
pub struct InspirationScan {
    scanned: Vec<bool>,
    half_height: usize,
    half_width: usize,
}

impl InspirationScan {
    /// A fresh scan over `grid` with the given window half-extents.
    pub fn new(grid: Grid, half_height: usize, half_width: usize) -> Self {
        Self {
            scanned: vec![false; grid.cell_count()],
            half_height,
            half_width,
        }
    }

    /// A fresh scan using the window from `constants`.
    pub fn from_constants(grid: Grid, constants: &GameConstants) -> Self {
        Self::new(
            grid,
            constants.inspiration_half_height as usize,
            constants.inspiration_half_width as usize,
        )
    }

    /// Whether the unit at `pos` is inspired, updating the cached flags.
    ///
    /// Returns false if no unit stands on `pos`.
    pub fn is_inspired(&mut self, world: &mut WorldState, pos: Pos) -> bool {
        let grid = world.grid();
        let index = grid.index(pos);
        let Some(owner) = world.cells()[index].unit_owner() else {
            return false;
        };
        if world.cells()[index].inspired {
            return true;
        }
        if self.scanned[index] {
            return false;
        }

        let rect = grid.rect_around(pos, self.half_height, self.half_width);
        let found = rect.positions().any(|p| match world.cell(p).unit_owner() {
            Some(other) => other != owner,
            None => false,
        });
        let cells = world.cells_mut();
        for p in rect.positions() {
            let i = grid.index(p);
            self.scanned[i] = true;
            if found {
                cells[i].inspired = true;
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::PlayerId;

    fn world(rows: usize, cols: usize) -> WorldState {
        WorldState::new(Grid::new(rows, cols).unwrap(), 2, 0)
    }

    fn scan(w: &WorldState) -> InspirationScan {
        InspirationScan::new(w.grid(), 5, 6)
    }

    #[test]
    fn lone_unit_not_inspired() {
        let mut w = world(32, 32);
        w.cell_mut(Pos::new(10, 10)).place_unit(PlayerId(1), 0);
        let mut s = scan(&w);
        assert!(!s.is_inspired(&mut w, Pos::new(10, 10)));
        assert!(!w.cell(Pos::new(10, 10)).inspired);
    }

    #[test]
    fn enemy_inside_window_inspires() {
        let mut w = world(32, 32);
        w.cell_mut(Pos::new(10, 10)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(15, 16)).place_unit(PlayerId(2), 0);
        let mut s = scan(&w);
        assert!(s.is_inspired(&mut w, Pos::new(10, 10)));
        // Whole window is flagged, including the enemy's cell.
        assert!(w.cell(Pos::new(5, 4)).inspired);
        assert!(w.cell(Pos::new(15, 16)).inspired);
        assert!(s.is_inspired(&mut w, Pos::new(15, 16)));
    }

    #[test]
    fn enemy_outside_window_ignored() {
        let mut w = world(32, 32);
        w.cell_mut(Pos::new(10, 10)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(16, 10)).place_unit(PlayerId(2), 0);
        w.cell_mut(Pos::new(10, 17)).place_unit(PlayerId(2), 0);
        let mut s = scan(&w);
        assert!(!s.is_inspired(&mut w, Pos::new(10, 10)));
    }

    #[test]
    fn friendly_units_do_not_inspire() {
        let mut w = world(32, 32);
        w.cell_mut(Pos::new(10, 10)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(11, 11)).place_unit(PlayerId(1), 0);
        let mut s = scan(&w);
        assert!(!s.is_inspired(&mut w, Pos::new(10, 10)));
    }

    #[test]
    fn earlier_miss_is_reused() {
        // The second unit sits inside the first window, whose scan found
        // nothing; its own window would have reached the enemy.
        let mut w = world(32, 32);
        w.cell_mut(Pos::new(10, 10)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(10, 16)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(10, 22)).place_unit(PlayerId(2), 0);
        let mut s = scan(&w);
        assert!(!s.is_inspired(&mut w, Pos::new(10, 10)));
        assert!(!s.is_inspired(&mut w, Pos::new(10, 16)));
    }

    #[test]
    fn window_clamped_at_corner() {
        let mut w = world(8, 8);
        w.cell_mut(Pos::new(0, 0)).place_unit(PlayerId(1), 0);
        w.cell_mut(Pos::new(5, 6)).place_unit(PlayerId(2), 0);
        let mut s = scan(&w);
        assert!(s.is_inspired(&mut w, Pos::new(0, 0)));
        assert!(!w.cell(Pos::new(7, 7)).inspired);
    }

    #[test]
    fn empty_cell_never_inspired() {
        let mut w = world(8, 8);
        let mut s = scan(&w);
        assert!(!s.is_inspired(&mut w, Pos::new(3, 3)));
    }
}
