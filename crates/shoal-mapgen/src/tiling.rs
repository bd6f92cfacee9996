//! Quadrant tiling and mirroring.

use crate::error::MapGenError;

/// How the map splits into identical player quadrants.
///
/// Columns double first, then rows, alternating until the tile count
/// equals the player count. Two players get `2 × 1`, four get `2 × 2`,
/// eight get `4 × 2`, sixteen get `4 × 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    /// Quadrant copies across.
    pub cols: u32,
    /// Quadrant copies down.
    pub rows: u32,
}

impl TileLayout {
    /// Layout for `num_players`, which must be a power of two in `2..=16`.
    pub fn for_players(num_players: u8) -> Result<Self, MapGenError> {
        if !(2..=16).contains(&num_players) || !num_players.is_power_of_two() {
            return Err(MapGenError::PlayerCount { num_players });
        }
        let mut layout = TileLayout { cols: 1, rows: 1 };
        while layout.count() < u32::from(num_players) {
            layout.cols *= 2;
            if layout.count() == u32::from(num_players) {
                break;
            }
            layout.rows *= 2;
        }
        Ok(layout)
    }

    /// Total number of tiles.
    pub fn count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Quadrant `(rows, cols)` for a square map of `side` cells.
    pub fn quadrant(&self, side: u32) -> Result<(usize, usize), MapGenError> {
        for tiles in [self.rows, self.cols] {
            if side % tiles != 0 || side / tiles == 0 {
                return Err(MapGenError::Indivisible { side, tiles });
            }
        }
        Ok(((side / self.rows) as usize, (side / self.cols) as usize))
    }

    /// Player number (1-based) owning tile `(tile_row, tile_col)`.
    ///
    /// Tiles are numbered column-major: down the first column, then the next.
    pub fn player_at(&self, tile_row: u32, tile_col: u32) -> u8 {
        (1 + tile_col * self.rows + tile_row) as u8
    }
}

/// Mirror a row-major `rows × cols` block left-to-right, doubling its width.
pub fn mirror_horizontal<T: Copy>(cells: &[T], rows: usize, cols: usize) -> Vec<T> {
    debug_assert_eq!(cells.len(), rows * cols);
    let mut out = Vec::with_capacity(cells.len() * 2);
    for row in cells.chunks_exact(cols) {
        out.extend_from_slice(row);
        out.extend(row.iter().rev());
    }
    out
}

/// Mirror a row-major `rows × cols` block top-to-bottom, doubling its height.
pub fn mirror_vertical<T: Copy>(cells: &[T], rows: usize, cols: usize) -> Vec<T> {
    debug_assert_eq!(cells.len(), rows * cols);
    let mut out = Vec::with_capacity(cells.len() * 2);
    out.extend_from_slice(cells);
    for row in cells.chunks_exact(cols).rev() {
        out.extend_from_slice(row);
    }
    out
}

/// Expand one quadrant to the full map by alternating mirrors.
///
/// Returns the expanded cells with their `(rows, cols)`.
pub fn mirror_to_layout<T: Copy>(
    quadrant: Vec<T>,
    rows: usize,
    cols: usize,
    layout: TileLayout,
) -> (Vec<T>, usize, usize) {
    let (mut cells, mut rows, mut cols) = (quadrant, rows, cols);
    let mut tiles = 1;
    while tiles < layout.count() {
        cells = mirror_horizontal(&cells, rows, cols);
        cols *= 2;
        tiles *= 2;
        if tiles == layout.count() {
            break;
        }
        cells = mirror_vertical(&cells, rows, cols);
        rows *= 2;
        tiles *= 2;
    }
    (cells, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_for_supported_counts() {
        let expect = [(2, (2, 1)), (4, (2, 2)), (8, (4, 2)), (16, (4, 4))];
        for (n, (cols, rows)) in expect {
            assert_eq!(TileLayout::for_players(n), Ok(TileLayout { cols, rows }));
        }
    }

    #[test]
    fn unsupported_counts_rejected() {
        for n in [0, 1, 3, 6, 32] {
            assert_eq!(
                TileLayout::for_players(n),
                Err(MapGenError::PlayerCount { num_players: n })
            );
        }
    }

    #[test]
    fn quadrant_shapes() {
        let two = TileLayout::for_players(2).unwrap();
        assert_eq!(two.quadrant(32), Ok((32, 16)));
        let eight = TileLayout::for_players(8).unwrap();
        assert_eq!(eight.quadrant(48), Ok((24, 12)));
        assert_eq!(
            eight.quadrant(42),
            Err(MapGenError::Indivisible { side: 42, tiles: 4 })
        );
    }

    #[test]
    fn players_numbered_column_major() {
        let four = TileLayout::for_players(4).unwrap();
        assert_eq!(four.player_at(0, 0), 1);
        assert_eq!(four.player_at(1, 0), 2);
        assert_eq!(four.player_at(0, 1), 3);
        assert_eq!(four.player_at(1, 1), 4);
    }

    #[test]
    fn horizontal_mirror_reverses_rows() {
        let out = mirror_horizontal(&[1, 2, 3, 4], 2, 2);
        assert_eq!(out, vec![1, 2, 2, 1, 3, 4, 4, 3]);
    }

    #[test]
    fn vertical_mirror_reverses_row_order() {
        let out = mirror_vertical(&[1, 2, 3, 4], 2, 2);
        assert_eq!(out, vec![1, 2, 3, 4, 3, 4, 1, 2]);
    }

    #[test]
    fn mirror_to_layout_alternates() {
        let layout = TileLayout::for_players(8).unwrap();
        let (cells, rows, cols) = mirror_to_layout(vec![7u8; 6], 2, 3, layout);
        assert_eq!((rows, cols), (4, 12));
        assert_eq!(cells.len(), 48);
    }
}
