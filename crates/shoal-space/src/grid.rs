//! Bounded 2D grid with row-major indexing.

use shoal_core::Direction;

use crate::error::SpaceError;

/// A cell position: `row` grows southward, `col` grows eastward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Pos {
    /// Construct a position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An inclusive rectangle of cells, already clamped to a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Top-left corner.
    pub min: Pos,
    /// Bottom-right corner (inclusive).
    pub max: Pos,
}

impl Rect {
    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        (self.max.row - self.min.row + 1) * (self.max.col - self.min.col + 1)
    }

    /// Whether `pos` lies inside the rectangle.
    pub fn contains(&self, pos: Pos) -> bool {
        (self.min.row..=self.max.row).contains(&pos.row)
            && (self.min.col..=self.max.col).contains(&pos.col)
    }

    /// Positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.min.row..=self.max.row)
            .flat_map(move |r| (self.min.col..=self.max.col).map(move |c| Pos::new(r, c)))
    }
}

/// A `rows × cols` grid whose edges are hard walls.
///
/// # Examples
///
/// ```
/// use shoal_space::{Grid, Pos};
/// use shoal_core::Direction;
///
/// let grid = Grid::new(4, 4).unwrap();
/// assert_eq!(grid.cell_count(), 16);
/// assert_eq!(grid.step(Pos::new(0, 0), Direction::North), None);
/// assert_eq!(grid.step(Pos::new(0, 0), Direction::East), Some(Pos::new(0, 1)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Maximum dimension size: offsets are computed in `i32`.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a grid with `rows * cols` cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        for (name, value) in [("rows", rows), ("cols", cols)] {
            if value > Self::MAX_DIM {
                return Err(SpaceError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `pos` is on the board.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major flat index of `pos`.
    pub fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} outside {self:?}");
        pos.row * self.cols + pos.col
    }

    /// Inverse of [`index`](Self::index).
    pub fn pos(&self, index: usize) -> Pos {
        Pos::new(index / self.cols, index % self.cols)
    }

    /// The neighbouring cell in `dir`, or `None` past a wall.
    pub fn step(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.offset_2d();
        let r = pos.row as i64 + i64::from(dr);
        let c = pos.col as i64 + i64::from(dc);
        if r < 0 || c < 0 || r >= self.rows as i64 || c >= self.cols as i64 {
            return None;
        }
        Some(Pos::new(r as usize, c as usize))
    }

    /// The window `center ± (half_height, half_width)`, clamped to the board.
    pub fn rect_around(&self, center: Pos, half_height: usize, half_width: usize) -> Rect {
        Rect {
            min: Pos::new(
                center.row.saturating_sub(half_height),
                center.col.saturating_sub(half_width),
            ),
            max: Pos::new(
                (center.row + half_height).min(self.rows - 1),
                (center.col + half_width).min(self.cols - 1),
            ),
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.cell_count()).map(move |i| Pos::new(i / cols, i % cols))
    }
}
