//! Symmetric map generation from one noise quadrant.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shoal_core::{Cell, GameConstants, PlayerId, Structure};
use shoal_space::{Grid, MapSize, Pos};

use crate::error::MapGenError;
use crate::noise::{base_noise, fractal_field};
use crate::tiling::{mirror_to_layout, TileLayout};

/// A freshly generated board.
///
/// Banks are not part of the map; the world seeds them from
/// `GameConstants::starting_bank`.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    /// Board dimensions.
    pub grid: Grid,
    /// Row-major cells. Only floor, factory structures and their owners are set.
    pub cells: Vec<Cell>,
    /// Number of players the map was tiled for.
    pub num_players: u8,
    /// Tile layout used for mirroring.
    pub layout: TileLayout,
    /// Per-cell production ceiling drawn for this map.
    pub production_ceiling: u32,
}

impl GeneratedMap {
    /// Factory positions in player order.
    pub fn factories(&self) -> Vec<(PlayerId, Pos)> {
        let mut found: Vec<(PlayerId, Pos)> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.structure == Structure::Factory)
            .filter_map(|(i, c)| c.owner.map(|p| (p, self.grid.pos(i))))
            .collect();
        found.sort();
        found
    }

    /// Total floor resource on the board.
    pub fn total_floor(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.floor)).sum()
    }
}

/// Builds mirrored maps from the production constants.
#[derive(Clone, Debug)]
pub struct MapGenerator {
    persistence: f64,
    min_production: u32,
    max_production: u32,
}

impl MapGenerator {
    /// Capture the generation constants, rejecting unusable ones.
    pub fn new(constants: &GameConstants) -> Result<Self, MapGenError> {
        if !constants.persistence.is_finite() || constants.persistence <= 0.0 {
            return Err(MapGenError::InvalidConstants {
                reason: format!("persistence must be positive, got {}", constants.persistence),
            });
        }
        if constants.min_cell_production > constants.max_cell_production {
            return Err(MapGenError::InvalidConstants {
                reason: format!(
                    "min_cell_production ({}) exceeds max_cell_production ({})",
                    constants.min_cell_production, constants.max_cell_production
                ),
            });
        }
        Ok(Self {
            persistence: constants.persistence,
            min_production: constants.min_cell_production,
            max_production: constants.max_cell_production,
        })
    }

    /// Generate a map, drawing all randomness from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        size: MapSize,
        num_players: u8,
        rng: &mut R,
    ) -> Result<GeneratedMap, MapGenError> {
        let layout = TileLayout::for_players(num_players)?;
        let side = size.side();
        let (q_rows, q_cols) = layout.quadrant(side)?;

        let ceiling = rng.random_range(self.min_production..=self.max_production);
        let mut quadrant = self.quadrant_floor(q_rows, q_cols, ceiling, rng);

        let factory = factory_position(q_rows, q_cols, num_players);
        let factory_idx = factory.row * q_cols + factory.col;
        quadrant[factory_idx].floor = 0;
        quadrant[factory_idx].structure = Structure::Factory;

        let (mut cells, rows, cols) = mirror_to_layout(quadrant, q_rows, q_cols, layout);
        for (i, cell) in cells.iter_mut().enumerate() {
            if cell.structure == Structure::Factory {
                let (r, c) = (i / cols, i % cols);
                let tile_row = (r / q_rows) as u32;
                let tile_col = (c / q_cols) as u32;
                cell.owner = Some(PlayerId(layout.player_at(tile_row, tile_col)));
            }
        }

        let grid = Grid::new(rows, cols).map_err(|e| MapGenError::InvalidConstants {
            reason: format!("map shape {rows}x{cols}: {e}"),
        })?;
        Ok(GeneratedMap {
            grid,
            cells,
            num_players,
            layout,
            production_ceiling: ceiling,
        })
    }

    /// Generate a map from a `u64` seed.
    pub fn generate_seeded(
        &self,
        size: MapSize,
        num_players: u8,
        seed: u64,
    ) -> Result<GeneratedMap, MapGenError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(size, num_players, &mut rng)
    }

    // Fractal noise, squared, scaled so its maximum hits `ceiling`, rounded.
    fn quadrant_floor<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        ceiling: u32,
        rng: &mut R,
    ) -> Vec<Cell> {
        let base = base_noise(rows, cols, rng);
        let mut field = fractal_field(&base, self.persistence);
        field.map_in_place(|v| v * v);
        let max = field.max();
        if max > 0.0 {
            let scale = f64::from(ceiling) / max;
            field.map_in_place(|v| v * scale);
        }
        field
            .values()
            .iter()
            .map(|&v| Cell::with_floor(v.round().clamp(0.0, f64::from(ceiling)) as u32))
            .collect()
    }
}

/// Factory cell within a `rows × cols` quadrant.
///
/// The default is the quadrant centre. For quadrant widths in `16..=40`
/// the factory column is pulled toward the inner edge, and with more than
/// two players the row is adjusted the same way when the height is in range.
pub fn factory_position(rows: usize, cols: usize, num_players: u8) -> Pos {
    let mut pos = Pos::new(rows / 2, cols / 2);
    if (16..=40).contains(&cols) && (16..=40).contains(&rows) {
        pos.col = inner_offset(cols);
        if num_players > 2 {
            pos.row = inner_offset(rows);
        }
    }
    pos
}

fn inner_offset(extent: usize) -> usize {
    (8.0 + (extent as f64 - 16.0) / 24.0 * 20.0) as usize
}
