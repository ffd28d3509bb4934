//! Terrain layer of the live board.

use tile_puzzle_core::{CellCoord, Tile, GRID_COLUMNS, GRID_ROWS};

/// Fixed-size terrain layer.
///
/// The player is not stored here; moving the player never rewrites terrain.
/// Only permanent changes (pickups, extinguished fires, unlocked doors) do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[Tile; GRID_COLUMNS]; GRID_ROWS],
}

impl Grid {
    /// Creates a grid where every cell holds the provided tile.
    #[must_use]
    pub const fn filled(tile: Tile) -> Self {
        Self {
            cells: [[tile; GRID_COLUMNS]; GRID_ROWS],
        }
    }

    pub(crate) const fn from_cells(cells: [[Tile; GRID_COLUMNS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    /// Terrain stored at the provided cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        let (row, column) = index(cell)?;
        Some(self.cells[row][column])
    }

    pub(crate) fn set(&mut self, cell: CellCoord, tile: Tile) {
        if let Some((row, column)) = index(cell) {
            self.cells[row][column] = tile;
        }
    }

    /// Row-major view over every cell.
    #[must_use]
    pub fn rows(&self) -> &[[Tile; GRID_COLUMNS]; GRID_ROWS] {
        &self.cells
    }

    /// Iterates every cell in row-major order together with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .map(move |(column, tile)| (CellCoord::new(column as u32, row as u32), *tile))
        })
    }

    /// Number of cells holding the provided tile.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.iter().filter(|(_, candidate)| *candidate == tile).count()
    }
}

fn index(cell: CellCoord) -> Option<(usize, usize)> {
    if !cell.in_bounds() {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    Some((row, column))
}
