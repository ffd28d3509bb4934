//! Turns catalog entries into fresh board state.

use tile_puzzle_core::{CellCoord, Tile};

use crate::{grid::Grid, levels::LevelCatalog};

/// Board state produced by loading a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedLevel {
    /// Terrain with every authored placement applied.
    pub grid: Grid,
    /// Cell the player starts on.
    pub start: CellCoord,
    /// Batteries required to clear the level.
    pub batteries: u32,
}

/// Builds the board for the level at `level_index` (wrapped).
///
/// Inventory is never touched here; carrying keys and extinguishers across
/// transitions is the caller's concern.
#[must_use]
pub fn load(level_index: usize, catalog: &LevelCatalog) -> LoadedLevel {
    let definition = catalog.get(level_index);
    let mut grid = Grid::filled(Tile::Floor);
    for (cell, tile) in definition.placements() {
        grid.set(cell, tile);
    }

    LoadedLevel {
        grid,
        start: definition.start(),
        batteries: definition.batteries(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reproduces_the_authored_terrain() {
        let catalog = LevelCatalog::standard();
        for index in 0..catalog.count() {
            let loaded = load(index, &catalog);
            assert_eq!(&loaded.grid, catalog.get(index).terrain());
            assert_eq!(loaded.start, catalog.get(index).start());
        }
    }

    #[test]
    fn load_wraps_out_of_range_indices() {
        let catalog = LevelCatalog::standard();
        assert_eq!(load(catalog.count() + 2, &catalog), load(2, &catalog));
    }

    #[test]
    fn second_level_requires_four_batteries() {
        let loaded = load(1, &LevelCatalog::standard());
        assert_eq!(loaded.start, CellCoord::new(4, 7));
        assert_eq!(loaded.batteries, 4);
        assert_eq!(loaded.grid.tile(loaded.start), Some(Tile::Floor));
    }
}
