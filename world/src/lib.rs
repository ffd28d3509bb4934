#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Tile Puzzle.
//!
//! A [`Session`] owns the terrain layer, the player position, the inventory,
//! and level progress. Drivers hand it one [`Action`] per tick through
//! [`apply`]; everything else reads it through the [`query`] module.

mod grid;
mod levels;
mod loader;
mod movement;

pub use grid::Grid;
pub use levels::{CatalogError, LayoutError, LevelCatalog, LevelDefinition};
pub use loader::{load, LoadedLevel};

use tile_puzzle_core::{Action, CellCoord, Event, Inventory, Progress};
use tracing::debug;

/// Mutable aggregate driven by the move resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    catalog: LevelCatalog,
    grid: Grid,
    player: CellCoord,
    inventory: Inventory,
    progress: Progress,
}

impl Session {
    /// Creates a session on the first reference level with an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(LevelCatalog::standard(), 0)
    }

    /// Creates a session over `catalog`, starting on `level_index` (wrapped).
    #[must_use]
    pub fn with_catalog(catalog: LevelCatalog, level_index: usize) -> Self {
        let level_index = catalog.wrap(level_index);
        let loaded = load(level_index, &catalog);
        Self {
            catalog,
            grid: loaded.grid,
            player: loaded.start,
            inventory: Inventory::default(),
            progress: Progress {
                level_index,
                batteries_remaining: loaded.batteries,
            },
        }
    }

    /// Replaces the carried inventory.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    fn load_level(&mut self, level_index: usize, out_events: &mut Vec<Event>) {
        let level_index = self.catalog.wrap(level_index);
        let loaded = load(level_index, &self.catalog);
        debug!(
            level_index,
            start = ?loaded.start,
            batteries = loaded.batteries,
            "level loaded"
        );

        self.grid = loaded.grid;
        self.player = loaded.start;
        self.progress = Progress {
            level_index,
            batteries_remaining: loaded.batteries,
        };
        out_events.push(Event::LevelLoaded {
            level: level_index,
            start: loaded.start,
            batteries: loaded.batteries,
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves one action against the session, mutating it deterministically.
///
/// [`Action::None`] is a no-op and emits nothing. Every movement action emits
/// at least one event; rejected moves leave the session untouched.
pub fn apply(session: &mut Session, action: Action, out_events: &mut Vec<Event>) {
    let Some(direction) = action.direction() else {
        return;
    };
    movement::resolve(session, direction, out_events);
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use tile_puzzle_core::{
        CellCoord, Inventory, Observation, Progress, Tile, TileCode, GRID_COLUMNS, GRID_ROWS,
    };

    use super::{Grid, LevelCatalog, Session};

    /// Terrain layer of the board.
    #[must_use]
    pub fn grid(session: &Session) -> &Grid {
        &session.grid
    }

    /// Catalog the session draws levels from.
    #[must_use]
    pub fn catalog(session: &Session) -> &LevelCatalog {
        &session.catalog
    }

    /// Cell the player occupies.
    #[must_use]
    pub fn player(session: &Session) -> CellCoord {
        session.player
    }

    /// Terrain beneath the player.
    ///
    /// Pickups turn into floor as they are collected, so this is always floor,
    /// an arrow, or an open door.
    #[must_use]
    pub fn terrain_under_player(session: &Session) -> Tile {
        session.grid.tile(session.player).unwrap_or(Tile::Floor)
    }

    /// Consumables carried by the player.
    #[must_use]
    pub fn inventory(session: &Session) -> Inventory {
        session.inventory
    }

    /// Active level and remaining battery quota.
    #[must_use]
    pub fn progress(session: &Session) -> Progress {
        session.progress
    }

    /// Observation code at `cell`, including the player layer.
    #[must_use]
    pub fn code_at(session: &Session, cell: CellCoord) -> Option<TileCode> {
        let tile = session.grid.tile(cell)?;
        if cell == session.player {
            Some(TileCode::occupied(tile))
        } else {
            Some(TileCode::from(tile))
        }
    }

    /// Captures an owned snapshot for renderers and agents.
    #[must_use]
    pub fn observation(session: &Session) -> Observation {
        let mut cells = [[TileCode::Floor; GRID_COLUMNS]; GRID_ROWS];
        for (codes, tiles) in cells.iter_mut().zip(session.grid.rows()) {
            for (code, tile) in codes.iter_mut().zip(tiles) {
                *code = TileCode::from(*tile);
            }
        }

        let row = session.player.row() as usize;
        let column = session.player.column() as usize;
        if let Some(code) = cells.get_mut(row).and_then(|codes| codes.get_mut(column)) {
            *code = TileCode::occupied(terrain_under_player(session));
        }

        Observation {
            cells,
            player: session.player,
            inventory: session.inventory,
            progress: session.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_puzzle_core::{TileCode, GRID_COLUMNS};

    #[test]
    fn new_session_starts_on_first_level() {
        let session = Session::new();
        assert_eq!(query::player(&session), CellCoord::new(10, 10));
        assert_eq!(
            query::progress(&session),
            Progress {
                level_index: 0,
                batteries_remaining: 3,
            }
        );
        assert_eq!(query::inventory(&session), Inventory::default());
    }

    #[test]
    fn with_catalog_wraps_the_starting_level() {
        let session = Session::with_catalog(LevelCatalog::standard(), 13);
        assert_eq!(query::progress(&session).level_index, 1);
        assert_eq!(query::player(&session), CellCoord::new(4, 7));
    }

    #[test]
    fn none_action_changes_nothing() {
        let mut session = Session::new();
        let before = session.clone();
        let mut events = Vec::new();

        apply(&mut session, Action::None, &mut events);

        assert!(events.is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn observation_marks_exactly_one_player_cell() {
        let session = Session::new();
        let observation = query::observation(&session);

        let players: Vec<(usize, usize)> = observation
            .cells
            .iter()
            .enumerate()
            .flat_map(|(row, codes)| {
                codes
                    .iter()
                    .enumerate()
                    .filter(|(_, code)| code.is_player())
                    .map(move |(column, _)| (row, column))
            })
            .collect();

        assert_eq!(players, vec![(10, 10)]);
        assert_eq!(observation.code_at(CellCoord::new(10, 10)), Some(TileCode::Player));
        assert_eq!(observation.code_at(CellCoord::new(6, 10)), Some(TileCode::Battery));
        assert_eq!(observation.cells[0].len(), GRID_COLUMNS);
        assert_eq!(observation.aux(), [0, 0]);
    }

    #[test]
    fn code_at_matches_the_observation() {
        let session = Session::new();
        let observation = query::observation(&session);
        for (cell, _) in query::grid(&session).iter() {
            assert_eq!(query::code_at(&session, cell), observation.code_at(cell));
        }
    }
}
