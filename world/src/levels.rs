//! Compiled-in level definitions and the ordered catalog that serves them.

use std::borrow::Cow;

use thiserror::Error;
use tile_puzzle_core::{CellCoord, Tile, GRID_COLUMNS, GRID_ROWS, START_GLYPH};

use crate::grid::Grid;

/// Immutable description of a single level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LevelDefinition {
    terrain: Grid,
    start: CellCoord,
    batteries: u32,
}

impl LevelDefinition {
    /// Parses a level from its glyph layout.
    ///
    /// `rows` holds one string per grid row, each exactly [`GRID_COLUMNS`]
    /// glyphs wide. Exactly one `@` marks the player start; the terrain under
    /// it is floor. `batteries` is the number of pickups needed to clear the
    /// level and may differ from the number of battery glyphs.
    pub const fn parse(rows: &[&str; GRID_ROWS], batteries: u32) -> Result<Self, LayoutError> {
        let mut cells = [[Tile::Floor; GRID_COLUMNS]; GRID_ROWS];
        let mut start: Option<CellCoord> = None;

        let mut row = 0;
        while row < GRID_ROWS {
            let glyphs = rows[row].as_bytes();
            if glyphs.len() != GRID_COLUMNS {
                return Err(LayoutError::RowLength {
                    row,
                    length: glyphs.len(),
                });
            }

            let mut column = 0;
            while column < GRID_COLUMNS {
                let glyph = glyphs[column];
                let cell = CellCoord::new(column as u32, row as u32);
                if glyph == START_GLYPH {
                    if let Some(first) = start {
                        return Err(LayoutError::DuplicateStart {
                            first,
                            second: cell,
                        });
                    }
                    start = Some(cell);
                } else {
                    match Tile::from_glyph(glyph) {
                        Some(tile) => cells[row][column] = tile,
                        None => {
                            return Err(LayoutError::UnknownGlyph {
                                cell,
                                glyph: glyph as char,
                            })
                        }
                    }
                }
                column += 1;
            }
            row += 1;
        }

        match start {
            Some(start) => Ok(Self {
                terrain: Grid::from_cells(cells),
                start,
                batteries,
            }),
            None => Err(LayoutError::MissingStart),
        }
    }

    /// Terrain authored for the level.
    #[must_use]
    pub const fn terrain(&self) -> &Grid {
        &self.terrain
    }

    /// Cell the player occupies when the level loads.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Batteries that must be collected to clear the level.
    #[must_use]
    pub const fn batteries(&self) -> u32 {
        self.batteries
    }

    /// Every authored cell that differs from plain floor.
    pub fn placements(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        self.terrain.iter().filter(|(_, tile)| *tile != Tile::Floor)
    }
}

/// Reasons a glyph layout cannot be turned into a level.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A row was not exactly one grid width long.
    #[error("row {row} is {length} glyphs wide, expected {}", GRID_COLUMNS)]
    RowLength {
        /// Offending row index.
        row: usize,
        /// Observed row width.
        length: usize,
    },
    /// A glyph did not name any tile.
    #[error("unknown glyph {glyph:?} at {cell:?}")]
    UnknownGlyph {
        /// Cell holding the glyph.
        cell: CellCoord,
        /// The glyph itself.
        glyph: char,
    },
    /// No start marker was present.
    #[error("layout has no start marker")]
    MissingStart,
    /// More than one start marker was present.
    #[error("layout has a second start marker at {second:?} (first at {first:?})")]
    DuplicateStart {
        /// First marker encountered.
        first: CellCoord,
        /// Second marker encountered.
        second: CellCoord,
    },
}

/// Reasons a catalog cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A catalog must hold at least one level.
    #[error("level catalog is empty")]
    Empty,
}

/// Ordered, non-empty sequence of levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Cow<'static, [LevelDefinition]>,
}

impl LevelCatalog {
    /// The twelve reference levels.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            levels: Cow::Borrowed(&STANDARD_LEVELS[..]),
        }
    }

    /// Builds a catalog from custom levels.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            levels: Cow::Owned(levels),
        })
    }

    /// Level stored at `index`, wrapping past the end of the catalog.
    #[must_use]
    pub fn get(&self, index: usize) -> &LevelDefinition {
        &self.levels[self.wrap(index)]
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn count(&self) -> usize {
        self.levels.len()
    }

    /// Reduces `index` modulo the number of levels.
    #[must_use]
    pub fn wrap(&self, index: usize) -> usize {
        index % self.count()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

const fn built_in(rows: &[&str; GRID_ROWS], batteries: u32) -> LevelDefinition {
    match LevelDefinition::parse(rows, batteries) {
        Ok(level) => level,
        Err(_) => panic!("built-in level layout is malformed"),
    }
}

static STANDARD_LEVELS: [LevelDefinition; 12] = [
    built_in(
        &[
            "....................",
            "....................",
            "....#############...",
            "....#..........b#...",
            "....#...........#...",
            "....#..##########...",
            "....#...........#...",
            "....#...........#...",
            "....##.###.###.##...",
            "....#...#...#...#...",
            "....#.b.#.@.#.b.#...",
            "....#...#...#...#...",
            "....#############...",
            "....................",
            "....................",
        ],
        3,
    ),
    built_in(
        &[
            "....................",
            ".....#########......",
            ".....#...b...#......",
            ".....#.......#......",
            ".....#b.#^#^^#......",
            "..####vv#.#.b#......",
            "..#.....#.#..#......",
            "..#.@...#b<..#......",
            "..#.....#.#..#......",
            "..####..#.#..#......",
            ".....#..#^#..#......",
            ".....#.......#......",
            ".....#.......#......",
            ".....#########......",
            "....................",
        ],
        4,
    ),
    built_in(
        &[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "...##############...",
            "...#...^>v>>^...#...",
            "...#.b.>>><>>.@.#...",
            "...#...><>>^>...#...",
            "...##############...",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
        1,
    ),
    built_in(
        &[
            "...###############..",
            "...#....>...>....#..",
            "...#....#>>>#....#..",
            "...#..b.#...#.b..#..",
            "...#....#...#....#..",
            "...#^####...####v#..",
            "...#.>.........<.#..",
            "...#.>....@....<.#..",
            "...#.>.........<.#..",
            "...#^####...####v#..",
            "...#....#...#....#..",
            "...#..b.#...#.b..#..",
            "...#....#^^^#....#..",
            "...#....<...<....#..",
            "...###############..",
        ],
        4,
    ),
    built_in(
        &[
            "....................",
            ".##################.",
            ".#@..#....<.......#.",
            ".###.#.##.#.#.###.#.",
            ".#b..<.b#.#.#.#b..#.",
            ".##.###.#.#..^###.#.",
            ".#....#.#.###..#..#.",
            ".####.#.#.>.##.#.##.",
            ".#......#.#b.#b#.##.",
            ".#.######.##.###.##.",
            ".#.#b..<...#..>...#.",
            ".#.###.#.#.####.#.#.",
            ".#.....#b#....>..b#.",
            ".##################.",
            "....................",
        ],
        8,
    ),
    built_in(
        &[
            "....................",
            "....................",
            "......#########.....",
            "......#...#...#.....",
            "......#.b.#.k.#.....",
            "......#...#...#.....",
            "......##D###.##.....",
            "......#.......#.....",
            "......#.......#.....",
            "......#...@...#.....",
            "......#.......#.....",
            "......#########.....",
            "....................",
            "....................",
            "....................",
        ],
        1,
    ),
    built_in(
        &[
            "....................",
            ".......#######......",
            ".......#fffb.#......",
            ".......#...f.#......",
            ".......#.f...#......",
            ".......#..f..#......",
            ".......#f..f.#......",
            ".......#.f..f#......",
            ".......#..f..#......",
            ".......#f...f#......",
            ".......#..@..#......",
            ".......#.....#......",
            ".......#######......",
            "....................",
            "....................",
        ],
        1,
    ),
    built_in(
        &[
            "....................",
            "....................",
            "..################..",
            "..#..#...#...#...#..",
            "..#..#.k.#.b.#.k.#..",
            "..#..#...#...#...#..",
            "..#..#D####D####D##.",
            "..#@.............f#.",
            "..#..#D####D####D##.",
            "..#..#...#...#...#..",
            "..#..#.k...k.#.b.#..",
            "..#kk#...#...#...#..",
            "..################..",
            "....................",
            "....................",
        ],
        2,
    ),
    built_in(
        &[
            "....................",
            "..###########.......",
            "..#.........#.......",
            "..#.@.....e.#.......",
            "..#.........#####...",
            "..#######...ff..#...",
            "........#...ff.b#...",
            "........#...ff..#...",
            "........#fff#####...",
            "........#...#.......",
            "........#ebe#.......",
            "........#...#.......",
            "........#####.......",
            "....................",
            "....................",
        ],
        2,
    ),
    built_in(
        &[
            "....................",
            "....................",
            "......#########.....",
            "......#...#...#.....",
            "......#.e.Dfb.#.....",
            "......#...#...#.....",
            "......#.#.#####.....",
            "......#.......#.....",
            "......#.@...k.#.....",
            "......#.......#.....",
            "......#########.....",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
        1,
    ),
    built_in(
        &[
            "....................",
            ".........#####......",
            ".....###.#.e.#......",
            ".....#k#.#.k.#......",
            ".....#.#.#...#......",
            ".#####f####D#######.",
            ".#......e...ff#...#.",
            ".#.@........ffDf.b#.",
            ".#......k...ff#...#.",
            ".#####D####D#######.",
            ".....#.#.#...#......",
            ".....#e#.#.k.#......",
            ".....###.#.e.#......",
            ".........#####......",
            "....................",
        ],
        1,
    ),
    built_in(
        &[
            "....................",
            ".##################.",
            ".#.k.f....>..f#...#.",
            ".#...f....>..fD.b.#.",
            ".#.e.f....>..f#...#.",
            ".#####....#########.",
            ".#...#....#...>...#.",
            ".#.e.#....<...>.k.#.",
            ".#...#....#...>...#.",
            ".##D##....#^^^#vv<#.",
            ".#........#...<...#.",
            ".#.@......>...<...#.",
            ".#........#...^...#.",
            ".##################.",
            "....................",
        ],
        1,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_rows() -> Vec<String> {
        vec![".".repeat(GRID_COLUMNS); GRID_ROWS]
    }

    fn parse_rows(rows: &[String], batteries: u32) -> Result<LevelDefinition, LayoutError> {
        let refs: [&str; GRID_ROWS] = std::array::from_fn(|index| rows[index].as_str());
        LevelDefinition::parse(&refs, batteries)
    }

    #[test]
    fn standard_catalog_holds_twelve_levels() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.count(), 12);
        assert_eq!(catalog.wrap(12), 0);
        assert_eq!(catalog.wrap(13), 1);
        assert_eq!(catalog.get(12), catalog.get(0));
    }

    #[test]
    fn first_level_matches_reference_layout() {
        let level = LevelCatalog::standard().get(0).clone();
        assert_eq!(level.start(), CellCoord::new(10, 10));
        assert_eq!(level.batteries(), 3);
        assert_eq!(level.terrain().tile(CellCoord::new(6, 10)), Some(Tile::Battery));
        assert_eq!(level.terrain().tile(CellCoord::new(8, 10)), Some(Tile::Wall));
        assert_eq!(level.terrain().tile(CellCoord::new(10, 10)), Some(Tile::Floor));
    }

    #[test]
    fn every_standard_level_places_its_required_batteries() {
        let catalog = LevelCatalog::standard();
        for index in 0..catalog.count() {
            let level = catalog.get(index);
            assert_eq!(
                level.terrain().count(Tile::Battery),
                level.batteries() as usize,
                "level {index} battery glyphs disagree with its quota",
            );
            assert_eq!(level.terrain().tile(level.start()), Some(Tile::Floor));
        }
    }

    #[test]
    fn placements_skip_floor() {
        let level = LevelCatalog::standard().get(5).clone();
        assert!(level.placements().all(|(_, tile)| tile != Tile::Floor));
        assert!(level
            .placements()
            .any(|(cell, tile)| cell == CellCoord::new(8, 6) && tile == Tile::Door));
    }

    #[test]
    fn parse_rejects_missing_start() {
        assert_eq!(parse_rows(&blank_rows(), 0), Err(LayoutError::MissingStart));
    }

    #[test]
    fn parse_rejects_second_start() {
        let mut rows = blank_rows();
        rows[1].replace_range(2..3, "@");
        rows[4].replace_range(7..8, "@");
        assert_eq!(
            parse_rows(&rows, 0),
            Err(LayoutError::DuplicateStart {
                first: CellCoord::new(2, 1),
                second: CellCoord::new(7, 4),
            })
        );
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let mut rows = blank_rows();
        rows[0].replace_range(0..1, "@");
        rows[3].replace_range(5..6, "?");
        assert_eq!(
            parse_rows(&rows, 0),
            Err(LayoutError::UnknownGlyph {
                cell: CellCoord::new(5, 3),
                glyph: '?',
            })
        );
    }

    #[test]
    fn parse_rejects_short_rows() {
        let mut rows = blank_rows();
        rows[2] = "..@".to_owned();
        assert_eq!(
            parse_rows(&rows, 0),
            Err(LayoutError::RowLength { row: 2, length: 3 })
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(LevelCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }
}
