#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Puzzle engine.
//!
//! This crate defines the vocabulary that connects drivers, the authoritative
//! world, and pure systems. Drivers submit one [`Action`] per tick, the world
//! resolves it via its `apply` entry point, and then reports [`Event`] values
//! describing what changed. Renderers and agents never reach into the world
//! directly; they consume an owned [`Observation`] encoded with [`TileCode`].

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tile Puzzle.";

/// Number of tile columns in every level.
pub const GRID_COLUMNS: usize = 20;

/// Number of tile rows in every level.
pub const GRID_ROWS: usize = 15;

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset applied to a cell when stepping in this direction,
    /// expressed as `(column, row)`.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// The five-valued action alphabet accepted once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Attempt a step toward decreasing rows.
    Up,
    /// Attempt a step toward increasing rows.
    Down,
    /// Attempt a step toward decreasing columns.
    Left,
    /// Attempt a step toward increasing columns.
    Right,
    /// Do nothing this tick.
    #[default]
    None,
}

impl Action {
    /// Every action in a stable order.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::None,
    ];

    /// Interprets a textual action name.
    ///
    /// Matching ignores case and surrounding whitespace. `nothing` is accepted
    /// as an alias of `none`. Any other input yields [`Action::None`] rather
    /// than an error, because drivers must never be able to wedge the engine
    /// with an unexpected token.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("up") {
            Self::Up
        } else if value.eq_ignore_ascii_case("down") {
            Self::Down
        } else if value.eq_ignore_ascii_case("left") {
            Self::Left
        } else if value.eq_ignore_ascii_case("right") {
            Self::Right
        } else {
            Self::None
        }
    }

    /// Movement direction requested by the action, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::None => None,
        }
    }

    /// Lowercase name of the action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        }
    }
}

impl FromStr for Action {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

/// Terrain kind stored in a single grid cell.
///
/// The player is tracked separately from terrain, so a cell never needs to
/// encode "player standing on X".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable empty ground.
    Floor,
    /// Impassable from every direction.
    Wall,
    /// Collectible that counts toward clearing the level.
    Battery,
    /// Locked door; consumes a key to open.
    Door,
    /// Door that has been unlocked and is walkable.
    OpenDoor,
    /// Collectible that unlocks one door.
    Key,
    /// Collectible that puts out one fire.
    Extinguisher,
    /// Hazard that restarts the level unless an extinguisher is held.
    Fire,
    /// One-way tile pointing in the given direction.
    Arrow(Direction),
}

impl Tile {
    /// Authoring glyph used by compiled-in level layouts.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Battery => 'b',
            Self::Door => 'D',
            Self::OpenDoor => 'O',
            Self::Key => 'k',
            Self::Extinguisher => 'e',
            Self::Fire => 'f',
            Self::Arrow(Direction::Right) => '>',
            Self::Arrow(Direction::Left) => '<',
            Self::Arrow(Direction::Down) => 'v',
            Self::Arrow(Direction::Up) => '^',
        }
    }

    /// Decodes an authoring glyph. The start marker `@` is not terrain and
    /// therefore yields `None`.
    #[must_use]
    pub const fn from_glyph(glyph: u8) -> Option<Self> {
        match glyph {
            b'.' => Some(Self::Floor),
            b'#' => Some(Self::Wall),
            b'b' => Some(Self::Battery),
            b'D' => Some(Self::Door),
            b'O' => Some(Self::OpenDoor),
            b'k' => Some(Self::Key),
            b'e' => Some(Self::Extinguisher),
            b'f' => Some(Self::Fire),
            b'>' => Some(Self::Arrow(Direction::Right)),
            b'<' => Some(Self::Arrow(Direction::Left)),
            b'v' => Some(Self::Arrow(Direction::Down)),
            b'^' => Some(Self::Arrow(Direction::Up)),
            _ => None,
        }
    }
}

/// Glyph marking the player start cell in level layouts.
pub const START_GLYPH: u8 = b'@';

/// Single-layer cell encoding exposed to renderers and agents.
///
/// Discriminants match the numeric codes agents have always been fed, so a
/// grid of `TileCode::value` is interchangeable with the classic integer
/// observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileCode {
    /// Empty floor.
    Floor = 0,
    /// Player standing on floor.
    Player = 1,
    /// Wall.
    Wall = 2,
    /// Battery.
    Battery = 3,
    /// Closed door.
    Door = 4,
    /// Key.
    Key = 5,
    /// Fire extinguisher.
    Extinguisher = 6,
    /// Fire.
    Fire = 7,
    /// One-way arrow pointing right.
    ArrowRight = 8,
    /// One-way arrow pointing left.
    ArrowLeft = 9,
    /// One-way arrow pointing down.
    ArrowDown = 10,
    /// One-way arrow pointing up.
    ArrowUp = 11,
    /// Open door.
    OpenDoor = 12,
    /// Player standing on a right arrow.
    PlayerOnArrowRight = 13,
    /// Player standing on a left arrow.
    PlayerOnArrowLeft = 14,
    /// Player standing on a down arrow.
    PlayerOnArrowDown = 15,
    /// Player standing on an up arrow.
    PlayerOnArrowUp = 16,
    /// Player standing in an open door.
    PlayerOnOpenDoor = 17,
}

impl TileCode {
    /// Code describing the player standing on the provided terrain.
    ///
    /// Only arrows and open doors have composite codes; the player can never
    /// remain on a pickup or hazard because those turn into floor on entry.
    #[must_use]
    pub const fn occupied(terrain: Tile) -> Self {
        match terrain {
            Tile::Arrow(Direction::Right) => Self::PlayerOnArrowRight,
            Tile::Arrow(Direction::Left) => Self::PlayerOnArrowLeft,
            Tile::Arrow(Direction::Down) => Self::PlayerOnArrowDown,
            Tile::Arrow(Direction::Up) => Self::PlayerOnArrowUp,
            Tile::OpenDoor => Self::PlayerOnOpenDoor,
            _ => Self::Player,
        }
    }

    /// Numeric value of the code.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Reports whether the code marks the player's cell.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(
            self,
            Self::Player
                | Self::PlayerOnArrowRight
                | Self::PlayerOnArrowLeft
                | Self::PlayerOnArrowDown
                | Self::PlayerOnArrowUp
                | Self::PlayerOnOpenDoor
        )
    }

    /// Terrain represented by the code, with the player layer stripped.
    #[must_use]
    pub const fn terrain(self) -> Tile {
        match self {
            Self::Floor | Self::Player => Tile::Floor,
            Self::Wall => Tile::Wall,
            Self::Battery => Tile::Battery,
            Self::Door => Tile::Door,
            Self::Key => Tile::Key,
            Self::Extinguisher => Tile::Extinguisher,
            Self::Fire => Tile::Fire,
            Self::ArrowRight | Self::PlayerOnArrowRight => Tile::Arrow(Direction::Right),
            Self::ArrowLeft | Self::PlayerOnArrowLeft => Tile::Arrow(Direction::Left),
            Self::ArrowDown | Self::PlayerOnArrowDown => Tile::Arrow(Direction::Down),
            Self::ArrowUp | Self::PlayerOnArrowUp => Tile::Arrow(Direction::Up),
            Self::OpenDoor | Self::PlayerOnOpenDoor => Tile::OpenDoor,
        }
    }
}

impl From<Tile> for TileCode {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Floor => Self::Floor,
            Tile::Wall => Self::Wall,
            Tile::Battery => Self::Battery,
            Tile::Door => Self::Door,
            Tile::OpenDoor => Self::OpenDoor,
            Tile::Key => Self::Key,
            Tile::Extinguisher => Self::Extinguisher,
            Tile::Fire => Self::Fire,
            Tile::Arrow(Direction::Right) => Self::ArrowRight,
            Tile::Arrow(Direction::Left) => Self::ArrowLeft,
            Tile::Arrow(Direction::Down) => Self::ArrowDown,
            Tile::Arrow(Direction::Up) => Self::ArrowUp,
        }
    }
}

/// Raised when a numeric cell code has no [`TileCode`] counterpart.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown tile code {0}")]
pub struct UnknownTileCode(pub u8);

impl TryFrom<u8> for TileCode {
    type Error = UnknownTileCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Floor,
            1 => Self::Player,
            2 => Self::Wall,
            3 => Self::Battery,
            4 => Self::Door,
            5 => Self::Key,
            6 => Self::Extinguisher,
            7 => Self::Fire,
            8 => Self::ArrowRight,
            9 => Self::ArrowLeft,
            10 => Self::ArrowDown,
            11 => Self::ArrowUp,
            12 => Self::OpenDoor,
            13 => Self::PlayerOnArrowRight,
            14 => Self::PlayerOnArrowLeft,
            15 => Self::PlayerOnArrowDown,
            16 => Self::PlayerOnArrowUp,
            17 => Self::PlayerOnOpenDoor,
            other => return Err(UnknownTileCode(other)),
        };
        Ok(code)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell one step away, or `None` when the step would leave
    /// the standard grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dc, dr) = direction.offset();
        let column = self.column.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        let candidate = CellCoord::new(column, row);
        candidate.in_bounds().then_some(candidate)
    }

    /// Reports whether the cell lies inside the standard grid.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        (self.column as usize) < GRID_COLUMNS && (self.row as usize) < GRID_ROWS
    }
}

/// Consumables carried by the player. Survives level transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    /// Keys available for unlocking doors.
    pub keys: u32,
    /// Extinguishers available for putting out fires.
    pub extinguishers: u32,
}

/// Position within the level sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    /// Zero-based index of the active level.
    pub level_index: usize,
    /// Batteries still required to clear the active level.
    pub batteries_remaining: u32,
}

/// Collectibles that are added to the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// A door key.
    Key,
    /// A fire extinguisher.
    Extinguisher,
}

/// Reasons a movement action may be rejected.
///
/// Rejections never alter state; they exist so drivers and agents can tell
/// blocked moves apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The target cell is a wall.
    Wall,
    /// The target arrow cannot be entered from this side.
    OneWay,
    /// The target door is locked and no key is held.
    DoorLocked,
}

/// Events reported by the world after resolving an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The player stepped between two adjacent cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// A movement action had no effect.
    MoveRejected {
        /// Direction of the attempted step.
        direction: Direction,
        /// Why the step was refused.
        reason: MoveRejection,
    },
    /// A key was spent to open a door; the player stayed put.
    DoorUnlocked {
        /// Cell holding the door.
        cell: CellCoord,
    },
    /// A key or extinguisher was picked up.
    ItemCollected {
        /// Item added to the inventory.
        item: Item,
        /// Cell the item was collected from.
        cell: CellCoord,
    },
    /// A battery was picked up.
    BatteryCollected {
        /// Cell the battery was collected from.
        cell: CellCoord,
        /// Batteries still required after this pickup.
        remaining: u32,
    },
    /// An extinguisher was spent to walk through a fire.
    FireExtinguished {
        /// Cell the fire occupied.
        cell: CellCoord,
    },
    /// The battery quota was met and the next level was selected.
    LevelAdvanced {
        /// Level that was cleared.
        from: usize,
        /// Level that becomes active.
        to: usize,
    },
    /// The player walked into fire without an extinguisher.
    LevelRestarted {
        /// Level that is reloaded.
        level: usize,
    },
    /// A level layout was loaded into the grid.
    LevelLoaded {
        /// Index of the loaded level.
        level: usize,
        /// Cell the player starts on.
        start: CellCoord,
        /// Batteries required to clear the level.
        batteries: u32,
    },
}

/// Owned read-only snapshot of a session for renderers and agents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Row-major cell codes; the player cell carries its composite code.
    pub cells: [[TileCode; GRID_COLUMNS]; GRID_ROWS],
    /// Cell the player currently occupies.
    pub player: CellCoord,
    /// Consumables carried by the player.
    pub inventory: Inventory,
    /// Level index and remaining battery quota.
    pub progress: Progress,
}

impl Observation {
    /// Code stored at the provided cell, or `None` outside the grid.
    #[must_use]
    pub fn code_at(&self, cell: CellCoord) -> Option<TileCode> {
        if !cell.in_bounds() {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        Some(self.cells[row][column])
    }

    /// Auxiliary inventory vector `[keys, extinguishers]`.
    #[must_use]
    pub const fn aux(&self) -> [u32; 2] {
        [self.inventory.keys, self.inventory.extinguishers]
    }
}

/// Decision maker that selects one action per tick from an observation.
pub trait Agent {
    /// Chooses the next action to submit.
    fn decide(&mut self, observation: &Observation) -> Action;
}

#[cfg(test)]
mod tests {
    use super::{Action, CellCoord, Direction, Event, Inventory, MoveRejection, Tile, TileCode};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn action_parse_ignores_case_and_whitespace() {
        assert_eq!(Action::parse("Up"), Action::Up);
        assert_eq!(Action::parse("  DOWN\n"), Action::Down);
        assert_eq!(Action::parse("left"), Action::Left);
        assert_eq!(Action::parse("Right"), Action::Right);
        assert_eq!(Action::parse("Nothing"), Action::None);
    }

    #[test]
    fn unknown_action_strings_become_none() {
        assert_eq!(Action::parse("jump"), Action::None);
        assert_eq!(Action::parse(""), Action::None);
        assert_eq!("sideways".parse::<Action>(), Ok(Action::None));
    }

    #[test]
    fn every_direction_maps_back_from_its_action() {
        for direction in Direction::ALL {
            assert_eq!(Action::from(direction).direction(), Some(direction));
        }
        assert_eq!(Action::None.direction(), None);
    }

    #[test]
    fn step_refuses_to_leave_the_grid() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Right), Some(CellCoord::new(1, 0)));

        let far = CellCoord::new(19, 14);
        assert_eq!(far.step(Direction::Right), None);
        assert_eq!(far.step(Direction::Down), None);
        assert_eq!(far.step(Direction::Up), Some(CellCoord::new(19, 13)));
    }

    #[test]
    fn tile_codes_keep_their_classic_values() {
        assert_eq!(TileCode::from(Tile::Floor).value(), 0);
        assert_eq!(TileCode::Player.value(), 1);
        assert_eq!(TileCode::from(Tile::Wall).value(), 2);
        assert_eq!(TileCode::from(Tile::Fire).value(), 7);
        assert_eq!(TileCode::from(Tile::Arrow(Direction::Up)).value(), 11);
        assert_eq!(TileCode::from(Tile::OpenDoor).value(), 12);
        assert_eq!(TileCode::occupied(Tile::OpenDoor).value(), 17);
    }

    #[test]
    fn tile_code_values_decode_to_themselves() {
        for value in 0..=17u8 {
            let code = TileCode::try_from(value).expect("known code");
            assert_eq!(code.value(), value);
        }
        assert!(TileCode::try_from(18).is_err());
    }

    #[test]
    fn composite_codes_strip_to_their_terrain() {
        for direction in Direction::ALL {
            let arrow = Tile::Arrow(direction);
            let occupied = TileCode::occupied(arrow);
            assert!(occupied.is_player());
            assert_eq!(occupied.terrain(), arrow);
            assert!(!TileCode::from(arrow).is_player());
        }
        assert_eq!(TileCode::occupied(Tile::Floor), TileCode::Player);
        assert_eq!(TileCode::Player.terrain(), Tile::Floor);
    }

    #[test]
    fn glyphs_decode_to_the_tile_that_produced_them() {
        let tiles = [
            Tile::Floor,
            Tile::Wall,
            Tile::Battery,
            Tile::Door,
            Tile::OpenDoor,
            Tile::Key,
            Tile::Extinguisher,
            Tile::Fire,
            Tile::Arrow(Direction::Up),
            Tile::Arrow(Direction::Down),
            Tile::Arrow(Direction::Left),
            Tile::Arrow(Direction::Right),
        ];
        for tile in tiles {
            assert_eq!(Tile::from_glyph(tile.glyph() as u8), Some(tile));
        }
        assert_eq!(Tile::from_glyph(b'@'), None);
    }

    #[test]
    fn event_round_trips_through_bincode() {
        assert_round_trip(&Event::MoveRejected {
            direction: Direction::Left,
            reason: MoveRejection::OneWay,
        });
    }

    #[test]
    fn inventory_round_trips_through_bincode() {
        assert_round_trip(&Inventory {
            keys: 2,
            extinguishers: 1,
        });
    }
}
