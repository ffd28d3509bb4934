#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tile Puzzle adapters.

use anyhow::Result as AnyResult;
use std::fmt;
use tile_puzzle_core::{
    Action, CellCoord, Direction, Event, Item, MoveRejection, Observation, TileCode, GRID_COLUMNS,
    GRID_ROWS,
};

/// Glyph drawn for the player regardless of the terrain beneath it.
pub const PLAYER_GLYPH: char = '@';

/// Status line shown beneath the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Zero-based index of the active level.
    pub level_index: usize,
    /// Batteries still required to clear the level.
    pub batteries_remaining: u32,
    /// Keys carried by the player.
    pub keys: u32,
    /// Extinguishers carried by the player.
    pub extinguishers: u32,
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level {} | batteries left {} | keys {} | extinguishers {}",
            self.level_index + 1,
            self.batteries_remaining,
            self.keys,
            self.extinguishers
        )
    }
}

/// Character-cell scene description built from an observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Row-major glyphs, one per board cell.
    pub board: [[char; GRID_COLUMNS]; GRID_ROWS],
    /// Cell the player occupies.
    pub player: CellCoord,
    /// Status line content.
    pub hud: Hud,
}

impl Scene {
    /// Builds the scene for the provided observation.
    #[must_use]
    pub fn from_observation(observation: &Observation) -> Self {
        let mut board = [['.'; GRID_COLUMNS]; GRID_ROWS];
        for (glyphs, codes) in board.iter_mut().zip(observation.cells.iter()) {
            for (glyph, code) in glyphs.iter_mut().zip(codes.iter()) {
                *glyph = glyph_for(*code);
            }
        }

        Self {
            board,
            player: observation.player,
            hud: Hud {
                level_index: observation.progress.level_index,
                batteries_remaining: observation.progress.batteries_remaining,
                keys: observation.inventory.keys,
                extinguishers: observation.inventory.extinguishers,
            },
        }
    }

    /// Board rows rendered as strings, top row first.
    #[must_use]
    pub fn board_lines(&self) -> Vec<String> {
        self.board.iter().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.board_lines() {
            writeln!(f, "{line}")?;
        }
        write!(f, "{}", self.hud)
    }
}

/// Glyph used for a single observation code.
#[must_use]
pub const fn glyph_for(code: TileCode) -> char {
    if code.is_player() {
        PLAYER_GLYPH
    } else {
        code.terrain().glyph()
    }
}

/// Everything a backend needs to present one resolved tick.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Zero-based tick counter.
    pub tick: u64,
    /// Action submitted during the tick.
    pub action: Action,
    /// Events produced while resolving the action.
    pub events: &'a [Event],
    /// State after the action was resolved.
    pub observation: &'a Observation,
}

impl Frame<'_> {
    /// Scene for the post-tick observation.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::from_observation(self.observation)
    }
}

/// Rendering backend capable of presenting Tile Puzzle frames.
pub trait RenderingBackend {
    /// Presents a single resolved tick.
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()>;

    /// Flushes any buffered output once the run has ended.
    fn finish(&mut self) -> AnyResult<()> {
        Ok(())
    }
}

/// Human readable one-line description of an event.
#[must_use]
pub fn describe_event(event: &Event) -> String {
    match event {
        Event::PlayerMoved { from, to } => {
            format!("moved from {} to {}", cell_label(*from), cell_label(*to))
        }
        Event::MoveRejected { direction, reason } => {
            let why = match reason {
                MoveRejection::OutOfBounds => "the edge of the board",
                MoveRejection::Wall => "a wall",
                MoveRejection::OneWay => "a one-way arrow",
                MoveRejection::DoorLocked => "a locked door",
            };
            format!("{} blocked by {why}", direction_label(*direction))
        }
        Event::DoorUnlocked { cell } => format!("unlocked the door at {}", cell_label(*cell)),
        Event::ItemCollected { item, cell } => {
            let name = match item {
                Item::Key => "key",
                Item::Extinguisher => "extinguisher",
            };
            format!("picked up a {name} at {}", cell_label(*cell))
        }
        Event::BatteryCollected { cell, remaining } => format!(
            "collected a battery at {}, {remaining} left",
            cell_label(*cell)
        ),
        Event::FireExtinguished { cell } => {
            format!("put out the fire at {}", cell_label(*cell))
        }
        Event::LevelAdvanced { from, to } => {
            format!("cleared level {}, moving to level {}", from + 1, to + 1)
        }
        Event::LevelRestarted { level } => format!("burned! restarting level {}", level + 1),
        Event::LevelLoaded {
            level,
            start,
            batteries,
        } => format!(
            "level {} loaded, start {}, {batteries} batteries to collect",
            level + 1,
            cell_label(*start)
        ),
    }
}

fn cell_label(cell: CellCoord) -> String {
    format!("({}, {})", cell.column(), cell.row())
}

const fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}
