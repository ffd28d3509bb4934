#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that summarises a run from its event stream.

use serde::{Deserialize, Serialize};
use tile_puzzle_core::{Event, Item, MoveRejection};

/// Counters describing everything that happened during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Steps that moved the player.
    pub moves: u64,
    /// Moves refused at the grid edge.
    pub rejected_out_of_bounds: u64,
    /// Moves refused by walls.
    pub rejected_by_walls: u64,
    /// Moves refused by one-way arrows.
    pub rejected_by_arrows: u64,
    /// Moves refused by locked doors.
    pub rejected_by_doors: u64,
    /// Doors opened with a key.
    pub doors_unlocked: u64,
    /// Keys picked up.
    pub keys_collected: u64,
    /// Extinguishers picked up.
    pub extinguishers_collected: u64,
    /// Batteries picked up.
    pub batteries_collected: u64,
    /// Fires walked through with an extinguisher.
    pub fires_extinguished: u64,
    /// Levels whose quota was met.
    pub levels_cleared: u64,
    /// Levels restarted after walking into fire.
    pub restarts: u64,
}

impl RunReport {
    /// Moves refused for any reason.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.rejected_out_of_bounds
            + self.rejected_by_walls
            + self.rejected_by_arrows
            + self.rejected_by_doors
    }

    /// Running score: one point per battery, minus one per restart.
    #[must_use]
    pub fn score(&self) -> i64 {
        let earned = i64::try_from(self.batteries_collected).unwrap_or(i64::MAX);
        let lost = i64::try_from(self.restarts).unwrap_or(i64::MAX);
        earned.saturating_sub(lost)
    }
}

/// Pure analytics system that folds world events into a [`RunReport`].
#[derive(Debug, Default)]
pub struct Analytics {
    report: RunReport,
}

impl Analytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the events produced by one or more resolved actions.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            self.record(event);
        }
    }

    /// Snapshot of the counters gathered so far.
    #[must_use]
    pub const fn report(&self) -> RunReport {
        self.report
    }

    fn record(&mut self, event: &Event) {
        let report = &mut self.report;
        let counter = match event {
            Event::PlayerMoved { .. } => &mut report.moves,
            Event::MoveRejected { reason, .. } => match reason {
                MoveRejection::OutOfBounds => &mut report.rejected_out_of_bounds,
                MoveRejection::Wall => &mut report.rejected_by_walls,
                MoveRejection::OneWay => &mut report.rejected_by_arrows,
                MoveRejection::DoorLocked => &mut report.rejected_by_doors,
            },
            Event::DoorUnlocked { .. } => &mut report.doors_unlocked,
            Event::ItemCollected { item, .. } => match item {
                Item::Key => &mut report.keys_collected,
                Item::Extinguisher => &mut report.extinguishers_collected,
            },
            Event::BatteryCollected { .. } => &mut report.batteries_collected,
            Event::FireExtinguished { .. } => &mut report.fires_extinguished,
            Event::LevelAdvanced { .. } => &mut report.levels_cleared,
            Event::LevelRestarted { .. } => &mut report.restarts,
            Event::LevelLoaded { .. } => return,
        };
        *counter = counter.saturating_add(1);
    }
}
