//! Terminal backends that present resolved ticks.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tile_puzzle_core::{CellCoord, Event, Inventory, Progress, GRID_COLUMNS, GRID_ROWS};
use tile_puzzle_rendering::{describe_event, Frame, RenderingBackend};

/// Draws the board, the status line and an event log after every tick.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        writeln!(self.out, "tick {} action {}", frame.tick, frame.action.name())
            .context("failed to write frame header")?;
        for event in frame.events {
            writeln!(self.out, "  {}", describe_event(event)).context("failed to write event")?;
        }
        writeln!(self.out, "{}", frame.scene()).context("failed to write board")?;
        writeln!(self.out).context("failed to write board")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush output")
    }
}

/// One JSON object per tick, carrying the classic numeric observation.
#[derive(Debug, Serialize)]
struct TickRecord<'a> {
    tick: u64,
    action: &'static str,
    events: &'a [Event],
    grid: Vec<Vec<u8>>,
    aux: [u32; 2],
    player: CellCoord,
    inventory: Inventory,
    progress: Progress,
}

/// Emits newline-delimited JSON records.
#[derive(Debug)]
pub(crate) struct JsonBackend<W> {
    out: W,
}

impl<W: Write> JsonBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderingBackend for JsonBackend<W> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let observation = frame.observation;
        let mut grid = Vec::with_capacity(GRID_ROWS);
        for row in &observation.cells {
            let mut codes = Vec::with_capacity(GRID_COLUMNS);
            codes.extend(row.iter().map(|code| code.value()));
            grid.push(codes);
        }

        let record = TickRecord {
            tick: frame.tick,
            action: frame.action.name(),
            events: frame.events,
            grid,
            aux: observation.aux(),
            player: observation.player,
            inventory: observation.inventory,
            progress: observation.progress,
        };
        serde_json::to_writer(&mut self.out, &record).context("failed to encode tick record")?;
        writeln!(self.out).context("failed to write tick record")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush output")
    }
}
