//! Single-step move resolution.

use tile_puzzle_core::{CellCoord, Direction, Event, Item, MoveRejection, Tile};
use tracing::{debug, trace};

use crate::Session;

/// Passable one-way tiles that may be entered while moving in each direction.
///
/// An arrow missing from a row blocks entry from that side. Open doors appear
/// in every row.
const ENTERABLE: [(Direction, [Tile; 4]); 4] = [
    (
        Direction::Up,
        [
            Tile::Arrow(Direction::Right),
            Tile::Arrow(Direction::Left),
            Tile::Arrow(Direction::Up),
            Tile::OpenDoor,
        ],
    ),
    (
        Direction::Down,
        [
            Tile::Arrow(Direction::Right),
            Tile::Arrow(Direction::Left),
            Tile::Arrow(Direction::Down),
            Tile::OpenDoor,
        ],
    ),
    (
        Direction::Left,
        [
            Tile::Arrow(Direction::Up),
            Tile::Arrow(Direction::Left),
            Tile::Arrow(Direction::Down),
            Tile::OpenDoor,
        ],
    ),
    (
        Direction::Right,
        [
            Tile::Arrow(Direction::Up),
            Tile::Arrow(Direction::Right),
            Tile::Arrow(Direction::Down),
            Tile::OpenDoor,
        ],
    ),
];

/// Reports whether `tile` may be entered while moving toward `direction`.
pub(crate) fn enterable(direction: Direction, tile: Tile) -> bool {
    ENTERABLE
        .iter()
        .any(|(moving, tiles)| *moving == direction && tiles.contains(&tile))
}

/// Resolves one step of the player toward `direction`.
pub(crate) fn resolve(session: &mut Session, direction: Direction, out_events: &mut Vec<Event>) {
    let from = session.player;
    let Some((target, tile)) = from
        .step(direction)
        .and_then(|target| session.grid.tile(target).map(|tile| (target, tile)))
    else {
        reject(direction, MoveRejection::OutOfBounds, out_events);
        return;
    };

    trace!(?from, to = ?target, ?tile, ?direction, "resolving move");

    match tile {
        Tile::Wall => reject(direction, MoveRejection::Wall, out_events),
        Tile::Floor => step_onto(session, target, out_events),
        Tile::Arrow(_) | Tile::OpenDoor => {
            if enterable(direction, tile) {
                step_onto(session, target, out_events);
            } else {
                reject(direction, MoveRejection::OneWay, out_events);
            }
        }
        Tile::Battery => collect_battery(session, target, out_events),
        Tile::Door => {
            if session.inventory.keys == 0 {
                reject(direction, MoveRejection::DoorLocked, out_events);
                return;
            }
            session.inventory.keys -= 1;
            session.grid.set(target, Tile::OpenDoor);
            out_events.push(Event::DoorUnlocked { cell: target });
        }
        Tile::Key => {
            session.inventory.keys = session.inventory.keys.saturating_add(1);
            out_events.push(Event::ItemCollected {
                item: Item::Key,
                cell: target,
            });
            consume_and_step(session, target, out_events);
        }
        Tile::Extinguisher => {
            session.inventory.extinguishers = session.inventory.extinguishers.saturating_add(1);
            out_events.push(Event::ItemCollected {
                item: Item::Extinguisher,
                cell: target,
            });
            consume_and_step(session, target, out_events);
        }
        Tile::Fire => {
            if session.inventory.extinguishers == 0 {
                let level = session.progress.level_index;
                debug!(
                    level_index = level,
                    cell = ?target,
                    "player walked into fire, restarting level"
                );
                out_events.push(Event::LevelRestarted { level });
                session.load_level(level, out_events);
                return;
            }
            session.inventory.extinguishers -= 1;
            out_events.push(Event::FireExtinguished { cell: target });
            consume_and_step(session, target, out_events);
        }
    }
}

fn collect_battery(session: &mut Session, target: CellCoord, out_events: &mut Vec<Event>) {
    let before = session.progress.batteries_remaining;
    let remaining = before.saturating_sub(1);
    session.progress.batteries_remaining = remaining;
    out_events.push(Event::BatteryCollected {
        cell: target,
        remaining,
    });

    if before == 1 {
        let from = session.progress.level_index;
        let to = session.catalog.wrap(from.saturating_add(1));
        debug!(from, to, "battery quota met, advancing level");
        out_events.push(Event::LevelAdvanced { from, to });
        session.load_level(to, out_events);
        return;
    }

    consume_and_step(session, target, out_events);
}

/// Pickups and extinguished fires leave plain floor behind.
fn consume_and_step(session: &mut Session, target: CellCoord, out_events: &mut Vec<Event>) {
    session.grid.set(target, Tile::Floor);
    step_onto(session, target, out_events);
}

fn step_onto(session: &mut Session, target: CellCoord, out_events: &mut Vec<Event>) {
    let from = session.player;
    session.player = target;
    out_events.push(Event::PlayerMoved { from, to: target });
}

fn reject(direction: Direction, reason: MoveRejection, out_events: &mut Vec<Event>) {
    trace!(?direction, ?reason, "move rejected");
    out_events.push(Event::MoveRejected { direction, reason });
}
