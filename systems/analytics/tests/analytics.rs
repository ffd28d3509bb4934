use tile_puzzle_core::{Action, CellCoord, Direction, Event, Item, MoveRejection};
use tile_puzzle_system_analytics::{Analytics, RunReport};
use tile_puzzle_world::{self as world, LevelCatalog, Session};

fn play(level: usize, script: &[(Action, usize)]) -> RunReport {
    let mut session = Session::with_catalog(LevelCatalog::standard(), level);
    let mut analytics = Analytics::new();
    let mut events = Vec::new();
    for &(action, count) in script {
        for _ in 0..count {
            events.clear();
            world::apply(&mut session, action, &mut events);
            analytics.handle(&events);
        }
    }
    analytics.report()
}

#[test]
fn clearing_the_first_level_counts_every_battery() {
    let report = play(
        0,
        &[
            (Action::Up, 3),
            (Action::Left, 4),
            (Action::Down, 3),
            (Action::Up, 3),
            (Action::Right, 8),
            (Action::Down, 3),
            (Action::Up, 4),
            (Action::Left, 8),
            (Action::Up, 2),
            (Action::Right, 9),
            (Action::Up, 1),
        ],
    );

    assert_eq!(report.moves, 47);
    assert_eq!(report.batteries_collected, 3);
    assert_eq!(report.levels_cleared, 1);
    assert_eq!(report.rejected(), 0);
    assert_eq!(report.score(), 3);
}

#[test]
fn walls_are_tallied_as_rejections() {
    let report = play(0, &[(Action::Left, 4)]);

    assert_eq!(report.moves, 1);
    assert_eq!(report.rejected_by_walls, 3);
    assert_eq!(report.rejected(), 3);
}

#[test]
fn keys_and_doors_are_tracked() {
    let report = play(
        5,
        &[
            (Action::Up, 2),
            (Action::Right, 2),
            (Action::Up, 3),
            (Action::Down, 3),
            (Action::Left, 4),
            (Action::Up, 4),
        ],
    );

    assert_eq!(report.keys_collected, 1);
    assert_eq!(report.doors_unlocked, 1);
    assert_eq!(report.moves, 16);
    assert_eq!(report.batteries_collected, 1);
    assert_eq!(report.levels_cleared, 1);
}

#[test]
fn restarts_cost_a_point() {
    let report = play(
        8,
        &[
            (Action::Right, 6),
            (Action::Down, 2),
            (Action::Right, 3),
        ],
    );

    assert_eq!(report.extinguishers_collected, 1);
    assert_eq!(report.fires_extinguished, 1);
    assert_eq!(report.restarts, 1);
    assert_eq!(report.moves, 10);
    assert_eq!(report.score(), -1);
}

#[test]
fn idle_actions_leave_the_report_empty() {
    let report = play(3, &[(Action::None, 25)]);
    assert_eq!(report, RunReport::default());
}

#[test]
fn rejection_reasons_are_kept_apart() {
    let mut analytics = Analytics::new();
    analytics.handle(&[
        Event::MoveRejected {
            direction: Direction::Up,
            reason: MoveRejection::OutOfBounds,
        },
        Event::MoveRejected {
            direction: Direction::Left,
            reason: MoveRejection::OneWay,
        },
        Event::MoveRejected {
            direction: Direction::Left,
            reason: MoveRejection::OneWay,
        },
        Event::MoveRejected {
            direction: Direction::Down,
            reason: MoveRejection::DoorLocked,
        },
        Event::ItemCollected {
            item: Item::Key,
            cell: CellCoord::new(3, 3),
        },
    ]);

    let report = analytics.report();
    assert_eq!(report.rejected_out_of_bounds, 1);
    assert_eq!(report.rejected_by_arrows, 2);
    assert_eq!(report.rejected_by_doors, 1);
    assert_eq!(report.rejected_by_walls, 0);
    assert_eq!(report.rejected(), 4);
    assert_eq!(report.keys_collected, 1);
}

#[test]
fn report_serialises_with_named_counters() {
    let report = play(0, &[(Action::Up, 3)]);
    let json = serde_json::to_value(report).expect("report serialises");

    assert_eq!(json["moves"], 3);
    assert_eq!(json["batteries_collected"], 0);
}
