//! Bonus flow exercised against the real world.

use snake_arcade_core::{
    CellCoord, Command, Difficulty, DifficultyProfile, Event, FoodKind, GridSize, TickResult,
};
use snake_arcade_system_bonus::{BonusController, Phase};
use snake_arcade_world::{self as world, query, World};

fn world_with_special_ahead() -> (World, Vec<Event>) {
    let mut world = World::new(DifficultyProfile::for_difficulty(Difficulty::Easy));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBoard {
            grid: GridSize::new(10, 10),
        },
        &mut events,
    );
    // Head starts at (5, 5) heading right; the special food sits one step away.
    world::apply(
        &mut world,
        Command::PlaceFood {
            cell: CellCoord::new(6, 5),
            kind: FoodKind::Special,
        },
        &mut events,
    );
    (world, events)
}

#[test]
fn a_correct_answer_pays_out_after_the_countdown() {
    let (mut world, mut events) = world_with_special_ahead();
    let mut controller = BonusController::new(10, 3);
    controller.handle(&events);
    events.clear();

    assert_eq!(
        world::tick(&mut world, &mut events),
        TickResult::AteSpecialFood
    );
    assert_eq!(query::score(&world), 0, "eating the special awards nothing yet");

    controller.handle(&events);
    events.clear();
    assert_eq!(controller.phase(), Phase::AwaitingAnswer);
    assert!(controller.blocks_ticking());

    let mut commands = Vec::new();
    controller.resolve(controller.run_token(), Ok(true), &mut commands);
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert!(events.contains(&Event::BonusResolved { awarded: 10 }));
    assert_eq!(query::score(&world), 10);

    // Three frozen timer fires, then ticking resumes.
    assert!(controller.blocks_ticking());
    assert!(!controller.advance_countdown());
    assert!(!controller.advance_countdown());
    assert!(controller.advance_countdown());
    assert!(!controller.blocks_ticking());

    events.clear();
    assert_eq!(world::tick(&mut world, &mut events), TickResult::Continued);
    assert_eq!(query::score(&world), 10);
}

#[test]
fn a_wrong_answer_resumes_play_without_points() {
    let (mut world, mut events) = world_with_special_ahead();
    let mut controller = BonusController::new(10, 3);
    controller.handle(&events);
    events.clear();

    let _ = world::tick(&mut world, &mut events);
    controller.handle(&events);
    events.clear();

    let mut commands = Vec::new();
    controller.resolve(controller.run_token(), Ok(false), &mut commands);
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert!(events.contains(&Event::BonusResolved { awarded: 0 }));
    assert_eq!(query::score(&world), 0);
    assert!(matches!(controller.phase(), Phase::Resuming { .. }));
}

#[test]
fn a_reset_while_awaiting_discards_the_late_answer() {
    let (mut world, mut events) = world_with_special_ahead();
    let mut controller = BonusController::new(10, 3);
    controller.handle(&events);
    events.clear();

    let _ = world::tick(&mut world, &mut events);
    controller.handle(&events);
    events.clear();
    let stale = controller.run_token();

    // A new game starts before the player answers.
    world::apply(
        &mut world,
        Command::ConfigureBoard {
            grid: GridSize::new(10, 10),
        },
        &mut events,
    );
    controller.handle(&events);
    events.clear();
    assert_eq!(controller.phase(), Phase::Idle);

    let mut commands = Vec::new();
    controller.resolve(stale, Ok(true), &mut commands);
    assert!(commands.is_empty());
    assert_eq!(query::score(&world), 0);
}

#[test]
fn the_snake_grows_from_the_special_meal() {
    let (mut world, mut events) = world_with_special_ahead();
    let before = query::snake_view(&world).len();
    let _ = world::tick(&mut world, &mut events);
    assert_eq!(query::snake_view(&world).len(), before + 1);
}
