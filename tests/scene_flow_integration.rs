//! Scene flow integration tests: the full world and schedule as the runner
//! builds them, driven frame by frame.

use bevy_ecs::prelude::*;
use std::sync::{Arc, Mutex};

use leafblower::components::interaction::InteractionError;
use leafblower::components::leaf::Leaf;
use leafblower::components::player::Player;
use leafblower::components::scenescript::{SceneScript, ScriptContext};
use leafblower::components::sweeper::Sweeper;
use leafblower::components::timeline::{
    ChangeCause, PhaseDuration, Timeline, TimelineLayout, Transition,
};
use leafblower::events::phase::PhaseChangeEvent;
use leafblower::game::{self, SceneError};
use leafblower::resources::faults::TimelineFaults;
use leafblower::resources::gameconfig::{GameConfig, IntroSettings};
use leafblower::resources::gamestate::{GameState, GameStates};
use leafblower::resources::input::{InputSample, InputState};
use leafblower::resources::score::Score;
use leafblower::resources::worldtime::WorldTime;
use leafblower::systems::time::update_world_time;

const DT: f32 = 1.0 / 60.0;

fn small_config() -> GameConfig {
    let mut config = GameConfig::new();
    config.intro.leaf_count = 20;
    config.world.leaf_count = 300;
    config
}

fn make_game(config: GameConfig) -> (World, Schedule) {
    let mut world = game::build_world(config, Some(1234));
    let mut schedule = game::build_schedule();
    schedule.initialize(&mut world).unwrap();
    (world, schedule)
}

fn run_frame(world: &mut World, schedule: &mut Schedule, input: InputSample) {
    world.resource_mut::<InputState>().apply(input);
    update_world_time(world, DT);
    schedule.run(world);
}

fn run_until_ms(world: &mut World, schedule: &mut Schedule, ms: u64) {
    while world.resource::<WorldTime>().now_ms < ms {
        run_frame(world, schedule, InputSample::default());
    }
}

fn count<F: bevy_ecs::query::QueryFilter>(world: &mut World) -> usize {
    world.query_filtered::<Entity, F>().iter(world).count()
}

fn record_phases(world: &mut World) -> Arc<Mutex<Vec<PhaseChangeEvent>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    world.add_observer(move |trigger: On<PhaseChangeEvent>| {
        sink.lock().unwrap().push(trigger.event().clone());
    });
    world.flush();
    changes
}

#[test]
fn test_intro_runs_create_move_wait() {
    let (mut world, mut schedule) = make_game(small_config());
    let changes = record_phases(&mut world);
    game::switch_to(&mut world, GameStates::Intro);
    assert_eq!(world.resource::<GameState>().get(), GameStates::Intro);
    assert_eq!(count::<With<SceneScript>>(&mut world), 1);

    run_until_ms(&mut world, &mut schedule, 5_000);
    // one leaf per frame, capped
    assert_eq!(count::<With<Leaf>>(&mut world), 20);

    run_until_ms(&mut world, &mut schedule, 10_200);
    let changes = changes.lock().unwrap().clone();
    let seen: Vec<(&str, ChangeCause)> = changes
        .iter()
        .map(|c| (c.to.as_str(), c.cause))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("create", ChangeCause::Started),
            ("move", ChangeCause::Expired),
            ("wait", ChangeCause::Requested),
        ]
    );
    assert_eq!(count::<With<Leaf>>(&mut world), 20);
    assert!(world.resource::<TimelineFaults>().is_empty());
}

#[test]
fn test_intro_loops_back_through_return() {
    let (mut world, mut schedule) = make_game(small_config());
    let changes = record_phases(&mut world);
    game::switch_to(&mut world, GameStates::Intro);

    // create 10s, move one tick, wait 5s, return 10s, then move again
    run_until_ms(&mut world, &mut schedule, 25_300);
    let names: Vec<String> = changes
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.to.clone())
        .collect();
    assert_eq!(names, vec!["create", "move", "wait", "return", "move", "wait"]);
    assert_eq!(count::<With<Leaf>>(&mut world), 20);
}

#[test]
fn test_blow_starts_the_garden() {
    let config = small_config();
    let leaf_count = config.world.leaf_count;
    let (mut world, mut schedule) = make_game(config);
    game::switch_to(&mut world, GameStates::Intro);
    run_until_ms(&mut world, &mut schedule, 500);

    run_frame(
        &mut world,
        &mut schedule,
        InputSample {
            blow: true,
            ..Default::default()
        },
    );
    for _ in 0..2 {
        run_frame(&mut world, &mut schedule, InputSample::default());
    }

    assert_eq!(world.resource::<GameState>().get(), GameStates::Garden);
    assert_eq!(count::<With<SceneScript>>(&mut world), 0);
    assert_eq!(count::<With<Leaf>>(&mut world), leaf_count);
    assert_eq!(count::<With<Player>>(&mut world), 1);
    assert_eq!(count::<With<Sweeper>>(&mut world), 1);
}

#[test]
fn test_garden_sweeper_collects_leaves_once() {
    let mut config = small_config();
    config.world.leaf_count = 2000;
    let (mut world, mut schedule) = make_game(config);
    game::switch_to(&mut world, GameStates::Garden);
    let start = game::player_position(&mut world).unwrap();

    let mut last = 0;
    for _ in 0..300 {
        run_frame(&mut world, &mut schedule, InputSample::default());
        let collected = world.resource::<Score>().collected;
        assert!(collected >= last);
        last = collected;
    }

    assert!(last > 0);
    let marked = world
        .query::<&Leaf>()
        .iter(&world)
        .filter(|leaf| leaf.collected)
        .count();
    assert_eq!(marked as u32, last);
    // nobody touched the controls
    assert_eq!(game::player_position(&mut world), Some(start));
}

#[test]
fn test_faulted_script_quits_once() {
    let (mut world, mut schedule) = make_game(small_config());
    let mut timeline: Timeline<ScriptContext> = Timeline::new();
    timeline
        .register_phase("only", PhaseDuration::Indefinite, "only")
        .unwrap()
        .on_tick(|_: &mut ScriptContext, _, _| Transition::to("missing"));
    world.spawn(SceneScript::new("broken", timeline));

    for _ in 0..5 {
        run_frame(&mut world, &mut schedule, InputSample::default());
    }

    let faults = world.resource::<TimelineFaults>();
    assert_eq!(faults.messages.len(), 1);
    assert!(faults.messages[0].contains("missing"));
    assert_eq!(world.resource::<GameState>().get(), GameStates::Quitting);
}

#[test]
fn test_garden_rejects_bad_blower_settings() {
    let mut config = small_config();
    config
        .load_from_str("[blower]\nfalloff_distance = -50\n")
        .unwrap();
    assert!(matches!(
        game::blower_field(&config.blower),
        Err(InteractionError::InvalidFalloffDistance(d)) if d == -50.0
    ));

    let (mut world, mut schedule) = make_game(config);
    game::switch_to(&mut world, GameStates::Garden);
    run_frame(&mut world, &mut schedule, InputSample::default());

    let faults = world.resource::<TimelineFaults>();
    assert_eq!(faults.messages.len(), 1);
    assert!(faults.messages[0].contains("falloff distance"));
    assert_eq!(world.resource::<GameState>().get(), GameStates::Quitting);
    assert_eq!(count::<With<Player>>(&mut world), 0);
}

#[test]
fn test_intro_layout_needs_every_scripted_phase() {
    let layout = TimelineLayout::from_json_str(
        r#"{"phases": [
            {"name": "create", "duration": 100, "next": "move"},
            {"name": "move", "duration": -1, "next": "create"}
        ]}"#,
    )
    .unwrap();
    let err = game::intro_timeline(&layout, &IntroSettings::default()).unwrap_err();
    assert!(matches!(err, SceneError::MissingPhase(name) if name == "wait"));
}

#[test]
fn test_shipped_intro_layout_is_valid() {
    let layout = TimelineLayout::from_json_str(game::INTRO_LAYOUT).unwrap();
    let timeline = game::intro_timeline(&layout, &IntroSettings::default()).unwrap();
    assert_eq!(timeline.len(), 4);
}
