//! Scene setup and frame schedule.
//!
//! Two scenes exist:
//!
//! - **Intro**: a [`SceneScript`] running the intro timeline from
//!   `assets/timelines/intro.json`. Leaves are created, scattered, left to
//!   settle and put back, forever, until blow is pressed.
//! - **Garden**: leaves scattered over the playfield, the player with the
//!   leaf blower and the road sweeper.
//!
//! Scenes are entered through [`enter_state`], queued by the game state
//! observer.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{error, info};
use std::f32::consts::PI;
use thiserror::Error;

use crate::components::blower::{ConeForceField, LeafBlower};
use crate::components::interaction::InteractionError;
use crate::components::leaf::Leaf;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::scenescript::{SceneScript, ScriptCmd, ScriptContext};
use crate::components::sweeper::{ProximityCollector, Sweeper};
use crate::components::timeline::{PhaseHandle, Timeline, TimelineError, TimelineLayout, Transition};
use crate::events::audio::{AudioCmd, LOOP_BLOWER, LOOP_SWEEPER};
use crate::events::camera::CameraShake;
use crate::events::collect::LeafCollected;
use crate::events::emission::BlowerEmission;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::phase::{observe_phase_change, observe_timeline_fault};
use crate::events::timer::observe_timer_event;
use crate::resources::faults::TimelineFaults;
use crate::resources::gameconfig::{BlowerSettings, GameConfig, IntroSettings};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::playfield::Playfield;
use crate::resources::rng::GameRng;
use crate::resources::score::Score;
use crate::resources::worldtime::WorldTime;
use crate::systems::blower::blower_system;
use crate::systems::gamestate::{
    check_pending_state, intro_input_system, state_is_garden, state_is_intro,
};
use crate::systems::messages::update_game_messages;
use crate::systems::movement::movement_system;
use crate::systems::player::player_control_system;
use crate::systems::scale::leaf_scale_decay_system;
use crate::systems::sweeper::{
    sweeper_collect_system, sweeper_hit_player_system, sweeper_motion_system,
};
use crate::systems::timeline::scene_script_system;
use crate::systems::timer::update_timers;

/// Phase list of the intro scene.
pub const INTRO_LAYOUT: &str = include_str!("../assets/timelines/intro.json");
pub const INTRO_SCRIPT: &str = "intro";

#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error("invalid timeline layout: {0}")]
    Layout(#[from] serde_json::Error),
    #[error("layout has no phase named `{0}`")]
    MissingPhase(String),
}

fn phase<'t>(
    timeline: &'t mut Timeline<ScriptContext>,
    name: &str,
) -> Result<PhaseHandle<'t, ScriptContext>, SceneError> {
    timeline
        .phase_mut(name)
        .ok_or_else(|| SceneError::MissingPhase(name.to_string()))
}

/// Build the intro timeline from `layout` and attach the intro callbacks.
///
/// - `create` spawns one leaf per tick, up to `leaf_count`
/// - `move` shakes the camera and scatters every leaf, then asks for `wait`
/// - `return` stops the leaf whose spawn order equals the repeat index and
///   puts it back on the field if it was blown away
pub fn intro_timeline(
    layout: &TimelineLayout,
    settings: &IntroSettings,
) -> Result<Timeline<ScriptContext>, SceneError> {
    let mut timeline = Timeline::from_layout(layout)?;

    let cap = settings.leaf_count;
    let max_scale = settings.max_leaf_scale;
    let drag = settings.leaf_drag;
    phase(&mut timeline, "create")?.on_tick(move |ctx: &mut ScriptContext, _, _| {
        if ctx.leaf_count < cap {
            ctx.push(ScriptCmd::SpawnLeaf { max_scale, drag });
        }
        Transition::Stay
    });

    let max_speed = settings.scatter_speed;
    let shake = settings.shake_ms;
    phase(&mut timeline, "move")?.on_tick(move |ctx: &mut ScriptContext, _, _| {
        ctx.push(ScriptCmd::ShakeCamera { millis: shake });
        ctx.push(ScriptCmd::ScatterLeaves { max_speed });
        Transition::to("wait")
    });

    phase(&mut timeline, "wait")?;

    phase(&mut timeline, "return")?.on_tick(move |ctx: &mut ScriptContext, _, repeat| {
        if repeat < ctx.leaf_count {
            ctx.push(ScriptCmd::ResetLeaf {
                order: repeat,
                max_scale,
            });
        }
        Transition::Stay
    });

    timeline.validate()?;
    Ok(timeline)
}

/// Cone force field described by the `[blower]` settings.
pub fn blower_field(settings: &BlowerSettings) -> Result<ConeForceField, InteractionError> {
    let field = ConeForceField::new(settings.cone_half_angle)?
        .with_strength(settings.strength)?
        .with_falloff_distance(settings.falloff_distance)?;
    match settings.impulse_clamp {
        Some(clamp) => field.with_clamp(clamp),
        None => Ok(field),
    }
}

/// Create the world with every resource and observer the game needs.
///
/// `seed` overrides `[world] seed` from the config.
pub fn build_world(config: GameConfig, seed: Option<u64>) -> World {
    let mut world = World::new();
    let rng = match seed.or(config.world.seed) {
        Some(seed) => GameRng::with_seed(seed),
        None => GameRng::default(),
    };
    world.insert_resource(WorldTime::default());
    world.insert_resource(Playfield::new(config.world.width, config.world.height));
    world.insert_resource(rng);
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(Score::default());
    world.insert_resource(TimelineFaults::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<BlowerEmission>>();
    world.init_resource::<Messages<LeafCollected>>();
    world.init_resource::<Messages<CameraShake>>();

    world.add_observer(observe_gamestate_change_event);
    world.add_observer(observe_phase_change);
    world.add_observer(observe_timeline_fault);
    world.add_observer(observe_timer_event);
    world.flush();
    world
}

/// The per-frame schedule, in the order the simulation needs.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_game_messages,
            check_pending_state,
            intro_input_system.run_if(state_is_intro),
            scene_script_system,
            leaf_scale_decay_system.run_if(state_is_intro),
            player_control_system.run_if(state_is_garden),
            blower_system.run_if(state_is_garden),
            movement_system,
            sweeper_motion_system.run_if(state_is_garden),
            sweeper_collect_system.run_if(state_is_garden),
            sweeper_hit_player_system.run_if(state_is_garden),
            update_timers,
        )
            .chain(),
    );
    update
}

/// Despawn every entity belonging to a scene and silence the garden loops.
pub fn clean_scene(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, Or<(
            With<Leaf>,
            With<Player>,
            With<Sweeper>,
            With<SceneScript>,
        )>>()
        .iter(world)
        .collect();
    let had_garden = world
        .query_filtered::<Entity, Or<(With<Player>, With<Sweeper>)>>()
        .iter(world)
        .next()
        .is_some();
    for entity in entities {
        world.despawn(entity);
    }
    if had_garden {
        let mut audio = world.resource_mut::<Messages<AudioCmd>>();
        audio.write(AudioCmd::stop_loop(LOOP_BLOWER));
        audio.write(AudioCmd::stop_loop(LOOP_SWEEPER));
    }
}

/// Replace the current scene with the one for `state`.
///
/// A scene that cannot be built records a fault and requests quitting.
pub fn enter_state(world: &mut World, state: GameStates) {
    clean_scene(world);
    let result = match state {
        GameStates::Intro => setup_intro(world),
        GameStates::Garden => setup_garden(world),
        GameStates::None | GameStates::Quitting => Ok(()),
    };
    if let Err(err) = result {
        error!("Failed to set up {:?}: {}", state, err);
        world
            .resource_mut::<TimelineFaults>()
            .messages
            .push(err.to_string());
        world
            .resource_mut::<NextGameState>()
            .set(GameStates::Quitting);
    }
}

pub fn setup_intro(world: &mut World) -> Result<(), SceneError> {
    let settings = world.resource::<GameConfig>().intro.clone();
    let layout = TimelineLayout::from_json_str(INTRO_LAYOUT)?;
    let timeline = intro_timeline(&layout, &settings)?;
    info!("Intro scene with {} phases", timeline.len());
    world.spawn(SceneScript::new(INTRO_SCRIPT, timeline));
    Ok(())
}

pub fn setup_garden(world: &mut World) -> Result<(), SceneError> {
    let config = world.resource::<GameConfig>().clone();
    let field = blower_field(&config.blower)?;
    let collector = ProximityCollector::new(config.sweeper.pickup_radius)?;
    let size = world.resource::<Playfield>().size();

    *world.resource_mut::<Score>() = Score::default();

    let leaves: Vec<_> = {
        let mut rng = world.resource_mut::<GameRng>();
        (0..config.world.leaf_count)
            .map(|order| {
                (
                    Leaf::new(order),
                    MapPosition {
                        pos: rng.point_in(size),
                    },
                    RigidBody::with_physics(config.world.leaf_drag, None),
                    Rotation::new(rng.range(0.0, PI)),
                    Scale::default(),
                )
            })
            .collect()
    };
    world.spawn_batch(leaves);

    world.spawn((
        Player {
            speed: config.player.speed,
            turn_rate: config.player.turn_rate,
        },
        MapPosition::new(config.player.start_x, config.player.start_y),
        Rotation::default(),
        RigidBody::new(),
        LeafBlower::new(field)
            .with_energy(config.blower.energy)
            .with_muzzle_distance(config.blower.muzzle_distance),
    ));

    let sweeper = Sweeper {
        collector,
        speed: config.sweeper.speed,
        wrap_y: config.sweeper.wrap_y,
        reset_y: 0.0,
    };
    let mut body = RigidBody::new();
    body.set_velocity(sweeper.velocity());
    world.spawn((
        sweeper,
        MapPosition::new(config.sweeper.start_x, config.sweeper.start_y),
        body,
    ));

    let mut audio = world.resource_mut::<Messages<AudioCmd>>();
    audio.write(AudioCmd::play_loop(LOOP_BLOWER));
    audio.write(AudioCmd::loop_volume(LOOP_BLOWER, 0.0, 0.1));
    audio.write(AudioCmd::play_loop(LOOP_SWEEPER));

    info!(
        "Garden scene: {} leaves on {}x{}",
        config.world.leaf_count, size.x, size.y
    );
    Ok(())
}

/// Request `state` and apply it right away, outside the schedule.
pub fn switch_to(world: &mut World, state: GameStates) {
    world.resource_mut::<NextGameState>().set(state);
    world.trigger(crate::events::gamestate::GameStateChangedEvent {});
    world.flush();
}

/// Position of the first player in the world, if any.
pub fn player_position(world: &mut World) -> Option<Vec2> {
    world
        .query_filtered::<&MapPosition, With<Player>>()
        .iter(world)
        .next()
        .map(|p| p.pos)
}
