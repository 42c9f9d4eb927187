//! Leaf blower headless runner.
//!
//! Runs the simulation without a window or audio device, driven by a
//! scripted autopilot instead of a keyboard. Useful to watch the intro
//! timeline and the garden play out in the log:
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scene garden --seconds 60 --seed 7
//! ```
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing), build the ECS world
//! 2. Enter the requested scene
//! 3. Per frame: autopilot input, clock update, schedule run, log the
//!    host-facing messages
//! 4. Exit non-zero if a scene timeline aborted

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use clap::{Parser, ValueEnum};
use leafblower::components::blower::LeafBlower;
use leafblower::components::scenescript::SceneScript;
use leafblower::events::audio::AudioCmd;
use leafblower::events::camera::CameraShake;
use leafblower::events::collect::LeafCollected;
use leafblower::events::emission::BlowerEmission;
use leafblower::game;
use leafblower::resources::faults::TimelineFaults;
use leafblower::resources::gameconfig::GameConfig;
use leafblower::resources::gamestate::{GameState, GameStates};
use leafblower::resources::input::{InputSample, InputState};
use leafblower::resources::score::Score;
use leafblower::resources::worldtime::WorldTime;
use leafblower::systems::time::update_world_time;
use log::{debug, error, info, trace, warn};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Scene {
    Intro,
    Garden,
}

impl From<Scene> for GameStates {
    fn from(scene: Scene) -> Self {
        match scene {
            Scene::Intro => GameStates::Intro,
            Scene::Garden => GameStates::Garden,
        }
    }
}

/// Headless leaf blower simulation
#[derive(Parser)]
#[command(version, about = "Runs the leaf blower simulation headless with an autopilot.")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Scene to start in.
    #[arg(long, value_enum, default_value_t = Scene::Intro)]
    scene: Scene,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// RNG seed, overrides `[world] seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without input.
    #[arg(long)]
    no_autopilot: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

/// Scripted input: watch the intro for a while, then start the game, walk
/// around in slow circles and blow, strafing now and then.
struct Autopilot {
    intro_frames: u64,
    period: u64,
}

impl Autopilot {
    fn new(fps: u32) -> Self {
        Self {
            intro_frames: fps as u64 * 20,
            period: fps as u64 * 4,
        }
    }

    fn sample(&self, frame: u64, state: GameStates) -> InputSample {
        match state {
            GameStates::Intro => InputSample {
                blow: frame >= self.intro_frames,
                ..Default::default()
            },
            GameStates::Garden => {
                let phase = frame % self.period;
                let turning = phase < self.period / 4;
                let strafing = phase >= self.period * 3 / 4;
                InputSample {
                    forward: true,
                    turn_right: turning || strafing,
                    strafe: strafing,
                    blow: phase % 3 != 0,
                    ..Default::default()
                }
            }
            GameStates::None | GameStates::Quitting => InputSample::default(),
        }
    }
}

type HostReaders = (
    MessageReader<'static, 'static, AudioCmd>,
    MessageReader<'static, 'static, CameraShake>,
    MessageReader<'static, 'static, BlowerEmission>,
    MessageReader<'static, 'static, LeafCollected>,
);

/// Stand-in for the renderer and audio backend: logs what they would do.
fn log_host_output(world: &mut World, readers: &mut SystemState<HostReaders>) {
    let (mut audio, mut shakes, mut jets, mut collected) = readers.get_mut(world);
    for cmd in audio.read() {
        trace!("audio: {:?}", cmd);
    }
    for shake in shakes.read() {
        debug!("camera shake {} ms", shake.millis);
    }
    let jets = jets.read().count();
    let collected = collected.read().count();
    if jets > 0 || collected > 0 {
        trace!("{} jets, {} leaves collected this frame", jets, collected);
    }
}

fn report(world: &mut World) {
    let seconds = world.resource::<WorldTime>().elapsed;
    let state = world.resource::<GameState>().get();
    let phase = world
        .query::<&SceneScript>()
        .iter(world)
        .next()
        .and_then(|script| script.active_phase().map(str::to_string));
    let energy = world
        .query::<&LeafBlower>()
        .iter(world)
        .next()
        .map(|blower| blower.energy);
    let collected = world.resource::<Score>().collected;
    info!(
        "t={:.1}s state={:?} phase={:?} collected={} energy={:?}",
        seconds, state, phase, collected, energy
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: dump the configuration and quit
    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("Config written to {}", cli.config.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.fps == 0 {
        eprintln!("Error: --fps must be greater than 0");
        std::process::exit(2);
    }

    let mut world = game::build_world(config, cli.seed);
    let mut update = game::build_schedule();
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    game::switch_to(&mut world, cli.scene.into());

    let dt = 1.0 / cli.fps as f32;
    let frames = (cli.seconds.max(0.0) * cli.fps as f32).round() as u64;
    let autopilot = Autopilot::new(cli.fps);
    let mut readers = SystemState::<HostReaders>::new(&mut world);
    info!(
        "Running {:?} for {} frames at {} fps",
        cli.scene, frames, cli.fps
    );

    // --------------- Main loop ---------------
    for frame in 0..frames {
        let state = world.resource::<GameState>().get();
        if state == GameStates::Quitting {
            break;
        }
        if !cli.no_autopilot {
            let sample = autopilot.sample(frame, state);
            world.resource_mut::<InputState>().apply(sample);
        }

        update_world_time(&mut world, dt);
        update.run(&mut world);
        log_host_output(&mut world, &mut readers);
        world.clear_trackers();

        if frame % cli.fps as u64 == 0 {
            report(&mut world);
        }
    }
    report(&mut world);

    let faults = world.resource::<TimelineFaults>();
    if !faults.is_empty() {
        for message in &faults.messages {
            error!("{}", message);
        }
        std::process::exit(1);
    }
}
