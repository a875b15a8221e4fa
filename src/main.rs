//! Headless Stardrift driver
//!
//! Usage: `stardrift [config.json] [seed] [ticks]`
//!
//! Flies an autopilot toward the nearest orb for a fixed number of ticks and
//! prints the final HUD state as JSON. `RUST_LOG=debug` shows every pickup.

use stardrift::audio::LogSound;
use stardrift::consts::REFERENCE_DT;
use stardrift::render::NullRenderer;
use stardrift::sim::{FrameOrchestrator, World};
use stardrift::{
    ConfigError, Control, GameStore, InputState, SimConfig, forward_from_heading, normalize_angle,
};

const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_TICKS: u64 = 60 * 60;
/// Heading error (radians) tolerated before the autopilot turns
const STEER_DEADBAND: f32 = 0.05;
/// Altitude error tolerated before the autopilot climbs or dives
const ALTITUDE_DEADBAND: f32 = 0.5;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Stardrift (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => SimConfig::load(&path)?,
        _ => SimConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let sound = LogSound::new(&config.sound);
    let mut orchestrator = FrameOrchestrator::new(&config, seed, sound, NullRenderer)?;
    let mut store = GameStore::new();
    let mut input = InputState::new();

    input.attach();
    store.start_game();

    for _ in 0..ticks {
        autopilot(orchestrator.world(), &mut input);
        orchestrator.tick(&input, &mut store, REFERENCE_DT);
    }

    input.detach();
    log::info!(
        "Finished {} ticks: score {}, {} sounds played",
        orchestrator.world().ticks(),
        store.score(),
        orchestrator.sound().played()
    );
    println!("{}", store.hud_json()?);
    Ok(())
}

/// Steer toward the nearest orb with full forward thrust
fn autopilot(world: &World, input: &mut InputState) {
    input.release_all();
    input.press(Control::ThrustForward);

    let pose = world.ship.pose();
    let Some(target) = world
        .field
        .orbs()
        .iter()
        .map(|orb| world.field.animated_position(orb.index, world.time()))
        .min_by(|a, b| {
            a.distance_squared(pose.position)
                .total_cmp(&b.distance_squared(pose.position))
        })
    else {
        return;
    };

    let to_target = target - pose.position;
    // forward = (-sin h, cos h), so the heading that faces (dx, dy) is atan2(-dx, dy)
    let desired = (-to_target.x).atan2(to_target.y);
    let error = normalize_angle(desired - pose.heading);
    if error > STEER_DEADBAND {
        input.press(Control::TurnLeft);
    } else if error < -STEER_DEADBAND {
        input.press(Control::TurnRight);
    }

    if to_target.z > ALTITUDE_DEADBAND {
        input.press(Control::Ascend);
    } else if to_target.z < -ALTITUDE_DEADBAND {
        input.press(Control::Descend);
    }

    // Ease off when pointing well away from the target
    if forward_from_heading(pose.heading).dot(to_target.normalize_or_zero()) < 0.0 {
        input.release(Control::ThrustForward);
    }
}
