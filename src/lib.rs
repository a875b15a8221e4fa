//! Stardrift - arcade flight simulation core
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (ship, orbs, particle bursts)
//! - `config`: Tuning tables with validation and JSON load/save
//! - `input`: Process-wide input state and per-tick snapshots
//! - `store`: UI-facing state written once per tick
//! - `audio`: Fire-and-forget sound collaborator
//! - `render`: Per-tick frame handed to the render collaborator

pub mod audio;
pub mod config;
pub mod input;
pub mod render;
pub mod sim;
pub mod store;

pub use config::{BurstConfig, ConfigError, FieldConfig, ShipConfig, SimConfig, SoundConfig};
pub use input::{Control, InputSnapshot, InputState};
pub use store::GameStore;

use glam::Vec3;

/// Default tuning constants
pub mod consts {
    /// Nominal host refresh rate; per-tick constants are tuned against it
    pub const REFERENCE_TICK_RATE: f32 = 60.0;
    /// Nominal tick duration (seconds)
    pub const REFERENCE_DT: f32 = 1.0 / REFERENCE_TICK_RATE;

    /// Ship defaults (all per tick)
    pub const SHIP_ROTATION_SPEED: f32 = 0.05; // radians
    pub const SHIP_THRUST_POWER: f32 = 0.01;
    /// Reverse thrust is weaker than forward thrust
    pub const SHIP_REVERSE_FACTOR: f32 = 0.5;
    pub const SHIP_FRICTION: f32 = 0.95;
    pub const SHIP_MAX_SPEED: f32 = 0.5;
    pub const SHIP_BODY_SMOOTHING: f32 = 0.1;
    /// Slower than the body so the camera visibly lags
    pub const CAMERA_SMOOTHING: f32 = 0.05;
    pub const CAMERA_UP_SMOOTHING: f32 = 0.05;
    /// Ship-local camera offset: behind (-Y) and above (+Z)
    pub const CAMERA_OFFSET: [f32; 3] = [0.0, -10.0, 4.0];
    pub const SHIP_MAX_BANK: f32 = 0.5;
    pub const SHIP_MAX_PITCH: f32 = 0.3;
    pub const SHIP_THRUST_PITCH: f32 = 0.1;
    /// Below this speed the motion trail is considered off
    pub const MOTION_EPSILON: f32 = 0.01;

    /// Collectible defaults
    pub const ORB_COUNT: usize = 30;
    pub const ORB_COLLISION_RADIUS: f32 = 2.5;
    pub const ORB_RESPAWN_MIN_OFFSET: f32 = 20.0;
    pub const ORB_RESPAWN_MAX_OFFSET: f32 = 45.0;
    pub const ORB_BOB_AMPLITUDE: [f32; 3] = [0.0, 0.0, 0.5];
    pub const ORB_BOB_FREQUENCY: f32 = 2.0; // radians per second
    pub const ORB_SPAWN_EXTENT: [f32; 3] = [100.0, 100.0, 10.0];

    /// Particle burst defaults
    pub const PARTICLE_CAPACITY: usize = 500;
    pub const PARTICLES_PER_BURST: usize = 20;
    pub const PARTICLE_SPREAD: f32 = 0.5;
    pub const PARTICLE_DRAG: f32 = 0.95;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_MIN_SCALE: f32 = 0.2;
    pub const PARTICLE_MAX_SCALE: f32 = 0.7;

    /// Sound defaults
    pub const MASTER_VOLUME: f32 = 0.3;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative remainders
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Move `current` a fraction `k` of the way toward `target`
#[inline]
pub fn smooth_toward(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Vector form of [`smooth_toward`]
#[inline]
pub fn smooth_toward_vec(current: Vec3, target: Vec3, k: f32) -> Vec3 {
    current + (target - current) * k
}

/// Unit nose direction for a heading about +Z (0 rad = +Y)
#[inline]
pub fn forward_from_heading(heading: f32) -> Vec3 {
    Vec3::new((-heading).sin(), heading.cos(), 0.0)
}
