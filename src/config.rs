//! Simulation tuning tables
//!
//! Loaded from JSON (missing fields fall back to defaults) and validated once
//! before any component is built. Nothing is re-checked while ticking.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A constant is NaN or infinite
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// A decay factor outside the open interval (0, 1)
    #[error("{field} must lie strictly between 0 and 1 (got {value})")]
    FactorOutOfRange { field: &'static str, value: f32 },

    /// A pool or batch size of zero
    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },

    /// A value that must be strictly positive
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// A min/max pair in the wrong order
    #[error("{field}: min {min} must not exceed max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ship and chase-camera tuning. Rates are per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Heading change per tick while a turn control is held (radians)
    pub rotation_speed: f32,
    /// Velocity added per tick by forward, ascend and descend thrust
    pub thrust_power: f32,
    /// Reverse thrust as a fraction of forward thrust
    pub reverse_factor: f32,
    /// Per-tick velocity multiplier, strictly in (0, 1)
    pub friction: f32,
    /// Hard cap on |velocity|
    pub max_speed: f32,
    /// Body roll/pitch smoothing factor
    pub body_smoothing: f32,
    /// Camera position smoothing factor
    pub camera_smoothing: f32,
    /// Camera up-vector smoothing factor
    pub camera_up_smoothing: f32,
    /// Camera offset in ship-local space (x right, y nose, z up)
    pub camera_offset: Vec3,
    /// Roll target while turning (radians)
    pub max_bank: f32,
    /// Pitch target while climbing or diving (radians)
    pub max_pitch: f32,
    /// Nose-down pitch target under forward thrust (radians)
    pub thrust_pitch: f32,
    /// Speeds below this count as stationary for the motion trail
    pub motion_epsilon: f32,
    /// Heading at spawn (radians, 0 = nose along +Y)
    pub initial_heading: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            rotation_speed: SHIP_ROTATION_SPEED,
            thrust_power: SHIP_THRUST_POWER,
            reverse_factor: SHIP_REVERSE_FACTOR,
            friction: SHIP_FRICTION,
            max_speed: SHIP_MAX_SPEED,
            body_smoothing: SHIP_BODY_SMOOTHING,
            camera_smoothing: CAMERA_SMOOTHING,
            camera_up_smoothing: CAMERA_UP_SMOOTHING,
            camera_offset: Vec3::from_array(CAMERA_OFFSET),
            max_bank: SHIP_MAX_BANK,
            max_pitch: SHIP_MAX_PITCH,
            thrust_pitch: SHIP_THRUST_PITCH,
            motion_epsilon: MOTION_EPSILON,
            initial_heading: 0.0,
        }
    }
}

impl ShipConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("ship.rotation_speed", self.rotation_speed)?;
        finite("ship.thrust_power", self.thrust_power)?;
        finite("ship.reverse_factor", self.reverse_factor)?;
        open_unit("ship.friction", self.friction)?;
        positive("ship.max_speed", self.max_speed)?;
        smoothing("ship.body_smoothing", self.body_smoothing)?;
        smoothing("ship.camera_smoothing", self.camera_smoothing)?;
        smoothing("ship.camera_up_smoothing", self.camera_up_smoothing)?;
        finite_vec("ship.camera_offset", self.camera_offset)?;
        finite("ship.max_bank", self.max_bank)?;
        finite("ship.max_pitch", self.max_pitch)?;
        finite("ship.thrust_pitch", self.thrust_pitch)?;
        positive("ship.motion_epsilon", self.motion_epsilon)?;
        finite("ship.initial_heading", self.initial_heading)
    }
}

/// Collectible orb field tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of orbs, fixed for the session
    pub count: usize,
    /// Ship-to-orb distance below which an orb is collected
    pub collision_radius: f32,
    /// Respawn offset magnitude bounds, applied per axis
    pub min_offset: f32,
    pub max_offset: f32,
    /// Per-axis bob amplitude
    pub bob_amplitude: Vec3,
    /// Bob angular frequency (radians per second)
    pub bob_frequency: f32,
    /// Full widths of the initial scatter box around the origin
    pub spawn_extent: Vec3,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: ORB_COUNT,
            collision_radius: ORB_COLLISION_RADIUS,
            min_offset: ORB_RESPAWN_MIN_OFFSET,
            max_offset: ORB_RESPAWN_MAX_OFFSET,
            bob_amplitude: Vec3::from_array(ORB_BOB_AMPLITUDE),
            bob_frequency: ORB_BOB_FREQUENCY,
            spawn_extent: Vec3::from_array(ORB_SPAWN_EXTENT),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        capacity("field.count", self.count)?;
        positive("field.collision_radius", self.collision_radius)?;
        positive("field.min_offset", self.min_offset)?;
        finite("field.max_offset", self.max_offset)?;
        ordered("field.min_offset/max_offset", self.min_offset, self.max_offset)?;
        // The respawn dead zone must clear the pickup sphere
        if self.min_offset <= self.collision_radius {
            return Err(ConfigError::InvalidRange {
                field: "field.collision_radius/min_offset",
                min: self.collision_radius,
                max: self.min_offset,
            });
        }
        finite_vec("field.bob_amplitude", self.bob_amplitude)?;
        // A respawned orb must not bob back into the pickup sphere
        let bob_reach = self.bob_amplitude.abs().max_element();
        let clearance = self.min_offset - self.collision_radius;
        if bob_reach >= clearance {
            return Err(ConfigError::InvalidRange {
                field: "field.bob_amplitude/min_offset",
                min: bob_reach,
                max: clearance,
            });
        }
        finite("field.bob_frequency", self.bob_frequency)?;
        finite_vec("field.spawn_extent", self.spawn_extent)
    }
}

/// Particle burst pool tuning. Rates are per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Pool size, fixed for the session
    pub capacity: usize,
    /// Particles spawned per collection event
    pub burst_size: usize,
    /// Width of the per-axis random velocity range
    pub spread: f32,
    /// Per-tick velocity multiplier, strictly in (0, 1)
    pub drag: f32,
    /// Life lost per tick
    pub decay: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            capacity: PARTICLE_CAPACITY,
            burst_size: PARTICLES_PER_BURST,
            spread: PARTICLE_SPREAD,
            drag: PARTICLE_DRAG,
            decay: PARTICLE_DECAY,
            min_scale: PARTICLE_MIN_SCALE,
            max_scale: PARTICLE_MAX_SCALE,
        }
    }
}

impl BurstConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        capacity("bursts.capacity", self.capacity)?;
        capacity("bursts.burst_size", self.burst_size)?;
        finite("bursts.spread", self.spread)?;
        open_unit("bursts.drag", self.drag)?;
        positive("bursts.decay", self.decay)?;
        finite("bursts.min_scale", self.min_scale)?;
        finite("bursts.max_scale", self.max_scale)?;
        ordered("bursts.min_scale/max_scale", self.min_scale, self.max_scale)
    }
}

/// Sound collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Master gain (0.0 - 1.0)
    pub master_volume: f32,
    pub enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            master_volume: MASTER_VOLUME,
            enabled: true,
        }
    }
}

impl SoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("sound.master_volume", self.master_volume)
    }

    /// Volume actually applied (clamped, zero when disabled)
    pub fn effective_volume(&self) -> f32 {
        if self.enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub ship: ShipConfig,
    pub field: FieldConfig,
    pub bursts: BurstConfig,
    pub sound: SoundConfig,
}

impl SimConfig {
    /// Check every table; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ship.validate()?;
        self.field.validate()?;
        self.bursts.validate()?;
        self.sound.validate()
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn open_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}

/// Smoothing factors may be exactly 1 (snap)
fn smoothing(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}

fn capacity(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::ZeroCapacity { field })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}
