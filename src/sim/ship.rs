//! Ship kinematics and chase camera
//!
//! Heading is a rotation about +Z with the nose along +Y at heading 0. Body
//! roll (about the nose) and pitch (about the wing axis) are cosmetic: they
//! feed the camera and the renderer but never the velocity.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ShipConfig};
use crate::input::{Control, InputSnapshot};
use crate::{forward_from_heading, normalize_angle, smooth_toward, smooth_toward_vec};

/// Ship state after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Radians about +Z in [-π, π), positive turns left
    pub heading: f32,
    /// Radians about the nose axis, positive banks right
    pub body_roll: f32,
    /// Radians about the wing axis, positive is nose up
    pub body_pitch: f32,
}

impl Default for ShipPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            heading: 0.0,
            body_roll: 0.0,
            body_pitch: 0.0,
        }
    }
}

impl ShipPose {
    /// Full orientation: heading, then roll, then pitch
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.heading)
            * Quat::from_rotation_y(self.body_roll)
            * Quat::from_rotation_x(self.body_pitch)
    }

    /// Nose direction in the horizontal plane (ignores roll and pitch)
    pub fn forward(&self) -> Vec3 {
        forward_from_heading(self.heading)
    }

    /// Ship-local up in world space
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Chase camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub up: Vec3,
    pub look_at: Vec3,
}

/// Integrates the player ship and derives the chase camera from it
#[derive(Debug, Clone)]
pub struct ShipKinematics {
    config: ShipConfig,
    pose: ShipPose,
    camera: CameraPose,
}

impl ShipKinematics {
    pub fn new(config: ShipConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pose = ShipPose {
            heading: normalize_angle(config.initial_heading),
            ..ShipPose::default()
        };
        let camera = rest_camera(&config, &pose);
        Ok(Self {
            config,
            pose,
            camera,
        })
    }

    /// Teleport to `position` at rest, snapping the camera behind the ship
    pub fn place(&mut self, position: Vec3) {
        self.pose.position = position;
        self.pose.velocity = Vec3::ZERO;
        self.pose.body_roll = 0.0;
        self.pose.body_pitch = 0.0;
        self.camera = rest_camera(&self.config, &self.pose);
    }

    pub fn pose(&self) -> &ShipPose {
        &self.pose
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// Whether the ship is moving fast enough for the motion trail
    pub fn is_moving(&self) -> bool {
        self.pose.speed() > self.config.motion_epsilon
    }

    /// Advance one tick. All rates are fixed per tick.
    pub fn update(&mut self, input: &InputSnapshot) -> (ShipPose, CameraPose) {
        let cfg = &self.config;
        let pose = &mut self.pose;

        // Rotation
        let turn = input.turn_axis();
        pose.heading = normalize_angle(pose.heading + turn * cfg.rotation_speed);

        // Thrust
        let forward = forward_from_heading(pose.heading);
        let thrusting = input.is_pressed(Control::ThrustForward);
        if thrusting {
            pose.velocity += forward * cfg.thrust_power;
        }
        if input.is_pressed(Control::ThrustBackward) {
            pose.velocity -= forward * cfg.thrust_power * cfg.reverse_factor;
        }
        let vertical = input.vertical_axis();
        pose.velocity.z += vertical * cfg.thrust_power;

        // Friction, speed cap, integrate
        pose.velocity *= cfg.friction;
        let speed = pose.velocity.length();
        if speed > cfg.max_speed {
            pose.velocity *= cfg.max_speed / speed;
        }
        pose.position += pose.velocity;

        // Bank into turns, pitch with climb/dive, dip the nose under thrust
        let roll_target = -turn * cfg.max_bank;
        let pitch_target = if vertical != 0.0 {
            vertical * cfg.max_pitch
        } else if thrusting {
            -cfg.thrust_pitch
        } else {
            0.0
        };
        pose.body_roll = smooth_toward(pose.body_roll, roll_target, cfg.body_smoothing);
        pose.body_pitch = smooth_toward(pose.body_pitch, pitch_target, cfg.body_smoothing);

        // Chase camera trails the full orientation and looks at the live position
        let orientation = pose.orientation();
        let target = pose.position + orientation * cfg.camera_offset;
        let target_up = orientation * Vec3::Z;
        let camera = &mut self.camera;
        camera.position = smooth_toward_vec(camera.position, target, cfg.camera_smoothing);
        camera.up = smooth_toward_vec(camera.up, target_up, cfg.camera_up_smoothing)
            .normalize_or(target_up);
        camera.look_at = pose.position;

        (*pose, *camera)
    }
}

fn rest_camera(config: &ShipConfig, pose: &ShipPose) -> CameraPose {
    let orientation = pose.orientation();
    CameraPose {
        position: pose.position + orientation * config.camera_offset,
        up: orientation * Vec3::Z,
        look_at: pose.position,
    }
}
