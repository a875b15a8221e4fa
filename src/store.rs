//! UI-facing game state
//!
//! The simulation is the only writer; HUD and menu code read it between
//! ticks. Everything a tick writes is in place before the render pass runs.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::ParticleBurstPool;

/// Last explosion, for presentation effects keyed on a fresh id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionRecord {
    pub position: Vec3,
    /// Strictly increasing across explosions
    pub id: u64,
}

/// Compact view for HUD code
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub game_started: bool,
    pub speed: f32,
    pub nearest_orb_distance: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStore {
    score: u64,
    game_started: bool,
    ship_position: Vec3,
    ship_velocity: Vec3,
    nearest_orb_distance: Option<f32>,
    explosion: Option<ExplosionRecord>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn ship_position(&self) -> Vec3 {
        self.ship_position
    }

    pub fn ship_velocity(&self) -> Vec3 {
        self.ship_velocity
    }

    pub fn ship_speed(&self) -> f32 {
        self.ship_velocity.length()
    }

    pub fn nearest_orb_distance(&self) -> Option<f32> {
        self.nearest_orb_distance
    }

    pub fn explosion(&self) -> Option<ExplosionRecord> {
        self.explosion
    }

    pub fn increase_score(&mut self) {
        self.score += 1;
    }

    pub fn start_game(&mut self) {
        if !self.game_started {
            log::info!("Game started");
        }
        self.game_started = true;
    }

    pub fn set_ship_position(&mut self, position: Vec3) {
        self.ship_position = position;
    }

    pub fn set_ship_velocity(&mut self, velocity: Vec3) {
        self.ship_velocity = velocity;
    }

    pub fn set_nearest_orb_distance(&mut self, distance: Option<f32>) {
        self.nearest_orb_distance = distance;
    }

    /// Record an explosion and spawn its particle burst; returns the explosion id
    pub fn trigger_explosion(&mut self, bursts: &mut ParticleBurstPool, position: Vec3) -> u64 {
        // Ids continue from the last record, including a restored one
        let id = self.explosion.map_or(0, |e| e.id) + 1;
        self.explosion = Some(ExplosionRecord { position, id });
        bursts.burst(position);
        id
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            game_started: self.game_started,
            speed: self.ship_speed(),
            nearest_orb_distance: self.nearest_orb_distance,
        }
    }

    /// HUD snapshot as JSON for presentation layers
    pub fn hud_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.hud())
    }
}
