//! Simulation world
//!
//! Owns the three per-tick components and the simulation clock. All random
//! choices derive from the world seed.

use super::field::CollectibleField;
use super::particles::ParticleBurstPool;
use super::ship::ShipKinematics;
use crate::config::{ConfigError, SimConfig};
use crate::render::RenderFrame;

#[derive(Debug, Clone)]
pub struct World {
    pub ship: ShipKinematics,
    pub field: CollectibleField,
    pub bursts: ParticleBurstPool,
    /// Seed the world was built from
    pub seed: u64,
    /// Seconds of simulated time (drives the orb bob)
    time: f32,
    /// Simulation tick counter
    ticks: u64,
}

impl World {
    /// Build every component from a validated config
    pub fn new(config: &SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = Self::from_parts(
            ShipKinematics::new(config.ship.clone())?,
            CollectibleField::new(config.field.clone(), seed)?,
            ParticleBurstPool::new(config.bursts.clone(), seed)?,
            seed,
        );
        log::info!("World created (seed {seed})");
        Ok(world)
    }

    /// Assemble a world from pre-built components
    pub fn from_parts(
        ship: ShipKinematics,
        field: CollectibleField,
        bursts: ParticleBurstPool,
        seed: u64,
    ) -> Self {
        Self {
            ship,
            field,
            bursts,
            seed,
            time: 0.0,
            ticks: 0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Step the clock; negative or NaN `dt` is treated as zero
    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.time += dt.max(0.0);
        self.ticks += 1;
    }

    /// Fresh render frame for the current state
    pub fn render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame {
            tick: 0,
            ship: *self.ship.pose(),
            camera: *self.ship.camera(),
            collectibles: Vec::with_capacity(self.field.len()),
            particles: Vec::with_capacity(self.bursts.capacity()),
            motion_trail: false,
        };
        self.fill_frame(&mut frame);
        frame
    }

    /// Refill `frame` in place, reusing its buffers
    pub fn fill_frame(&self, frame: &mut RenderFrame) {
        frame.tick = self.ticks;
        frame.ship = *self.ship.pose();
        frame.camera = *self.ship.camera();
        frame.motion_trail = self.ship.is_moving();

        frame.collectibles.clear();
        frame
            .collectibles
            .extend((0..self.field.len()).map(|i| self.field.animated_position(i, self.time)));

        frame.particles.clear();
        frame.particles.extend_from_slice(self.bursts.instances());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.bursts.drag = 0.0;
        assert!(World::new(&config, 1).is_err());
    }

    #[test]
    fn test_render_frame_has_fixed_lengths() {
        let config = SimConfig::default();
        let world = World::new(&config, 1).unwrap();
        let frame = world.render_frame();
        assert_eq!(frame.collectibles.len(), config.field.count);
        assert_eq!(frame.particles.len(), config.bursts.capacity);
        assert!(!frame.motion_trail);
        assert_eq!(frame.camera.look_at, frame.ship.position);
    }

    #[test]
    fn test_clock_ignores_bad_dt() {
        let mut world = World::new(&SimConfig::default(), 1).unwrap();
        world.advance_clock(0.5);
        world.advance_clock(-1.0);
        world.advance_clock(f32::NAN);
        assert_eq!(world.time(), 0.5);
        assert_eq!(world.ticks(), 3);
    }
}
