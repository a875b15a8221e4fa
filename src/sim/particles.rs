//! Particle burst pool
//!
//! Fixed-capacity storage with a single write cursor that wraps. A spawn takes
//! the next `count` slots whatever they hold, so a burst can cut short an older
//! burst that is still fading. Capacity is sized well above what concurrent
//! bursts need, so in practice only dead slots get reused.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{BurstConfig, ConfigError};

const BURST_RNG_SALT: u64 = 0x5ca7_7e12_b0a5_7000;

/// A single pool slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// 1 at spawn, 0 when dead; never negative
    pub life: f32,
    pub scale: f32,
}

impl Particle {
    const DEAD: Particle = Particle {
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        life: 0.0,
        scale: 0.0,
    };

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Rendered size: shrinks with life, zero once dead
    #[inline]
    pub fn visual_scale(&self) -> f32 {
        if self.is_alive() {
            self.scale * self.life
        } else {
            0.0
        }
    }
}

/// Per-slot render data, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleBurstPool {
    config: BurstConfig,
    particles: Vec<Particle>,
    instances: Vec<ParticleInstance>,
    cursor: usize,
    rng: Pcg32,
}

impl ParticleBurstPool {
    pub fn new(config: BurstConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.capacity;
        log::info!("Particle pool: {capacity} slots");
        Ok(Self {
            config,
            particles: vec![Particle::DEAD; capacity],
            instances: vec![ParticleInstance::zeroed(); capacity],
            cursor: 0,
            rng: Pcg32::seed_from_u64(seed ^ BURST_RNG_SALT),
        })
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Slot the next spawn writes to
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Spawn a default-size burst
    pub fn burst(&mut self, position: Vec3) {
        self.spawn(position, self.config.burst_size);
    }

    /// Claim the next `count` slots (mod capacity) for a burst at `position`
    pub fn spawn(&mut self, position: Vec3, count: usize) {
        let half_spread = self.config.spread * 0.5;
        let (min_scale, max_scale) = (self.config.min_scale, self.config.max_scale);
        let capacity = self.particles.len();

        for _ in 0..count {
            let velocity = Vec3::new(
                symmetric(&mut self.rng, half_spread),
                symmetric(&mut self.rng, half_spread),
                symmetric(&mut self.rng, half_spread),
            );
            let scale = if max_scale > min_scale {
                self.rng.random_range(min_scale..max_scale)
            } else {
                min_scale
            };
            self.particles[self.cursor] = Particle {
                position,
                velocity,
                life: 1.0,
                scale,
            };
            self.cursor = (self.cursor + 1) % capacity;
        }
        log::trace!("Burst of {count} at {position}, cursor now {}", self.cursor);
    }

    /// Advance every live slot one tick and report all slots in order
    pub fn update(&mut self) -> &[ParticleInstance] {
        let drag = self.config.drag;
        let decay = self.config.decay;

        for (particle, instance) in self.particles.iter_mut().zip(self.instances.iter_mut()) {
            if particle.is_alive() {
                particle.position += particle.velocity;
                particle.velocity *= drag;
                particle.life = (particle.life - decay).max(0.0);
            }
            *instance = ParticleInstance {
                position: particle.position,
                scale: particle.visual_scale(),
            };
        }
        &self.instances
    }

    /// Last reported instances (all slots)
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }
}

fn symmetric(rng: &mut Pcg32, half: f32) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..=half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool(capacity: usize) -> ParticleBurstPool {
        let config = BurstConfig {
            capacity,
            ..BurstConfig::default()
        };
        ParticleBurstPool::new(config, 1234).unwrap()
    }

    #[test]
    fn test_fresh_spawn_fills_leading_slots() {
        let mut pool = pool(500);
        pool.spawn(Vec3::ZERO, 20);

        let particles = pool.particles();
        assert_eq!(particles.len(), 500);
        for p in &particles[..20] {
            assert_eq!(p.life, 1.0);
            assert_eq!(p.position, Vec3::ZERO);
            assert!(p.scale >= pool.config().min_scale && p.scale < pool.config().max_scale);
            let half = pool.config().spread * 0.5;
            assert!(p.velocity.abs().cmple(Vec3::splat(half)).all());
        }
        for p in &particles[20..] {
            assert_eq!(p.life, 0.0);
        }
        assert_eq!(pool.cursor(), 20);
        assert_eq!(pool.live_count(), 20);
    }

    #[test]
    fn test_spawns_wrap_and_overwrite_oldest() {
        let mut pool = pool(500);
        let first = Vec3::new(1.0, 0.0, 0.0);
        let second = Vec3::new(2.0, 0.0, 0.0);
        pool.spawn(first, 300);
        pool.spawn(second, 300);

        assert_eq!(pool.capacity(), 500);
        assert_eq!(pool.cursor(), 100);
        // Slots 0..100 were rewritten by the wrap, 100..300 still hold the first burst
        assert!(pool.particles()[..100].iter().all(|p| p.position == second));
        assert!(pool.particles()[100..300].iter().all(|p| p.position == first));
        assert!(pool.particles()[300..].iter().all(|p| p.position == second));
        assert_eq!(pool.live_count(), 500);
    }

    #[test]
    fn test_single_spawn_larger_than_pool() {
        let mut pool = pool(8);
        pool.spawn(Vec3::ONE, 19);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.cursor(), 3);
        assert_eq!(pool.live_count(), 8);
    }

    #[test]
    fn test_overwrite_resets_fading_particle() {
        let mut pool = pool(4);
        pool.spawn(Vec3::ZERO, 4);
        for _ in 0..10 {
            pool.update();
        }
        assert!(pool.particles()[0].life < 1.0);
        pool.spawn(Vec3::ONE, 1);
        assert_eq!(pool.particles()[0].life, 1.0);
        assert_eq!(pool.particles()[0].position, Vec3::ONE);
    }

    #[test]
    fn test_update_moves_drags_and_fades() {
        let mut pool = pool(10);
        pool.spawn(Vec3::ZERO, 1);
        let before = pool.particles()[0];
        let instances = pool.update();
        assert_eq!(instances.len(), 10);

        let after = pool.particles()[0];
        assert!(after.position.abs_diff_eq(before.velocity, 1e-6));
        assert!(after.velocity.abs_diff_eq(before.velocity * 0.95, 1e-6));
        assert!((after.life - 0.98).abs() < 1e-6);
        assert!((pool.instances()[0].scale - after.scale * after.life).abs() < 1e-6);
        assert_eq!(pool.instances()[1].scale, 0.0);
    }

    #[test]
    fn test_particles_die_and_report_zero() {
        let mut pool = pool(30);
        pool.burst(Vec3::ZERO);
        assert_eq!(pool.live_count(), pool.config().burst_size);
        for _ in 0..60 {
            pool.update();
        }
        assert_eq!(pool.live_count(), 0);
        assert!(pool.particles().iter().all(|p| p.life == 0.0));
        assert!(pool.instances().iter().all(|i| i.scale == 0.0));

        // Dead slots stay put
        let frozen = pool.particles()[0].position;
        pool.update();
        assert_eq!(pool.particles()[0].position, frozen);
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let mut pool = pool(3);
        pool.spawn(Vec3::ZERO, 1);
        let bytes: &[u8] = bytemuck::cast_slice(pool.update());
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<ParticleInstance>());
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 16);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = BurstConfig {
            capacity: 0,
            ..BurstConfig::default()
        };
        assert!(ParticleBurstPool::new(config, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_fixed_length_and_non_negative_life(
            script in proptest::collection::vec((0usize..80, 0usize..5), 1..120),
        ) {
            let mut pool = pool(64);
            for (count, updates) in script {
                pool.spawn(Vec3::ZERO, count);
                for _ in 0..updates {
                    let len = pool.update().len();
                    prop_assert_eq!(len, 64);
                }
                prop_assert_eq!(pool.capacity(), 64);
                prop_assert!(pool.cursor() < 64);
                prop_assert!(pool.particles().iter().all(|p| (0.0..=1.0).contains(&p.life)));
                prop_assert!(pool.instances().iter().all(|i| i.scale >= 0.0));
            }
        }
    }
}
