//! Collectible orb field
//!
//! A fixed set of orbs, each with a stable index. Orbs bob in place, get
//! collected when the ship flies within the pickup radius, and are relocated
//! around the ship instead of being removed.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ship::ShipPose;
use crate::config::{ConfigError, FieldConfig};

/// Stream salt so field and particle RNGs never share a sequence
const FIELD_RNG_SALT: u64 = 0x0b5e_55ed_0f1e_1d00;

/// One collectible orb. `position` is the rest point the bob animates around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub index: usize,
    pub position: Vec3,
}

/// An orb was collected this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub entity_index: usize,
    /// Animated orb position at the moment of collection
    pub position: Vec3,
}

/// Result of one field update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    /// In index order
    pub events: Vec<CollisionEvent>,
    /// Distance from the ship to the closest orb before any relocation
    pub nearest_distance: Option<f32>,
    pub nearest_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct CollectibleField {
    config: FieldConfig,
    orbs: Vec<Collectible>,
    rng: Pcg32,
}

impl CollectibleField {
    /// Scatter `config.count` orbs through the spawn box around the origin
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed ^ FIELD_RNG_SALT);
        let half = config.spawn_extent * 0.5;
        let orbs = (0..config.count)
            .map(|index| Collectible {
                index,
                position: Vec3::new(
                    spread(&mut rng, half.x),
                    spread(&mut rng, half.y),
                    spread(&mut rng, half.z),
                ),
            })
            .collect();
        log::info!("Orb field: {} orbs (seed {seed})", config.count);
        Ok(Self { config, orbs, rng })
    }

    /// Build a field with explicit rest positions; `config.count` is ignored
    pub fn from_positions(
        mut config: FieldConfig,
        positions: &[Vec3],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.count = positions.len();
        config.validate()?;
        let orbs = positions
            .iter()
            .enumerate()
            .map(|(index, &position)| Collectible { index, position })
            .collect();
        Ok(Self {
            config,
            orbs,
            rng: Pcg32::seed_from_u64(seed ^ FIELD_RNG_SALT),
        })
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn orbs(&self) -> &[Collectible] {
        &self.orbs
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Bob offset for orb `index` at `time` seconds; the index desyncs the phase
    pub fn bob_offset(&self, index: usize, time: f32) -> Vec3 {
        let phase = (self.config.bob_frequency * time + index as f32).sin();
        self.config.bob_amplitude * phase
    }

    /// Rendered position of orb `index` at `time`
    pub fn animated_position(&self, index: usize, time: f32) -> Vec3 {
        self.orbs[index].position + self.bob_offset(index, time)
    }

    /// Rendered positions of every orb, in index order
    pub fn animated_positions(&self, time: f32) -> Vec<Vec3> {
        (0..self.orbs.len())
            .map(|i| self.animated_position(i, time))
            .collect()
    }

    /// Test every orb against the ship, relocating the ones collected
    pub fn update(&mut self, ship: &ShipPose, time: f32) -> FieldUpdate {
        let mut result = FieldUpdate::default();
        let mut nearest = f32::INFINITY;

        for index in 0..self.orbs.len() {
            let animated = self.animated_position(index, time);
            let distance = animated.distance(ship.position);

            // Strict comparison keeps the lower index on ties
            if distance < nearest {
                nearest = distance;
                result.nearest_index = Some(index);
            }

            if distance < self.config.collision_radius {
                result.events.push(CollisionEvent {
                    entity_index: index,
                    position: animated,
                });
                self.relocate(index, ship.position);
            }
        }

        result.nearest_distance = result.nearest_index.map(|_| nearest);
        result
    }

    /// Move orb `index` into the respawn shell around `center`
    fn relocate(&mut self, index: usize, center: Vec3) {
        let (min, max) = (self.config.min_offset, self.config.max_offset);
        let offset = Vec3::new(
            shell(&mut self.rng, min, max),
            shell(&mut self.rng, min, max),
            shell(&mut self.rng, min, max),
        );
        let orb = &mut self.orbs[index];
        orb.position = center + offset;
        log::debug!("Orb {index} collected, respawned at {}", orb.position);
    }
}

/// Uniform in [-half, half]
fn spread(rng: &mut Pcg32, half: f32) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..=half)
    } else {
        0.0
    }
}

/// Magnitude in [min, max] with a random sign
fn shell(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    let magnitude = if max > min {
        rng.random_range(min..=max)
    } else {
        min
    };
    if rng.random_bool(0.5) { magnitude } else { -magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> FieldConfig {
        FieldConfig {
            bob_amplitude: Vec3::ZERO,
            ..FieldConfig::default()
        }
    }

    fn ship_at(position: Vec3) -> ShipPose {
        ShipPose {
            position,
            ..ShipPose::default()
        }
    }

    #[test]
    fn test_new_scatters_within_spawn_box() {
        let config = FieldConfig::default();
        let half = config.spawn_extent * 0.5;
        let field = CollectibleField::new(config.clone(), 7).unwrap();
        assert_eq!(field.len(), config.count);
        for (i, orb) in field.orbs().iter().enumerate() {
            assert_eq!(orb.index, i);
            assert!(orb.position.abs().cmple(half).all());
        }
    }

    #[test]
    fn test_rejects_zero_orbs() {
        let config = FieldConfig {
            count: 0,
            ..FieldConfig::default()
        };
        assert!(CollectibleField::new(config, 1).is_err());
        assert!(CollectibleField::from_positions(FieldConfig::default(), &[], 1).is_err());
    }

    #[test]
    fn test_bob_desyncs_by_index() {
        let field =
            CollectibleField::from_positions(FieldConfig::default(), &[Vec3::ZERO; 2], 1).unwrap();
        let a = field.bob_offset(0, 0.0);
        let b = field.bob_offset(1, 0.0);
        assert_eq!(a, Vec3::ZERO);
        assert!(b.z > 0.0);
        assert!(b.length() <= field.config().bob_amplitude.length() + 1e-6);
    }

    #[test]
    fn test_collision_emits_event_and_relocates() {
        let mut field =
            CollectibleField::from_positions(still(), &[Vec3::new(1.0, 0.0, 0.0)], 3).unwrap();
        let ship = ship_at(Vec3::ZERO);
        let update = field.update(&ship, 0.0);

        assert_eq!(update.events.len(), 1);
        assert_eq!(update.events[0].entity_index, 0);
        assert_eq!(update.events[0].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(update.nearest_distance, Some(1.0));

        let min = field.config().min_offset;
        let max = field.config().max_offset;
        let offset = field.orbs()[0].position - ship.position;
        assert!(offset.abs().cmpge(Vec3::splat(min)).all());
        assert!(offset.abs().cmple(Vec3::splat(max)).all());
        assert!(offset.length() >= min);
        assert_eq!(field.orbs()[0].index, 0);

        // Relocated out of reach: no immediate re-trigger
        let again = field.update(&ship, 0.0);
        assert!(again.events.is_empty());
    }

    #[test]
    fn test_multiple_collisions_in_index_order() {
        let positions = [
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ];
        let mut field = CollectibleField::from_positions(still(), &positions, 11).unwrap();
        let update = field.update(&ship_at(Vec3::ZERO), 0.0);
        let hit: Vec<usize> = update.events.iter().map(|e| e.entity_index).collect();
        assert_eq!(hit, vec![0, 2, 3]);
        assert_eq!(field.len(), 4);
        assert_eq!(field.orbs()[1].position, Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearest_ties_pick_lower_index() {
        let positions = [
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ];
        let mut field = CollectibleField::from_positions(still(), &positions, 5).unwrap();
        let update = field.update(&ship_at(Vec3::ZERO), 0.0);
        assert_eq!(update.nearest_index, Some(1));
        assert_eq!(update.nearest_distance, Some(10.0));
        assert!(update.events.is_empty());
    }

    #[test]
    fn test_nearest_uses_animated_position() {
        let config = FieldConfig {
            bob_amplitude: Vec3::new(0.0, 0.0, 1.0),
            bob_frequency: 0.0,
            ..FieldConfig::default()
        };
        // Phase is sin(index): orb 1 rides sin(1) above its rest point
        let mut field =
            CollectibleField::from_positions(config, &[Vec3::splat(40.0), Vec3::ZERO], 5).unwrap();
        let update = field.update(&ship_at(Vec3::new(0.0, 0.0, 10.0)), 0.0);
        let expected = 10.0 - 1.0f32.sin();
        assert_eq!(update.nearest_index, Some(1));
        assert!((update.nearest_distance.unwrap() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_cardinality_is_constant() {
        let mut field = CollectibleField::new(FieldConfig::default(), 99).unwrap();
        let before = field.len();
        let mut ship = ship_at(Vec3::ZERO);
        for t in 0..500 {
            // Sweep straight through the scatter box
            ship.position = Vec3::new(-50.0 + t as f32 * 0.2, 0.0, 0.0);
            field.update(&ship, t as f32 / 60.0);
        }
        assert_eq!(field.len(), before);
        for (i, orb) in field.orbs().iter().enumerate() {
            assert_eq!(orb.index, i);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = CollectibleField::new(FieldConfig::default(), 42).unwrap();
        let b = CollectibleField::new(FieldConfig::default(), 42).unwrap();
        assert_eq!(a.orbs(), b.orbs());
    }
}
