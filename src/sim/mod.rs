//! Deterministic simulation module
//!
//! All per-tick logic lives here:
//! - Fixed per-tick increments only (dt drives just the animation clock)
//! - Seeded RNG only
//! - Stable iteration order (by orb index, by pool slot)
//! - No rendering or platform dependencies

pub mod field;
pub mod particles;
pub mod ship;
pub mod state;
pub mod tick;

pub use field::{Collectible, CollectibleField, CollisionEvent, FieldUpdate};
pub use particles::{Particle, ParticleBurstPool, ParticleInstance};
pub use ship::{CameraPose, ShipKinematics, ShipPose};
pub use state::World;
pub use tick::{FrameOrchestrator, TickReport, tick};
