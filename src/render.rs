//! Render collaborator
//!
//! The simulation hands over one `RenderFrame` per tick, after the store has
//! been written. Materials, meshes and the starfield belong to the renderer.

use glam::Vec3;

use crate::sim::{CameraPose, ParticleInstance, ShipPose};

/// Everything the renderer needs for one tick
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub tick: u64,
    pub ship: ShipPose,
    pub camera: CameraPose,
    /// Animated orb positions, in index order
    pub collectibles: Vec<Vec3>,
    /// One entry per pool slot; dead slots have zero scale
    pub particles: Vec<ParticleInstance>,
    /// Ship is moving fast enough to draw its engine trail
    pub motion_trail: bool,
}

pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn present(&mut self, _frame: &RenderFrame) {}
}

impl<F: FnMut(&RenderFrame)> RenderSink for F {
    fn present(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}
