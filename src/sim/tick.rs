//! Per-tick simulation step
//!
//! Order within a tick is fixed: ship, orb field, collection side effects,
//! particles, then the store. A collection found this tick bursts at this
//! tick's orb position, and the store is settled before anything renders.
//! Until the store reports a started game the orb stage is skipped: no
//! collections and no nearest distance.

use super::field::{CollisionEvent, FieldUpdate};
use super::state::World;
use crate::audio::SoundSink;
use crate::config::{ConfigError, SimConfig};
use crate::input::{InputSnapshot, InputState};
use crate::render::{RenderFrame, RenderSink};
use crate::store::GameStore;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Orbs collected, in index order
    pub collisions: Vec<CollisionEvent>,
    pub nearest_distance: Option<f32>,
    /// Score after the tick
    pub score: u64,
}

/// Advance the world by one tick and write the results into `store`
pub fn tick(
    world: &mut World,
    input: &InputSnapshot,
    dt: f32,
    store: &mut GameStore,
    sound: &mut dyn SoundSink,
) -> TickReport {
    world.advance_clock(dt);
    let time = world.time();

    let (pose, _camera) = world.ship.update(input);
    // Orbs stay out of play until the player starts the game
    let field = if store.game_started() {
        world.field.update(&pose, time)
    } else {
        FieldUpdate::default()
    };

    for event in &field.events {
        store.trigger_explosion(&mut world.bursts, event.position);
        store.increase_score();
        if let Err(err) = sound.play_collect_sound() {
            log::warn!("Collect sound dropped: {err}");
        }
        log::debug!(
            "Tick {}: orb {} collected, score {}",
            world.ticks(),
            event.entity_index,
            store.score()
        );
    }

    world.bursts.update();

    store.set_ship_position(pose.position);
    store.set_ship_velocity(pose.velocity);
    store.set_nearest_orb_distance(field.nearest_distance);

    log::trace!(
        "Tick {}: pos {} speed {:.3} nearest {:?}",
        world.ticks(),
        pose.position,
        pose.speed(),
        field.nearest_distance
    );

    TickReport {
        collisions: field.events,
        nearest_distance: field.nearest_distance,
        score: store.score(),
    }
}

/// Drives `tick` from the host loop and hands each settled frame to the renderer
pub struct FrameOrchestrator<S: SoundSink, R: RenderSink> {
    world: World,
    sound: S,
    render: R,
    frame: RenderFrame,
}

impl<S: SoundSink, R: RenderSink> FrameOrchestrator<S, R> {
    pub fn new(config: &SimConfig, seed: u64, sound: S, render: R) -> Result<Self, ConfigError> {
        Ok(Self::from_world(World::new(config, seed)?, sound, render))
    }

    pub fn from_world(world: World, sound: S, render: R) -> Self {
        let frame = world.render_frame();
        Self {
            world,
            sound,
            render,
            frame,
        }
    }

    /// Snapshot input, run one tick, then present
    pub fn tick(&mut self, input: &InputState, store: &mut GameStore, dt: f32) -> TickReport {
        let snapshot = input.snapshot();
        let report = tick(&mut self.world, &snapshot, dt, store, &mut self.sound);
        self.world.fill_frame(&mut self.frame);
        self.render.present(&self.frame);
        report
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    /// Last frame handed to the renderer
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }
}
