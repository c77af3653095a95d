use bevy::prelude::*;

use crate::clock::TimeScale;
use crate::particles::{ParticleEmitter, ParticleKind};
use crate::SimulationSet;

pub const FIRE_MIN_SCALE: f32 = 1.0;
pub const FIRE_MAX_SCALE: f32 = 4.0;

/// Per-frame multiplicative step applied while precipitation smothers a fire.
pub const FIRE_SHRINK_FACTOR: f32 = 0.99;

/// Per-frame multiplicative step applied when a flare roll succeeds.
pub const FIRE_GROW_FACTOR: f32 = 1.2;

/// Billboard scroll clock wraps here to keep the value small.
const FIRE_ANIM_WRAP: f32 = 1000.0;

/// The fire quad floats above its host by this much per unit of Y scale.
pub const FIRE_HEIGHT_OFFSET: f32 = 0.75;

/// Per-host fire state: a bounded multiplicative ramp gated by weather, not
/// a heat simulation.
#[derive(Component, Debug, Clone)]
pub struct FireEffect {
    pub active: bool,
    pub scale: Vec3,
    /// Scroll clock for the flame billboard, advances only while burning.
    pub anim_time: f32,
}

impl Default for FireEffect {
    fn default() -> Self {
        Self {
            active: false,
            scale: Vec3::ONE,
            anim_time: 0.0,
        }
    }
}

impl FireEffect {
    pub fn ignite(&mut self) {
        self.active = true;
    }

    /// One growth step, clamped to the ceiling.
    pub fn grow(&mut self) {
        if self.scale.x < FIRE_MAX_SCALE {
            self.scale = (self.scale * FIRE_GROW_FACTOR).min(Vec3::splat(FIRE_MAX_SCALE));
        }
    }

    /// One smothering step. A fire already at the floor goes out instead of
    /// shrinking further; the scale is left untouched on that call.
    pub fn shrink(&mut self) {
        if !self.active {
            return;
        }
        if self.scale.x <= FIRE_MIN_SCALE {
            self.active = false;
            return;
        }
        self.scale = (self.scale * FIRE_SHRINK_FACTOR).max(Vec3::splat(FIRE_MIN_SCALE));
    }

    pub fn tick_anim(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.anim_time += dt;
        if self.anim_time > FIRE_ANIM_WRAP {
            self.anim_time = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn animate_fires(
    time: Res<Time>,
    scale: Res<TimeScale>,
    mut fires: Query<&mut FireEffect>,
) {
    let dt = scale.scaled(time.delta_secs());
    for mut fire in &mut fires {
        fire.tick_anim(dt);
    }
}

/// A fire's ember emitter follows its activation state.
pub fn sync_fire_emitters(mut fires: Query<(&FireEffect, &mut ParticleEmitter)>) {
    for (fire, mut emitter) in &mut fires {
        if emitter.kind == ParticleKind::Fire {
            emitter.active = fire.active;
        }
    }
}

pub struct FirePlugin;

impl Plugin for FirePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (animate_fires, sync_fire_emitters)
                .in_set(SimulationSet::Effects)
                .after(crate::flora::update_cacti),
        );
    }
}
