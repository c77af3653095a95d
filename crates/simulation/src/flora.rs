//! Cactus lifecycle: watering, sun-fed growth pulses, and the ignition
//! coupling between dry sunny spells and each cactus' fire.

use bevy::prelude::*;
use rand::Rng;

use crate::clock::TimeScale;
use crate::fire::FireEffect;
use crate::sim_rng::SimRng;
use crate::weather::Weather;
use crate::SimulationSet;

/// Per-frame chance that a dry, sun-baked cactus catches fire.
pub const CACTUS_IGNITION_CHANCE: f32 = 0.001;

/// Per-frame chance that an already-burning fire takes a growth step.
pub const FIRE_FLARE_CHANCE: f32 = 0.005;

/// A growth pulse runs for this many frames, then pauses.
pub const CACTUS_GROW_PULSE_FRAMES: u32 = 100;

/// Cacti stop growing past this uniform scale.
pub const CACTUS_MAX_SCALE: f32 = 1.5;

/// Scale gained per second while a growth pulse runs.
const CACTUS_GROWTH_RATE: Vec3 = Vec3::new(0.05, 0.1, 0.05);

#[derive(Component, Debug, Clone, Default)]
pub struct Cactus {
    /// Precipitation has fallen since the last growth pulse.
    pub watered: bool,
    pub growing: bool,
    pub grow_frames: u32,
}

/// The weather facts a cactus reacts to, captured once per frame.
#[derive(Debug, Clone, Copy)]
pub struct WeatherView {
    pub precipitating: bool,
    pub sunny: bool,
    pub prev_sunny: bool,
}

impl WeatherView {
    pub fn of(weather: &Weather) -> Self {
        Self {
            precipitating: weather.is_precipitating(),
            sunny: weather.sunny,
            prev_sunny: weather.prev_sunny,
        }
    }
}

/// One frame of cactus life, fed explicit probability rolls so the decision
/// logic stays testable without an ECS world.
///
/// Dry weather: a watered cactus starts a growth pulse the moment the sun
/// is out, and a dry-streak day (yesterday dry, sun out now) exposes the
/// cactus to ignition; a burning fire may flare one growth step. Wet
/// weather: the fire is smothered one step and the cactus soaks.
pub fn advance_cactus(
    cactus: &mut Cactus,
    fire: &mut FireEffect,
    scale: &mut Vec3,
    view: WeatherView,
    ignition_roll: f32,
    flare_roll: f32,
    dt: f32,
) {
    if !view.precipitating {
        if cactus.watered && view.sunny {
            cactus.growing = true;
            cactus.watered = false;
        }
        if view.prev_sunny && view.sunny {
            if ignition_roll <= CACTUS_IGNITION_CHANCE {
                fire.ignite();
            }
            if fire.active && flare_roll <= FIRE_FLARE_CHANCE {
                fire.grow();
            }
        }
    } else {
        fire.shrink();
        cactus.watered = true;
    }

    if cactus.growing {
        if scale.x <= CACTUS_MAX_SCALE {
            *scale += CACTUS_GROWTH_RATE * dt;
        }
        cactus.grow_frames += 1;
        if cactus.grow_frames >= CACTUS_GROW_PULSE_FRAMES {
            cactus.growing = false;
            cactus.grow_frames = 0;
        }
    }
}

pub fn update_cacti(
    time: Res<Time>,
    time_scale: Res<TimeScale>,
    weather: Res<Weather>,
    mut rng: ResMut<SimRng>,
    mut cacti: Query<(&mut Cactus, &mut FireEffect, &mut Transform)>,
) {
    let dt = time_scale.scaled(time.delta_secs());
    let view = WeatherView::of(&weather);
    for (mut cactus, mut fire, mut transform) in &mut cacti {
        let ignition_roll = rng.0.gen::<f32>();
        let flare_roll = rng.0.gen::<f32>();
        advance_cactus(
            &mut cactus,
            &mut fire,
            &mut transform.scale,
            view,
            ignition_roll,
            flare_roll,
            dt,
        );
    }
}

pub struct FloraPlugin;

impl Plugin for FloraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_cacti.in_set(SimulationSet::Effects));
    }
}
