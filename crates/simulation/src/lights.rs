use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::clock::SkyClock;
use crate::SimulationSet;

/// One orbiting celestial light. The shading contract indexes these as
/// sun = 0, moon = 1.
#[derive(Debug, Clone)]
pub struct CelestialLight {
    pub diffuse: Color,
    pub specular: Color,
    pub specular_intensity: f32,
    /// Direction at midnight; the live direction orbits from here.
    pub start_direction: Vec3,
    /// Current direction, updated every frame from the clock.
    pub direction: Vec3,
}

impl CelestialLight {
    fn new(diffuse: Color, start_direction: Vec3) -> Self {
        Self {
            diffuse,
            specular: Color::WHITE,
            specular_intensity: 500.0,
            start_direction,
            direction: start_direction,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SkyLights {
    pub sun: CelestialLight,
    pub moon: CelestialLight,
}

impl Default for SkyLights {
    fn default() -> Self {
        Self::from_directions(Vec3::new(-0.5, -1.0, 0.25), Vec3::new(0.5, -1.0, -0.25))
    }
}

impl SkyLights {
    pub fn from_directions(sun_direction: Vec3, moon_direction: Vec3) -> Self {
        Self {
            sun: CelestialLight::new(Color::WHITE, sun_direction),
            moon: CelestialLight::new(Color::srgb(0.078, 0.24, 0.71), moon_direction),
        }
    }

    /// Per-light directions in contract order (sun = 0, moon = 1).
    pub fn directions(&self) -> [Vec3; 2] {
        [self.sun.direction, self.moon.direction]
    }

    /// Per-light diffuse colours in contract order.
    pub fn diffuse_colours(&self) -> [Color; 2] {
        [self.sun.diffuse, self.moon.diffuse]
    }
}

/// Spins both lights around the Z axis by the day fraction, so the sun and
/// moon sweep a full orbit per simulated day.
pub fn orbit_sky_lights(clock: Res<SkyClock>, mut lights: ResMut<SkyLights>) {
    let spin = Quat::from_rotation_z(clock.time_of_day.rem_euclid(1.0) * TAU);
    lights.sun.direction = spin * lights.sun.start_direction;
    lights.moon.direction = spin * lights.moon.start_direction;
}

pub struct SkyLightsPlugin;

impl Plugin for SkyLightsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkyLights>()
            .add_systems(Update, orbit_sky_lights.in_set(SimulationSet::Clock));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_matches_start_direction() {
        let clock = SkyClock::default();
        let mut lights = SkyLights::default();
        let spin = Quat::from_rotation_z(clock.time_of_day * TAU);
        lights.sun.direction = spin * lights.sun.start_direction;
        assert!(lights
            .sun
            .direction
            .abs_diff_eq(lights.sun.start_direction, 1e-5));
    }

    #[test]
    fn test_half_day_mirrors_direction() {
        let mut lights = SkyLights::from_directions(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let spin = Quat::from_rotation_z(0.5 * TAU);
        lights.sun.direction = spin * lights.sun.start_direction;
        // Half an orbit about Z flips X and Y.
        assert!(lights.sun.direction.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn test_orbit_preserves_length() {
        let start = Vec3::new(-0.5, -1.0, 0.25);
        let spin = Quat::from_rotation_z(0.37 * TAU);
        let rotated = spin * start;
        assert!((rotated.length() - start.length()).abs() < 1e-5);
    }

    #[test]
    fn test_contract_order_is_sun_then_moon() {
        let lights = SkyLights::default();
        assert_eq!(lights.directions()[0], lights.sun.direction);
        assert_eq!(lights.directions()[1], lights.moon.direction);
        assert_eq!(lights.diffuse_colours()[0], lights.sun.diffuse);
    }
}
