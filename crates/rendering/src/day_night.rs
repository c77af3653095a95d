use bevy::prelude::*;

use simulation::clock::SkyClock;
use simulation::lights::SkyLights;

/// Marker for the sun's directional light (shading contract index 0).
#[derive(Component)]
pub struct SunLamp;

/// Marker for the moon's directional light (index 1).
#[derive(Component)]
pub struct MoonLamp;

pub fn setup_lighting(mut commands: Commands, lights: Res<SkyLights>) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        SunLamp,
        DirectionalLight {
            illuminance: 10_000.0,
            color: lights.sun.diffuse,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(lights.sun.direction, Vec3::Y),
    ));

    commands.spawn((
        MoonLamp,
        DirectionalLight {
            illuminance: 400.0,
            color: lights.moon.diffuse,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(lights.moon.direction, Vec3::Y),
    ));
}

/// Drives both lamps from the orbiting light directions and the hour:
/// intensity follows a dawn/day/dusk/night curve, the transforms follow
/// the simulated orbit.
pub fn update_day_night_cycle(
    clock: Res<SkyClock>,
    lights: Res<SkyLights>,
    mut ambient: ResMut<AmbientLight>,
    mut sun: Query<(&mut DirectionalLight, &mut Transform), (With<SunLamp>, Without<MoonLamp>)>,
    mut moon: Query<(&mut DirectionalLight, &mut Transform), (With<MoonLamp>, Without<SunLamp>)>,
) {
    let hour = clock.hour_of_day();

    if let Ok((mut light, mut transform)) = sun.get_single_mut() {
        light.illuminance = sun_illuminance_for_hour(hour);
        *transform = Transform::default().looking_to(lights.sun.direction, Vec3::Y);
    }

    if let Ok((mut light, mut transform)) = moon.get_single_mut() {
        light.illuminance = moon_illuminance_for_hour(hour);
        *transform = Transform::default().looking_to(lights.moon.direction, Vec3::Y);
    }

    let (brightness, color) = ambient_for_hour(hour);
    ambient.brightness = brightness;
    ambient.color = color;
}

/// Sun strength over the day: ramps through dawn, flat through the day,
/// ramps down at dusk, trace moonlight-only at night.
pub fn sun_illuminance_for_hour(hour: f32) -> f32 {
    if (5.0..7.0).contains(&hour) {
        lerp(500.0, 10_000.0, (hour - 5.0) / 2.0)
    } else if (7.0..17.0).contains(&hour) {
        10_000.0
    } else if (17.0..19.0).contains(&hour) {
        lerp(10_000.0, 500.0, (hour - 17.0) / 2.0)
    } else {
        0.0
    }
}

/// The moon carries the night and fades out across dawn/dusk.
pub fn moon_illuminance_for_hour(hour: f32) -> f32 {
    if (5.0..7.0).contains(&hour) {
        lerp(400.0, 0.0, (hour - 5.0) / 2.0)
    } else if (7.0..17.0).contains(&hour) {
        0.0
    } else if (17.0..19.0).contains(&hour) {
        lerp(0.0, 400.0, (hour - 17.0) / 2.0)
    } else {
        400.0
    }
}

/// Ambient brightness and tint over the day.
pub fn ambient_for_hour(hour: f32) -> (f32, Color) {
    if (5.0..7.0).contains(&hour) {
        let t = (hour - 5.0) / 2.0;
        (
            lerp(50.0, 300.0, t),
            color_lerp(Color::srgb(0.4, 0.45, 0.7), Color::srgb(0.9, 0.9, 1.0), t),
        )
    } else if (7.0..17.0).contains(&hour) {
        (300.0, Color::srgb(0.9, 0.9, 1.0))
    } else if (17.0..19.0).contains(&hour) {
        let t = (hour - 17.0) / 2.0;
        (
            lerp(300.0, 50.0, t),
            color_lerp(Color::srgb(0.9, 0.9, 1.0), Color::srgb(0.4, 0.45, 0.7), t),
        )
    } else {
        (50.0, Color::srgb(0.4, 0.45, 0.7))
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn color_lerp(a: Color, b: Color, t: f32) -> Color {
    let a = a.to_srgba();
    let b = b.to_srgba();
    Color::srgb(
        lerp(a.red, b.red, t),
        lerp(a.green, b.green, t),
        lerp(a.blue, b.blue, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_peaks_at_noon_and_sleeps_at_night() {
        assert_eq!(sun_illuminance_for_hour(12.0), 10_000.0);
        assert_eq!(sun_illuminance_for_hour(0.0), 0.0);
        assert_eq!(sun_illuminance_for_hour(23.0), 0.0);
    }

    #[test]
    fn test_dawn_ramps_up() {
        let early = sun_illuminance_for_hour(5.2);
        let late = sun_illuminance_for_hour(6.8);
        assert!(late > early);
    }

    #[test]
    fn test_moon_carries_the_night() {
        assert!(moon_illuminance_for_hour(0.0) > 0.0);
        assert_eq!(moon_illuminance_for_hour(12.0), 0.0);
    }

    #[test]
    fn test_sun_and_moon_trade_places() {
        for hour in [0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0] {
            let sun = sun_illuminance_for_hour(hour);
            let moon = moon_illuminance_for_hour(hour);
            assert!(
                sun + moon > 0.0,
                "some light must remain at hour {hour}"
            );
        }
    }

    #[test]
    fn test_ambient_dimmer_at_night() {
        let (night, _) = ambient_for_hour(1.0);
        let (day, _) = ambient_for_hour(12.0);
        assert!(night < day);
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }
}
