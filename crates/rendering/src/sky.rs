use bevy::prelude::*;

use simulation::clock::SkyClock;
use simulation::config::SKY_GRADIENT_BANDS;
use simulation::weather::Weather;

/// Marker for the dome shell mesh.
#[derive(Component)]
pub struct SkyDomeShell;

const DOME_RADIUS: f32 = 180.0;

pub fn setup_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: band_colour(0),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        SkyDomeShell,
        Mesh3d(meshes.add(Sphere::new(DOME_RADIUS))),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::new(0.0, -10.0, 0.0)),
    ));
}

/// Tints the dome by lerping between the current gradient band and the
/// next, so the sky sweeps smoothly through its banded day palette.
/// Precipitation greys the whole sky down.
pub fn tint_sky(
    clock: Res<SkyClock>,
    weather: Res<Weather>,
    dome: Query<&MeshMaterial3d<StandardMaterial>, With<SkyDomeShell>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(material_handle) = dome.get_single() else {
        return;
    };
    let Some(material) = materials.get_mut(&material_handle.0) else {
        return;
    };

    let (band, progress) = clock.gradient_phase();
    let mut colour = color_between_bands(band, progress);
    if weather.is_precipitating() {
        colour = dim(colour, 0.55);
    }
    material.base_color = colour;
}

/// Colour of one gradient band. Bands cover the day from midnight to
/// midnight; the palette pivots around dawn, noon and dusk.
pub fn band_colour(band: u32) -> Color {
    let hour = band as f32 / SKY_GRADIENT_BANDS as f32 * 24.0;
    if !(5.0..19.0).contains(&hour) {
        // Night bands.
        Color::srgb(0.02, 0.03, 0.08)
    } else if hour < 7.0 {
        // Dawn bands blush orange.
        Color::srgb(0.75, 0.45, 0.3)
    } else if hour < 17.0 {
        // Day bands: desert blue.
        Color::srgb(0.35, 0.6, 0.9)
    } else {
        // Dusk bands.
        Color::srgb(0.7, 0.35, 0.25)
    }
}

pub fn color_between_bands(band: u32, progress: f32) -> Color {
    let next = (band + 1) % SKY_GRADIENT_BANDS;
    crate::day_night::color_lerp(band_colour(band), band_colour(next), progress)
}

fn dim(colour: Color, factor: f32) -> Color {
    let c = colour.to_srgba();
    Color::srgb(c.red * factor, c.green * factor, c.blue * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_bands_are_dark() {
        let midnight = band_colour(0).to_srgba();
        assert!(midnight.red < 0.1 && midnight.blue < 0.2);
    }

    #[test]
    fn test_noon_bands_are_blue() {
        let noon_band = SKY_GRADIENT_BANDS / 2;
        let noon = band_colour(noon_band).to_srgba();
        assert!(noon.blue > noon.red, "midday sky leans blue");
    }

    #[test]
    fn test_band_lerp_endpoints() {
        for band in 0..SKY_GRADIENT_BANDS {
            let start = color_between_bands(band, 0.0);
            assert_eq!(start, band_colour(band));
        }
    }

    #[test]
    fn test_last_band_wraps_to_midnight() {
        let wrapped = color_between_bands(SKY_GRADIENT_BANDS - 1, 1.0);
        assert_eq!(wrapped, band_colour(0));
    }

    #[test]
    fn test_dim_darkens() {
        let dimmed = dim(Color::srgb(1.0, 0.8, 0.6), 0.5).to_srgba();
        assert!((dimmed.red - 0.5).abs() < 1e-6);
        assert!((dimmed.green - 0.4).abs() < 1e-6);
    }
}
