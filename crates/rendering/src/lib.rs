use bevy::prelude::*;

pub mod camera;
pub mod day_night;
pub mod fire_render;
pub mod input;
pub mod particle_render;
pub mod scenery;
pub mod sky;

/// Everything visual runs after the simulation's `Effects` phase, so a
/// frame is strictly update-then-extract.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisualSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::GlobeCamera>()
            .configure_sets(
                Update,
                VisualSet.after(simulation::SimulationSet::Effects),
            )
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    day_night::setup_lighting,
                    sky::setup_sky,
                    scenery::setup_scenery,
                    particle_render::setup_particle_assets,
                )
                    .chain()
                    .after(simulation::world_init::init_world),
            )
            .add_systems(
                Update,
                (
                    input::global_keybinds,
                    camera::camera_presets,
                    camera::camera_rotate_lock,
                    camera::camera_movement,
                    camera::apply_camera,
                )
                    .chain()
                    .in_set(VisualSet),
            )
            .add_systems(
                Update,
                (
                    day_night::update_day_night_cycle,
                    sky::tint_sky,
                    particle_render::sync_particle_sprites,
                    fire_render::spawn_fire_billboards,
                    fire_render::sync_fire_billboards,
                )
                    .in_set(VisualSet),
            );
    }
}
