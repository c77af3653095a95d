use bevy::prelude::*;

use simulation::flora::Cactus;
use simulation::world_init::{Desert, GlobeBase};

/// Attaches primitive meshes to the scene entities the simulation spawned.
/// Proper models would hang off the asset server the same way; primitives
/// keep the diorama self-contained.
pub fn setup_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    desert: Query<Entity, With<Desert>>,
    base: Query<Entity, With<GlobeBase>>,
    cacti: Query<Entity, With<Cactus>>,
) {
    let sand = materials.add(StandardMaterial {
        base_color: Color::srgb(0.82, 0.7, 0.45),
        perceptual_roughness: 1.0,
        ..default()
    });
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.26, 0.13),
        perceptual_roughness: 0.9,
        ..default()
    });
    let cactus_green = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.5, 0.2),
        perceptual_roughness: 0.8,
        ..default()
    });

    let sand_disc = meshes.add(Cylinder::new(90.0, 1.0));
    for entity in &desert {
        commands
            .entity(entity)
            .insert((Mesh3d(sand_disc.clone()), MeshMaterial3d(sand.clone())));
    }

    let base_drum = meshes.add(Cylinder::new(26.0, 4.0));
    for entity in &base {
        commands
            .entity(entity)
            .insert((Mesh3d(base_drum.clone()), MeshMaterial3d(wood.clone())));
    }

    let cactus_body = meshes.add(Capsule3d::new(0.8, 3.0));
    for entity in &cacti {
        commands.entity(entity).insert((
            Mesh3d(cactus_body.clone()),
            MeshMaterial3d(cactus_green.clone()),
        ));
    }
}
