use bevy::prelude::*;

use simulation::fire::{FireEffect, FIRE_HEIGHT_OFFSET};

use crate::particle_render::ParticleAssets;
use simulation::particles::ParticleKind;

/// One camera-facing flame quad, floating above its host cactus.
#[derive(Component)]
pub struct FireBillboard {
    pub host: Entity,
}

/// Added to a host once its billboard exists.
#[derive(Component)]
pub struct FireBillboardLink(pub Entity);

const FLAME_QUAD_SIZE: f32 = 3.0;

/// Gives every fire a billboard entity, once.
pub fn spawn_fire_billboards(
    mut commands: Commands,
    assets: Res<ParticleAssets>,
    fires: Query<Entity, (With<FireEffect>, Without<FireBillboardLink>)>,
) {
    for host in &fires {
        let billboard = commands
            .spawn((
                FireBillboard { host },
                Mesh3d(assets.quad.clone()),
                MeshMaterial3d(assets.material_for(ParticleKind::Fire)),
                Transform::from_scale(Vec3::splat(FLAME_QUAD_SIZE)),
                Visibility::Hidden,
            ))
            .id();
        commands.entity(host).insert(FireBillboardLink(billboard));
    }
}

/// Seats each flame above its host, scales it with the fire's growth,
/// faces it at the camera and flickers it from the fire's anim clock.
pub fn sync_fire_billboards(
    camera: Query<&Transform, (With<Camera3d>, Without<FireBillboard>)>,
    fires: Query<(&FireEffect, &Transform, &FireBillboardLink), Without<FireBillboard>>,
    mut billboards: Query<(&mut Transform, &mut Visibility), With<FireBillboard>>,
) {
    let camera_rotation = camera
        .get_single()
        .map(|transform| transform.rotation)
        .unwrap_or_default();

    for (fire, host_transform, link) in &fires {
        let Ok((mut transform, mut visibility)) = billboards.get_mut(link.0) else {
            continue;
        };

        if !fire.active {
            *visibility = Visibility::Hidden;
            continue;
        }

        *visibility = Visibility::Visible;
        transform.translation = host_transform.translation
            + Vec3::Y * (FIRE_HEIGHT_OFFSET * fire.scale.y);
        transform.rotation = camera_rotation;
        transform.scale = fire.scale * FLAME_QUAD_SIZE * flicker(fire.anim_time);
    }
}

/// Cheap flame wobble on the billboard scale.
fn flicker(anim_time: f32) -> f32 {
    1.0 + 0.06 * (anim_time * 23.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flicker_stays_near_unity() {
        let mut t = 0.0;
        while t < 10.0 {
            let f = flicker(t);
            assert!((0.9..=1.1).contains(&f));
            t += 0.05;
        }
    }
}
