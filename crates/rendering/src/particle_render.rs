use bevy::prelude::*;

use simulation::particles::{ParticleEmitter, ParticleKind};

/// Shared quad mesh plus one material per particle kind. Every billboard
/// instance of a kind reuses the same handles so the renderer can batch
/// the whole stream.
#[derive(Resource)]
pub struct ParticleAssets {
    pub quad: Handle<Mesh>,
    snow: Handle<StandardMaterial>,
    rain: Handle<StandardMaterial>,
    fire: Handle<StandardMaterial>,
    dust: Handle<StandardMaterial>,
}

impl ParticleAssets {
    pub fn material_for(&self, kind: ParticleKind) -> Handle<StandardMaterial> {
        match kind {
            ParticleKind::Snow => self.snow.clone(),
            ParticleKind::Rain => self.rain.clone(),
            ParticleKind::Fire => self.fire.clone(),
            ParticleKind::Dust => self.dust.clone(),
        }
    }
}

/// Marker for one pooled billboard entity.
#[derive(Component)]
pub struct ParticleSprite;

/// Reusable billboard entities backing one emitter. Grows on demand (up to
/// a per-frame budget) and never shrinks; instances beyond the live count
/// are just hidden, so a calm frame after a storm costs nothing.
#[derive(Component, Default)]
pub struct SpritePool {
    pub entities: Vec<Entity>,
}

/// Keeps a 50k-particle cloudburst from allocating every billboard in a
/// single frame.
const SPRITE_SPAWN_BUDGET: usize = 2_000;

fn billboard_material(colour: Vec4, emissive: bool) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(colour.x, colour.y, colour.z, colour.w),
        emissive: if emissive {
            LinearRgba::new(colour.x * 4.0, colour.y * 4.0, colour.z * 4.0, 1.0)
        } else {
            LinearRgba::BLACK
        },
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    }
}

pub fn setup_particle_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    use simulation::particles::EmitterParams;

    let colour = |kind| EmitterParams::for_kind(kind).colour;
    commands.insert_resource(ParticleAssets {
        quad: meshes.add(Rectangle::new(1.0, 1.0)),
        snow: materials.add(billboard_material(colour(ParticleKind::Snow), false)),
        rain: materials.add(billboard_material(colour(ParticleKind::Rain), false)),
        fire: materials.add(billboard_material(colour(ParticleKind::Fire), true)),
        dust: materials.add(billboard_material(colour(ParticleKind::Dust), false)),
    });
}

/// Streams each pool's render snapshot into its billboard entities: one
/// transform write per live particle, camera-facing rotation, and a hidden
/// flag for every slot past the live count.
pub fn sync_particle_sprites(
    mut commands: Commands,
    assets: Res<ParticleAssets>,
    camera: Query<&Transform, (With<Camera3d>, Without<ParticleSprite>)>,
    mut emitters: Query<(Entity, &ParticleEmitter, Option<&mut SpritePool>)>,
    mut sprites: Query<(&mut Transform, &mut Visibility), With<ParticleSprite>>,
) {
    let camera_rotation = camera
        .get_single()
        .map(|transform| transform.rotation)
        .unwrap_or_default();

    for (entity, emitter, sprite_pool) in &mut emitters {
        let Some(mut sprite_pool) = sprite_pool else {
            // First sight of this emitter: give it an empty pool; billboards
            // start appearing next frame.
            commands.entity(entity).insert(SpritePool::default());
            continue;
        };

        let live = emitter.pool.live_count();
        let size = emitter.params.particle_size;

        let deficit = live.saturating_sub(sprite_pool.entities.len());
        for _ in 0..deficit.min(SPRITE_SPAWN_BUDGET) {
            let sprite = commands
                .spawn((
                    ParticleSprite,
                    Mesh3d(assets.quad.clone()),
                    MeshMaterial3d(assets.material_for(emitter.kind)),
                    Transform::from_scale(Vec3::splat(size)),
                    Visibility::Hidden,
                ))
                .id();
            sprite_pool.entities.push(sprite);
        }

        let mut positions = emitter.pool.snapshot();
        for (index, sprite) in sprite_pool.entities.iter().enumerate() {
            let Ok((mut transform, mut visibility)) = sprites.get_mut(*sprite) else {
                continue;
            };
            match positions.next() {
                Some(position) if index < live => {
                    transform.translation = position;
                    transform.rotation = camera_rotation;
                    transform.scale = Vec3::splat(size);
                    *visibility = Visibility::Visible;
                }
                _ => {
                    *visibility = Visibility::Hidden;
                }
            }
        }
    }
}
