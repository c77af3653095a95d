use bevy::prelude::*;

use crate::clock::{SkyClock, TimeScale};
use crate::config::{CACTUS_COUNT, SCENE_CONFIG_PATH};
use crate::fire::FireEffect;
use crate::flora::Cactus;
use crate::lights::SkyLights;
use crate::particles::{ParticleEmitter, ParticleKind};
use crate::scene_config::{SceneConfig, SceneReset};
use crate::weather::Weather;
use crate::SimulationSet;

/// Marker for the sand floor (config slot 0).
#[derive(Component)]
pub struct Desert;

/// Marker for the wooden globe base (config slot 1).
#[derive(Component)]
pub struct GlobeBase;

/// The cactus that the debug force-ignite key targets.
#[derive(Component)]
pub struct PrimaryCactus;

/// Ties a scene entity to its config slot so a reset can put it back.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneAnchor {
    pub slot: usize,
    pub home_scale: Vec3,
}

/// Loads the scene config and spawns the diorama. A malformed config is
/// fatal here: the error is logged and the app exits before any scene
/// state is constructed.
pub fn init_world(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    let config = match SceneConfig::load(SCENE_CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            error!("cannot start scene: {error}");
            exit.send(AppExit::error());
            return;
        }
    };

    spawn_scene(&mut commands, &config);

    commands.insert_resource(SkyLights::from_directions(
        config.sun_direction(),
        config.moon_direction(),
    ));
    commands.insert_resource(Weather {
        season_length_days: config.season_length_days,
        ..Default::default()
    });
    commands.insert_resource(config);
}

fn spawn_scene(commands: &mut Commands, config: &SceneConfig) {
    commands.spawn((
        Desert,
        SceneAnchor {
            slot: 0,
            home_scale: Vec3::splat(0.985),
        },
        Transform::from_translation(config.position(0)).with_scale(Vec3::splat(0.985)),
    ));

    commands.spawn((
        GlobeBase,
        SceneAnchor {
            slot: 1,
            home_scale: Vec3::new(3.75, 1.8, 3.75),
        },
        Transform::from_translation(config.position(1)).with_scale(Vec3::new(3.75, 1.8, 3.75)),
    ));

    for i in 0..CACTUS_COUNT {
        let slot = 2 + i;
        let position = config.position(slot);
        let mut cactus = commands.spawn((
            Cactus::default(),
            FireEffect::default(),
            ParticleEmitter::new(ParticleKind::Fire, position),
            SceneAnchor {
                slot,
                home_scale: Vec3::ONE,
            },
            Transform::from_translation(position),
        ));
        if i == 0 {
            cactus.insert(PrimaryCactus);
        }
    }

    // Weather systems sit at the globe centre and blanket the whole scene.
    commands.spawn((
        ParticleEmitter::new(ParticleKind::Rain, Vec3::new(0.0, 60.0, 0.0)),
        Transform::default(),
    ));
    commands.spawn((
        ParticleEmitter::new(ParticleKind::Snow, Vec3::new(0.0, 60.0, 0.0)),
        Transform::default(),
    ));
    commands.spawn((
        ParticleEmitter::new(ParticleKind::Dust, Vec3::new(0.0, 20.0, 0.0)),
        Transform::default(),
    ));
}

/// Handles `SceneReset`: re-reads the config (keeping the old one if the
/// reload fails), rewinds the clock and weather, clears every pool, puts
/// fires out and parks every anchored object back on its config slot.
pub fn reset_scene(
    mut resets: EventReader<SceneReset>,
    mut config: ResMut<SceneConfig>,
    mut clock: ResMut<SkyClock>,
    mut time_scale: ResMut<TimeScale>,
    mut weather: ResMut<Weather>,
    mut lights: ResMut<SkyLights>,
    mut anchored: Query<(&SceneAnchor, &mut Transform)>,
    mut emitters: Query<(&mut ParticleEmitter, Option<&SceneAnchor>)>,
    mut cacti: Query<(&mut Cactus, &mut FireEffect)>,
) {
    if resets.is_empty() {
        return;
    }
    resets.clear();

    match SceneConfig::load(SCENE_CONFIG_PATH) {
        Ok(fresh) => *config = fresh,
        Err(error) => warn!("scene reset kept the previous config: {error}"),
    }

    *clock = SkyClock::default();
    *time_scale = TimeScale::default();
    *weather = Weather {
        season_length_days: config.season_length_days,
        ..Default::default()
    };
    *lights = SkyLights::from_directions(config.sun_direction(), config.moon_direction());

    for (anchor, mut transform) in &mut anchored {
        transform.translation = config.position(anchor.slot);
        transform.scale = anchor.home_scale;
    }

    for (mut emitter, anchor) in &mut emitters {
        emitter.reset();
        if let Some(anchor) = anchor {
            emitter.origin = config.position(anchor.slot);
        }
    }

    for (mut cactus, mut fire) in &mut cacti {
        *cactus = Cactus::default();
        fire.reset();
    }
}

pub struct WorldInitPlugin;

impl Plugin for WorldInitPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneReset>()
            .init_resource::<SceneConfig>()
            .add_systems(Startup, init_world)
            .add_systems(
                Update,
                reset_scene
                    .in_set(SimulationSet::Clock)
                    .before(crate::clock::tick_sky_clock),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_scene() -> World {
        let mut world = World::new();
        let config = SceneConfig::default();
        let mut commands_queue = bevy::ecs::world::CommandQueue::default();
        let mut commands = Commands::new(&mut commands_queue, &world);
        spawn_scene(&mut commands, &config);
        commands_queue.apply(&mut world);
        world.insert_resource(config);
        world
    }

    #[test]
    fn test_scene_spawns_expected_population() {
        let mut world = world_with_scene();

        let cacti = world.query::<&Cactus>().iter(&world).count();
        assert_eq!(cacti, CACTUS_COUNT);

        let fires = world.query::<&FireEffect>().iter(&world).count();
        assert_eq!(fires, CACTUS_COUNT);

        let emitters: Vec<ParticleKind> = world
            .query::<&ParticleEmitter>()
            .iter(&world)
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            emitters.iter().filter(|k| **k == ParticleKind::Fire).count(),
            CACTUS_COUNT
        );
        assert_eq!(
            emitters.iter().filter(|k| **k == ParticleKind::Rain).count(),
            1
        );
        assert_eq!(
            emitters.iter().filter(|k| **k == ParticleKind::Snow).count(),
            1
        );
        assert_eq!(
            emitters.iter().filter(|k| **k == ParticleKind::Dust).count(),
            1
        );
    }

    #[test]
    fn test_exactly_one_primary_cactus() {
        let mut world = world_with_scene();
        let primaries = world.query::<&PrimaryCactus>().iter(&world).count();
        assert_eq!(primaries, 1);
    }

    #[test]
    fn test_cacti_sit_on_their_config_slots() {
        let mut world = world_with_scene();
        let config = world.resource::<SceneConfig>().clone();
        let mut query = world.query::<(&SceneAnchor, &Transform, &Cactus)>();
        for (anchor, transform, _) in query.iter(&world) {
            assert_eq!(transform.translation, config.position(anchor.slot));
        }
    }

    #[test]
    fn test_fire_emitters_originate_at_their_cactus() {
        let mut world = world_with_scene();
        let mut query = world.query::<(&ParticleEmitter, &Transform, &Cactus)>();
        for (emitter, transform, _) in query.iter(&world) {
            assert_eq!(emitter.kind, ParticleKind::Fire);
            assert_eq!(emitter.origin, transform.translation);
        }
    }
}
