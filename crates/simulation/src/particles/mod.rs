pub mod pool;

use bevy::prelude::*;
use rand::Rng;

use crate::clock::TimeScale;
use crate::config::{FIRE_PLUME_CEILING, PARTICLE_FLOOR_Y};
use crate::sim_rng::SimRng;
use crate::weather::Weather;
use crate::SimulationSet;

pub use pool::{CullPlane, Particle, ParticlePool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Snow,
    Fire,
    Dust,
    Rain,
}

impl ParticleKind {
    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Snow => "snow",
            ParticleKind::Fire => "fire",
            ParticleKind::Dust => "dust",
            ParticleKind::Rain => "rain",
        }
    }
}

/// Emission parameters fixed per particle kind.
#[derive(Debug, Clone)]
pub struct EmitterParams {
    pub max_particles: usize,
    pub particle_size: f32,
    /// Particles per second.
    pub emit_frequency: f32,
    pub base_velocity: Vec3,
    pub velocity_jitter: Vec3,
    pub spawn_jitter: Vec3,
    pub colour: Vec4,
}

impl EmitterParams {
    pub fn for_kind(kind: ParticleKind) -> Self {
        match kind {
            ParticleKind::Snow => Self {
                max_particles: 50_000,
                particle_size: 0.3,
                emit_frequency: 5_000.0,
                base_velocity: Vec3::new(0.0, -8.0, 0.0),
                velocity_jitter: Vec3::new(0.0, 4.0, 0.0),
                spawn_jitter: Vec3::new(75.0, 75.0, 75.0),
                colour: Vec4::ONE,
            },
            ParticleKind::Fire => Self {
                max_particles: 50,
                particle_size: 0.2,
                emit_frequency: 10.0,
                base_velocity: Vec3::new(0.0, 1.5, 0.0),
                velocity_jitter: Vec3::new(0.75, 0.5, 0.75),
                spawn_jitter: Vec3::new(1.0, 1.0, 1.0),
                colour: Vec4::new(1.0, 0.55, 0.15, 1.0),
            },
            ParticleKind::Dust => Self {
                max_particles: 1_000,
                particle_size: 0.15,
                emit_frequency: 120.0,
                base_velocity: Vec3::new(1.5, 0.4, 1.5),
                velocity_jitter: Vec3::new(1.0, 0.3, 1.0),
                spawn_jitter: Vec3::new(60.0, 60.0, 60.0),
                colour: Vec4::new(0.76, 0.65, 0.45, 0.5),
            },
            ParticleKind::Rain => Self {
                max_particles: 50_000,
                particle_size: 0.1,
                emit_frequency: 10_000.0,
                base_velocity: Vec3::new(0.0, -50.0, 0.0),
                velocity_jitter: Vec3::new(0.0, 10.0, 0.0),
                spawn_jitter: Vec3::new(75.0, 75.0, 75.0),
                colour: Vec4::new(0.6, 0.7, 0.9, 0.8),
            },
        }
    }

    /// Seconds between emissions.
    pub fn emit_interval(&self) -> f32 {
        1.0 / self.emit_frequency
    }
}

/// A particle system: one pool bound to per-kind emission parameters and a
/// world-space origin. `active` gates emission only; integration and
/// culling keep running so in-flight particles land after deactivation.
#[derive(Component)]
pub struct ParticleEmitter {
    pub kind: ParticleKind,
    pub params: EmitterParams,
    pub origin: Vec3,
    pub active: bool,
    pub pool: ParticlePool,
}

impl ParticleEmitter {
    pub fn new(kind: ParticleKind, origin: Vec3) -> Self {
        let params = EmitterParams::for_kind(kind);
        let pool = ParticlePool::new(params.max_particles);
        Self {
            kind,
            params,
            origin,
            active: false,
            pool,
        }
    }

    /// The kill boundary for this system: embers burn out above the plume
    /// ceiling, everything else falls out below the floor.
    pub fn cull_plane(&self) -> CullPlane {
        match self.kind {
            ParticleKind::Fire => CullPlane::Above(self.origin.y + FIRE_PLUME_CEILING),
            _ => CullPlane::Below(PARTICLE_FLOOR_Y),
        }
    }

    /// One frame step, in the load-bearing order kill -> emit -> integrate:
    /// reaping first keeps a newborn spawned past the cull plane alive for
    /// its first frame, and integrating last advances newborns immediately.
    pub fn step(&mut self, rng: &mut impl Rng, dt: f32) {
        let plane = self.cull_plane();
        self.pool.kill(plane);
        if self.active {
            self.pool.emit(&self.params, self.origin, rng, dt);
        }
        self.pool.integrate(dt);
    }

    pub fn reset(&mut self) {
        self.pool.clear();
        self.active = false;
    }
}

/// Precipitation systems follow the weather; dust hangs in the air only on
/// dry days. Fire emitters are driven by their fire effect instead.
pub fn sync_weather_emitters(weather: Res<Weather>, mut emitters: Query<&mut ParticleEmitter>) {
    for mut emitter in &mut emitters {
        let active = match emitter.kind {
            ParticleKind::Rain => weather.is_raining(),
            ParticleKind::Snow => weather.is_snowing(),
            ParticleKind::Dust => !weather.is_precipitating(),
            ParticleKind::Fire => continue,
        };
        emitter.active = active;
    }
}

pub fn update_emitters(
    time: Res<Time>,
    scale: Res<TimeScale>,
    mut rng: ResMut<SimRng>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    let dt = scale.scaled(time.delta_secs());
    for mut emitter in &mut emitters {
        emitter.step(&mut rng.0, dt);
    }
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_weather_emitters, update_emitters)
                .chain()
                .in_set(SimulationSet::Effects)
                .after(crate::fire::sync_fire_emitters),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_kind_parameter_table() {
        let snow = EmitterParams::for_kind(ParticleKind::Snow);
        assert_eq!(snow.max_particles, 50_000);
        assert_eq!(snow.base_velocity.y, -8.0);

        let rain = EmitterParams::for_kind(ParticleKind::Rain);
        assert_eq!(rain.max_particles, 50_000);
        assert_eq!(rain.emit_frequency, 10_000.0);
        assert_eq!(rain.base_velocity.y, -50.0);

        let fire = EmitterParams::for_kind(ParticleKind::Fire);
        assert_eq!(fire.max_particles, 50);
        assert!(fire.base_velocity.y > 0.0, "embers rise");

        let dust = EmitterParams::for_kind(ParticleKind::Dust);
        assert!(dust.max_particles > 0);
    }

    #[test]
    fn test_emit_interval() {
        let params = EmitterParams::for_kind(ParticleKind::Fire);
        assert!((params.emit_interval() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_cull_plane_per_kind() {
        let rain = ParticleEmitter::new(ParticleKind::Rain, Vec3::ZERO);
        assert_eq!(rain.cull_plane(), CullPlane::Below(PARTICLE_FLOOR_Y));

        let fire = ParticleEmitter::new(ParticleKind::Fire, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(
            fire.cull_plane(),
            CullPlane::Above(2.0 + FIRE_PLUME_CEILING)
        );
    }

    #[test]
    fn test_inactive_emitter_still_integrates_and_culls() {
        let mut emitter = ParticleEmitter::new(ParticleKind::Rain, Vec3::new(0.0, 100.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        emitter.active = true;
        emitter.step(&mut rng, 0.01);
        assert_eq!(emitter.pool.live_count(), 1);
        let falling = emitter.pool.particles()[0].position;

        // Deactivation stops new drops but the existing one keeps falling.
        emitter.active = false;
        emitter.step(&mut rng, 0.1);
        assert_eq!(emitter.pool.live_count(), 1);
        assert!(emitter.pool.particles()[0].position.y < falling.y);

        // And it still lands (dies) below the floor.
        for _ in 0..100 {
            emitter.step(&mut rng, 0.5);
        }
        assert_eq!(emitter.pool.live_count(), 0);
    }

    #[test]
    fn test_step_kills_before_emitting() {
        // A particle past the cull plane dies even on the same call that
        // emits a replacement.
        let mut emitter = ParticleEmitter::new(ParticleKind::Rain, Vec3::new(0.0, 100.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        emitter.active = true;
        emitter.step(&mut rng, 0.01);
        assert_eq!(emitter.pool.live_count(), 1);

        // Force the particle under the floor, then step again: the dead one
        // is reaped first, the newborn survives.
        let doomed = emitter.pool.particles()[0].position;
        emitter.pool = {
            let mut pool = ParticlePool::new(emitter.params.max_particles);
            pool.emit(&emitter.params, Vec3::new(0.0, -100.0, 0.0), &mut rng, 1.0);
            pool
        };
        assert!(doomed.y > PARTICLE_FLOOR_Y);
        emitter.step(&mut rng, 0.01);
        assert_eq!(emitter.pool.live_count(), 1);
        assert!(emitter.pool.particles()[0].position.y > PARTICLE_FLOOR_Y);
    }

    #[test]
    fn test_reset_clears_pool_and_deactivates() {
        let mut emitter = ParticleEmitter::new(ParticleKind::Snow, Vec3::new(0.0, 100.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        emitter.active = true;
        for _ in 0..5 {
            emitter.step(&mut rng, 0.01);
        }
        assert!(emitter.pool.live_count() > 0);
        emitter.reset();
        assert!(!emitter.active);
        assert_eq!(emitter.pool.live_count(), 0);
    }

    // -----------------------------------------------------------------------
    // Activation policy
    // -----------------------------------------------------------------------

    fn activation_app() -> App {
        let mut app = App::new();
        app.init_resource::<Weather>()
            .add_systems(Update, sync_weather_emitters);
        for kind in [
            ParticleKind::Rain,
            ParticleKind::Snow,
            ParticleKind::Dust,
            ParticleKind::Fire,
        ] {
            app.world_mut().spawn(ParticleEmitter::new(kind, Vec3::ZERO));
        }
        app
    }

    fn active_kinds(app: &mut App) -> Vec<(ParticleKind, bool)> {
        let mut query = app.world_mut().query::<&ParticleEmitter>();
        query
            .iter(app.world())
            .map(|e| (e.kind, e.active))
            .collect()
    }

    #[test]
    fn test_activation_policy_rain() {
        use crate::weather::Precipitation;
        let mut app = activation_app();
        app.world_mut().resource_mut::<Weather>().precipitation = Some(Precipitation::Rain);
        app.update();
        for (kind, active) in active_kinds(&mut app) {
            match kind {
                ParticleKind::Rain => assert!(active),
                ParticleKind::Snow => assert!(!active),
                ParticleKind::Dust => assert!(!active, "no dust in the rain"),
                ParticleKind::Fire => assert!(!active, "fire is not weather-driven"),
            }
        }
    }

    #[test]
    fn test_activation_policy_dry() {
        let mut app = activation_app();
        app.update();
        for (kind, active) in active_kinds(&mut app) {
            match kind {
                ParticleKind::Dust => assert!(active, "dry desert air carries dust"),
                ParticleKind::Rain | ParticleKind::Snow => assert!(!active),
                ParticleKind::Fire => assert!(!active),
            }
        }
    }
}
