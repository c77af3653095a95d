use bevy::prelude::*;

pub mod clock;
pub mod config;
pub mod fire;
pub mod flora;
pub mod lights;
pub mod particles;
pub mod scene_config;
pub mod sim_rng;
pub mod weather;
pub mod world_init;


/// Ordered phases for the per-frame simulation tick.
///
/// Configured as a chain: `Clock` → `Weather` → `Effects`. The weather/time
/// update strictly precedes every dependent object (cacti, fires, particle
/// systems), and the rendering crate schedules its extraction after
/// `Effects`, so one frame is one well-ordered logical tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Scene reset, clock tick, celestial light orbit.
    Clock,
    /// Day-rollover weather re-roll and the per-frame sunny recompute.
    Weather,
    /// Everything driven by the weather: cacti, fires, particle systems.
    Effects,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Weather,
                SimulationSet::Effects,
            )
                .chain(),
        );

        app.add_plugins((
            sim_rng::SimRngPlugin,
            clock::SkyClockPlugin,
            weather::WeatherPlugin,
            lights::SkyLightsPlugin,
            flora::FloraPlugin,
            fire::FirePlugin,
            particles::ParticlesPlugin,
            world_init::WorldInitPlugin,
        ));
    }
}
