//! Seeded randomness for the simulation.
//!
//! Every roll the scene makes (the daily precipitation draws, spawn and
//! velocity jitter, cactus ignition and fire flares) comes from one
//! `ChaCha8Rng` held in the `SimRng` resource, so a seed fully determines
//! the weather and fire history of a run. The seed can be pinned through
//! the `SANDGLOBE_SEED` environment variable to replay a particular storm.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEED_ENV_VAR: &str = "SANDGLOBE_SEED";

const DEFAULT_SEED: u64 = 0x5a9d_61b0;

/// The simulation's only randomness source. Systems that roll dice take
/// `ResMut<SimRng>`; nothing in the simulation calls `rand::thread_rng()`.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seed from `SANDGLOBE_SEED` when set (and parseable), otherwise the
    /// built-in default. A malformed value is worth a warning rather than a
    /// silently different run.
    pub fn from_env() -> Self {
        match std::env::var(SEED_ENV_VAR) {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(seed) => {
                    info!("seeding simulation from {SEED_ENV_VAR}={seed}");
                    Self::from_seed_u64(seed)
                }
                Err(_) => {
                    warn!("ignoring unparseable {SEED_ENV_VAR}={raw:?}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimRng::from_env());
    }
}
