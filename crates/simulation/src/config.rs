/// Number of positioned objects the scene config must provide:
/// the desert floor, the globe base, and eight cacti, in that order.
pub const SCENE_OBJECT_SLOTS: usize = 10;

/// How many cacti the scene spawns (config slots 2..10).
pub const CACTUS_COUNT: usize = 8;

/// Default path of the scene configuration file, relative to the working dir.
pub const SCENE_CONFIG_PATH: &str = "assets/scene.json";

/// Falling particles (rain, snow, dust) die once they drop below this plane.
pub const PARTICLE_FLOOR_Y: f32 = -10.0;

/// Rising fire embers die this far above their emitter's origin.
pub const FIRE_PLUME_CEILING: f32 = 15.0;

/// Daylight window: the scene counts as sunny between these hours
/// (inclusive) when no precipitation is active.
pub const DAYLIGHT_START_HOUR: f32 = 8.0;
pub const DAYLIGHT_END_HOUR: f32 = 16.0;

/// Fraction of a simulated day that passes per real second at 1x speed.
pub const DAY_RATE: f32 = 0.025;

/// The sky gradient texture is split into this many vertical bands; the
/// dome tint interpolates between adjacent bands over the day.
pub const SKY_GRADIENT_BANDS: u32 = 32;
