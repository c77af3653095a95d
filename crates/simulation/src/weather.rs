use bevy::prelude::*;
use rand::Rng;

use crate::clock::{DayRollover, SkyClock};
use crate::config::{DAYLIGHT_END_HOUR, DAYLIGHT_START_HOUR};
use crate::sim_rng::SimRng;
use crate::SimulationSet;

/// Fired when a day rollover changes the precipitation state.
///
/// Consumers can listen with `EventReader<WeatherChanged>` instead of
/// polling the `Weather` resource every tick.
#[derive(Event, Debug, Clone)]
pub struct WeatherChanged {
    pub old: Option<Precipitation>,
    pub new: Option<Precipitation>,
    pub season: Season,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Cyclic successor: winter wraps back to spring.
    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Chance that a freshly rolled day starts with rain.
    pub fn rain_chance(self) -> f32 {
        match self {
            Season::Spring => 0.3,
            Season::Summer => 0.2,
            Season::Autumn => 0.3,
            Season::Winter => 0.5,
        }
    }

    /// Chance that a freshly rolled day starts with snow (only consulted
    /// when the rain roll did not fire).
    pub fn snow_chance(self) -> f32 {
        match self {
            Season::Spring => 0.1,
            Season::Summer => 0.0,
            Season::Autumn => 0.1,
            Season::Winter => 0.5,
        }
    }
}

/// Which precipitation is falling. Rain and snow are mutually exclusive by
/// construction: the weather holds at most one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precipitation {
    Rain,
    Snow,
}

#[derive(Resource, Debug, Clone)]
pub struct Weather {
    pub season: Season,
    /// Days per season; the season advances when `day % length == 0`.
    pub season_length_days: u32,
    pub precipitation: Option<Precipitation>,
    /// True iff the hour is inside the daylight window and nothing falls.
    /// Recomputed every frame.
    pub sunny: bool,
    /// Whether the day that just ended was precipitation-free. Latched at
    /// rollover time; dependent objects (fire ignition) read it to detect
    /// "yesterday was dry and today is sunny" streaks.
    pub prev_sunny: bool,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            season_length_days: 3,
            precipitation: None,
            sunny: false,
            prev_sunny: false,
        }
    }
}

impl Weather {
    pub fn is_raining(&self) -> bool {
        self.precipitation == Some(Precipitation::Rain)
    }

    pub fn is_snowing(&self) -> bool {
        self.precipitation == Some(Precipitation::Snow)
    }

    pub fn is_precipitating(&self) -> bool {
        self.precipitation.is_some()
    }
}

/// One day's precipitation re-roll.
///
/// Both rolls are always drawn, and the "nothing already active" guard is
/// re-evaluated after the rain roll may have mutated state, so rain shadows
/// snow on days where both would fire. This rain-first priority is the
/// shipped arbitration, kept on purpose.
pub fn reroll_precipitation(
    weather: &mut Weather,
    rain_chance: f32,
    snow_chance: f32,
    rain_roll: f32,
    snow_roll: f32,
) {
    weather.prev_sunny = !weather.is_precipitating();
    weather.precipitation = None;

    if rain_roll <= rain_chance && weather.precipitation.is_none() {
        weather.precipitation = Some(Precipitation::Rain);
    }
    if snow_roll <= snow_chance && weather.precipitation.is_none() {
        weather.precipitation = Some(Precipitation::Snow);
    }
}

/// Season advance on a day boundary: every `season_length_days` rollovers.
pub fn advance_season(weather: &mut Weather, day: u32) {
    if weather.season_length_days > 0 && day % weather.season_length_days == 0 {
        weather.season = weather.season.next();
    }
}

/// Consumes `DayRollover` events: latches yesterday's sunny state, re-rolls
/// precipitation against the current season's chance table, then advances
/// the season when its length is up.
pub fn apply_day_rollover(
    mut rollovers: EventReader<DayRollover>,
    mut weather: ResMut<Weather>,
    mut rng: ResMut<SimRng>,
    mut changes: EventWriter<WeatherChanged>,
) {
    for rollover in rollovers.read() {
        let old = weather.precipitation;
        let rain_chance = weather.season.rain_chance();
        let snow_chance = weather.season.snow_chance();
        let rain_roll = rng.0.gen::<f32>();
        let snow_roll = rng.0.gen::<f32>();

        reroll_precipitation(&mut weather, rain_chance, snow_chance, rain_roll, snow_roll);
        advance_season(&mut weather, rollover.day);

        if old != weather.precipitation {
            info!(
                "day {} ({}): precipitation {:?} -> {:?}",
                rollover.day,
                weather.season.name(),
                old,
                weather.precipitation
            );
            changes.send(WeatherChanged {
                old,
                new: weather.precipitation,
                season: weather.season,
            });
        }
    }
}

/// Recomputed every frame, not just at rollover: sunny iff the hour sits in
/// the daylight window and nothing is falling.
pub fn update_sunny(clock: Res<SkyClock>, mut weather: ResMut<Weather>) {
    let hour = clock.hour_of_day();
    let daylight = (DAYLIGHT_START_HOUR..=DAYLIGHT_END_HOUR).contains(&hour);
    weather.sunny = daylight && !weather.is_precipitating();
}

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Weather>()
            .add_event::<WeatherChanged>()
            .add_systems(
                Update,
                (apply_day_rollover, update_sunny)
                    .chain()
                    .in_set(SimulationSet::Weather),
            );
    }
}
