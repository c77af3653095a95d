use bevy::prelude::*;

use crate::config::{DAY_RATE, SKY_GRADIENT_BANDS};
use crate::SimulationSet;

/// Fired once whenever the simulated clock crosses a day boundary.
///
/// Consumers (the weather cycle, season advance) listen with
/// `EventReader<DayRollover>` instead of re-deriving the boundary from the
/// raw time fraction.
#[derive(Event, Debug, Clone, Copy)]
pub struct DayRollover {
    /// The day number just entered (first rollover yields 1).
    pub day: u32,
}

/// User-adjustable multiplier applied to `dt` before it reaches the clock,
/// the particle systems, and the fire/cactus lifecycles.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TimeScale(pub f32);

impl Default for TimeScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TimeScale {
    pub const STEP: f32 = 0.2;
    pub const MAX: f32 = 10.0;

    pub fn raise(&mut self) {
        self.0 = (self.0 + Self::STEP).min(Self::MAX);
    }

    pub fn lower(&mut self) {
        self.0 = (self.0 - Self::STEP).max(0.0);
    }

    pub fn scaled(&self, dt: f32) -> f32 {
        dt * self.0
    }
}

/// Simulated time-of-day, the single authority for day progression.
#[derive(Resource, Debug, Clone)]
pub struct SkyClock {
    /// Fraction of the current day in `[0, 1)` (may briefly exceed 1.0
    /// inside a frame before the rollover subtracts a whole day).
    pub time_of_day: f32,
    /// Completed day counter, starts at 0.
    pub day: u32,
    /// Fraction of a day advanced per (scaled) real second.
    pub day_rate: f32,
}

impl Default for SkyClock {
    fn default() -> Self {
        Self {
            time_of_day: 0.0,
            day: 0,
            day_rate: DAY_RATE,
        }
    }
}

impl SkyClock {
    /// Hour of the current day. Clamped to 24 so a large overshoot frame
    /// never reports an out-of-range hour.
    pub fn hour_of_day(&self) -> f32 {
        (self.time_of_day * 24.0).min(24.0)
    }

    /// Advance by `dt` seconds (already time-scaled). Returns the rollover
    /// event if the clock crossed a day boundary.
    ///
    /// The rollover subtracts exactly one day, preserving the fractional
    /// overshoot rather than snapping back to midnight.
    pub fn advance(&mut self, dt: f32) -> Option<DayRollover> {
        self.time_of_day += self.day_rate * dt;
        if self.time_of_day * 24.0 >= 24.0 {
            self.time_of_day -= 1.0;
            self.day += 1;
            return Some(DayRollover { day: self.day });
        }
        None
    }

    /// Sky gradient band index and progress within that band, both derived
    /// from the day fraction. The dome tint lerps between band `index` and
    /// band `index + 1` by `progress`.
    pub fn gradient_phase(&self) -> (u32, f32) {
        let band_width = 1.0 / SKY_GRADIENT_BANDS as f32;
        let t = self.time_of_day.rem_euclid(1.0);
        let band = ((t / band_width) as u32).min(SKY_GRADIENT_BANDS - 1);
        let progress = ((t - band as f32 * band_width) / band_width).clamp(0.0, 1.0);
        (band, progress)
    }

    pub fn formatted(&self) -> String {
        let hour = self.hour_of_day();
        let h = hour as u32;
        let m = ((hour - h as f32) * 60.0) as u32;
        format!("Day {} {:02}:{:02}", self.day, h, m)
    }
}

pub fn tick_sky_clock(
    time: Res<Time>,
    scale: Res<TimeScale>,
    mut clock: ResMut<SkyClock>,
    mut rollovers: EventWriter<DayRollover>,
) {
    let dt = scale.scaled(time.delta_secs());
    if let Some(rollover) = clock.advance(dt) {
        rollovers.send(rollover);
    }
}

pub struct SkyClockPlugin;

impl Plugin for SkyClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkyClock>()
            .init_resource::<TimeScale>()
            .add_event::<DayRollover>()
            .add_systems(Update, tick_sky_clock.in_set(SimulationSet::Clock));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollover_preserves_overshoot() {
        let mut clock = SkyClock {
            time_of_day: 0.999,
            ..Default::default()
        };
        // One big step carries the clock well past the boundary.
        let rollover = clock.advance(0.1);
        assert!(rollover.is_some());
        assert_eq!(clock.day, 1);
        let expected = 0.999 + DAY_RATE * 0.1 - 1.0;
        assert!(
            (clock.time_of_day - expected).abs() < 1e-6,
            "overshoot should survive the rollover, got {}",
            clock.time_of_day
        );
    }

    #[test]
    fn test_no_rollover_mid_day() {
        let mut clock = SkyClock::default();
        assert!(clock.advance(1.0).is_none());
        assert_eq!(clock.day, 0);
        assert!(clock.time_of_day > 0.0);
    }

    #[test]
    fn test_hour_of_day_is_clamped() {
        let clock = SkyClock {
            time_of_day: 1.5,
            ..Default::default()
        };
        assert_eq!(clock.hour_of_day(), 24.0);
    }

    #[test]
    fn test_many_rollovers_count_days() {
        let mut clock = SkyClock::default();
        let mut rollovers = 0;
        // 40 seconds per day at the default rate; run ten days.
        for _ in 0..4000 {
            if clock.advance(0.1).is_some() {
                rollovers += 1;
            }
        }
        assert_eq!(rollovers, clock.day);
        assert!(clock.day >= 9, "ten days of steps, got {}", clock.day);
        assert!(clock.time_of_day < 1.0);
    }

    #[test]
    fn test_gradient_phase_in_range() {
        let mut clock = SkyClock::default();
        for _ in 0..500 {
            clock.advance(0.05);
            let (band, progress) = clock.gradient_phase();
            assert!(band < SKY_GRADIENT_BANDS);
            assert!((0.0..=1.0).contains(&progress));
        }
    }

    #[test]
    fn test_gradient_phase_band_boundaries() {
        let clock = SkyClock {
            time_of_day: 0.5,
            ..Default::default()
        };
        let (band, progress) = clock.gradient_phase();
        assert_eq!(band, SKY_GRADIENT_BANDS / 2);
        assert!(progress < 0.01);
    }

    #[test]
    fn test_time_scale_clamps() {
        let mut scale = TimeScale::default();
        for _ in 0..20 {
            scale.lower();
        }
        assert_eq!(scale.0, 0.0, "time scale never goes negative");
        for _ in 0..100 {
            scale.raise();
        }
        assert_eq!(scale.0, TimeScale::MAX);
    }

    #[test]
    fn test_time_scale_scales_dt() {
        let scale = TimeScale(2.0);
        assert_eq!(scale.scaled(0.5), 1.0);
        let frozen = TimeScale(0.0);
        assert_eq!(frozen.scaled(0.5), 0.0);
    }

    #[test]
    fn test_formatted_shows_day_and_time() {
        let clock = SkyClock {
            time_of_day: 0.5,
            day: 3,
            ..Default::default()
        };
        assert_eq!(clock.formatted(), "Day 3 12:00");
    }
}
