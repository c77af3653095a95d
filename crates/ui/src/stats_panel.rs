//! Read-only usage/simulation stats window, plus the vsync toggle.
//!
//! Mirrors the layout of the original tweak bar: a graphics block (FPS,
//! CPU %, RAM, vsync) and a simulation block (hour, day fraction, time
//! modifier, season, current weather).

use bevy::diagnostic::{
    DiagnosticsStore, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use bevy_egui::{egui, EguiContexts};

use simulation::clock::{SkyClock, TimeScale};
use simulation::weather::{Precipitation, Weather};

pub fn stats_panel_ui(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    clock: Res<SkyClock>,
    time_scale: Res<TimeScale>,
    weather: Res<Weather>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    egui::Window::new("Usage Stats")
        .resizable(false)
        .default_width(250.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Graphics");

            let fps = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FPS)
                .and_then(|d| d.smoothed())
                .unwrap_or(0.0);
            ui.label(format!("FPS: {fps:.0}"));

            let cpu = diagnostics
                .get(&SystemInformationDiagnosticsPlugin::CPU_USAGE)
                .and_then(|d| d.smoothed());
            ui.label(match cpu {
                Some(cpu) => format!("CPU: {cpu:.1}%"),
                None => "CPU: n/a".to_string(),
            });

            let mem = diagnostics
                .get(&SystemInformationDiagnosticsPlugin::MEM_USAGE)
                .and_then(|d| d.smoothed());
            ui.label(match mem {
                Some(mem) => format!("RAM: {mem:.1}%"),
                None => "RAM: n/a".to_string(),
            });

            if let Ok(mut window) = windows.get_single_mut() {
                let vsync_on = window.present_mode == PresentMode::AutoVsync;
                if ui
                    .selectable_label(vsync_on, format!("Vsync: {}", on_off(vsync_on)))
                    .clicked()
                {
                    window.present_mode = if vsync_on {
                        PresentMode::AutoNoVsync
                    } else {
                        PresentMode::AutoVsync
                    };
                }
            }

            ui.separator();
            ui.heading("Simulation");

            ui.label(format!("Time (hours): {}", clock.hour_of_day() as u32));
            ui.label(format!("Time (%): {:.3}", clock.time_of_day));
            ui.label(format!("Time modifier: {:.1}x", time_scale.0));
            ui.label(format!("Season: {}", weather.season.name()));
            ui.label(format!(
                "Weather: {}",
                weather_label(weather.precipitation)
            ));
            ui.label(clock.formatted());
        });
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn weather_label(precipitation: Option<Precipitation>) -> &'static str {
    match precipitation {
        Some(Precipitation::Rain) => "Rain",
        Some(Precipitation::Snow) => "Snow",
        None => "Clear",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_labels() {
        assert_eq!(weather_label(None), "Clear");
        assert_eq!(weather_label(Some(Precipitation::Rain)), "Rain");
        assert_eq!(weather_label(Some(Precipitation::Snow)), "Snow");
    }

    #[test]
    fn test_on_off() {
        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
