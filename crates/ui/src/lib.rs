use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod stats_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, stats_panel::stats_panel_ui);
    }
}
