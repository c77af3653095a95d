use bevy::prelude::*;

use simulation::clock::TimeScale;
use simulation::fire::FireEffect;
use simulation::scene_config::SceneReset;
use simulation::world_init::PrimaryCactus;

/// Global keybindings outside the camera: time modifier, scene reset,
/// debug force-ignite, quit.
pub fn global_keybinds(
    keys: Res<ButtonInput<KeyCode>>,
    mut time_scale: ResMut<TimeScale>,
    mut resets: EventWriter<SceneReset>,
    mut exit: EventWriter<AppExit>,
    mut primary_fire: Query<&mut FireEffect, With<PrimaryCactus>>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        let shift_held =
            keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        if shift_held {
            time_scale.raise();
        } else {
            time_scale.lower();
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        resets.send(SceneReset);
    }

    if keys.just_pressed(KeyCode::F4) {
        if let Ok(mut fire) = primary_fire.get_single_mut() {
            fire.ignite();
        }
    }

    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}
