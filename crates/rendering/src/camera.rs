use bevy::prelude::*;

const MOVE_SPEED: f32 = 30.0;
const FLY_SPEED: f32 = 20.0;
const ROTATE_SPEED: f32 = 45.0_f32; // degrees per second

/// Free camera: a position plus yaw/pitch, applied to the `Camera3d`
/// transform every frame. Arrow/WASD input rotates while `rotate_lock` is
/// set and moves while it is released (holding Ctrl releases it).
#[derive(Resource, Debug, Clone)]
pub struct GlobeCamera {
    pub position: Vec3,
    /// Yaw in degrees around Y.
    pub yaw: f32,
    /// Pitch in degrees around X.
    pub pitch: f32,
    /// While true the arrow keys rotate; while false they translate.
    pub rotate_lock: bool,
}

impl Default for GlobeCamera {
    fn default() -> Self {
        Self::preset(CameraPreset::Wide)
    }
}

/// The three fixed viewpoints the function keys jump between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Far overview of the whole globe.
    Wide,
    /// Raised three-quarter view looking down at the diorama.
    Raised,
    /// Close-up just outside the glass.
    Close,
}

impl GlobeCamera {
    pub fn preset(preset: CameraPreset) -> Self {
        let (position, pitch) = match preset {
            CameraPreset::Wide => (Vec3::new(0.0, 20.0, -200.0), 0.0),
            CameraPreset::Raised => (Vec3::new(0.0, 30.0, -50.0), 15.0),
            CameraPreset::Close => (Vec3::new(0.0, 0.0, -20.0), 0.0),
        };
        Self {
            position,
            yaw: 0.0,
            pitch,
            rotate_lock: true,
        }
    }

    pub fn apply_preset(&mut self, preset: CameraPreset) {
        *self = Self::preset(preset);
    }

    /// View direction. Yaw 0 faces +Z (into the scene from the default
    /// seat on -Z); positive pitch tips the view down.
    fn look_direction(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }

    fn forward(&self) -> Vec3 {
        self.look_direction()
    }

    /// Screen-right for translation input. Pitch is clamped well short of
    /// vertical, so the cross product never degenerates.
    fn right(&self) -> Vec3 {
        self.look_direction().cross(Vec3::Y).normalize()
    }
}

pub fn setup_camera(mut commands: Commands, camera: Res<GlobeCamera>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera.position).looking_to(camera.look_direction(), Vec3::Y),
    ));
}

/// F1/F2/F3 jump to the fixed viewpoints.
pub fn camera_presets(keys: Res<ButtonInput<KeyCode>>, mut camera: ResMut<GlobeCamera>) {
    if keys.just_pressed(KeyCode::F1) {
        camera.apply_preset(CameraPreset::Wide);
    }
    if keys.just_pressed(KeyCode::F2) {
        camera.apply_preset(CameraPreset::Raised);
    }
    if keys.just_pressed(KeyCode::F3) {
        camera.apply_preset(CameraPreset::Close);
    }
}

/// Holding either Ctrl releases the rotate lock, switching the arrow keys
/// from rotating to translating.
pub fn camera_rotate_lock(keys: Res<ButtonInput<KeyCode>>, mut camera: ResMut<GlobeCamera>) {
    let ctrl_held =
        keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
    camera.rotate_lock = !ctrl_held;
}

pub fn camera_movement(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera: ResMut<GlobeCamera>,
) {
    let dt = time.delta_secs();

    let mut steer = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        steer.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        steer.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        steer.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        steer.x += 1.0;
    }

    if steer != Vec2::ZERO {
        if camera.rotate_lock {
            camera.yaw += steer.x * ROTATE_SPEED * dt;
            camera.pitch = (camera.pitch + steer.y * ROTATE_SPEED * dt).clamp(-89.0, 89.0);
        } else {
            let push = (camera.forward() * steer.y + camera.right() * steer.x) * MOVE_SPEED * dt;
            camera.position += push;
        }
    }

    let mut lift = 0.0;
    if keys.pressed(KeyCode::KeyQ) || keys.pressed(KeyCode::PageUp) {
        lift += 1.0;
    }
    if keys.pressed(KeyCode::KeyE) || keys.pressed(KeyCode::PageDown) {
        lift -= 1.0;
    }
    if lift != 0.0 {
        camera.position.y += lift * FLY_SPEED * dt;
    }
}

/// Applies the camera model to the actual `Camera3d` transform.
pub fn apply_camera(camera: Res<GlobeCamera>, mut query: Query<&mut Transform, With<Camera3d>>) {
    if !camera.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform =
        Transform::from_translation(camera.position).looking_to(camera.look_direction(), Vec3::Y);
}
