use bevy::prelude::*;

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, DRAG_DAMPING, PAN_BOUND_XY, PAN_BOUND_Z,
    START_VIEW_PAN, START_VIEW_ROTATION, TOP_DOWN_PAN, TOP_DOWN_ROTATION,
};
use crate::systems::scene::{FrameSet, SceneState};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
           .add_systems(Update, drag.in_set(FrameSet::Input))
           .add_systems(Update, update.in_set(FrameSet::Draw));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-fly camera pose
/// the scene is viewed through `pan`, applied after rotating about x, y then z (degrees)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub pan: Vec3,
    pub rotation: Vec3,
}

impl CameraRig {
    pub fn start_view() -> Self {
        Self {
            pan: Vec3::from(START_VIEW_PAN),
            rotation: Vec3::from(START_VIEW_ROTATION),
        }
    }

    pub fn top_down() -> Self {
        Self {
            pan: Vec3::from(TOP_DOWN_PAN),
            rotation: Vec3::from(TOP_DOWN_ROTATION),
        }
    }

    // movement follows the current heading (z rotation)
    pub fn pan(&mut self, direction: PanDirection, step: f32) {
        let heading = match direction {
            PanDirection::Forward => self.rotation.z,
            PanDirection::Backward => self.rotation.z + 180.0,
            PanDirection::Left => self.rotation.z + 90.0,
            PanDirection::Right => self.rotation.z - 90.0,
        }
        .to_radians();

        self.pan.x = (self.pan.x + step * heading.sin()).clamp(-PAN_BOUND_XY, PAN_BOUND_XY);
        self.pan.y = (self.pan.y + step * heading.cos()).clamp(-PAN_BOUND_XY, PAN_BOUND_XY);
    }

    pub fn zoom(&mut self, step: f32) {
        self.pan.z = (self.pan.z + step).clamp(-PAN_BOUND_Z, PAN_BOUND_Z);
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// world to view
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pan)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
    }

    /// where the camera entity sits so that it sees `view_matrix`
    pub fn transform(&self) -> Transform {
        Transform::from_matrix(self.view_matrix().inverse())
    }
}

// camera component, tracks the mouse drag
#[derive(Component, Debug, Default)]
pub struct FlyCamera {
    /// last cursor position, y measured from the bottom of the window
    pub last_cursor: Option<Vec2>,
}

impl FlyCamera {
    pub fn press(&mut self, cursor: Vec2, window_height: f32) {
        self.last_cursor = Some(Vec2::new(cursor.x, window_height - cursor.y));
    }

    pub fn drag(&mut self, cursor: Vec2, window_height: f32, rig: &mut CameraRig) {
        let Some(last) = self.last_cursor else { return; };
        let current = Vec2::new(cursor.x, window_height - cursor.y);
        let delta = current - last;

        rig.rotation.z -= delta.x / DRAG_DAMPING;
        rig.rotation.x -= delta.y / DRAG_DAMPING;
        self.last_cursor = Some(current);
    }

    // next drag starts fresh instead of jumping
    pub fn release(&mut self) {
        self.last_cursor = None;
    }
}

fn spawn_camera(mut commands: Commands, scene: Res<SceneState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        scene.camera.transform(),
        FlyCamera::default(),
    ));
}

fn drag(
    mut scene: ResMut<SceneState>,
    mut cameras: Query<&mut FlyCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_events: EventReader<CursorMoved>,
    windows: Query<&Window>,
    interactions: Query<&Interaction>,
) {
    let Ok(window) = windows.single() else { return; };
    let height = window.height();

    // clicks on the menu are not drags
    let over_ui = interactions.iter().any(|i| *i != Interaction::None);

    for mut camera in cameras.iter_mut() {
        if mouse_buttons.just_pressed(MouseButton::Left) && !over_ui {
            if let Some(cursor) = window.cursor_position() {
                camera.press(cursor, height);
            }
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            camera.release();
        }

        if mouse_buttons.pressed(MouseButton::Left) {
            for event in cursor_events.read() {
                camera.drag(event.position, height, &mut scene.camera);
            }
        }
    }
    cursor_events.clear();
}

// camera follows the rig every frame
fn update(scene: Res<SceneState>, mut cameras: Query<&mut Transform, With<FlyCamera>>) {
    if !scene.is_changed() {
        return;
    }
    for mut transform in cameras.iter_mut() {
        *transform = scene.camera.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn forward_follows_heading() {
        let mut rig = CameraRig { pan: Vec3::ZERO, rotation: Vec3::ZERO };
        rig.pan(PanDirection::Forward, 1.0);
        assert!(close(rig.pan.x, 0.0) && close(rig.pan.y, 1.0));

        let mut rig = CameraRig { pan: Vec3::ZERO, rotation: Vec3::new(0.0, 0.0, 90.0) };
        rig.pan(PanDirection::Forward, 1.0);
        assert!(close(rig.pan.x, 1.0) && close(rig.pan.y, 0.0));
    }

    #[test]
    fn strafing_is_perpendicular() {
        let mut rig = CameraRig { pan: Vec3::ZERO, rotation: Vec3::ZERO };
        rig.pan(PanDirection::Left, 1.0);
        assert!(close(rig.pan.x, 1.0) && close(rig.pan.y, 0.0));
        rig.pan(PanDirection::Right, 2.0);
        assert!(close(rig.pan.x, -1.0) && close(rig.pan.y, 0.0));
    }

    #[test]
    fn pan_is_clamped() {
        let mut rig = CameraRig::start_view();
        for i in 0..10_000 {
            rig.rotation.z = (i * 37 % 360) as f32;
            rig.pan(PanDirection::Forward, 3.0);
            assert!(rig.pan.x.abs() <= PAN_BOUND_XY);
            assert!(rig.pan.y.abs() <= PAN_BOUND_XY);
        }
        for _ in 0..10_000 {
            rig.zoom(-5.0);
        }
        assert_eq!(rig.pan.z, -PAN_BOUND_Z);
    }

    #[test]
    fn presets_reset_every_field() {
        let mut rig = CameraRig::start_view();
        rig.pan(PanDirection::Left, 4.0);
        rig.rotate(Vec3::new(3.0, 2.0, 1.0));

        rig = CameraRig::top_down();
        assert_eq!(rig.pan, Vec3::new(0.0, 0.0, -60.0));
        assert_eq!(rig.rotation, Vec3::ZERO);
        assert_eq!(CameraRig::start_view().rotation, Vec3::new(-15.0, 0.0, 0.0));
    }

    #[test]
    fn camera_transform_inverts_view() {
        let rig = CameraRig::start_view();
        let view = rig.view_matrix();
        let camera = rig.transform().compute_matrix();
        assert!((view * camera).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn top_down_camera_looks_at_sun() {
        let transform = CameraRig::top_down().transform();
        assert!(transform.translation.abs_diff_eq(Vec3::new(0.0, 0.0, 60.0), 1e-4));
        assert!(transform.forward().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn drag_is_damped_and_y_inverted() {
        let mut rig = CameraRig { pan: Vec3::ZERO, rotation: Vec3::ZERO };
        let mut camera = FlyCamera::default();

        camera.press(Vec2::new(100.0, 100.0), 400.0);
        // moving right and down on screen
        camera.drag(Vec2::new(120.0, 130.0), 400.0, &mut rig);
        assert!(close(rig.rotation.z, -2.0));
        assert!(close(rig.rotation.x, 3.0));
    }

    #[test]
    fn release_clears_anchor() {
        let mut rig = CameraRig { pan: Vec3::ZERO, rotation: Vec3::ZERO };
        let mut camera = FlyCamera::default();

        camera.press(Vec2::new(10.0, 10.0), 100.0);
        camera.release();
        camera.drag(Vec2::new(500.0, 500.0), 100.0, &mut rig);
        assert_eq!(rig.rotation, Vec3::ZERO);
        assert!(camera.last_cursor.is_none());
    }
}
