use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::camera::Camera;
use bevy::transform::TransformSystem;
use bevy::window::Window;

use crate::constants::SUN_RADIUS;
use crate::systems::scene::SceneState;

pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_labels)
           // read world positions after this frame's transforms have propagated
           .add_systems(PostUpdate, update_labels.after(TransformSystem::TransformPropagate));
    }
}

// full ui screen container component
#[derive(Component)]
pub struct LabelContainer;

/// Marks an entity that gets a name tag
/// `height` is measured along the entity's local up (+Z)
#[derive(Component, Clone, Debug)]
pub struct Labeled {
    pub text: String,
    pub height: f32,
}

// individual label ui node
#[derive(Component)]
pub struct BodyLabel {
    pub target: Entity,
}

// setup UI overlay
pub fn setup_labels(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        LabelContainer,
    ));
}

pub fn update_labels(
    mut commands: Commands,
    scene: Res<SceneState>,
    targets: Query<(Entity, &GlobalTransform, &Labeled)>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut labels: Query<(Entity, &mut Node, &mut Visibility, &BodyLabel)>,
    container: Query<Entity, With<LabelContainer>>,
    window: Query<&Window>,
) {
    let (Ok(window), Ok((camera, cam_transform)), Ok(container)) =
        (window.single(), camera.single(), container.single()) else { return; };

    // map existing labels by target entity
    let existing_labels: HashMap<Entity, Entity> = labels.iter()
        .map(|(label_entity, _, _, label)| (label.target, label_entity))
        .collect();

    for (target, transform, labeled) in targets.iter() {
        let anchor = transform.transform_point(Vec3::Z * labeled.height);

        let screen_pos = if scene.toggles.labels
            && is_visible(anchor, cam_transform.translation(), Vec3::ZERO, SUN_RADIUS)
        {
            world_to_screen(anchor, camera, cam_transform, window.width(), window.height())
        } else {
            None
        };

        if let Some(&label_entity) = existing_labels.get(&target) {
            if let Ok((_, mut node, mut visibility, _)) = labels.get_mut(label_entity) {
                match screen_pos {
                    Some(pos) => {
                        *visibility = Visibility::Inherited;
                        node.left = Val::Px(pos.x);
                        node.top = Val::Px(pos.y);
                    }
                    None => *visibility = Visibility::Hidden,
                }
            }
        } else if let Some(pos) = screen_pos {
            commands.entity(container).with_children(|parent| {
                parent.spawn((
                    Text::new(labeled.text.clone()),
                    TextFont { font_size: 12.0, ..default() },
                    TextColor(Color::WHITE),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(pos.x),
                        top: Val::Px(pos.y),
                        ..default()
                    },
                    BodyLabel { target },
                ));
            });
        }
    }
}

// UTILS

// convert world coordinates to screen coordinates
fn world_to_screen(
    world_pos: Vec3,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    screen_width: f32,
    screen_height: f32,
) -> Option<Vec2> {
    let view_matrix = camera_transform.compute_matrix().inverse();
    let view_projection = camera.clip_from_view() * view_matrix;

    // transform to clip space
    let clip_pos = view_projection * world_pos.extend(1.0);

    if clip_pos.w <= 0.0 { return None; } // behind camera

    // convert to NDC and check bounds
    let ndc = clip_pos.xyz() / clip_pos.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 { return None; } // offscreen

    Some(ndc_to_screen(ndc.xy(), screen_width, screen_height))
}

fn ndc_to_screen(ndc: Vec2, screen_width: f32, screen_height: f32) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * screen_width,
        (1.0 - ndc.y) * 0.5 * screen_height, // Y is flipped
    )
}

// is the point hidden behind the sun?
// simple ray-sphere intersection test
fn is_visible(point: Vec3, cam_pos: Vec3, sun_center: Vec3, sun_radius: f32) -> bool {
    let cam_to_point = point - cam_pos;
    let cam_to_sun = sun_center - cam_pos;

    let projection = cam_to_sun.dot(cam_to_point.normalize());
    if projection < 0.0 || projection > cam_to_point.length() { return true; }

    let closest_point = cam_pos + cam_to_point.normalize() * projection;
    (closest_point - sun_center).length() > sun_radius
}
