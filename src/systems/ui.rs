use bevy::prelude::*;

use crate::systems::scene::{FrameSet, SceneState};
use crate::systems::time::{AnimationMode, AnimationState};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ui)
           .add_systems(Update, (update_status, update_datetime).in_set(FrameSet::Draw));
    }
}

// UI component for run state, speed and detail
#[derive(Component)]
pub struct StatusDisplay;

// UI component for the simulated date
#[derive(Component)]
pub struct DateTimeDisplay;

const HELP: &str = "R run  S step  A/shift-A speed  arrows pan  E/Z zoom  3-8 rotate  right click menu";

fn setup_ui(mut commands: Commands) {
    // create UI container
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                justify_content: JustifyContent::Start,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading..."),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                StatusDisplay,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                DateTimeDisplay,
                Node {
                    margin: UiRect::top(Val::Px(5.0)), // spacing
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(HELP),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::top(Val::Px(5.0)),
                    ..default()
                },
            ));
        });
}

pub fn status_line(animation: &AnimationState, scene: &SceneState) -> String {
    let mode = match animation.mode {
        AnimationMode::Running => "running",
        AnimationMode::Paused => "paused",
        AnimationMode::SingleStepPending => "stepping",
    };
    format!(
        "{}  {} h/frame  detail {}",
        mode, animation.increment, scene.resolution.value
    )
}

fn update_status(
    animation: Res<AnimationState>,
    scene: Res<SceneState>,
    mut text_query: Query<&mut Text, With<StatusDisplay>>,
) {
    if !animation.is_changed() && !scene.is_changed() {
        return;
    }
    if let Ok(mut text) = text_query.single_mut() {
        text.0 = status_line(&animation, &scene);
    }
}

// simulated calendar, counted from J2000
fn update_datetime(
    animation: Res<AnimationState>,
    mut text_query: Query<&mut Text, With<DateTimeDisplay>>,
) {
    if let Ok(mut text) = text_query.single_mut() {
        text.0 = format!("{} UTC", animation.sim_time().format("%Y-%m-%d %H:%M"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reports_mode_speed_and_detail() {
        let mut animation = AnimationState::default();
        let scene = SceneState::default();
        animation.mode = AnimationMode::Paused;

        let line = status_line(&animation, &scene);
        assert!(line.starts_with("paused"));
        assert!(line.contains(&format!("{} h/frame", animation.increment)));
        assert!(line.contains(&format!("detail {}", scene.resolution.value)));
    }
}
