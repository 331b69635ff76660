//! input.rs
//!
//! Every user action is a `Command`. Keys and menu entries both map onto it,
//! and `Command::apply` is the only place scene or animation state is changed from outside.

use bevy::prelude::*;

use crate::constants::{PAN_STEP, ROTATE_STEP, ZOOM_STEP};
use crate::systems::bodies::CelestialBody;
use crate::systems::camera::{CameraRig, PanDirection};
use crate::systems::menu::MenuSelected;
use crate::systems::scene::{FrameSet, SceneState};
use crate::systems::time::AnimationState;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MenuSelected>()
           .add_systems(Update, handle_input.in_set(FrameSet::Input));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ToggleRunning,
    SingleStep,
    SpeedUp,
    SlowDown,
    ToggleShading,
    ToggleWireframe,
    ToggleTextures,
    ToggleLighting,
    StartView,
    TopDownView,
    ResetPlanets,
    ToggleOrbits,
    ToggleLabels,
    ResolutionUp,
    ResolutionDown,
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
    Rotate(Vec3),
    Quit,
}

/// what the caller still has to do after `apply`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    ResetPlanets,
    Quit,
}

// (key, needs shift, command)
const KEY_BINDINGS: &[(KeyCode, bool, Command)] = &[
    (KeyCode::KeyR, false, Command::ToggleRunning),
    (KeyCode::KeyS, false, Command::SingleStep),
    (KeyCode::KeyT, false, Command::SingleStep),
    (KeyCode::KeyA, false, Command::SpeedUp),
    (KeyCode::KeyA, true, Command::SlowDown),
    (KeyCode::KeyQ, false, Command::ToggleShading),
    (KeyCode::KeyW, false, Command::ToggleWireframe),
    (KeyCode::KeyX, false, Command::ToggleTextures),
    (KeyCode::KeyL, false, Command::ToggleLighting),
    (KeyCode::Digit1, false, Command::StartView),
    (KeyCode::Digit2, false, Command::TopDownView),
    (KeyCode::Digit0, false, Command::ResetPlanets),
    (KeyCode::KeyO, false, Command::ToggleOrbits),
    (KeyCode::KeyN, false, Command::ToggleLabels),
    (KeyCode::Equal, false, Command::ResolutionUp),
    (KeyCode::Minus, false, Command::ResolutionDown),
    (KeyCode::ArrowUp, false, Command::Pan(PanDirection::Forward)),
    (KeyCode::KeyI, false, Command::Pan(PanDirection::Forward)),
    (KeyCode::ArrowDown, false, Command::Pan(PanDirection::Backward)),
    (KeyCode::KeyM, false, Command::Pan(PanDirection::Backward)),
    (KeyCode::ArrowLeft, false, Command::Pan(PanDirection::Left)),
    (KeyCode::KeyJ, false, Command::Pan(PanDirection::Left)),
    (KeyCode::ArrowRight, false, Command::Pan(PanDirection::Right)),
    (KeyCode::KeyK, false, Command::Pan(PanDirection::Right)),
    (KeyCode::KeyE, false, Command::ZoomIn),
    (KeyCode::KeyZ, false, Command::ZoomOut),
    (KeyCode::Digit3, false, Command::Rotate(Vec3::new(ROTATE_STEP, 0.0, 0.0))),
    (KeyCode::Digit4, false, Command::Rotate(Vec3::new(-ROTATE_STEP, 0.0, 0.0))),
    (KeyCode::Digit5, false, Command::Rotate(Vec3::new(0.0, ROTATE_STEP, 0.0))),
    (KeyCode::Digit6, false, Command::Rotate(Vec3::new(0.0, -ROTATE_STEP, 0.0))),
    (KeyCode::Digit7, false, Command::Rotate(Vec3::new(0.0, 0.0, ROTATE_STEP))),
    (KeyCode::Digit8, false, Command::Rotate(Vec3::new(0.0, 0.0, -ROTATE_STEP))),
    (KeyCode::Escape, false, Command::Quit),
];

impl Command {
    /// shift only matters for keys that have a shifted binding
    pub fn from_key(key: KeyCode, shift: bool) -> Option<Command> {
        let lookup = |shifted: bool| {
            KEY_BINDINGS
                .iter()
                .find(|(k, s, _)| *k == key && *s == shifted)
                .map(|(_, _, command)| *command)
        };
        lookup(shift).or_else(|| if shift { lookup(false) } else { None })
    }

    pub fn apply(self, scene: &mut SceneState, animation: &mut AnimationState) -> Effect {
        let toggles = &mut scene.toggles;
        match self {
            Command::ToggleRunning => animation.toggle_running(),
            Command::SingleStep => animation.single_step(),
            Command::SpeedUp => animation.speed_up(),
            Command::SlowDown => animation.slow_down(),
            Command::ToggleShading => toggles.flat_shading = !toggles.flat_shading,
            Command::ToggleWireframe => toggles.wireframe = !toggles.wireframe,
            Command::ToggleTextures => toggles.textures = !toggles.textures,
            Command::ToggleLighting => toggles.lighting = !toggles.lighting,
            Command::StartView => scene.camera = CameraRig::start_view(),
            Command::TopDownView => scene.camera = CameraRig::top_down(),
            Command::ResetPlanets => return Effect::ResetPlanets,
            Command::ToggleOrbits => toggles.orbits = !toggles.orbits,
            Command::ToggleLabels => toggles.labels = !toggles.labels,
            Command::ResolutionUp => scene.resolution.increase(),
            Command::ResolutionDown => scene.resolution.decrease(),
            Command::Pan(direction) => scene.camera.pan(direction, PAN_STEP),
            Command::ZoomIn => scene.camera.zoom(ZOOM_STEP),
            Command::ZoomOut => scene.camera.zoom(-ZOOM_STEP),
            Command::Rotate(delta) => scene.camera.rotate(delta),
            Command::Quit => return Effect::Quit,
        }
        Effect::None
    }
}

/// zero every planet's phase, the sun and backdrop keep theirs
pub fn reset_planets<'a>(bodies: impl IntoIterator<Item = Mut<'a, CelestialBody>>) {
    for mut body in bodies {
        if body.is_planet() {
            body.reset();
        }
    }
}

fn handle_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut menu_events: EventReader<MenuSelected>,
    mut scene: ResMut<SceneState>,
    mut animation: ResMut<AnimationState>,
    mut bodies: Query<&mut CelestialBody>,
    mut exit: EventWriter<AppExit>,
) {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    let from_keys = keys
        .get_just_pressed()
        .filter_map(|key| Command::from_key(*key, shift));

    let from_menu = menu_events.read().filter_map(|event| {
        let command = Command::from_menu_id(event.0);
        if command.is_none() {
            warn!("Ignoring unknown menu item {}", event.0);
        }
        command
    });

    let commands: Vec<Command> = from_keys.chain(from_menu).collect();
    for command in commands {
        debug!("{:?}", command);
        match command.apply(&mut scene, &mut animation) {
            Effect::None => {}
            Effect::ResetPlanets => reset_planets(bodies.iter_mut()),
            Effect::Quit => {
                info!("Quit requested");
                exit.write(AppExit::Success);
            }
        }
    }
}
