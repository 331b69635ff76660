use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuFeatures, WgpuSettings};

mod config;
mod constants;
mod systems;

use config::ConfigPlugin;
use systems::camera::CameraPlugin;
use systems::input::InputPlugin;
use systems::labels::LabelPlugin;
use systems::menu::MenuPlugin;
use systems::render::SolarRenderPlugin;
use systems::scene::ScenePlugin;
use systems::time::TimePlugin;
use systems::ui::UIPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Solar System".into(),
                        resolution: (600.0, 360.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                // wireframe mode needs line polygons
                .set(RenderPlugin {
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        features: WgpuFeatures::POLYGON_MODE_LINE,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(WireframePlugin::default())
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.0)))
        // settings first, the state resources are built from them
        .add_plugins(ConfigPlugin::default())
        .add_plugins((ScenePlugin, TimePlugin, CameraPlugin, InputPlugin, MenuPlugin))
        .add_plugins((SolarRenderPlugin, LabelPlugin, UIPlugin))
        .run()
}
