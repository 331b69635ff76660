use bevy::prelude::*;

use crate::systems::input::Command;
use crate::systems::scene::FrameSet;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_menu)
           .add_systems(Update, (open_menu, select_entry).chain().before(FrameSet::Input));
    }
}

/// A menu entry was clicked, carries the entry id
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuSelected(pub u32);

// pop-up container
#[derive(Component)]
pub struct MenuRoot;

#[derive(Component, Clone, Copy)]
pub struct MenuEntry(pub u32);

const ENTRY_IDLE: Color = Color::srgba(0.1, 0.1, 0.15, 0.9);
const ENTRY_HOVER: Color = Color::srgba(0.25, 0.25, 0.35, 0.95);

// (id, caption)
pub const MENU_ITEMS: &[(u32, &str)] = &[
    (1, "Run / pause"),
    (2, "Single step"),
    (3, "Faster"),
    (4, "Slower"),
    (5, "Flat / smooth shading"),
    (6, "Wireframe"),
    (7, "Textures"),
    (8, "Lighting"),
    (9, "Start view"),
    (10, "Top-down view"),
    (11, "Reset planets"),
    (12, "Orbit paths"),
    (13, "Labels"),
    (14, "More detail"),
    (15, "Less detail"),
    (16, "Quit"),
];

impl Command {
    pub fn from_menu_id(id: u32) -> Option<Command> {
        Some(match id {
            1 => Command::ToggleRunning,
            2 => Command::SingleStep,
            3 => Command::SpeedUp,
            4 => Command::SlowDown,
            5 => Command::ToggleShading,
            6 => Command::ToggleWireframe,
            7 => Command::ToggleTextures,
            8 => Command::ToggleLighting,
            9 => Command::StartView,
            10 => Command::TopDownView,
            11 => Command::ResetPlanets,
            12 => Command::ToggleOrbits,
            13 => Command::ToggleLabels,
            14 => Command::ResolutionUp,
            15 => Command::ResolutionDown,
            16 => Command::Quit,
            _ => return None,
        })
    }
}

fn setup_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            Visibility::Hidden,
            GlobalZIndex(10),
            MenuRoot,
        ))
        .with_children(|parent| {
            for &(id, caption) in MENU_ITEMS {
                parent
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(8.0), Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(ENTRY_IDLE),
                        MenuEntry(id),
                    ))
                    .with_children(|entry| {
                        entry.spawn((
                            Text::new(caption),
                            TextFont { font_size: 13.0, ..default() },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

// right click pops the menu up at the cursor, a left click elsewhere closes it
fn open_menu(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    entries: Query<&Interaction, With<MenuEntry>>,
    mut menu: Query<(&mut Node, &mut Visibility), With<MenuRoot>>,
) {
    let (Ok(window), Ok((mut node, mut visibility))) = (windows.single(), menu.single_mut()) else { return; };

    if mouse_buttons.just_pressed(MouseButton::Right) {
        if let Some(cursor) = window.cursor_position() {
            node.left = Val::Px(cursor.x);
            node.top = Val::Px(cursor.y);
            *visibility = Visibility::Visible;
        }
    } else if mouse_buttons.just_pressed(MouseButton::Left)
        && entries.iter().all(|i| *i == Interaction::None)
    {
        *visibility = Visibility::Hidden;
    }
}

fn select_entry(
    mut entries: Query<(&Interaction, &MenuEntry, &mut BackgroundColor), Changed<Interaction>>,
    mut menu: Query<&mut Visibility, With<MenuRoot>>,
    mut selected: EventWriter<MenuSelected>,
) {
    for (interaction, entry, mut background) in entries.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                selected.write(MenuSelected(entry.0));
                if let Ok(mut visibility) = menu.single_mut() {
                    *visibility = Visibility::Hidden;
                }
            }
            Interaction::Hovered => background.0 = ENTRY_HOVER,
            Interaction::None => background.0 = ENTRY_IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_menu_item_maps_to_a_command() {
        for &(id, caption) in MENU_ITEMS {
            assert!(Command::from_menu_id(id).is_some(), "{} ({})", id, caption);
        }
    }

    #[test]
    fn menu_ids_are_unique() {
        let ids: HashSet<u32> = MENU_ITEMS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), MENU_ITEMS.len());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(Command::from_menu_id(0), None);
        assert_eq!(Command::from_menu_id(99), None);
    }
}
