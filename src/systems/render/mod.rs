//! render
//!
//! Spawns the scene once and keeps it in step with body phases and display toggles.
//! Each planet is a small hierarchy:
//!   body (orbit rotation) -> anchor (orbital distance) -> spin (sphere) -> satellite pivot -> moon
//!                                                    \-> rings

use bevy::pbr::wireframe::{NoWireframe, WireframeConfig};
use bevy::prelude::*;

pub mod materials;
pub mod mesh;
pub mod placement;

use materials::{Surface, SurfaceKind, orbit_material};
use mesh::{Detail, Tessellated, ring_mesh, sphere_mesh};
use placement::{body_position, label_height, orbit_rotation, satellite_rotation, scaled_distance, scaled_radius, spin_rotation};
use crate::config::Settings;
use crate::constants::{
    BACKDROP_RADIUS, BACKDROP_RESOLUTION, MOON_RESOLUTION, ORBIT_PATH_RESOLUTION, ORBIT_PATH_WIDTH, RING_RESOLUTION,
    SUN_RADIUS, SUN_RESOLUTION,
};
use crate::systems::bodies::{BodyKind, CelestialBody, SolarSystem};
use crate::systems::labels::Labeled;
use crate::systems::scene::{FrameSet, SceneState, Toggles};
use crate::systems::time::AnimationState;

pub struct SolarRenderPlugin;

impl Plugin for SolarRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
               color: Color::WHITE,
               brightness: 80.0,
               ..default()
           })
           .add_systems(Startup, spawn_scene)
           .add_systems(Update, (
               place_bodies,
               place_parts,
               show_orbits,
               refresh_materials,
               refresh_meshes,
               apply_wireframe,
           ).in_set(FrameSet::Draw));
    }
}

// entity positioned at a planet's orbital distance
#[derive(Component)]
pub struct BodyAnchor;

/// Turns with the phase of the body entity it points at
#[derive(Component, Clone, Copy, Debug)]
pub struct Follows {
    pub body: Entity,
    pub motion: Motion,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Spin,
    Satellite { rate: f32 },
}

#[derive(Component)]
pub struct OrbitPath;

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<Settings>,
    scene: Res<SceneState>,
) {
    let system = SolarSystem::load(&settings.texture_dir, settings.starfield_seed, &mut images);
    let toggles = &scene.toggles;

    // backdrop first, it encloses everything
    let backdrop = Surface {
        kind: SurfaceKind::Backdrop,
        color: system.backdrop.color,
        texture: system.backdrop.texture.as_ref().map(|t| t.handle.clone()),
    };
    commands.spawn((
        Name::new(system.backdrop.name.clone()),
        Mesh3d(meshes.add(sphere_mesh(BACKDROP_RADIUS, BACKDROP_RESOLUTION, false))),
        MeshMaterial3d(materials.add(backdrop.material(toggles))),
        Transform::default(),
        NoWireframe,
        backdrop,
        system.backdrop,
    ));

    // sun, carries the scene's only light
    let sun = Surface {
        kind: SurfaceKind::Sun,
        color: system.sun.color,
        texture: system.sun.texture.as_ref().map(|t| t.handle.clone()),
    };
    let sun_entity = commands
        .spawn((
            Name::new(system.sun.name.clone()),
            Mesh3d(meshes.add(sphere_mesh(SUN_RADIUS, SUN_RESOLUTION, false))),
            MeshMaterial3d(materials.add(sun.material(toggles))),
            Transform::default(),
            sun,
            system.sun,
        ))
        .id();
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: 1.0e7,
            range: BACKDROP_RADIUS,
            radius: SUN_RADIUS,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
        ChildOf(sun_entity),
    ));

    let path_material = materials.add(orbit_material());

    for planet in system.planets {
        let radius = scaled_radius(planet.radius);
        let distance = scaled_distance(planet.distance);

        debug!("{} starts at {:?}", planet.name, body_position(&planet));
        if let Some(texture) = &planet.texture {
            debug!("{}: texture {}x{}", planet.name, texture.cols, texture.rows);
        }

        // orbit path, centred on the sun
        commands.spawn((
            Name::new(format!("{} orbit", planet.name)),
            Mesh3d(meshes.add(ring_mesh(distance, distance + ORBIT_PATH_WIDTH, ORBIT_PATH_RESOLUTION))),
            MeshMaterial3d(path_material.clone()),
            Transform::default(),
            if toggles.orbits { Visibility::Visible } else { Visibility::Hidden },
            NoWireframe,
            OrbitPath,
        ));

        let surface = Surface {
            kind: SurfaceKind::Body,
            color: planet.color,
            texture: planet.texture.as_ref().map(|t| t.handle.clone()),
        };
        let satellite = planet.satellite.clone();
        let rings = planet.rings.clone();
        let name = planet.name.clone();

        let body = commands
            .spawn((
                Name::new(name.clone()),
                Transform::from_rotation(orbit_rotation(&planet)),
                Visibility::default(),
                planet,
            ))
            .id();

        let anchor = commands
            .spawn((
                BodyAnchor,
                Transform::from_xyz(distance, 0.0, 0.0),
                Visibility::default(),
                Labeled { text: name, height: label_height(radius, false) },
                ChildOf(body),
            ))
            .id();

        let tessellated = Tessellated { radius, detail: Detail::Scene };
        let spin = commands
            .spawn((
                Mesh3d(meshes.add(sphere_mesh(radius, tessellated.resolution(scene.resolution.value), toggles.flat_shading))),
                MeshMaterial3d(materials.add(surface.material(toggles))),
                Transform::default(),
                Follows { body, motion: Motion::Spin },
                tessellated,
                surface,
                ChildOf(anchor),
            ))
            .id();

        // the moon turns with its planet's spin as well as its own orbit
        if let Some(moon) = satellite {
            let pivot = commands
                .spawn((
                    Transform::default(),
                    Visibility::default(),
                    Follows { body, motion: Motion::Satellite { rate: moon.rate } },
                    ChildOf(spin),
                ))
                .id();

            let surface = Surface {
                kind: SurfaceKind::Body,
                color: moon.color,
                texture: moon.texture.as_ref().map(|t| t.handle.clone()),
            };
            let tessellated = Tessellated { radius: moon.radius, detail: Detail::Fixed(MOON_RESOLUTION) };
            commands.spawn((
                Name::new(moon.name.clone()),
                Mesh3d(meshes.add(sphere_mesh(moon.radius, tessellated.resolution(0), toggles.flat_shading))),
                MeshMaterial3d(materials.add(surface.material(toggles))),
                Transform::from_xyz(moon.distance, 0.0, 0.0),
                Labeled { text: moon.name, height: label_height(moon.radius, true) },
                tessellated,
                surface,
                ChildOf(pivot),
            ));
        }

        if let Some(rings) = rings {
            let surface = Surface {
                kind: SurfaceKind::Ring,
                color: rings.color,
                texture: rings.texture.as_ref().map(|t| t.handle.clone()),
            };
            commands.spawn((
                Mesh3d(meshes.add(ring_mesh(radius + rings.inner_offset, radius + rings.outer_offset, RING_RESOLUTION))),
                MeshMaterial3d(materials.add(surface.material(toggles))),
                Transform::default(),
                surface,
                ChildOf(anchor),
            ));
        }
    }

    info!("Solar system ready");
}

// orbit positions, and the sun's own slow spin
fn place_bodies(
    animation: Res<AnimationState>,
    mut bodies: Query<(&CelestialBody, &mut Transform)>,
) {
    for (body, mut transform) in bodies.iter_mut() {
        transform.rotation = match body.kind {
            BodyKind::Planet => orbit_rotation(body),
            BodyKind::Sun => Quat::from_rotation_z(animation.sun_rotation_degrees(body.hours_per_day).to_radians()),
            BodyKind::Backdrop => continue,
        };
    }
}

// axial spin and satellites
fn place_parts(
    bodies: Query<&CelestialBody>,
    mut parts: Query<(&Follows, &mut Transform)>,
) {
    for (follows, mut transform) in parts.iter_mut() {
        let Ok(body) = bodies.get(follows.body) else { continue; };
        transform.rotation = match follows.motion {
            Motion::Spin => spin_rotation(body),
            Motion::Satellite { rate } => satellite_rotation(body, rate),
        };
    }
}

fn show_orbits(
    scene: Res<SceneState>,
    mut paths: Query<&mut Visibility, With<OrbitPath>>,
) {
    if !scene.is_changed() {
        return;
    }
    let visibility = if scene.toggles.orbits { Visibility::Visible } else { Visibility::Hidden };
    for mut path in paths.iter_mut() {
        path.set_if_neq(visibility);
    }
}

// rebuild surface materials after texturing or lighting changes
fn refresh_materials(
    scene: Res<SceneState>,
    mut applied: Local<Option<(bool, bool)>>,
    surfaces: Query<(&Surface, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let toggles: &Toggles = &scene.toggles;
    let key = (toggles.textures, toggles.lighting);
    if *applied == Some(key) {
        return;
    }

    for (surface, handle) in surfaces.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            *material = surface.material(toggles);
        }
    }
    *applied = Some(key);
}

// rebuild spheres after resolution or shading changes
fn refresh_meshes(
    scene: Res<SceneState>,
    mut applied: Local<Option<(u32, bool)>>,
    spheres: Query<(&Tessellated, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let key = (scene.resolution.value, scene.toggles.flat_shading);
    if *applied == Some(key) {
        return;
    }
    // the startup meshes already match the first key
    if applied.is_some() {
        for (sphere, handle) in spheres.iter() {
            if let Some(mesh) = meshes.get_mut(&handle.0) {
                *mesh = sphere_mesh(sphere.radius, sphere.resolution(key.0), key.1);
            }
        }
        debug!("Rebuilt spheres at resolution {} (flat: {})", key.0, key.1);
    }
    *applied = Some(key);
}

fn apply_wireframe(scene: Res<SceneState>, mut config: ResMut<WireframeConfig>) {
    if config.global != scene.toggles.wireframe {
        config.global = scene.toggles.wireframe;
    }
}
