use bevy::prelude::*;

use crate::constants::SUN_COLOR;
use crate::systems::scene::Toggles;

/// which material recipe an entity's surface follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Body,
    Ring,
    Sun,
    Backdrop,
}

// surfaces get their material rebuilt when texturing or lighting is toggled
#[derive(Component, Clone, Debug)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub color: [f32; 3],
    pub texture: Option<Handle<Image>>,
}

impl Surface {
    pub fn material(&self, toggles: &Toggles) -> StandardMaterial {
        let texture = self.texture.as_ref();
        match self.kind {
            SurfaceKind::Body => apply_material(self.color, texture, toggles.textures, toggles.lighting),
            SurfaceKind::Ring => StandardMaterial {
                cull_mode: None,
                double_sided: true,
                ..apply_material(self.color, texture, toggles.textures, toggles.lighting)
            },
            SurfaceKind::Sun => sun_material(texture, toggles.textures),
            SurfaceKind::Backdrop => backdrop_material(self.color, texture, toggles.textures),
        }
    }
}

fn rgb(color: [f32; 3]) -> Color {
    Color::srgb(color[0], color[1], color[2])
}

/// Body material from its base colour, or the textured preset when a texture is shown
/// a missing texture always falls back to the base colour
pub fn apply_material(
    color: [f32; 3],
    texture: Option<&Handle<Image>>,
    textured: bool,
    lit: bool,
) -> StandardMaterial {
    let base = match texture.filter(|_| textured) {
        Some(image) => StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: Some(image.clone()),
            perceptual_roughness: 0.6,
            reflectance: 0.3,
            ..default()
        },
        None => StandardMaterial {
            base_color: rgb(color),
            perceptual_roughness: 0.4,
            reflectance: 0.5,
            ..default()
        },
    };

    StandardMaterial {
        metallic: 0.0,
        unlit: !lit,
        ..base
    }
}

// glows, never shaded
pub fn sun_material(texture: Option<&Handle<Image>>, textured: bool) -> StandardMaterial {
    let (base_color, base_color_texture) = match texture.filter(|_| textured) {
        Some(image) => (Color::WHITE, Some(image.clone())),
        None => (rgb(SUN_COLOR), None),
    };

    StandardMaterial {
        base_color,
        base_color_texture,
        emissive: LinearRgba::rgb(1.0, 1.0, 0.0),
        unlit: true,
        ..default()
    }
}

// seen from inside, no lighting on top of the stars
pub fn backdrop_material(color: [f32; 3], texture: Option<&Handle<Image>>, textured: bool) -> StandardMaterial {
    let (base_color, base_color_texture) = match texture.filter(|_| textured) {
        Some(image) => (Color::WHITE, Some(image.clone())),
        None => (rgb(color), None),
    };

    StandardMaterial {
        base_color,
        base_color_texture,
        emissive: LinearRgba::BLACK,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        fog_enabled: false,
        ..default()
    }
}

// faint, unlit, untextured
pub fn orbit_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.25),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}
