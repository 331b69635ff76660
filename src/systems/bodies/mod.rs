//! bodies
//!
//! The celestial body record and the fixed table it is built from.
//! Bodies own their textures through bevy handles, so dropping a body releases its image.

use std::path::Path;

use bevy::prelude::*;

pub mod texture;

use texture::{TextureImage, generate_starfield, load_texture};
use crate::constants::{
    BACKDROP_COLOR, Companion, MOON_COLOR, MOON_DISTANCE, MOON_RADIUS, MOON_RATE, MOON_TEXTURE, PLANETS,
    RING_INNER_OFFSET, RING_OUTER_OFFSET, RINGS_COLOR, RINGS_TEXTURE, STARS_TEXTURE, SUN_COLOR,
    SUN_SPIN_HOURS, SUN_TEXTURE,
};

/// which draw path a body takes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Sun,
    Planet,
    Backdrop,
}

/// Loaded texture plus the extents it was decoded with
#[derive(Clone, Debug)]
pub struct BodyTexture {
    pub handle: Handle<Image>,
    pub rows: u32,
    pub cols: u32,
}

/// position within the rotation and orbit cycles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phase {
    pub hour_of_day: f32,
    pub day_of_year: f32,
}

/// A moon that follows its planet around
#[derive(Clone, Debug)]
pub struct Satellite {
    pub name: String,
    pub radius: f32, // scene units
    pub distance: f32,
    /// orbits this many times per planet year
    pub rate: f32,
    pub color: [f32; 3],
    pub texture: Option<BodyTexture>,
}

/// Flat ring system, offsets are measured from the planet's scaled radius
#[derive(Clone, Debug)]
pub struct RingSystem {
    pub inner_offset: f32,
    pub outer_offset: f32,
    pub color: [f32; 3],
    pub texture: Option<BodyTexture>,
}

#[derive(Component, Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,

    pub hours_per_day: f32,
    pub days_per_year: f32,
    pub radius: f32,   // km
    pub distance: f32, // millions of km from the sun's surface
    pub color: [f32; 3],
    pub texture: Option<BodyTexture>,

    pub phase: Phase,

    pub satellite: Option<Satellite>,
    pub rings: Option<RingSystem>,
}

impl CelestialBody {
    pub fn new(
        name: impl Into<String>,
        hours_per_day: f32,
        days_per_year: f32,
        radius: f32,
        distance: f32,
        texture: Option<BodyTexture>,
        color: [f32; 3],
    ) -> Self {
        let name = name.into();
        if radius < 0.0 || distance < 0.0 {
            warn!("{}: negative radius or distance clamped to zero", name);
        }

        Self {
            name,
            kind: BodyKind::Planet,
            hours_per_day: hours_per_day.max(0.0),
            days_per_year: days_per_year.max(0.0),
            radius: radius.max(0.0),
            distance: distance.max(0.0),
            color,
            texture,
            phase: Phase::default(),
            satellite: None,
            rings: None,
        }
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_satellite(mut self, satellite: Satellite) -> Self {
        self.satellite = Some(satellite);
        self
    }

    pub fn with_rings(mut self, rings: RingSystem) -> Self {
        self.rings = Some(rings);
        self
    }

    pub fn is_planet(&self) -> bool {
        self.kind == BodyKind::Planet
    }

    pub fn reset(&mut self) {
        self.phase = Phase::default();
    }
}

/// Every body in the scene, planets in canonical order
pub struct SolarSystem {
    pub backdrop: CelestialBody,
    pub sun: CelestialBody,
    pub planets: Vec<CelestialBody>,
}

impl SolarSystem {
    /// `load` turns a texture file name into a texture, or None when unavailable
    pub fn build(mut load: impl FnMut(&str) -> Option<BodyTexture>, starfield: Option<BodyTexture>) -> Self {
        let backdrop = CelestialBody::new("Space", 0.0, 0.0, 0.0, 0.0, starfield, BACKDROP_COLOR)
            .with_kind(BodyKind::Backdrop);
        let sun = CelestialBody::new("Sun", SUN_SPIN_HOURS, 0.0, 0.0, 0.0, load(SUN_TEXTURE), SUN_COLOR)
            .with_kind(BodyKind::Sun);

        let planets = PLANETS
            .iter()
            .map(|entry| {
                let body = CelestialBody::new(
                    entry.name,
                    entry.hours_per_day,
                    entry.days_per_year,
                    entry.radius,
                    entry.distance,
                    load(entry.texture),
                    entry.color,
                );

                match entry.companion {
                    Companion::Moon => body.with_satellite(Satellite {
                        name: "Moon".to_string(),
                        radius: MOON_RADIUS,
                        distance: MOON_DISTANCE,
                        rate: MOON_RATE,
                        color: MOON_COLOR,
                        texture: load(MOON_TEXTURE),
                    }),
                    Companion::Rings => body.with_rings(RingSystem {
                        inner_offset: RING_INNER_OFFSET,
                        outer_offset: RING_OUTER_OFFSET,
                        color: RINGS_COLOR,
                        texture: load(RINGS_TEXTURE),
                    }),
                    Companion::None => body,
                }
            })
            .collect();

        Self { backdrop, sun, planets }
    }

    /// Load textures from `dir` into `images`
    /// the starfield is generated when its bitmap is missing
    pub fn load(dir: &Path, seed: u64, images: &mut Assets<Image>) -> Self {
        let starfield = match load_texture(&dir.join(STARS_TEXTURE)) {
            Ok(image) => image,
            Err(e) => {
                warn!("{:#}, generating starfield", e);
                generate_starfield(2048, 1024, seed)
            }
        };
        let starfield = Some(upload(starfield, images));

        Self::build(
            |file| match load_texture(&dir.join(file)) {
                Ok(image) => Some(upload(image, images)),
                Err(e) => {
                    // cosmetic only, the body is drawn with its base colour instead
                    warn!("{:#}", e);
                    None
                }
            },
            starfield,
        )
    }
}

fn upload(image: TextureImage, images: &mut Assets<Image>) -> BodyTexture {
    BodyTexture {
        rows: image.rows,
        cols: image.cols,
        handle: images.add(image.to_image()),
    }
}
