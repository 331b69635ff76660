// Scene scales: astronomical units to scene units
pub const DIST_SCALE: f32 = 1.0 / 37.5;
pub const SIZE_SCALE: f32 = 1.0 / 15945.0;

// planets orbit the sun's surface, not its centre
pub const SUN_RADIUS: f32 = 1.0;
pub const SUN_RADIUS_OFFSET: f32 = SUN_RADIUS;
pub const SUN_SPIN_HOURS: f32 = 25.0;
pub const SUN_RESOLUTION: u32 = 15;

pub const BACKDROP_RADIUS: f32 = 300.0;
pub const BACKDROP_RESOLUTION: u32 = 50;

pub const ORBIT_PATH_WIDTH: f32 = 0.05;
pub const ORBIT_PATH_RESOLUTION: u32 = 100;

// Earth's moon
pub const MOON_DISTANCE: f32 = 0.7;
pub const MOON_RADIUS: f32 = 0.1;
pub const MOON_RESOLUTION: u32 = 5;
pub const MOON_RATE: f32 = 12.0;

// Saturn's rings, offsets past the planet's scaled radius
pub const RING_INNER_OFFSET: f32 = 0.1;
pub const RING_OUTER_OFFSET: f32 = 0.6;
pub const RING_RESOLUTION: u32 = 100;

// labels sit this far above a body's surface
pub const LABEL_OFFSET: f32 = 1.0;

// Camera
pub const PAN_STEP: f32 = 0.5;
pub const ZOOM_STEP: f32 = 0.5;
pub const ROTATE_STEP: f32 = 1.0;
pub const PAN_BOUND_XY: f32 = 150.0;
pub const PAN_BOUND_Z: f32 = 200.0;
pub const DRAG_DAMPING: f32 = 10.0;
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const START_VIEW_PAN: [f32; 3] = [0.0, 0.0, -20.0];
pub const START_VIEW_ROTATION: [f32; 3] = [-15.0, 0.0, 0.0];
pub const TOP_DOWN_PAN: [f32; 3] = [0.0, 0.0, -60.0];
pub const TOP_DOWN_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

// resolution steps by one inside this band above the minimum
pub const RESOLUTION_FINE_BAND: u32 = 10;
pub const RESOLUTION_COARSE_STEP: u32 = 10;

pub const SETTINGS_PATH: &str = "orrery.json";

// Asset file names, relative to the texture directory
pub const SUN_TEXTURE: &str = "sun.bmp";
pub const MOON_TEXTURE: &str = "moon.bmp";
pub const RINGS_TEXTURE: &str = "saturnrings.bmp";
pub const STARS_TEXTURE: &str = "stars.bmp";

/// One row of the planetary table
pub struct PlanetEntry {
    pub name: &'static str,
    pub hours_per_day: f32,
    pub days_per_year: f32,
    pub radius: f32,   // km
    pub distance: f32, // millions of km from the sun's surface
    pub texture: &'static str,
    pub color: [f32; 3],
    pub companion: Companion,
}

/// extra parts drawn along with a planet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Companion {
    None,
    Moon,
    Rings,
}

// canonical draw order, Mercury outwards
pub const PLANETS: [PlanetEntry; 8] = [
    PlanetEntry {
        name: "Mercury",
        hours_per_day: 1416.0,
        days_per_year: 88.0,
        radius: 2439.0,
        distance: 58.0,
        texture: "mercury.bmp",
        color: [0.6, 0.6, 0.6],
        companion: Companion::None,
    },
    PlanetEntry {
        name: "Venus",
        hours_per_day: 5832.0,
        days_per_year: 225.0,
        radius: 6052.0,
        distance: 108.0,
        texture: "venus.bmp",
        color: [0.9, 0.8, 0.5],
        companion: Companion::None,
    },
    PlanetEntry {
        name: "Earth",
        hours_per_day: 24.0,
        days_per_year: 365.0,
        radius: 6378.0,
        distance: 150.0,
        texture: "earth.bmp",
        color: [0.2, 0.4, 0.9],
        companion: Companion::Moon,
    },
    PlanetEntry {
        name: "Mars",
        hours_per_day: 24.6,
        days_per_year: 687.0,
        radius: 3394.0,
        distance: 228.0,
        texture: "mars.bmp",
        color: [0.8, 0.3, 0.1],
        companion: Companion::None,
    },
    PlanetEntry {
        name: "Jupiter",
        hours_per_day: 9.8,
        days_per_year: 4332.0,
        radius: 71398.0,
        distance: 779.0,
        texture: "jupiter.bmp",
        color: [0.8, 0.6, 0.4],
        companion: Companion::None,
    },
    PlanetEntry {
        name: "Saturn",
        hours_per_day: 10.2,
        days_per_year: 10761.0,
        radius: 60270.0,
        distance: 1424.0,
        texture: "saturn.bmp",
        color: [0.9, 0.8, 0.6],
        companion: Companion::Rings,
    },
    PlanetEntry {
        name: "Uranus",
        hours_per_day: 15.5,
        days_per_year: 30682.0,
        radius: 25550.0,
        distance: 2867.0,
        texture: "uranus.bmp",
        color: [0.5, 0.8, 0.9],
        companion: Companion::None,
    },
    PlanetEntry {
        name: "Neptune",
        hours_per_day: 15.8,
        days_per_year: 60195.0,
        radius: 24750.0,
        distance: 4492.0,
        texture: "neptune.bmp",
        color: [0.3, 0.4, 0.9],
        companion: Companion::None,
    },
];

pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 0.0];
pub const MOON_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
pub const RINGS_COLOR: [f32; 3] = [0.8, 0.7, 0.5];
pub const BACKDROP_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
