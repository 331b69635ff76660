//! Scene-space geometry derived from a body's phase
//! The orbital plane is XY, bodies orbit and spin about +Z

use bevy::prelude::*;

use crate::constants::{DIST_SCALE, LABEL_OFFSET, SIZE_SCALE, SUN_RADIUS_OFFSET};
use crate::systems::bodies::CelestialBody;

pub fn scaled_distance(distance: f32) -> f32 {
    distance * DIST_SCALE + SUN_RADIUS_OFFSET
}

pub fn scaled_radius(radius: f32) -> f32 {
    radius * SIZE_SCALE
}

// `turns` full revolutions per period
fn cycle_rotation(value: f32, period: f32, turns: f32) -> Quat {
    if period <= 0.0 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_z((360.0 * turns * value / period).to_radians())
}

pub fn orbit_rotation(body: &CelestialBody) -> Quat {
    cycle_rotation(body.phase.day_of_year, body.days_per_year, 1.0)
}

pub fn spin_rotation(body: &CelestialBody) -> Quat {
    cycle_rotation(body.phase.hour_of_day, body.hours_per_day, 1.0)
}

/// a satellite goes round `rate` times per planet year
pub fn satellite_rotation(planet: &CelestialBody, rate: f32) -> Quat {
    cycle_rotation(planet.phase.day_of_year, planet.days_per_year, rate)
}

pub fn body_position(body: &CelestialBody) -> Vec3 {
    orbit_rotation(body) * Vec3::new(scaled_distance(body.distance), 0.0, 0.0)
}

// satellites keep their label tucked in
pub fn label_height(scaled_radius: f32, satellite: bool) -> f32 {
    if satellite {
        scaled_radius - LABEL_OFFSET
    } else {
        scaled_radius + LABEL_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth(day: f32, hour: f32) -> CelestialBody {
        let mut body = CelestialBody::new("Earth", 24.0, 365.0, 6378.0, 150.0, None, [1.0; 3]);
        body.phase.day_of_year = day;
        body.phase.hour_of_day = hour;
        body
    }

    #[test]
    fn distances_include_the_sun() {
        assert!((scaled_distance(150.0) - 5.0).abs() < 1e-5);
        assert_eq!(scaled_distance(0.0), SUN_RADIUS_OFFSET);
        assert!((scaled_radius(15945.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_year_is_a_quarter_turn() {
        let position = body_position(&earth(365.0 / 4.0, 0.0));
        assert!(position.abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-4));
    }

    #[test]
    fn spin_follows_hour_of_day() {
        let rotation = spin_rotation(&earth(0.0, 6.0));
        assert!((rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn moon_runs_twelve_times_faster() {
        let planet = earth(365.0 / 48.0, 0.0);
        let rotation = satellite_rotation(&planet, 12.0);
        assert!((rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn degenerate_periods_do_not_rotate() {
        let sun = CelestialBody::new("Sun", 25.0, 0.0, 0.0, 0.0, None, [1.0; 3]);
        assert_eq!(orbit_rotation(&sun), Quat::IDENTITY);
    }

    #[test]
    fn satellite_labels_sit_lower() {
        assert_eq!(label_height(0.5, false), 1.5);
        assert_eq!(label_height(0.5, true), -0.5);
    }
}
