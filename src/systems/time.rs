//! time.rs
//!
//! Animation clock: run/pause/single-step state and the per-frame phase update.
//! One frame advances every planet by `increment` simulated hours.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::constants::SUN_SPIN_HOURS;
use crate::systems::bodies::{CelestialBody, Phase};
use crate::systems::scene::FrameSet;

pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        let settings = app.world().get_resource::<Settings>().cloned().unwrap_or_default();
        app.insert_resource(AnimationState::from_settings(&settings))
           .add_systems(Update, advance_bodies.in_set(FrameSet::Animate))
           .add_systems(Update, end_frame.in_set(FrameSet::Present));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationMode {
    Running,
    Paused,
    /// advance once, then pause
    SingleStepPending,
}

/// Central animation state for the whole scene
#[derive(Resource, Debug)]
pub struct AnimationState {
    pub mode: AnimationMode,
    /// simulated hours per frame
    pub increment: f32,
    pub min_increment: f32,
    pub max_increment: f32,
    /// total simulated time, only used for display
    pub elapsed_hours: f64,
    /// the sun's own spin accumulator, kept within one solar day
    pub sun_hours: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AnimationState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: if settings.start_running {
                AnimationMode::Running
            } else {
                AnimationMode::Paused
            },
            increment: settings.time_increment,
            min_increment: settings.min_time_increment,
            max_increment: settings.max_time_increment,
            elapsed_hours: 0.0,
            sun_hours: 0.0,
        }
    }

    pub fn should_advance(&self) -> bool {
        matches!(self.mode, AnimationMode::Running | AnimationMode::SingleStepPending)
    }

    // leaving single-step mode restarts the animation
    pub fn toggle_running(&mut self) {
        self.mode = match self.mode {
            AnimationMode::SingleStepPending | AnimationMode::Paused => AnimationMode::Running,
            AnimationMode::Running => AnimationMode::Paused,
        };
    }

    pub fn single_step(&mut self) {
        self.mode = AnimationMode::SingleStepPending;
    }

    pub fn speed_up(&mut self) {
        self.increment = (self.increment * 2.0).min(self.max_increment);
    }

    pub fn slow_down(&mut self) {
        self.increment = (self.increment / 2.0).max(self.min_increment);
    }

    // called once the frame has been drawn
    pub fn end_frame(&mut self) {
        if self.mode == AnimationMode::SingleStepPending {
            self.mode = AnimationMode::Paused;
        }
    }

    pub fn sun_rotation_degrees(&self, hours_per_day: f32) -> f32 {
        if hours_per_day > 0.0 {
            360.0 * wrap(self.sun_hours, hours_per_day) / hours_per_day
        } else {
            0.0
        }
    }

    /// simulated calendar date, counted from J2000
    pub fn sim_time(&self) -> DateTime<Utc> {
        let epoch = DateTime::<Utc>::from_timestamp(946_728_000, 0).unwrap_or_default();
        epoch
            .checked_add_signed(chrono::Duration::milliseconds((self.elapsed_hours * 3_600_000.0) as i64))
            .unwrap_or(epoch)
    }
}

/// Reduce `value` into `[0, period)`; a zero period leaves the value alone
pub fn wrap(value: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return value;
    }
    let wrapped = value - (value / period).floor() * period;
    // rounding can land exactly on the period for tiny negative inputs
    if wrapped >= period || wrapped < 0.0 { 0.0 } else { wrapped }
}

/// Advance one body's phase by `delta_hours` of simulated time
/// whole days are split off the increment, the remainder turns the body
pub fn advance(phase: &mut Phase, hours_per_day: f32, days_per_year: f32, delta_hours: f32) {
    let day_increment = delta_hours / 24.0;
    let hour_increment = delta_hours - day_increment.floor() * 24.0;

    if hours_per_day > 0.0 {
        phase.hour_of_day = wrap(phase.hour_of_day + hour_increment, hours_per_day);
    }
    if days_per_year > 0.0 {
        phase.day_of_year = wrap(phase.day_of_year + day_increment, days_per_year);
    }
}

impl CelestialBody {
    pub fn advance(&mut self, delta_hours: f32) {
        advance(&mut self.phase, self.hours_per_day, self.days_per_year, delta_hours);
    }
}

fn advance_bodies(
    mut animation: ResMut<AnimationState>,
    mut bodies: Query<&mut CelestialBody>,
) {
    if !animation.should_advance() {
        return;
    }

    let delta = animation.increment;
    for mut body in bodies.iter_mut().filter(|b| b.is_planet()) {
        body.advance(delta);
    }

    animation.sun_hours = wrap(animation.sun_hours + delta, SUN_SPIN_HOURS);
    animation.elapsed_hours += delta as f64;
}

fn end_frame(mut animation: ResMut<AnimationState>) {
    animation.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn earth() -> CelestialBody {
        CelestialBody::new("Earth", 24.0, 365.0, 6378.0, 150.0, None, [1.0; 3])
    }

    #[test]
    fn wrap_stays_in_range() {
        assert_eq!(wrap(370.0, 365.0), 5.0);
        assert_eq!(wrap(-1.0, 24.0), 23.0);
        assert_eq!(wrap(24.0, 24.0), 0.0);
        assert_eq!(wrap(-1.0e-9, 365.0), 0.0);
        assert_eq!(wrap(7.5, 0.0), 7.5);
    }

    #[test]
    fn full_day_moves_one_day_and_keeps_the_hour() {
        let mut body = earth();
        body.phase.hour_of_day = 3.0;
        body.advance(24.0);
        assert_eq!(body.phase.day_of_year, 1.0);
        assert_eq!(body.phase.hour_of_day, 3.0);
    }

    #[test]
    fn mercury_year_wraps_back_to_start() {
        let mut body = CelestialBody::new("Mercury", 1416.0, 88.0, 2439.0, 58.0, None, [1.0; 3]);
        body.phase.day_of_year = 10.0;
        for _ in 0..88 {
            body.advance(24.0);
        }
        assert!((body.phase.day_of_year - 10.0).abs() < 1e-3);
    }

    #[test]
    fn phases_stay_within_periods() {
        let mut body = CelestialBody::new("Mars", 24.6, 687.0, 3394.0, 228.0, None, [1.0; 3]);
        for step in 0..5_000 {
            body.advance(0.75 + (step % 7) as f32 * 13.3);
            assert!((0.0..24.6).contains(&body.phase.hour_of_day));
            assert!((0.0..687.0).contains(&body.phase.day_of_year));
        }
    }

    #[test]
    fn zero_period_body_is_untouched() {
        let mut backdrop = CelestialBody::new("Space", 0.0, 0.0, 0.0, 0.0, None, [0.0; 3]);
        backdrop.advance(24.0);
        assert_eq!(backdrop.phase, Phase::default());
    }

    #[test]
    fn toggling_single_step_resumes_running() {
        let mut state = AnimationState::default();
        state.single_step();
        state.toggle_running();
        assert_eq!(state.mode, AnimationMode::Running);
        state.toggle_running();
        assert_eq!(state.mode, AnimationMode::Paused);
    }

    #[test]
    fn speed_is_bounded() {
        let mut state = AnimationState::default();
        for _ in 0..100 {
            state.speed_up();
        }
        assert_eq!(state.increment, state.max_increment);
        for _ in 0..100 {
            state.slow_down();
        }
        assert_eq!(state.increment, state.min_increment);
    }

    #[test]
    fn start_mode_follows_settings() {
        let settings = Settings { start_running: false, ..Settings::default() };
        assert_eq!(AnimationState::from_settings(&settings).mode, AnimationMode::Paused);
        assert_eq!(AnimationState::default().mode, AnimationMode::Running);
    }

    #[test]
    fn sim_time_starts_at_epoch() {
        let mut state = AnimationState::default();
        assert_eq!(state.sim_time().format("%Y-%m-%d %H:%M").to_string(), "2000-01-01 12:00");
        state.elapsed_hours = 48.0;
        assert_eq!(state.sim_time().format("%Y-%m-%d").to_string(), "2000-01-03");
    }

    fn run_frame(world: &mut World) {
        world.run_system_once(advance_bodies).unwrap();
        world.run_system_once(end_frame).unwrap();
    }

    #[test]
    fn paused_frames_do_not_move_bodies() {
        let mut world = World::new();
        let mut state = AnimationState::default();
        state.mode = AnimationMode::Paused;
        world.insert_resource(state);
        let id = world.spawn(earth()).id();

        for _ in 0..10 {
            run_frame(&mut world);
        }
        assert_eq!(world.get::<CelestialBody>(id).unwrap().phase, Phase::default());
    }

    #[test]
    fn single_step_advances_exactly_once() {
        let mut world = World::new();
        let mut state = AnimationState::default();
        state.mode = AnimationMode::Paused;
        state.single_step();
        world.insert_resource(state);
        let id = world.spawn(earth()).id();

        for _ in 0..5 {
            run_frame(&mut world);
        }
        let body = world.get::<CelestialBody>(id).unwrap();
        assert_eq!(body.phase.day_of_year, 1.0);
        assert_eq!(world.resource::<AnimationState>().mode, AnimationMode::Paused);
    }

    #[test]
    fn only_planets_advance() {
        let mut world = World::new();
        world.insert_resource(AnimationState::default());
        let sun = world
            .spawn(CelestialBody::new("Sun", 25.0, 0.0, 0.0, 0.0, None, [1.0; 3])
                .with_kind(crate::systems::bodies::BodyKind::Sun))
            .id();

        run_frame(&mut world);
        assert_eq!(world.get::<CelestialBody>(sun).unwrap().phase, Phase::default());
        assert_eq!(world.resource::<AnimationState>().sun_hours, 24.0);
    }

    #[test]
    fn sun_hours_wrap_at_a_solar_day() {
        let mut world = World::new();
        world.insert_resource(AnimationState::default());

        // 30 days of 24 hours, 720 mod 25
        for _ in 0..30 {
            run_frame(&mut world);
        }
        let state = world.resource::<AnimationState>();
        assert_eq!(state.sun_hours, 20.0);
        assert_eq!(state.elapsed_hours, 720.0);
    }
}
