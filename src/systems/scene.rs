use bevy::prelude::*;

use crate::config::Settings;
use crate::constants::{RESOLUTION_COARSE_STEP, RESOLUTION_FINE_BAND};
use crate::systems::camera::CameraRig;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let settings = app.world().get_resource::<Settings>().cloned().unwrap_or_default();
        app.insert_resource(SceneState::from_settings(&settings))
           .configure_sets(
               Update,
               (FrameSet::Input, FrameSet::Animate, FrameSet::Draw, FrameSet::Present).chain(),
           );
    }
}

/// Per-frame ordering: input mutates state, the clock moves bodies, the renderer places them
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Animate,
    Draw,
    Present,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggles {
    pub wireframe: bool,
    pub flat_shading: bool,
    pub lighting: bool,
    pub textures: bool,
    pub orbits: bool,
    pub labels: bool,
}

/// sphere slices/stacks, bounded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl Resolution {
    // fine steps close to the minimum, coarse everywhere else
    fn step(&self) -> u32 {
        if self.value < self.min.saturating_add(RESOLUTION_FINE_BAND) {
            1
        } else {
            RESOLUTION_COARSE_STEP
        }
    }

    pub fn increase(&mut self) {
        self.value = self.value.saturating_add(self.step()).min(self.max);
    }

    pub fn decrease(&mut self) {
        let step = if self.value <= self.min.saturating_add(RESOLUTION_FINE_BAND) {
            1
        } else {
            RESOLUTION_COARSE_STEP
        };
        self.value = self.value.saturating_sub(step).max(self.min);
    }
}

/// Camera and display state shared by the input systems and the renderer
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SceneState {
    pub camera: CameraRig,
    pub toggles: Toggles,
    pub resolution: Resolution,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SceneState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            camera: CameraRig::start_view(),
            toggles: Toggles {
                wireframe: false,
                flat_shading: false,
                lighting: settings.lighting,
                textures: settings.textures,
                orbits: settings.show_orbits,
                labels: settings.show_labels,
            },
            resolution: Resolution {
                value: settings.resolution,
                min: settings.min_resolution,
                max: settings.max_resolution,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(value: u32) -> Resolution {
        Resolution { value, min: 3, max: 120 }
    }

    #[test]
    fn resolution_never_leaves_bounds() {
        let mut res = resolution(100);
        for _ in 0..50 {
            res.increase();
        }
        assert_eq!(res.value, 120);
        for _ in 0..200 {
            res.decrease();
        }
        assert_eq!(res.value, 3);
    }

    #[test]
    fn resolution_steps_finely_near_minimum() {
        let mut res = resolution(5);
        res.increase();
        assert_eq!(res.value, 6);
        res.decrease();
        assert_eq!(res.value, 5);

        let mut res = resolution(50);
        res.increase();
        assert_eq!(res.value, 60);
        res.decrease();
        assert_eq!(res.value, 50);
    }

    #[test]
    fn huge_bounds_do_not_overflow() {
        let mut res = Resolution { value: u32::MAX - 1, min: u32::MAX - 2, max: u32::MAX };
        res.increase();
        assert_eq!(res.value, u32::MAX);
        res.increase();
        assert_eq!(res.value, u32::MAX);
        res.decrease();
        assert_eq!(res.value, u32::MAX - 1);
    }

    #[test]
    fn settings_seed_toggles() {
        let settings = Settings { show_labels: false, textures: false, ..Settings::default() };
        let state = SceneState::from_settings(&settings);
        assert!(!state.toggles.labels);
        assert!(!state.toggles.textures);
        assert!(state.toggles.orbits);
        assert_eq!(state.resolution.value, settings.resolution);
    }
}
