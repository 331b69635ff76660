//! config.rs
//!
//! Runtime tunables, read once from a JSON file next to the binary.
//! Physical constants live in `constants.rs`, these are the knobs a user may want to change.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_PATH;

pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self { path: PathBuf::from(SETTINGS_PATH) }
    }
}

impl Plugin for ConfigPlugin {
    // LogPlugin is already built by DefaultPlugins, so warnings here are visible
    fn build(&self, app: &mut App) {
        app.insert_resource(load_settings(&self.path));
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// older builds started paused, so this is left to the user
    pub start_running: bool,

    // simulated hours per frame
    pub time_increment: f32,
    pub min_time_increment: f32,
    pub max_time_increment: f32,

    // sphere slices/stacks
    pub resolution: u32,
    pub min_resolution: u32,
    pub max_resolution: u32,

    pub show_orbits: bool,
    pub show_labels: bool,
    pub textures: bool,
    pub lighting: bool,

    pub texture_dir: PathBuf,
    pub starfield_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_running: true,
            time_increment: 24.0,
            min_time_increment: 24.0 / 128.0,
            max_time_increment: 24.0 * 128.0,
            resolution: 100,
            min_resolution: 3,
            max_resolution: 120,
            show_orbits: true,
            show_labels: true,
            textures: true,
            lighting: true,
            texture_dir: PathBuf::from("assets/textures"),
            starfield_seed: 0x5EED_5747,
        }
    }
}

impl Settings {
    // keep every bound ordered and the start values inside them
    fn sanitized(mut self) -> Self {
        if self.min_time_increment <= 0.0 {
            self.min_time_increment = Settings::default().min_time_increment;
        }
        if self.max_time_increment < self.min_time_increment {
            self.max_time_increment = self.min_time_increment;
        }
        self.time_increment = self
            .time_increment
            .clamp(self.min_time_increment, self.max_time_increment);

        self.min_resolution = self.min_resolution.max(3);
        self.max_resolution = self.max_resolution.max(self.min_resolution);
        self.resolution = self.resolution.clamp(self.min_resolution, self.max_resolution);
        self
    }
}

pub fn read_settings(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&text)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(settings.sanitized())
}

/// Settings from `path`, or defaults when the file is absent or broken
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => {
            info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            let missing = e
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == ErrorKind::NotFound);
            if !missing {
                warn!("{:#}, using defaults", e);
            }
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        let settings = Settings::default();
        assert_eq!(settings.clone().sanitized(), settings);
        assert!(settings.start_running);
        assert_eq!(settings.time_increment, 24.0);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "start_running": false, "resolution": 40 }"#).unwrap();
        assert!(!settings.start_running);
        assert_eq!(settings.resolution, 40);
        assert_eq!(settings.max_resolution, Settings::default().max_resolution);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = Settings {
            time_increment: 1.0e9,
            resolution: 1,
            min_resolution: 0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.time_increment, settings.max_time_increment);
        assert_eq!(settings.min_resolution, 3);
        assert_eq!(settings.resolution, 3);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/orrery.json");
        assert!(read_settings(path).is_err());
        assert_eq!(load_settings(path), Settings::default());
    }
}
