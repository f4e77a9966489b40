use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tnav_core::{ControllerSettings, StepSize, WindowBounds};

const MAX_RECENT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Step selector token used at startup, e.g. "100 ms".
    pub step: String,
    pub min_window_secs: f64,
    pub max_window_secs: f64,
    pub scale_factor: f64,
    pub recent_recordings: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = ControllerSettings::default();
        Self {
            step: settings.step.label(),
            min_window_secs: settings.window_bounds.min_secs,
            max_window_secs: settings.window_bounds.max_secs,
            scale_factor: settings.scale_factor,
            recent_recordings: Vec::new(),
        }
    }
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tnav").join("config.toml"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring malformed config {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        if let Ok(contents) = toml::to_string_pretty(self) {
            if let Err(err) = fs::write(path, contents) {
                log::warn!("could not save config to {}: {err}", path.display());
            }
        }
    }

    /// Move `path` to the front of the recent list.
    pub fn remember_recording(&mut self, path: &Path) {
        self.recent_recordings.retain(|p| p != path);
        self.recent_recordings.insert(0, path.to_path_buf());
        self.recent_recordings.truncate(MAX_RECENT);
    }

    /// Controller settings described by this config. Invalid entries fall
    /// back to their defaults.
    pub fn controller_settings(&self) -> ControllerSettings {
        let defaults = ControllerSettings::default();

        let step = self.step.parse::<StepSize>().unwrap_or_else(|err| {
            log::warn!("{err}, using {}", defaults.step);
            defaults.step
        });

        let bounds_ok = self.min_window_secs.is_finite()
            && self.max_window_secs.is_finite()
            && self.min_window_secs > 0.0
            && self.min_window_secs <= self.max_window_secs;
        let window_bounds = if bounds_ok {
            WindowBounds::new(self.min_window_secs, self.max_window_secs)
        } else {
            log::warn!(
                "invalid window bounds [{}, {}], using defaults",
                self.min_window_secs,
                self.max_window_secs
            );
            defaults.window_bounds
        };

        let scale_factor = if self.scale_factor.is_finite() && self.scale_factor > 1.0 {
            self.scale_factor
        } else {
            defaults.scale_factor
        };

        ControllerSettings {
            window_bounds,
            step,
            scale_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_round_trip() {
        assert_eq!(Config::default().controller_settings(), ControllerSettings::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("step = \"10 ms\"").unwrap();
        let settings = config.controller_settings();

        assert_eq!(settings.step, StepSize::Ms10);
        assert_eq!(settings.window_bounds, WindowBounds::default());
    }

    #[test]
    fn test_invalid_entries_fall_back() {
        let config = Config {
            step: "3 weeks".to_string(),
            min_window_secs: 5.0,
            max_window_secs: 1.0,
            scale_factor: 0.5,
            recent_recordings: Vec::new(),
        };
        assert_eq!(config.controller_settings(), ControllerSettings::default());
    }

    #[test]
    fn test_remember_recording_dedups_and_caps() {
        let mut config = Config::default();
        for i in 0..12 {
            config.remember_recording(Path::new(&format!("rec{i}.json")));
        }
        config.remember_recording(Path::new("rec5.json"));

        assert_eq!(config.recent_recordings.len(), MAX_RECENT);
        assert_eq!(config.recent_recordings[0], PathBuf::from("rec5.json"));
        assert_eq!(
            config.recent_recordings.iter().filter(|p| p.ends_with("rec5.json")).count(),
            1
        );
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tnav").join("config.toml");
        let mut config = Config::default();
        config.step = "10 s".to_string();
        config.remember_recording(Path::new("/data/session.json"));

        config.save_to(&path);
        let loaded = Config::load_from(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        assert_eq!(Config::load_from(Path::new("/definitely/not/here.toml")), Config::default());
    }
}
