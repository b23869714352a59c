//! Persisted user settings (lives in the OS config directory).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_POLL_MS: u64 = 10;
const MAX_POLL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// How often running timers are re-evaluated.
    pub poll_interval_ms: u64,
    /// Overrides the project file location.
    pub data_file: Option<PathBuf>,
    /// Ask before deleting a project.
    pub confirm_delete: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            data_file: None,
            confirm_delete: true,
        }
    }
}

impl AppSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.clamp(MIN_POLL_MS, MAX_POLL_MS))
    }

    pub fn settings_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ProgressTracker")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, writing defaults on first run.
    pub fn load_or_init() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("no config directory available, using default settings");
            return Self::default();
        };
        if !path.exists() {
            let settings = Self::default();
            settings.save(&path);
            return settings;
        }
        Self::load(&path)
    }

    /// Read settings, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read settings, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "could not encode settings");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create settings directory");
                return;
            }
        }
        if let Err(e) = std::fs::write(path, json) {
            tracing::warn!(path = %path.display(), error = %e, "could not write settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"poll_interval_ms": 250}"#).unwrap();

        let settings = AppSettings::load(&path);
        assert_eq!(settings.poll_interval_ms, 250);
        assert!(settings.confirm_delete);
        assert_eq!(settings.data_file, None);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            poll_interval_ms: 500,
            data_file: Some(PathBuf::from("/tmp/p.json")),
            confirm_delete: false,
        };
        settings.save(&path);
        assert_eq!(AppSettings::load(&path), settings);
    }

    #[test]
    fn save_under_a_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("settings.json");

        AppSettings::default().save(&path);
        assert!(!path.exists());
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "");
    }

    #[test]
    fn poll_interval_is_clamped() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.poll_interval(), Duration::from_millis(100));
        settings.poll_interval_ms = 0;
        assert_eq!(settings.poll_interval(), Duration::from_millis(MIN_POLL_MS));
        settings.poll_interval_ms = 60_000;
        assert_eq!(settings.poll_interval(), Duration::from_millis(MAX_POLL_MS));
    }
}
