//! Persistent player settings
//!
//! A small JSON file holding the best score, whether the game has been run
//! before, and the chosen theme name. The gameplay core never reads this; the
//! binary seeds the session's best score from it and writes the new best back
//! when a session finishes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_THEME: &str = "Lights_City";

const SETTINGS_DIR: &str = ".block-stack";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub best_score: u32,
    pub first_run: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            best_score: 0,
            first_run: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Settings {
    /// Raise the stored best score; never lowers it.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$HOME/.block-stack/settings.json`, or the working directory
    /// when `HOME` is unset.
    pub fn at_default_path() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings from disk.
    ///
    /// A missing file is created with defaults. An unreadable or malformed
    /// file is logged and replaced by defaults in memory; the file itself is
    /// left alone.
    pub fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    debug!(path = %self.path.display(), "settings loaded");
                    settings
                }
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "malformed settings, using defaults");
                    Settings::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let settings = Settings::default();
                if let Err(err) = self.save(&settings) {
                    warn!(path = %self.path.display(), err = %format!("{err:#}"), "could not create settings file");
                }
                settings
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable settings, using defaults");
                Settings::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create settings dir {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write settings {}", self.path.display()))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

impl SettingsStore {
    /// Raise `settings.best_score` to `score` and write the file if it changed.
    pub fn record_best(&self, settings: &mut Settings, score: u32) -> Result<bool> {
        if !settings.record_score(score) {
            return Ok(false);
        }
        self.save(settings)?;
        Ok(true)
    }
}

pub fn default_path() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(SETTINGS_DIR).join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "block-stack-settings-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = scratch("missing");
        let store = SettingsStore::new(dir.join("nested").join("settings.json"));

        let settings = store.load();
        assert_eq!(settings, Settings::default());
        assert!(store.path().exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_then_load() {
        let dir = scratch("save");
        let store = SettingsStore::new(dir.join("settings.json"));
        let settings = Settings {
            best_score: 1234,
            first_run: false,
            theme: "Cyber_Punk".to_string(),
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = scratch("malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(&path);
        assert_eq!(store.load(), Settings::default());
        // The broken file is not overwritten.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"best_score": 77}"#).unwrap();
        assert_eq!(settings.best_score, 77);
        assert!(settings.first_run);
        assert_eq!(settings.theme, DEFAULT_THEME);
    }

    #[test]
    fn record_best_writes_only_new_highs() {
        let dir = scratch("record");
        let store = SettingsStore::new(dir.join("settings.json"));
        let mut settings = Settings::default();

        assert!(store.record_best(&mut settings, 420).unwrap());
        assert_eq!(store.load().best_score, 420);

        assert!(!store.record_best(&mut settings, 100).unwrap());
        assert_eq!(store.load().best_score, 420);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn record_score_only_raises() {
        let mut settings = Settings::default();
        assert!(settings.record_score(50));
        assert!(!settings.record_score(20));
        assert_eq!(settings.best_score, 50);
    }
}
