//! User preferences: genre filter, letter case and theme

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::genres::GenreFilter;

pub const PREFERENCES_FILE: &str = ".cache/preferences.json";

/// How screen text is cased
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    #[default]
    Lowercase,
    /// Text as authored
    #[serde(alias = "none")]
    Default,
}

impl LetterCase {
    pub fn toggled(self) -> Self {
        match self {
            LetterCase::Lowercase => LetterCase::Default,
            LetterCase::Default => LetterCase::Lowercase,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LetterCase::Lowercase => "lowercase",
            LetterCase::Default => "default",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub genres: GenreFilter,
    pub letter_case: LetterCase,
    pub theme: ThemeMode,
}

/// Where preferences live on disk
#[derive(Clone, Debug)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read stored preferences. A missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new(PREFERENCES_FILE)
    }
}
