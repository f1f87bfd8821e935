//! Recognition profiles loaded from TOML
//!
//! A profile file holds base settings plus named profiles that override them:
//!
//! ```toml
//! languages = ["eng"]
//! trim = true
//!
//! [variables]
//! load_system_dawg = "F"
//!
//! [profiles.digits]
//! whitelist = "0123456789"
//! page_seg_mode = "single_line"
//! ```

use crate::layout::PageSegMode;
use crate::settings::Settings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base recognition settings with optional named profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Shorthand for the `tessedit_char_whitelist` variable
    pub whitelist: Option<String>,

    pub page_seg_mode: Option<PageSegMode>,

    /// Engine parameter file
    pub config_file: Option<PathBuf>,

    pub tessdata_prefix: Option<PathBuf>,

    /// Strip surrounding newlines from text output (defaults to true)
    pub trim: Option<bool>,

    /// Named profiles that can override base config
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverride>,
}

/// Overrides applied by a named profile
///
/// Present fields replace the base value, except `variables`, which are
/// merged key by key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverride {
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    pub whitelist: Option<String>,
    pub page_seg_mode: Option<PageSegMode>,
    pub config_file: Option<PathBuf>,
    pub tessdata_prefix: Option<PathBuf>,
    pub trim: Option<bool>,
}

impl ProfileConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile file {:?}", path))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse profile TOML")
    }

    /// Apply a named profile, merging settings
    pub fn apply_profile(mut self, profile_name: &str) -> Result<Self> {
        let profile = self
            .profiles
            .get(profile_name)
            .with_context(|| format!("profile '{}' not found", profile_name))?
            .clone();

        debug!("applying profile '{}'", profile_name);

        if let Some(languages) = profile.languages {
            self.languages = languages;
        }
        self.variables.extend(profile.variables);
        if profile.whitelist.is_some() {
            self.whitelist = profile.whitelist;
        }
        if profile.page_seg_mode.is_some() {
            self.page_seg_mode = profile.page_seg_mode;
        }
        if profile.config_file.is_some() {
            self.config_file = profile.config_file;
        }
        if profile.tessdata_prefix.is_some() {
            self.tessdata_prefix = profile.tessdata_prefix;
        }
        if profile.trim.is_some() {
            self.trim = profile.trim;
        }

        Ok(self)
    }

    /// Write these values into `settings`
    ///
    /// Fields absent from the config leave `settings` untouched. The config
    /// file goes through the same validation as
    /// [`Settings::set_config_file`]; on any error `settings` is unchanged.
    pub fn apply_to(&self, settings: &mut Settings) -> crate::Result<()> {
        let mut staged = settings.clone();

        if !self.languages.is_empty() {
            staged.set_language(self.languages.iter().cloned());
        }
        for (key, value) in &self.variables {
            staged.set_variable(key.clone(), value.clone());
        }
        if let Some(whitelist) = &self.whitelist {
            staged.set_whitelist(whitelist.clone());
        }
        if let Some(mode) = self.page_seg_mode {
            staged.set_page_seg_mode(mode);
        }
        if let Some(path) = &self.config_file {
            staged.set_config_file(path)?;
        }
        if let Some(path) = &self.tessdata_prefix {
            staged.set_tessdata_prefix(path);
        }
        if let Some(trim) = self.trim {
            staged.set_trim(trim);
        }

        *settings = staged;
        Ok(())
    }
}
