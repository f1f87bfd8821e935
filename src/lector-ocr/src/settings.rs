//! Pending recognition settings
//!
//! Settings accumulate independently of the engine and are only read when
//! an extraction commits them.

use crate::error::{OcrError, Result};
use crate::layout::PageSegMode;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Engine variable restricting recognized characters
pub const WHITELIST_VARIABLE: &str = "tessedit_char_whitelist";

/// Settings applied to the engine on every extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    image_path: PathBuf,
    languages: Vec<String>,
    variables: BTreeMap<String, String>,
    page_seg_mode: Option<PageSegMode>,
    config_file: Option<PathBuf>,
    tessdata_prefix: Option<PathBuf>,
    trim: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_path: PathBuf::new(),
            languages: Vec::new(),
            variables: BTreeMap::new(),
            page_seg_mode: None,
            config_file: None,
            tessdata_prefix: None,
            trim: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image to recognize. The path is not checked here.
    pub fn set_image(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.image_path = path.as_ref().to_path_buf();
        self
    }

    /// Replace the language list. An empty list leaves the engine default ("eng").
    pub fn set_language<I, S>(&mut self, languages: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_whitelist(&mut self, whitelist: impl Into<String>) -> &mut Self {
        self.set_variable(WHITELIST_VARIABLE, whitelist)
    }

    /// Bind an engine variable; a later call for the same key wins
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn set_page_seg_mode(&mut self, mode: PageSegMode) -> &mut Self {
        self.page_seg_mode = Some(mode);
        self
    }

    /// Use an engine parameter file
    ///
    /// Fails if the path does not exist or is a directory, leaving any
    /// previously stored path in place.
    pub fn set_config_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| OcrError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if metadata.is_dir() {
            return Err(OcrError::ConfigFile {
                path: path.to_path_buf(),
                reason: "the specified config file path seems to be a directory".to_string(),
            });
        }

        debug!("config file set to {:?}", path);
        self.config_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// Directory the engine loads its trained data from
    pub fn set_tessdata_prefix(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.tessdata_prefix = Some(path.as_ref().to_path_buf());
        self
    }

    /// Strip leading and trailing newlines from plain-text output
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Languages in the engine's `a+b` form, or `None` for the engine default
    pub fn language_tag(&self) -> Option<String> {
        if self.languages.is_empty() {
            None
        } else {
            Some(self.languages.join("+"))
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn page_seg_mode(&self) -> Option<PageSegMode> {
        self.page_seg_mode
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn tessdata_prefix(&self) -> Option<&Path> {
        self.tessdata_prefix.as_deref()
    }

    pub fn trim(&self) -> bool {
        self.trim
    }
}
