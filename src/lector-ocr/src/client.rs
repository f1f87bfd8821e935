use crate::backend::Backend;
use crate::error::{OcrError, Result};
use crate::extractor;
use crate::handle::EngineHandle;
use crate::layout::PageSegMode;
use crate::profile::ProfileConfig;
use crate::settings::Settings;
use std::path::Path;
use tracing::info;

/// Settings builder paired with one engine session
///
/// Every setter and extraction fails with [`OcrError::UseAfterRelease`]
/// once [`Client::release`] has been called.
///
/// ```ignore
/// let mut client = Client::<TesseractBackend>::new();
/// client.set_image("receipt.png")?.set_language(["eng", "fra"])?;
/// let text = client.extract_text()?;
/// client.release()?;
/// ```
pub struct Client<B: Backend> {
    handle: EngineHandle<B>,
    settings: Settings,
}

impl<B: Backend> Client<B> {
    /// Create a client with a fresh engine session and default settings
    pub fn new() -> Self {
        Self::from_backend(B::create())
    }

    pub fn from_backend(backend: B) -> Self {
        Self {
            handle: EngineHandle::from_backend(backend),
            settings: Settings::default(),
        }
    }

    /// Free the engine session. Must be called once; later calls fail.
    pub fn release(&mut self) -> Result<()> {
        self.handle.release()?;
        info!("OCR client released");
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        !self.handle.is_open()
    }

    /// Pending settings, read-only
    pub fn settings(&self) -> Result<&Settings> {
        self.ensure_open()?;
        Ok(&self.settings)
    }

    /// Pending settings, for bulk edits
    pub fn settings_mut(&mut self) -> Result<&mut Settings> {
        self.ensure_open()?;
        Ok(&mut self.settings)
    }

    pub fn set_image(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.settings_mut()?.set_image(path);
        Ok(self)
    }

    pub fn set_language<I, S>(&mut self, languages: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings_mut()?.set_language(languages);
        Ok(self)
    }

    pub fn set_whitelist(&mut self, whitelist: impl Into<String>) -> Result<&mut Self> {
        self.settings_mut()?.set_whitelist(whitelist);
        Ok(self)
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        self.settings_mut()?.set_variable(key, value);
        Ok(self)
    }

    pub fn set_page_seg_mode(&mut self, mode: PageSegMode) -> Result<&mut Self> {
        self.settings_mut()?.set_page_seg_mode(mode);
        Ok(self)
    }

    pub fn set_config_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.settings_mut()?.set_config_file(path)?;
        Ok(self)
    }

    pub fn set_tessdata_prefix(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.settings_mut()?.set_tessdata_prefix(path);
        Ok(self)
    }

    pub fn set_trim(&mut self, trim: bool) -> Result<&mut Self> {
        self.settings_mut()?.set_trim(trim);
        Ok(self)
    }

    /// Apply a loaded profile on top of the current settings
    pub fn apply_profile_config(&mut self, config: &ProfileConfig) -> Result<&mut Self> {
        config.apply_to(self.settings_mut()?)?;
        Ok(self)
    }

    /// Load a TOML profile file and apply it, optionally selecting a named profile
    pub fn load_profile(&mut self, path: impl AsRef<Path>, profile: Option<&str>) -> Result<&mut Self> {
        self.ensure_open()?;
        let mut config = ProfileConfig::from_file(path)?;
        if let Some(name) = profile {
            config = config.apply_profile(name)?;
        }
        self.apply_profile_config(&config)
    }

    /// Initialize, prepare and recognize plain text
    pub fn extract_text(&mut self) -> Result<String> {
        extractor::extract_text(&mut self.handle, &self.settings)
    }

    /// Initialize, prepare and recognize hOCR markup
    pub fn extract_hocr(&mut self) -> Result<String> {
        extractor::extract_hocr(&mut self.handle, &self.settings)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.handle.is_open() {
            Ok(())
        } else {
            Err(OcrError::UseAfterRelease)
        }
    }
}

impl<B: Backend> Default for Client<B> {
    fn default() -> Self {
        Self::new()
    }
}
