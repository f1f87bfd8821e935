//! First commit phase: language selection and parameter file

use crate::backend::Backend;
use crate::error::{OcrError, Result};
use crate::handle::EngineHandle;
use crate::settings::Settings;
use tracing::{debug, warn};

/// Initialize the engine session from `settings`
///
/// Runs from scratch on every call. A config file that disappeared since it
/// was set is skipped rather than reported.
pub fn initialize<B: Backend>(handle: &mut EngineHandle<B>, settings: &Settings) -> Result<()> {
    let backend = handle.backend_mut()?;

    let language = settings.language_tag();

    let config_file = match settings.config_file() {
        Some(path) if path.exists() => Some(path),
        Some(path) => {
            warn!("config file {:?} no longer exists, initializing without it", path);
            None
        }
        None => None,
    };

    debug!(
        "initializing engine: language={:?}, config={:?}, tessdata={:?}",
        language,
        config_file,
        settings.tessdata_prefix()
    );

    let code = backend.init(settings.tessdata_prefix(), language.as_deref(), config_file);
    if code != 0 {
        return Err(OcrError::Initialization { code });
    }

    Ok(())
}
