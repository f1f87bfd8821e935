//! Second commit phase: image, variables and layout mode

use crate::backend::Backend;
use crate::error::{OcrError, RejectedVariable, Result};
use crate::handle::EngineHandle;
use crate::settings::Settings;
use tracing::{debug, warn};

/// Apply image, variables and layout mode to an initialized session
///
/// Every variable is attempted; all rejected bindings are reported together.
pub fn prepare<B: Backend>(handle: &mut EngineHandle<B>, settings: &Settings) -> Result<()> {
    let backend = handle.backend_mut()?;

    backend.set_image(settings.image_path());

    let mut rejected = Vec::new();
    for (key, value) in settings.variables() {
        if !backend.set_variable(key, value) {
            warn!("engine rejected variable {}={}", key, value);
            rejected.push(RejectedVariable {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    if !rejected.is_empty() {
        return Err(OcrError::VariableBind(rejected));
    }

    if let Some(mode) = settings.page_seg_mode() {
        backend.set_page_seg_mode(mode.as_raw());
    }

    debug!(
        "engine prepared: image={:?}, {} variables",
        settings.image_path(),
        settings.variables().len()
    );
    Ok(())
}
