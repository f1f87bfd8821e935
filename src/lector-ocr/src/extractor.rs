//! Two-phase commit followed by recognition

use crate::backend::Backend;
use crate::error::Result;
use crate::handle::EngineHandle;
use crate::initializer::initialize;
use crate::preparer::prepare;
use crate::settings::Settings;
use tracing::debug;

/// Recognize plain text
///
/// Initializes and prepares the session from scratch, then queries text.
/// When trimming is enabled only leading and trailing `'\n'` are removed.
/// An image without text yields an empty string, not an error.
pub fn extract_text<B: Backend>(handle: &mut EngineHandle<B>, settings: &Settings) -> Result<String> {
    commit(handle, settings)?;

    let text = handle.backend_mut()?.utf8_text();
    debug!("recognized {} bytes of text", text.len());

    if settings.trim() {
        Ok(text.trim_matches('\n').to_string())
    } else {
        Ok(text)
    }
}

/// Recognize hOCR markup. Output is never trimmed.
pub fn extract_hocr<B: Backend>(handle: &mut EngineHandle<B>, settings: &Settings) -> Result<String> {
    commit(handle, settings)?;

    let hocr = handle.backend_mut()?.hocr_text();
    debug!("recognized {} bytes of hOCR", hocr.len());
    Ok(hocr)
}

fn commit<B: Backend>(handle: &mut EngineHandle<B>, settings: &Settings) -> Result<()> {
    initialize(handle, settings)?;
    prepare(handle, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::testing::{Call, RecordingBackend};

    #[test]
    fn test_trims_only_newlines() {
        let mut handle = EngineHandle::from_backend(RecordingBackend::new().with_text("\nHello World\n"));
        assert_eq!(extract_text(&mut handle, &Settings::new()).unwrap(), "Hello World");

        let mut handle = EngineHandle::from_backend(RecordingBackend::new().with_text(" Hello World "));
        assert_eq!(extract_text(&mut handle, &Settings::new()).unwrap(), " Hello World ");
    }

    #[test]
    fn test_untrimmed_text_is_returned_verbatim() {
        let mut handle = EngineHandle::from_backend(RecordingBackend::new().with_text("\nHello\n\n"));
        let mut settings = Settings::new();
        settings.set_trim(false);

        assert_eq!(extract_text(&mut handle, &settings).unwrap(), "\nHello\n\n");
    }

    #[test]
    fn test_hocr_is_never_trimmed() {
        let markup = "\n<div class='ocr_page'></div>\n";
        let mut handle = EngineHandle::from_backend(RecordingBackend::new().with_hocr(markup));

        assert_eq!(extract_hocr(&mut handle, &Settings::new()).unwrap(), markup);
    }

    #[test]
    fn test_init_failure_skips_prepare_and_recognition() {
        let backend = RecordingBackend::new().with_init_code(-1);
        let log = backend.log();
        let mut handle = EngineHandle::from_backend(backend);

        let err = extract_text(&mut handle, &Settings::new()).unwrap_err();

        assert!(matches!(err, OcrError::Initialization { code: -1 }));
        assert_eq!(log.calls().len(), 1);
    }

    #[test]
    fn test_bind_failure_skips_recognition() {
        let backend = RecordingBackend::new().rejecting("bogus");
        let log = backend.log();
        let mut handle = EngineHandle::from_backend(backend);
        let mut settings = Settings::new();
        settings.set_variable("bogus", "1");

        let err = extract_hocr(&mut handle, &settings).unwrap_err();

        assert!(matches!(err, OcrError::VariableBind(_)));
        assert_eq!(log.count(|c| *c == Call::HocrText), 0);
    }

    #[test]
    fn test_every_extraction_recommits() {
        let backend = RecordingBackend::new().with_text("same");
        let log = backend.log();
        let mut handle = EngineHandle::from_backend(backend);
        let mut settings = Settings::new();
        settings.set_image("a.png").set_variable("k", "v");

        let first = extract_text(&mut handle, &settings).unwrap();
        let second = extract_text(&mut handle, &settings).unwrap();

        assert_eq!(first, second);
        assert_eq!(log.inits().len(), 2);
        assert_eq!(log.count(|c| matches!(c, Call::SetImage(_))), 2);
        assert_eq!(log.count(|c| matches!(c, Call::SetVariable(..))), 2);
        assert_eq!(log.count(|c| *c == Call::Utf8Text), 2);
    }
}
