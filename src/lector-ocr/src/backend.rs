//! Raw engine capability
//!
//! A backend is one live native session. It knows nothing about pending
//! settings; the initializer and preparer translate [`crate::Settings`] into
//! these calls.

use std::path::Path;

/// Operations exposed by a native recognition engine session
///
/// Implementations mirror the engine's C API: status codes and booleans are
/// returned as-is and interpreted by the callers in this crate.
pub trait Backend {
    /// Acquire a new native session. Must not fail.
    fn create() -> Self
    where
        Self: Sized;

    /// Initialize the session, returning the engine's status code (0 is success)
    fn init(&mut self, datapath: Option<&Path>, language: Option<&str>, config_file: Option<&Path>) -> i32;

    fn set_image(&mut self, path: &Path);

    /// Bind one engine variable, returning whether the engine accepted it
    fn set_variable(&mut self, key: &str, value: &str) -> bool;

    fn set_page_seg_mode(&mut self, mode: i32);

    /// Run recognition and return plain UTF-8 text
    fn utf8_text(&mut self) -> String;

    /// Run recognition and return hOCR markup
    fn hocr_text(&mut self) -> String;

    fn version(&self) -> String;

    /// Free the native session. Called exactly once per `create`.
    fn release(&mut self);
}
