//! Tesseract OCR client for Lector
//!
//! This crate drives a stateful OCR engine session through a strict protocol:
//! settings are collected with a builder, then every extraction initializes
//! the engine (languages, parameter file), prepares it (image, variables,
//! layout mode) and only then asks for text or hOCR markup.
//!
//! The native engine sits behind the [`Backend`] trait. Enable the
//! `tesseract` feature for [`TesseractBackend`], which links libtesseract.

mod backend;
mod client;
mod error;
mod extractor;
mod handle;
mod initializer;
mod layout;
mod preparer;
mod profile;
mod settings;

#[cfg(feature = "tesseract")]
mod tesseract;

#[cfg(test)]
mod testing;

pub use backend::Backend;
pub use client::Client;
pub use error::{OcrError, RejectedVariable, Result};
pub use extractor::{extract_hocr, extract_text};
pub use handle::EngineHandle;
pub use initializer::initialize;
pub use layout::PageSegMode;
pub use preparer::prepare;
pub use profile::{ProfileConfig, ProfileOverride};
pub use settings::{Settings, WHITELIST_VARIABLE};

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractBackend;

/// Engine version string
///
/// Uses a private session that is released when it goes out of scope, so
/// no client is needed.
pub fn version<B: Backend>() -> String {
    let handle = EngineHandle::<B>::create();
    let version = handle.backend().map(|b| b.version()).unwrap_or_default();
    version
}

/// Create a client backed by the native Tesseract engine
#[cfg(feature = "tesseract")]
pub fn create_client() -> Client<TesseractBackend> {
    Client::new()
}
