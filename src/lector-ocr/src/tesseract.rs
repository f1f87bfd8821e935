//! Native Tesseract backend over the C API

use crate::backend::Backend;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr;
use tesseract_sys::{
    TessBaseAPI, TessBaseAPIClear, TessBaseAPICreate, TessBaseAPIDelete, TessBaseAPIEnd, TessBaseAPIGetHOCRText,
    TessBaseAPIGetUTF8Text, TessBaseAPIInit1, TessBaseAPISetImage2, TessBaseAPISetPageSegMode,
    TessBaseAPISetVariable, TessDeleteText, TessOcrEngineMode_OEM_DEFAULT, TessPageSegMode,
    TessVersion,
};
use tracing::{debug, warn};

/// Status returned when an argument cannot be handed to the C API
const INVALID_ARGUMENT: i32 = -1;

/// One `TessBaseAPI` instance
///
/// Holds a raw pointer, so it is neither `Send` nor `Sync`.
pub struct TesseractBackend {
    api: *mut TessBaseAPI,
}

impl TesseractBackend {
    /// Copy an engine-owned string and free it
    fn take_text(text: *mut c_char) -> String {
        if text.is_null() {
            return String::new();
        }
        // SAFETY: non-null strings from GetUTF8Text/GetHOCRText are
        // NUL-terminated and owned by us until TessDeleteText.
        unsafe {
            let out = CStr::from_ptr(text).to_string_lossy().into_owned();
            TessDeleteText(text);
            out
        }
    }
}

fn path_to_cstring(path: &Path) -> Option<CString> {
    CString::new(path.to_string_lossy().into_owned()).ok()
}

impl Backend for TesseractBackend {
    fn create() -> Self {
        // SAFETY: plain allocation, freed in `release`
        let api = unsafe { TessBaseAPICreate() };
        Self { api }
    }

    fn init(&mut self, datapath: Option<&Path>, language: Option<&str>, config_file: Option<&Path>) -> i32 {
        let datapath = match datapath.map(path_to_cstring) {
            Some(None) => {
                warn!("tessdata prefix contains a NUL byte");
                return INVALID_ARGUMENT;
            }
            other => other.flatten(),
        };
        let language = match language.map(CString::new) {
            Some(Err(_)) => {
                warn!("language tag contains a NUL byte");
                return INVALID_ARGUMENT;
            }
            other => other.and_then(Result::ok),
        };
        let config = match config_file.map(path_to_cstring) {
            Some(None) => {
                warn!("config file path contains a NUL byte");
                return INVALID_ARGUMENT;
            }
            other => other.flatten(),
        };

        let mut configs: Vec<*mut c_char> = config
            .iter()
            .map(|c| c.as_ptr() as *mut c_char)
            .collect();
        let configs_ptr = if configs.is_empty() {
            ptr::null_mut()
        } else {
            configs.as_mut_ptr()
        };

        // SAFETY: every pointer is either null or borrowed from a CString
        // that outlives the call; the engine copies what it keeps.
        unsafe {
            TessBaseAPIInit1(
                self.api,
                datapath.as_ref().map_or(ptr::null(), |d| d.as_ptr()),
                language.as_ref().map_or(ptr::null(), |l| l.as_ptr()),
                TessOcrEngineMode_OEM_DEFAULT,
                configs_ptr,
                configs.len() as c_int,
            )
        }
    }

    fn set_image(&mut self, path: &Path) {
        // Drop the previous image first so a failed load recognizes nothing
        // instead of the last page.
        // SAFETY: api is live until release
        unsafe { TessBaseAPIClear(self.api) };

        let Some(path_c) = path_to_cstring(path) else {
            warn!("image path {:?} contains a NUL byte, not set", path);
            return;
        };

        // SAFETY: pixRead returns an owned Pix or null. SetImage2 takes its
        // own reference, so ours is destroyed right after.
        unsafe {
            let mut pix = leptonica_sys::pixRead(path_c.as_ptr());
            if pix.is_null() {
                warn!("failed to read image {:?}", path);
                return;
            }
            TessBaseAPISetImage2(self.api, pix);
            leptonica_sys::pixDestroy(&mut pix);
        }
        debug!("image set from {:?}", path);
    }

    fn set_variable(&mut self, key: &str, value: &str) -> bool {
        let (Ok(key), Ok(value)) = (CString::new(key), CString::new(value)) else {
            return false;
        };
        // SAFETY: both strings outlive the call
        unsafe { TessBaseAPISetVariable(self.api, key.as_ptr(), value.as_ptr()) != 0 }
    }

    fn set_page_seg_mode(&mut self, mode: i32) {
        // SAFETY: the engine accepts any value; range is its concern
        unsafe { TessBaseAPISetPageSegMode(self.api, mode as TessPageSegMode) }
    }

    fn utf8_text(&mut self) -> String {
        // SAFETY: api is live until release
        Self::take_text(unsafe { TessBaseAPIGetUTF8Text(self.api) })
    }

    fn hocr_text(&mut self) -> String {
        // SAFETY: api is live until release
        Self::take_text(unsafe { TessBaseAPIGetHOCRText(self.api, 0) })
    }

    fn version(&self) -> String {
        // SAFETY: static string owned by the library
        unsafe {
            let version = TessVersion();
            if version.is_null() {
                return String::new();
            }
            CStr::from_ptr(version).to_string_lossy().into_owned()
        }
    }

    fn release(&mut self) {
        if self.api.is_null() {
            return;
        }
        // SAFETY: api came from TessBaseAPICreate and is nulled afterwards
        unsafe {
            TessBaseAPIEnd(self.api);
            TessBaseAPIDelete(self.api);
        }
        self.api = ptr::null_mut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_reported() {
        let version = crate::version::<TesseractBackend>();
        assert!(!version.is_empty());
    }

    #[test]
    fn test_unreadable_image_recognizes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.pgm");
        // 8x8 white greyscale PGM
        let mut pgm = b"P5\n8 8\n255\n".to_vec();
        pgm.extend(std::iter::repeat(255u8).take(64));
        std::fs::write(&page, pgm).unwrap();

        let mut backend = TesseractBackend::create();
        assert_eq!(backend.init(None, None, None), 0);

        backend.set_image(&page);
        backend.utf8_text();

        backend.set_image(&dir.path().join("missing.png"));
        assert_eq!(backend.utf8_text().trim(), "");

        backend.set_image(Path::new("bad\0path.png"));
        assert_eq!(backend.utf8_text().trim(), "");

        backend.release();
    }

    #[test]
    fn test_release_nulls_pointer() {
        let mut backend = TesseractBackend::create();
        backend.release();
        assert!(backend.api.is_null());
        // second release is a no-op at this level
        backend.release();
    }
}
