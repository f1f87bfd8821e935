//! Recording backend for unit tests

use crate::backend::Backend;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub(crate) const RECORDING_VERSION: &str = "5.3.0-recording";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Init {
        datapath: Option<PathBuf>,
        language: Option<String>,
        config_file: Option<PathBuf>,
    },
    SetImage(PathBuf),
    SetVariable(String, String),
    SetPageSegMode(i32),
    Utf8Text,
    HocrText,
    Release,
}

/// Shared view of the calls a backend received
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn inits(&self) -> Vec<Call> {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Init { .. }))
            .cloned()
            .collect()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Backend that records every call and answers from a script
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    log: CallLog,
    init_code: i32,
    rejected_keys: HashSet<String>,
    text: String,
    hocr: String,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn with_init_code(mut self, code: i32) -> Self {
        self.init_code = code;
        self
    }

    pub fn rejecting(mut self, key: &str) -> Self {
        self.rejected_keys.insert(key.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_hocr(mut self, hocr: &str) -> Self {
        self.hocr = hocr.to_string();
        self
    }
}

impl Backend for RecordingBackend {
    fn create() -> Self {
        Self::new()
    }

    fn init(&mut self, datapath: Option<&Path>, language: Option<&str>, config_file: Option<&Path>) -> i32 {
        self.log.push(Call::Init {
            datapath: datapath.map(Path::to_path_buf),
            language: language.map(str::to_string),
            config_file: config_file.map(Path::to_path_buf),
        });
        self.init_code
    }

    fn set_image(&mut self, path: &Path) {
        self.log.push(Call::SetImage(path.to_path_buf()));
    }

    fn set_variable(&mut self, key: &str, value: &str) -> bool {
        self.log.push(Call::SetVariable(key.to_string(), value.to_string()));
        !self.rejected_keys.contains(key)
    }

    fn set_page_seg_mode(&mut self, mode: i32) {
        self.log.push(Call::SetPageSegMode(mode));
    }

    fn utf8_text(&mut self) -> String {
        self.log.push(Call::Utf8Text);
        self.text.clone()
    }

    fn hocr_text(&mut self) -> String {
        self.log.push(Call::HocrText);
        self.hocr.clone()
    }

    fn version(&self) -> String {
        RECORDING_VERSION.to_string()
    }

    fn release(&mut self) {
        self.log.push(Call::Release);
    }
}

/// Route `tracing` output through the test harness
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
