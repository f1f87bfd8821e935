use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A variable binding the engine refused to accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVariable {
    pub key: String,
    pub value: String,
}

impl fmt::Display for RejectedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key({}):value({})", self.key, self.value)
    }
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("invalid config file {path:?}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("failed to initialize engine with code {code}")]
    Initialization { code: i32 },

    #[error("failed to set variables: {}", join_rejected(.0))]
    VariableBind(Vec<RejectedVariable>),

    #[error("engine handle used after release")]
    UseAfterRelease,

    #[error("profile error: {0}")]
    Profile(String),
}

impl OcrError {
    /// Bindings rejected by the engine, empty for every other error kind
    pub fn rejected_variables(&self) -> &[RejectedVariable] {
        match self {
            OcrError::VariableBind(rejected) => rejected,
            _ => &[],
        }
    }
}

impl From<anyhow::Error> for OcrError {
    fn from(e: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain on one line
        OcrError::Profile(format!("{:#}", e))
    }
}

fn join_rejected(rejected: &[RejectedVariable]) -> String {
    rejected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, OcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_bind_message_lists_every_pair() {
        let err = OcrError::VariableBind(vec![
            RejectedVariable { key: "a".into(), value: "1".into() },
            RejectedVariable { key: "b".into(), value: "2".into() },
        ]);
        assert_eq!(
            err.to_string(),
            "failed to set variables: key(a):value(1), key(b):value(2)"
        );
        assert_eq!(err.rejected_variables().len(), 2);
    }

    #[test]
    fn test_rejected_variables_empty_for_other_errors() {
        assert!(OcrError::UseAfterRelease.rejected_variables().is_empty());
        assert_eq!(
            OcrError::Initialization { code: -1 }.to_string(),
            "failed to initialize engine with code -1"
        );
    }
}
