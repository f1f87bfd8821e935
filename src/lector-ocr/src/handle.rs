use crate::backend::Backend;
use crate::error::{OcrError, Result};
use tracing::debug;

/// Exclusive owner of one native engine session
///
/// The session is `Open` until [`EngineHandle::release`] is called, after
/// which every operation fails with [`OcrError::UseAfterRelease`]. A handle
/// dropped while still open releases its session once.
pub struct EngineHandle<B: Backend> {
    state: HandleState<B>,
}

enum HandleState<B> {
    Open(B),
    Closed,
}

impl<B: Backend> EngineHandle<B> {
    /// Acquire a fresh native session
    pub fn create() -> Self {
        Self::from_backend(B::create())
    }

    /// Take ownership of an already-created session
    pub fn from_backend(backend: B) -> Self {
        debug!("engine handle opened");
        Self {
            state: HandleState::Open(backend),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, HandleState::Open(_))
    }

    /// Borrow the live session for a native call
    pub fn backend_mut(&mut self) -> Result<&mut B> {
        match &mut self.state {
            HandleState::Open(backend) => Ok(backend),
            HandleState::Closed => Err(OcrError::UseAfterRelease),
        }
    }

    pub fn backend(&self) -> Result<&B> {
        match &self.state {
            HandleState::Open(backend) => Ok(backend),
            HandleState::Closed => Err(OcrError::UseAfterRelease),
        }
    }

    /// Free the native session
    ///
    /// A second call reports `UseAfterRelease` instead of freeing twice.
    pub fn release(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, HandleState::Closed) {
            HandleState::Open(mut backend) => {
                backend.release();
                debug!("engine handle released");
                Ok(())
            }
            HandleState::Closed => Err(OcrError::UseAfterRelease),
        }
    }
}

impl<B: Backend> Drop for EngineHandle<B> {
    fn drop(&mut self) {
        if self.is_open() {
            debug!("engine handle dropped while open, releasing");
            let _ = self.release();
        }
    }
}
