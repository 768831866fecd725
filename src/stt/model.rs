//! Process-lifetime speech-recognition model handle.
//!
//! The acoustic model is expensive to load and strictly read-only once
//! loaded, so it is resolved exactly once at startup and shared behind an
//! `Arc`. Every recognition request opens its own session against the
//! shared handle (see [`crate::stt::VoskTranscriber`]), which keeps
//! concurrent invocations independent.
//!
//! A missing or unloadable model is **not** fatal: the handle comes up in
//! disabled mode and every transcription deterministically returns an empty
//! transcript, while acoustic-only metrics keep working. Only the operator
//! sees the difference, via the startup warning.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vosk::Model;

// ---------------------------------------------------------------------------
// SpeechModel
// ---------------------------------------------------------------------------

/// Shared, read-only handle to the recognition model.
pub struct SpeechModel {
    inner: Option<Model>,
    source: PathBuf,
}

// The underlying Vosk model holds an FFI pointer but is read-only after
// loading; sessions created from it carry their own mutable state.
// SAFETY: the Vosk API documents the model as safe for concurrent readers.
unsafe impl Send for SpeechModel {}
unsafe impl Sync for SpeechModel {}

impl std::fmt::Debug for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechModel")
            .field("source", &self.source)
            .field("available", &self.is_available())
            .finish()
    }
}

impl SpeechModel {
    /// Load the model from an unpacked model directory.
    ///
    /// Never fails the process: when the directory is missing or the model
    /// cannot be initialised, a warning is logged and the returned handle is
    /// in disabled mode ([`is_available`](Self::is_available) == `false`).
    pub fn load(model_dir: impl AsRef<Path>) -> Arc<Self> {
        let path = model_dir.as_ref();

        if !path.exists() {
            log::warn!(
                "recognition model not found at {}; transcription disabled",
                path.display()
            );
            return Arc::new(Self {
                inner: None,
                source: path.to_path_buf(),
            });
        }

        match Model::new(path.to_string_lossy().into_owned()) {
            Some(model) => {
                log::info!("recognition model loaded from {}", path.display());
                Arc::new(Self {
                    inner: Some(model),
                    source: path.to_path_buf(),
                })
            }
            None => {
                log::warn!(
                    "recognition model at {} could not be initialised; transcription disabled",
                    path.display()
                );
                Arc::new(Self {
                    inner: None,
                    source: path.to_path_buf(),
                })
            }
        }
    }

    /// A handle that is explicitly in disabled mode (no model).
    ///
    /// Useful for tests and for deployments that only need acoustic
    /// metrics.
    pub fn disabled() -> Arc<Self> {
        Arc::new(Self {
            inner: None,
            source: PathBuf::new(),
        })
    }

    /// `true` when a model was successfully loaded.
    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Where the model was (or would have been) loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Borrow the underlying Vosk model, if loaded.
    pub(crate) fn vosk(&self) -> Option<&Model> {
        self.inner.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
