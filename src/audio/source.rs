//! Input audio sources.
//!
//! [`AudioSource`] is the single entry point of the pipeline: either a path
//! on disk or an in-memory byte buffer, in an arbitrary container format
//! (WAV, MP3, WebM, …). The variant is resolved exactly once, at the
//! normalizer boundary; downstream stages only ever see the canonical
//! waveform produced from it.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// AudioSource
// ---------------------------------------------------------------------------

/// A recording handed to the analyzer, before any decoding.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// A file on disk.
    Path(PathBuf),
    /// Raw container bytes already in memory (e.g. an uploaded body).
    Bytes(Vec<u8>),
}

impl AudioSource {
    /// Short label used in log messages.
    pub fn describe(&self) -> String {
        match self {
            AudioSource::Path(p) => p.display().to_string(),
            AudioSource::Bytes(b) => format!("<{} bytes in memory>", b.len()),
        }
    }
}

impl From<PathBuf> for AudioSource {
    fn from(path: PathBuf) -> Self {
        AudioSource::Path(path)
    }
}

impl From<&std::path::Path> for AudioSource {
    fn from(path: &std::path::Path) -> Self {
        AudioSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for AudioSource {
    fn from(bytes: Vec<u8>) -> Self {
        AudioSource::Bytes(bytes)
    }
}
