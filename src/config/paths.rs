//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\speech-analyzer\
//!   macOS:   ~/Library/Application Support/speech-analyzer/
//!   Linux:   ~/.config/speech-analyzer/
//!
//! Data dir (recognition models):
//!   Windows: %LOCALAPPDATA%\speech-analyzer\
//!   macOS:   ~/Library/Application Support/speech-analyzer/
//!   Linux:   ~/.local/share/speech-analyzer/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory that holds unpacked recognition model directories.
    pub models_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "speech-analyzer";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let models_dir = data_dir.join("models");

        Self {
            config_dir,
            settings_file,
            models_dir,
        }
    }

    /// Full path to the directory of the named recognition model.
    pub fn model_dir(&self, model_name: &str) -> PathBuf {
        self.models_dir.join(model_name)
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
