//! Analyzer settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// RecognizerConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Name of the unpacked model directory under the models dir
    /// (e.g. `"vosk-model-small-en-us-0.15"`).
    pub model: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model: "vosk-model-small-en-us-0.15".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscoderConfig
// ---------------------------------------------------------------------------

/// Settings for the external codec-transcoding backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Path to (or bare name of) the ffmpeg binary.
    ///
    /// A bare name is resolved through `PATH` by the OS; the binary is
    /// probed once at startup and decoding of compressed containers is
    /// disabled when the probe fails.
    pub ffmpeg_path: String,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Settings for acoustic analysis and metric derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A frame counts as speech when its RMS energy is within this many dB
    /// of the loudest frame. Frames further below the peak are silence.
    pub silence_threshold_db: f64,
    /// Phrases counted as disfluency markers in the transcript.
    pub filler_phrases: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            silence_threshold_db: 20.0,
            filler_phrases: vec![
                "um".into(),
                "uh".into(),
                "like".into(),
                "you know".into(),
                "sort of".into(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// AnalyzerConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level analyzer configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use speech_analyzer::config::AnalyzerConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AnalyzerConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    /// Speech-recognition settings.
    pub recognizer: RecognizerConfig,
    /// Codec-transcoding backend settings.
    pub transcoder: TranscoderConfig,
    /// Acoustic analysis settings.
    pub analysis: AnalysisConfig,
}

impl AnalyzerConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AnalyzerConfig::default())` when the file does not exist
    /// yet (first-run scenario) so callers never need to special-case a
    /// missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AnalyzerConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AnalyzerConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AnalyzerConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AnalyzerConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AnalyzerConfig::default());
    }

    /// Verify default values match the documented contract.
    #[test]
    fn default_values_match_contract() {
        let cfg = AnalyzerConfig::default();

        assert_eq!(cfg.recognizer.model, "vosk-model-small-en-us-0.15");
        assert_eq!(cfg.transcoder.ffmpeg_path, "ffmpeg");
        assert_eq!(cfg.analysis.silence_threshold_db, 20.0);
        assert_eq!(
            cfg.analysis.filler_phrases,
            vec!["um", "uh", "like", "you know", "sort of"]
        );
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AnalyzerConfig::default();
        cfg.recognizer.model = "vosk-model-en-us-0.22".into();
        cfg.transcoder.ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg".into();
        cfg.analysis.silence_threshold_db = 30.0;
        cfg.analysis.filler_phrases.push("basically".into());

        cfg.save_to(&path).expect("save");
        let loaded = AnalyzerConfig::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
        assert!(loaded
            .analysis
            .filler_phrases
            .iter()
            .any(|p| p == "basically"));
    }
}
