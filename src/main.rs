//! Command-line entry point — analyze one recording and print the report.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AnalyzerConfig`] from disk (returns default on first run).
//! 3. Load the recognition model once; a missing model degrades to
//!    empty transcripts instead of failing.
//! 4. Probe the configured ffmpeg binary; a failed probe disables
//!    compressed-container decoding (native WAV still works).
//! 5. Run the pipeline on the input file and print the report as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use speech_analyzer::audio::{
    AudioNormalizer, AudioSource, AudioTranscoder, DisabledTranscoder, FfmpegTranscoder,
};
use speech_analyzer::config::{AnalyzerConfig, AppPaths};
use speech_analyzer::pipeline::AnalysisPipeline;
use speech_analyzer::stt::{SpeechModel, VoskTranscriber};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Analyze a spoken answer recording: transcript, delivery metrics, scores.
#[derive(Debug, Parser)]
#[command(name = "speech-analyzer", version)]
struct Cli {
    /// Path to the recording (WAV, MP3, WebM, …).
    input: PathBuf,

    /// Explicit settings file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Explicit model directory (overrides the configured model name).
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // 2. Configuration
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load_from(path)?,
        None => AnalyzerConfig::load().unwrap_or_else(|e| {
            log::warn!("failed to load config ({e}); using defaults");
            AnalyzerConfig::default()
        }),
    };

    // 3. Recognition model — loaded once, shared read-only. A missing model
    //    is not fatal; transcription runs in disabled mode.
    let model_dir = cli
        .model_dir
        .clone()
        .unwrap_or_else(|| AppPaths::new().model_dir(&config.recognizer.model));
    let model = SpeechModel::load(&model_dir);

    // 4. Decoding backend — probed once; degrade to WAV-only on failure.
    let transcoder: Arc<dyn AudioTranscoder> =
        match FfmpegTranscoder::probe(&config.transcoder.ffmpeg_path) {
            Ok(t) => Arc::new(t),
            Err(e) => {
                log::warn!("{e}; compressed containers will not decode");
                Arc::new(DisabledTranscoder)
            }
        };

    // 5. Analyze and print.
    let pipeline = AnalysisPipeline::new(
        AudioNormalizer::new(transcoder),
        Arc::new(VoskTranscriber::new(model)),
        config.analysis.clone(),
    );

    let report = pipeline.analyze(&AudioSource::from(cli.input.as_path()));
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
