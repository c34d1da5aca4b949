use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use lens_core::ModelId;
use lens_engine::ExtractSettings;
use log::LevelFilter;

/// Extract copy-ready text from a batch of images, one image at a time.
#[derive(Debug, Parser)]
#[command(name = "lens", version)]
pub struct Args {
    /// Image files to process, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Model tier: `flash`, `pro` or a full model id.
    #[arg(long, short, default_value = "flash")]
    pub model: ModelId,

    /// API key for the extraction service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the extraction service.
    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Print raw extracted text instead of parsed rows.
    #[arg(long)]
    pub raw: bool,

    /// Write the combined transcript of successful items into this directory.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = "./engine.log")]
    pub log_file: PathBuf,

    /// Log debug records too.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn extract_settings(&self) -> ExtractSettings {
        ExtractSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ExtractSettings::default()
        }
    }
}
