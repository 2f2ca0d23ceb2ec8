//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;

use crate::services::notifications::DEFAULT_HISTORY;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "healthguard")]
#[command(about = "Posture, eye, stretch and work-session reminders behind a local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8001")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory for settings, sessions and notification history
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// How many notifications the in-app recent list keeps
    #[arg(long, default_value_t = DEFAULT_HISTORY)]
    pub history: usize,

    /// Never show desktop notifications
    #[arg(long)]
    pub headless: bool,

    /// Start every timer as soon as the server is up
    #[arg(long)]
    pub start_all: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// The configured data directory, or the platform default
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", "healthguard")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".healthguard"))
    }
}
