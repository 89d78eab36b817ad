//! CLI entry point for tripguard.

pub mod session;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::TripConfig;

/// Guarded travel booking assistant
#[derive(Parser, Debug)]
#[command(name = "tripguard", version, about = "Travel booking assistant with input and output guardrails")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (TOML). Defaults to the per-user config if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model serving the travel agent
    #[arg(long, global = true)]
    pub main_model: Option<String>,

    /// Model serving the guardrail classifiers
    #[arg(long, global = true)]
    pub guardrail_model: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: TripConfig) -> TripConfig {
        if let Some(model) = &self.main_model {
            config.main_model = model.clone();
        }
        if let Some(model) = &self.guardrail_model {
            config.guardrail_model = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Default log filter when `TRIPGUARD_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "tripguard=debug"
        } else {
            "warn"
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (/profile, /reset, /quit)
    Chat,
    /// Send one message and print the reply
    Ask(AskArgs),
    /// Print the active traveller profile
    Profile,
}

/// Arguments for `tripguard ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Message to send
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}
