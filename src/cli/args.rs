//! Command line argument parsing for the Colloquy CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Colloquy - an intent-classification chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "colloquy")]
#[command(about = "An intent-classification chatbot trained from a JSON intents file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ColloquyArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Chatbot configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "COLLOQUY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ColloquyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat interactively on standard input
    Chat(ChatArgs),

    /// Reply to a single message
    Ask(AskArgs),

    /// Show the predicted intent and its probability
    Classify(ClassifyArgs),

    /// Check an intents file (and optionally a table file)
    Validate(ValidateArgs),
}

/// Arguments for an interactive chat session
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Intents file path (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,
}

/// Arguments for a one-shot reply
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Intents file path (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Message to reply to
    #[arg(value_name = "MESSAGE")]
    pub message: String,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Intents file path (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Message to classify
    #[arg(value_name = "MESSAGE")]
    pub message: String,

    /// Number of ranked intents to show
    #[arg(short, long, default_value = "3")]
    pub top: usize,
}

/// Arguments for dataset validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Intents file path (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Auxiliary table file path (JSON)
    #[arg(long, value_name = "TABLE_FILE")]
    pub table: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
