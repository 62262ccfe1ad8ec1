//! CLI module for fieldcheck
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldcheck - Drive and inspect guided shelf-inspection sessions
#[derive(Parser, Debug)]
#[command(name = "fieldcheck")]
#[command(version)]
#[command(about = "Drive and inspect guided shelf-inspection sessions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

impl Cli {
    /// Tracing filter implied by the flags, if they override the configured level
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the step chain with forward and back transitions
    Steps {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge two JSON lot arrays the way a section resubmission does
    Merge {
        /// Lots already stored
        #[arg(long)]
        previous: PathBuf,

        /// Lots being submitted
        #[arg(long)]
        incoming: PathBuf,
    },

    /// Replay a scripted session and print the resulting snapshot
    Replay {
        /// Script with the user directory and the ordered events
        script: PathBuf,

        /// Write the checkout submission to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wait for the post-checkout reset before printing
        #[arg(long)]
        wait_reset: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
