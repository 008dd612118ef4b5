//! Command-line interface for mentorlog.
//!
//! This module provides the CLI structure and command definitions for the
//! `mlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, AdviseCommand, ConfigCommand, LanguageArg, ListCommand, OutputFormat,
    RecordKindArg, StatsCommand, StatusCommand,
};

/// mlog - supervision record register
///
/// Keeps a school mentor's classroom observations, feedback sessions,
/// academic statistics, assessment results, and professional-development
/// logs in one local register, with dashboard summaries and an advisory
/// assistant.
#[derive(Debug, Parser)]
#[command(name = "mlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new entry from a JSON draft
    Add(AddCommand),

    /// List records in a collection, most recent first
    List(ListCommand),

    /// Show dashboard summary statistics
    Stats(StatsCommand),

    /// Ask the advisory assistant a question
    Advise(AdviseCommand),

    /// Show register status and per-collection counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
