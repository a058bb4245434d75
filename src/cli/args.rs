//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all acd
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `validate`: Scan a source tree, validate metadata, report issues
//! - `export`: Scan and export metadata (JSON, CSV, Markdown, DOT)
//! - `analyze`: Analyze implementation status across all phases
//! - `init`: Initialize acd configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Validate(cmd)) => cmd.common.verbose,
            Some(Command::Export(cmd)) => cmd.common.verbose,
            Some(Command::Analyze(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the scanning commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Repository identifier for cross-repo traceability (e.g. org/repo)
    #[arg(long)]
    pub repository: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Path to the source file or directory to validate
    pub path: PathBuf,

    /// Export the validation report to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Path to the source file or directory to scan
    pub path: PathBuf,

    /// Export metadata to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Export metadata to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Export metadata to a Markdown file
    #[arg(long, value_name = "FILE")]
    pub markdown: Option<PathBuf>,

    /// Export the dependency graph to a DOT file
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Path to the source file or directory to analyze
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate ACD metadata in source comments and report issues
    Validate(ValidateCommand),
    /// Scan metadata and export it to machine-readable formats
    Export(ExportCommand),
    /// Analyze implementation status and dependencies across phases
    Analyze(AnalyzeCommand),
    /// Initialize a new .acdrc.json configuration file
    Init,
}
