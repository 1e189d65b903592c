//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all lingot
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Validate catalogs (structure, unfinished entries, placeholders)
//! - `stats`: Show translation progress per catalog
//! - `update`: Extract strings from sources and merge them into catalogs
//! - `clean`: Remove vanished/obsolete entries from catalogs
//! - `init`: Initialize lingot configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

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
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Stats(cmd)) => cmd.args.common.verbose,
            Some(Command::Update(cmd)) => cmd.args.common.verbose,
            Some(Command::Clean(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory, where .lingotrc.json is searched from
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalog file to work on (overrides config file, repeatable)
    #[arg(long, value_name = "PATH")]
    pub catalog: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all except obsolete-entry)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub args: StatsArgs,
}

#[derive(Debug, Parser)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Drop entries whose source text no longer exists
    #[arg(long)]
    pub no_obsolete: bool,

    /// Do not pre-fill new entries from identical source texts
    #[arg(long)]
    pub no_same_text: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub args: UpdateArgs,
}

#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete entries (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs for structural and translation issues
    Check(CheckCommand),
    /// Show translation progress of each catalog
    Stats(StatsCommand),
    /// Extract translatable strings from sources and merge them into catalogs
    Update(UpdateCommand),
    /// Remove vanished and obsolete entries from catalogs
    Clean(CleanCommand),
    /// Initialize a new .lingotrc.json configuration file
    Init,
}
