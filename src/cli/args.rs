//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Bind every configured catalog for every locale and report issues
//! - `show`: Print the bound table of one bundle for one locale
//! - `init`: Initialize msgbind configuration file

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
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by check and show.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Bundle directory (overrides config file)
    #[arg(long, env = "MSGBIND_BUNDLES")]
    pub bundles_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    /// Locales to check (overrides config file; default: every locale on disk)
    /// Can be specified multiple times: --locale fr --locale de_DE
    #[arg(long = "locale", short = 'l')]
    pub locales: Vec<String>,

    /// Report missing translations as errors and fail on warnings
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Bundle base name, e.g. com.example.messages
    pub bundle: String,

    /// Locale to bind for (default: from MSGBIND_LOCALE, LC_ALL, LC_MESSAGES, LANG)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs against their bundles (missing translations, unused and duplicate keys, orphan bundles)
    Check(CheckCommand),
    /// Show the text each identifier binds to for a locale
    Show(ShowCommand),
    /// Initialize a new .msgbindrc.json configuration file
    Init,
}
