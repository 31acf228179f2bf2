//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.
//! Every subcommand takes a mapping profile; rows are read from a file or stdin and written
//! to stdout, while logs go to stderr.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "rowmap")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Map records to and from tabular rows with declarative profiles")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// The mapping profile shared by every subcommand.
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile file declaring attributes and importers (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Print the CSV header of a profile
    Header {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Use attribute identifiers instead of labels
        #[arg(long)]
        identifiers: bool,
    },
    /// Export JSON lines records as CSV rows or labeled JSON lines
    Export {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Input file with one JSON object per line (stdin when omitted or `-`)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Write labels instead of identifiers in the CSV header
        #[arg(long, conflicts_with = "no_header")]
        labels: bool,
        /// Do not write a CSV header
        #[arg(long)]
        no_header: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Import CSV rows as JSON lines records
    Import {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Input CSV file (stdin when omitted or `-`)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Named importer from the profile; repeat to combine left to right
        #[arg(short, long, value_name = "IMPORTER")]
        using: Vec<String>,
        /// Skip the first CSV record
        #[arg(long)]
        skip_header: bool,
    },
}

impl AppCommands {
    #[must_use]
    pub fn profile(&self) -> &Path {
        match self {
            Self::Header { profile, .. } | Self::Export { profile, .. } | Self::Import { profile, .. } => {
                &profile.profile
            },
        }
    }
}

/// Export output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Comma-separated rows in registry order
    #[default]
    Csv,
    /// One label-keyed JSON object per line
    Jsonl,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_importers_keep_their_order() {
        let cli = Cli::parse_from([
            "rowmap", "-v", "import", "--profile", "users.toml", "-u", "basic", "--using", "address",
        ]);
        assert_eq!(cli.verbose, 1);
        let AppCommands::Import { using, skip_header, .. } = cli.command else {
            panic!("expected import command");
        };
        assert_eq!(using, ["basic", "address"]);
        assert!(!skip_header);
    }

    #[test]
    fn labels_conflict_with_no_header() {
        let result = Cli::try_parse_from([
            "rowmap", "export", "-p", "users.toml", "--labels", "--no-header",
        ]);
        assert!(result.is_err());
    }
}
