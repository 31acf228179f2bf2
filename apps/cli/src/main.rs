#![warn(rust_2018_idioms, unused_lifetimes)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::export::{ExportOptions, export_records};
use crate::handlers::{header, import};
use crate::models::args::{AppCommands, Cli};
use crate::services::io::{open_input, open_output};

use anyhow::Result;
use clap::Parser;
use rowmap::HeaderStyle;
use rowmap_kernel::config::load_config;
use rowmap_kernel::domain::config::{LoggingConfig, ProfileConfig};
use rowmap_kernel::profile::Profile;
use rowmap_logger::{LevelFilter, Logger};
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: ProfileConfig = load_config(Some(cli.command.profile()))?;
    let _logger = init_logger(&config.logging, cli.verbose)?;
    let profile = Profile::from_config(config)?;

    match cli.command {
        AppCommands::Header { identifiers, .. } => {
            header::print_header(&profile, identifiers, open_output())?;
        },
        AppCommands::Export { input, labels, no_header, format, .. } => {
            let header = match (no_header, labels) {
                (true, _) => None,
                (false, true) => Some(HeaderStyle::Labels),
                (false, false) => Some(HeaderStyle::Identifiers),
            };
            let options = ExportOptions { header, format };
            export_records(&profile, open_input(input.as_deref())?, open_output(), options)?;
        },
        AppCommands::Import { input, using, skip_header, .. } => {
            import::import_rows(
                &profile,
                open_input(input.as_deref())?,
                open_output(),
                &using,
                skip_header,
            )?;
        },
    }

    Ok(())
}

/// `-v` flags win over the profile's `[logging]` level.
fn init_logger(logging: &LoggingConfig, verbose: u8) -> Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .json(logging.json)
        .ansi(std::io::stderr().is_terminal());

    let builder = match verbose {
        0 => builder.level_name(&logging.level)?,
        1 => builder.level(LevelFilter::INFO),
        2 => builder.level(LevelFilter::DEBUG),
        _ => builder.level(LevelFilter::TRACE),
    };

    Ok(builder.init()?)
}
