//! Orrery - texture fetcher and local static server for the solar system viewer.

mod cli;
mod config;
mod core;
mod fetch;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, serve::SystemBrowser};
use config::AppConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = AppConfig::load(&cli)?;

    match &cli.command {
        Commands::Fetch { names, .. } => {
            cli::fetch::fetch_textures(&config.fetch, names).map(|_| ())
        }
        Commands::Serve { .. } => cli::serve::serve(&config.serve, &SystemBrowser),
    }
}
