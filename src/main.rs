//! Doctree - documentation site server with type-aware content resolution.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod logger;
mod serve;

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Arc::new(Config::load(&cli)?);

    match &cli.command {
        Commands::Check => cli::check::run_check(&config),
        Commands::Serve { .. } => {
            // Startup parse failure is fatal; live-reload failures later on
            // only log and keep the prior model serving
            content::reload(&config)?;
            serve::serve(config)
        }
    }
}
