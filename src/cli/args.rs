//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Doctree documentation server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: doctree.toml)
    #[arg(short = 'C', long, default_value = "doctree.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the documentation server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Re-parse content before each request (edit-and-refresh mode)
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        live_reload: Option<bool>,
    },

    /// Parse the content tree once and report the result
    #[command(visible_alias = "c")]
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["doctree", "serve", "--port", "9000", "--live-reload", "false"])
            .unwrap();
        match cli.command {
            Commands::Serve {
                port, live_reload, ..
            } => {
                assert_eq!(port, Some(9000));
                assert_eq!(live_reload, Some(false));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_check_alias() {
        let cli = Cli::try_parse_from(["doctree", "c"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_live_reload_flag_without_value() {
        let cli = Cli::try_parse_from(["doctree", "serve", "--live-reload"]).unwrap();
        match cli.command {
            Commands::Serve { live_reload, .. } => assert_eq!(live_reload, Some(true)),
            _ => panic!("expected serve"),
        }
    }
}
