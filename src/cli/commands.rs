//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Singer tap for the Google Analytics 4 Data API
#[derive(Parser, Debug)]
#[command(name = "tap-ga4")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover report streams and print the catalog
    Discover {
        /// Cached field exclusions (JSON) used instead of compatibility probes
        #[arg(long)]
        field_exclusions: Option<PathBuf>,
    },

    /// Sync the selected streams of a catalog
    Sync {
        /// Catalog file (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Also write state to this file after every chunk
        #[arg(long)]
        checkpoint: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from([
            "tap-ga4",
            "-C",
            "config.json",
            "--state-json",
            "{}",
            "sync",
            "--catalog",
            "catalog.json",
            "--checkpoint",
            "state.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
        assert_eq!(cli.state_json.as_deref(), Some("{}"));
        match cli.command {
            Commands::Sync {
                catalog,
                checkpoint,
            } => {
                assert_eq!(catalog, PathBuf::from("catalog.json"));
                assert_eq!(checkpoint, Some(PathBuf::from("state.json")));
            }
            Commands::Discover { .. } => panic!("Expected sync"),
        }
    }

    #[test]
    fn test_parse_discover_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tap-ga4",
            "discover",
            "--field-exclusions",
            "exclusions.json",
            "--config",
            "config.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
        assert!(matches!(
            cli.command,
            Commands::Discover { field_exclusions: Some(_) }
        ));
    }

    #[test]
    fn test_sync_requires_catalog() {
        assert!(Cli::try_parse_from(["tap-ga4", "sync"]).is_err());
    }
}
