//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// assetdesk - IT asset management backend
#[derive(Parser)]
#[command(name = "assetdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml; the default search order is used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Write a default config file if none exists
    InitConfig,

    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    /// Loads the config named by `--config`, or the first one found in the
    /// default locations. `init-config` always starts from the defaults.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if self.command() == Commands::InitConfig {
            return Ok(Config::default());
        }

        match &self.config {
            Some(path) => Config::load_from_path(path),
            None => Config::load(),
        }
    }

    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["assetdesk"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_config_and_subcommand() {
        let cli = Cli::parse_from(["assetdesk", "migrate", "--config", "/tmp/a.toml"]);
        assert_eq!(cli.command(), Commands::Migrate);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/a.toml")));

        let cli = Cli::parse_from(["assetdesk", "init-config"]);
        assert_eq!(cli.command(), Commands::InitConfig);
    }
}
