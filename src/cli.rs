use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daily-signals")]
#[command(about = "Daily technical-signal report for a list of tickers", long_about = None)]
pub struct Cli {
    /// Config file (default: config.json, then config_sample.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch prices, score every symbol, write the reports and notify (default)
    Run,
    /// Write a sample config, the report template and the output directory
    Init {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_means_run() {
        let cli = Cli::parse_from(["daily-signals"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_after_subcommand() {
        let cli = Cli::parse_from(["daily-signals", "run", "--config", "alt.json"]);
        assert!(matches!(cli.command, Some(Commands::Run)));
        assert_eq!(cli.config, Some(PathBuf::from("alt.json")));
    }

    #[test]
    fn init_force() {
        let cli = Cli::parse_from(["daily-signals", "init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }
}
