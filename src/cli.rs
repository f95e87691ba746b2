use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skyglance", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start with this city instead of detecting your location
    #[arg(long)]
    pub city: Option<String>,

    /// Start in the light theme
    #[arg(long)]
    pub light: bool,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Print current weather once and exit
    Show {
        /// City to look up; detected from your location when omitted
        city: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["skyglance", "--city", "Paris", "--light", "-vv"]);
        assert_eq!(cli.city.as_deref(), Some("Paris"));
        assert!(cli.light);
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_show_subcommand() {
        let cli = Cli::parse_from(["skyglance", "show", "Oslo"]);
        assert!(matches!(cli.command, Some(Commands::Show { city: Some(ref c) }) if c == "Oslo"));
    }
}
