//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ponto")]
#[command(about = "Punch-clock reconciliation and attendance reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to ponto.toml (default: PONTO_CONFIG, then search upwards)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Evaluation day (e.g., today, yesterday, 3 days ago, 16-10-2026)
    #[arg(short, long, global = true, default_value = "today")]
    pub date: String,

    /// Output directory, overriding output_dir from the config
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write the daily report and the rolling exports (default)
    Run,

    /// Write only the daily attendance report
    Report,

    /// Write only the rolling window exports
    Export,

    /// Create a starter ponto.toml
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ponto"]).unwrap();
        assert_eq!(cli.date, "today");
        assert_eq!(cli.command, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["ponto", "report", "--date", "16-10-2026", "-vv"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Report));
        assert_eq!(cli.date, "16-10-2026");
        assert_eq!(cli.verbose, 2);
    }
}
