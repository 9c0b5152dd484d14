//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the advert broadcaster.
#[derive(Parser)]
#[command(name = "advert")]
#[command(about = "Check, preview and run rotating server adverts")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::parse_from(["advert", "check", "config.jsonc", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check { .. }));
    }
}
