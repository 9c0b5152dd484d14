//! Available subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Subcommands of the `advert` tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a config file and summarize its rotation
    Check {
        /// Path to config.jsonc
        config: PathBuf,
    },

    /// Render one message the way players would receive it
    Render(RenderArgs),

    /// Run the broadcaster against a simulated console server
    Run(RunArgs),
}

/// Options for `advert render`.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Raw advert message, tags included
    pub message: String,

    /// Config file providing map aliases
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Current map id
    #[arg(long, default_value = "de_dust2")]
    pub map: String,

    /// Connected player count
    #[arg(long, default_value_t = 0)]
    pub players: usize,

    /// Server name (`hostname`); unset renders as "Unknown"
    #[arg(long)]
    pub hostname: Option<String>,

    /// Public server IP
    #[arg(long, default_value = "127.0.0.1")]
    pub ip: String,

    /// Server port (`hostport`)
    #[arg(long, default_value_t = 27015)]
    pub port: i64,

    /// Print control codes as-is instead of escaping them
    #[arg(long)]
    pub raw: bool,
}

/// Options for `advert run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Plugin data directory holding config.jsonc
    #[arg(long, env = "ADVERT_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Plugin install directory (sound fallback); defaults to the data directory
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Simulated human players
    #[arg(long, default_value_t = 2)]
    pub players: u16,

    /// Simulated bots
    #[arg(long, default_value_t = 0)]
    pub bots: u16,

    /// Current map id
    #[arg(long, default_value = "de_dust2")]
    pub map: String,

    /// Server name
    #[arg(long, default_value = "Console Server")]
    pub hostname: String,

    /// Simulate a round end every N seconds
    #[arg(long)]
    pub round_every: Option<u64>,

    /// Disable hot reload of config.jsonc
    #[arg(long)]
    pub no_watch: bool,
}
