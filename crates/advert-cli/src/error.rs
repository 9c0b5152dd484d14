//! CLI-specific error types and exit code mapping.

use advert_core::ConfigError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file could not be read or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The plugin refused to start.
    #[error("Advert plugin disabled: {0}")]
    Disabled(String),

    /// IO error (signals, terminal).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h where one fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(ConfigError::Io { .. }) | Self::Io(_) => 74, // EX_IOERR
            Self::Config(_) | Self::Disabled(_) => 78,                // EX_CONFIG
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for any error surfaced from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
