#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
//! Console host and tooling for the advert broadcaster.

// Used by the binary only
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod host;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use commands::{Commands, RenderArgs, RunArgs};
pub use error::{CliError, exit_code_for};
pub use parser::Cli;
