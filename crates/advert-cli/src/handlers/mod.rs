//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn CLI arguments into core/runtime calls
//! 2. Format output for the terminal
//!
//! Business logic stays in `advert-core` and `advert-runtime`.

pub mod check;
pub mod render;
pub mod run;
