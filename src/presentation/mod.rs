//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Mapping flags onto configuration overrides
//!
//! Rendering (status line, JSON events, summary) lives in the binary.

pub mod cli;

pub use cli::{Cli, ColorWhen};
