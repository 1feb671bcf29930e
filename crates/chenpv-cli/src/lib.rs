//! `chen-pv`: batch metric computation plus template extraction and filling.
//!
//! The binary is a thin clap front end over the functions here, which keeps the
//! command behavior testable without spawning a process.

pub mod batch;
pub mod cli;
pub mod extract;
pub mod fill;
pub mod logging;

pub use cli::{Cli, Command, run};
