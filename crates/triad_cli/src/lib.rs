//! Terminal front end for the triad tic-tac-toe engine.
//!
//! - [`config`]: `triad.toml` loading and CLI overrides
//! - [`controller`]: session ownership and the text command language
//! - [`cli`]: clap argument definitions

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;

pub use config::{ConfigError, TriadConfig};
pub use controller::{Command, CommandError, Controller, ControllerError, Flow, parse_moves};
