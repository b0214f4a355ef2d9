//! Command line front-end for the wristband rally server.

pub mod cli;
pub mod config;
pub mod render;

pub use cli::{Cli, Command};
pub use config::Config;
