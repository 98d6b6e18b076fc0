//! # kgview-cli
//!
//! Command-line front end for kgview.
//!
//! - [`cli`]: argument definitions
//! - [`commands`]: `info`, `category`, `sample`, `node` and `export`
//! - [`config_handlers`]: `config path|init|get`
//! - [`adapters`]: console and vis-network JSON render adapters

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config_handlers;

pub use adapters::{ConsoleAdapter, JsonExportAdapter};
pub use cli::{Args, Command, ConfigAction};
