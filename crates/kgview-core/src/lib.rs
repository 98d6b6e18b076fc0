//! kgview Core: errors, display tables, and viewer configuration.
//!
//! This crate provides the foundational types used across all kgview crates.
//! It has no internal kgview dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`tables`]: Category and relation display tables
//! - [`config`]: Viewer configuration (TOML) and its resolution rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod tables;

// Re-export key types at crate root for convenience
pub use config::{LayoutConfig, SourceConfig, ViewerConfig};
pub use error::{Error, Result};
pub use tables::{CategoryStyle, CategoryTable, RelationStyle, RelationTable, ResolvedCategory};
