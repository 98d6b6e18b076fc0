//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// kgview: explore an exported property graph from the terminal.
#[derive(Parser, Debug)]
#[command(name = "kgview", author, version)]
#[command(about = "Interactive property-graph viewer", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Dataset path or URL, overriding `source.data`
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show graph statistics and the category breakdown
    Info,

    /// Show the nodes of one category (by display label)
    Category {
        /// Category display label, matched exactly
        label: String,
    },

    /// Show a random sample of the nodes
    Sample {
        /// Percentage of nodes to keep, clamped to 1..=100
        #[arg(allow_negative_numbers = true)]
        percent: f64,
    },

    /// Show one node and its incident edges
    Node {
        /// Node element id
        id: String,
    },

    /// Write the (optionally filtered) view as a vis-network JSON document
    Export {
        /// Output file
        #[arg(short, long)]
        out: String,

        /// Keep only this category
        #[arg(long, conflicts_with = "percent")]
        category: Option<String>,

        /// Keep a random percentage of nodes
        #[arg(long, allow_negative_numbers = true)]
        percent: Option<f64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config path)
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a value by dotted key, e.g. `layout.spring_length`
    Get {
        /// Dotted key
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        let args = Args::try_parse_from(["kgview", "sample", "25"]).unwrap();
        assert!(matches!(args.command, Command::Sample { percent } if percent == 25.0));
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["kgview", "category", "高校", "--data", "x.json", "-v"]).unwrap();
        assert_eq!(args.data.as_deref(), Some("x.json"));
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Category { label } if label == "高校"));
    }

    #[test]
    fn test_export_filters_conflict() {
        let result = Args::try_parse_from([
            "kgview", "export", "--out", "g.json", "--category", "a", "--percent", "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_init() {
        let args = Args::try_parse_from(["kgview", "config", "init", "--force"]).unwrap();
        match args.command {
            Command::Config {
                action: ConfigAction::Init { file, force },
            } => {
                assert!(file.is_none());
                assert!(force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
