//! Command line argument parsing for the Glaive CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Glaive - field-driven score modifiers for vector search results
#[derive(Parser, Debug, Clone)]
#[command(name = "glaive")]
#[command(about = "Validate and apply score modifiers to vector search hits")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GlaiveArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "GLAIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GlaiveArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a score modifier file
    Validate(ValidateArgs),

    /// Apply score modifiers to retrieved hits, then rank and truncate them
    Rescore(RescoreArgs),
}

/// Arguments for validating score modifiers
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Score modifier file (JSON)
    #[arg(value_name = "MODIFIERS_FILE")]
    pub modifiers_file: PathBuf,
}

/// Arguments for rescoring hits
#[derive(Parser, Debug, Clone)]
pub struct RescoreArgs {
    /// Hits file (JSON Lines of {"document": {...}, "score": <float>})
    #[arg(long, value_name = "HITS_FILE")]
    pub hits: PathBuf,

    /// Score modifier file (JSON); scores are left unchanged without one
    #[arg(short, long, value_name = "MODIFIERS_FILE")]
    pub modifiers: Option<PathBuf>,

    /// Maximum number of hits to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Fields to return besides the identity (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub attributes: Option<Vec<String>>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = GlaiveArgs::parse_from(["glaive", "validate", "mods.json"]);
        assert_eq!(args.verbosity(), 1);

        let args = GlaiveArgs::parse_from(["glaive", "-vvv", "validate", "mods.json"]);
        assert_eq!(args.verbosity(), 3);

        let args = GlaiveArgs::parse_from(["glaive", "-q", "-vv", "validate", "mods.json"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_rescore_args() {
        let args = GlaiveArgs::parse_from([
            "glaive",
            "--format",
            "json",
            "rescore",
            "--hits",
            "hits.jsonl",
            "--modifiers",
            "mods.json",
            "--limit",
            "5",
            "--attributes",
            "title,popularity",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);

        let Command::Rescore(rescore) = args.command else {
            panic!("expected rescore command");
        };
        assert_eq!(rescore.hits, PathBuf::from("hits.jsonl"));
        assert_eq!(rescore.modifiers, Some(PathBuf::from("mods.json")));
        assert_eq!(rescore.limit, Some(5));
        assert_eq!(
            rescore.attributes,
            Some(vec!["title".to_string(), "popularity".to_string()])
        );
    }

    #[test]
    fn test_rescore_requires_hits() {
        assert!(GlaiveArgs::try_parse_from(["glaive", "rescore"]).is_err());
    }
}
