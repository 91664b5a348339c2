//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{GlaiveArgs, OutputFormat};
use crate::error::Result;
use crate::search::SearchResults;

/// Result structure for a successful modifier validation.
///
/// Invalid files never produce a report; the command fails instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub multiply_terms: usize,
    pub add_terms: usize,
    /// Canonical form of the specification, `null` when no modifiers were given.
    pub score_modifiers: Value,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput: Serialize {
    fn print_human(&self);
}

impl HumanOutput for ValidationReport {
    fn print_human(&self) {
        if self.score_modifiers.is_null() {
            println!("Valid: no score modifiers (scores are left unchanged)");
            return;
        }
        println!(
            "Valid: {} multiply term(s), {} add term(s)",
            self.multiply_terms, self.add_terms
        );
        println!("{}", format_value(&self.score_modifiers));
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self) {
        println!("Search Results:");
        println!("═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            println!("Result {}: (Score: {:.6})", i + 1, hit.score);
            println!("─────────────");

            let mut names = hit.document.field_names();
            names.sort_unstable();
            for name in names {
                if let Some(value) = hit.document.get_field(name) {
                    println!("{name}: {value}");
                }
            }
        }

        println!();
        println!("Hits: {} (limit {})", self.hits.len(), self.limit);
        println!("Processing time: {}ms", self.processing_time_ms);
    }
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &GlaiveArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &GlaiveArgs) -> Result<()> {
    println!("{}", render_json(result, args.pretty)?);
    Ok(())
}

pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

fn format_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
