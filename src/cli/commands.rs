//! Command implementations for the Glaive CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{GlaiveError, Result};
use crate::modifier::ScoreModifiers;
use crate::search::projection::into_search_hits;
use crate::search::{ScoredHit, SearchConfig, SearchResults, rank, rescore};

/// Execute a CLI command.
pub fn execute_command(args: GlaiveArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Validate(validate_args) => {
            let report = run_validate(validate_args, &config)?;
            output_result("Score modifiers", &report, &args)
        }
        Command::Rescore(rescore_args) => {
            let results = run_rescore(rescore_args, &config)?;
            output_result("Rescored hits", &results, &args)
        }
    }
}

/// Load the search configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            SearchConfig::from_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

/// Validate a modifier file.
pub fn run_validate(args: &ValidateArgs, config: &SearchConfig) -> Result<ValidationReport> {
    let modifiers = load_modifiers(&args.modifiers_file, config)?;
    let report = match modifiers.spec() {
        Some(spec) => ValidationReport {
            multiply_terms: spec.multiply_terms().len(),
            add_terms: spec.add_terms().len(),
            score_modifiers: serde_json::to_value(spec)?,
        },
        None => ValidationReport {
            multiply_terms: 0,
            add_terms: 0,
            score_modifiers: Value::Null,
        },
    };
    Ok(report)
}

/// Rescore, rank, truncate and project the hits of a hits file.
pub fn run_rescore(args: &RescoreArgs, config: &SearchConfig) -> Result<SearchResults> {
    let start = Instant::now();

    let limit = config.resolve_limit(args.limit)?;

    // Modifiers are validated before any hit is read.
    let modifiers = match &args.modifiers {
        Some(path) => load_modifiers(path, config)?,
        None => ScoreModifiers::Identity,
    };

    let hits = load_hits(&args.hits)?;
    log::debug!("loaded {} hit(s) from {}", hits.len(), args.hits.display());

    let hits = rank(rescore(&modifiers, hits, config.parallel_threshold), limit);

    let hits = into_search_hits(
        hits,
        args.attributes.as_deref(),
        &config.modifier.identity_field,
    );

    Ok(SearchResults {
        hits,
        query: String::new(),
        limit,
        processing_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Read and validate a modifier file.
pub fn load_modifiers(path: &Path, config: &SearchConfig) -> Result<ScoreModifiers> {
    let content = fs::read_to_string(path)?;
    ScoreModifiers::from_json_str(&content, &config.modifier)
}

/// Read hits from a JSON Lines file. Blank lines are ignored.
pub fn load_hits(path: &Path) -> Result<Vec<ScoredHit>> {
    let reader = BufReader::new(File::open(path)?);
    let mut hits = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let hit: ScoredHit = serde_json::from_str(&line).map_err(|e| {
            GlaiveError::invalid_argument(format!(
                "{}:{}: invalid hit: {e}",
                path.display(),
                line_no + 1
            ))
        })?;
        hits.push(hit);
    }

    Ok(hits)
}
