//! Rescoring and ranking of retrieved hits.

use std::cmp::Ordering as CmpOrdering;

use rayon::prelude::*;

use crate::modifier::{ScoreModifiers, combine};
use crate::search::types::ScoredHit;

/// Replace every hit's score with its modified score.
///
/// Hit count and order are preserved. Each hit is scored from its own full
/// document only, so batches of at least `parallel_threshold` hits are scored
/// on the rayon pool; the output is identical either way.
pub fn rescore(
    modifiers: &ScoreModifiers,
    mut hits: Vec<ScoredHit>,
    parallel_threshold: usize,
) -> Vec<ScoredHit> {
    if modifiers.is_identity() {
        return hits;
    }

    let score_hit = |hit: &mut ScoredHit| {
        hit.score = combine(modifiers, hit.document.fields(), hit.score);
    };

    if hits.len() >= parallel_threshold {
        hits.par_iter_mut().for_each(score_hit);
    } else {
        hits.iter_mut().for_each(score_hit);
    }
    hits
}

/// Total order over scores in which NaN sorts below every number.
pub fn compare_scores(a: f64, b: f64) -> CmpOrdering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => CmpOrdering::Equal,
        (true, false) => CmpOrdering::Less,
        (false, true) => CmpOrdering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

/// Sort hits by score (descending) and keep the first `limit`.
///
/// The sort is stable, so hits with equal scores keep retrieval order. NaN
/// scores rank last.
pub fn rank(mut hits: Vec<ScoredHit>, limit: usize) -> Vec<ScoredHit> {
    hits.sort_by(|a, b| compare_scores(b.score, a.score));
    if hits.len() > limit {
        hits.truncate(limit);
    }
    hits
}
