use std::{cmp::Ordering, num::NonZeroUsize};

use super::filter::Candidate;

/// Orders candidates by distance and keeps the first `limit`.
///
/// The sort is stable, so candidates at the same distance keep the order the
/// filter produced them in, and candidates without a distance sort after
/// those with one. When no candidate has a distance the input order is kept
/// as is.
pub fn rank_candidates(mut candidates: Vec<Candidate>, limit: NonZeroUsize) -> Vec<Candidate> {
    if candidates.iter().any(|c| c.distance.is_some()) {
        candidates.sort_by(|a, b| compare_distance(a.distance, b.distance));
    }
    candidates.truncate(limit.get());
    candidates
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
