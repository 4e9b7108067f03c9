//! Selection of one winning candidate per header.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Winners below this confidence count as "no usable heuristic candidate".
pub const MIN_USABLE_CONFIDENCE: f64 = 0.3;

/// Picks the candidate with the highest confidence.
///
/// Ties go to the field declared first in the catalog (sentinels last), then
/// to the candidate produced first. Returns `None` when there are no
/// candidates or the winner is below [`MIN_USABLE_CONFIDENCE`].
pub fn arbitrate(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut winner: Option<Candidate> = None;
    for candidate in candidates {
        let replace = match &winner {
            None => true,
            Some(current) => beats(&candidate, current),
        };
        if replace {
            winner = Some(candidate);
        }
    }
    winner.filter(|c| c.confidence >= MIN_USABLE_CONFIDENCE)
}

fn beats(challenger: &Candidate, current: &Candidate) -> bool {
    match challenger.confidence.total_cmp(&current.confidence) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => challenger.rank < current.rank,
    }
}
