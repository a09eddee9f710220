//! Majority pairs and their ranking by strength of victory.

use std::cmp::Reverse;

use log::debug;

use crate::config::CandidateId;
use crate::tally::{PreferenceTally, VoteCount};

/// A head-to-head contest with a strict winner.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct MajorityPair {
    pub winner: CandidateId,
    pub loser: CandidateId,
    pub margin: VoteCount,
}

/// All the pairs in which one candidate is strictly preferred over the other,
/// in row-major order of the tally. Ties produce no pair.
pub fn extract(tally: &PreferenceTally) -> Vec<MajorityPair> {
    let n = tally.candidate_count();
    let mut pairs: Vec<MajorityPair> = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (a, b) = (CandidateId(i), CandidateId(j));
            let (for_a, for_b) = (tally.get(a, b), tally.get(b, a));
            if for_a > for_b {
                pairs.push(MajorityPair {
                    winner: a,
                    loser: b,
                    margin: for_a - for_b,
                });
            }
        }
    }
    debug!("extract: {} majority pairs", pairs.len());
    pairs
}

/// Sorts the pairs by decreasing margin of victory.
///
/// The sort is stable: pairs with the same margin keep their relative order.
pub fn rank(pairs: &[MajorityPair]) -> Vec<MajorityPair> {
    let mut ranked = pairs.to_vec();
    ranked.sort_by_key(|p| Reverse(p.margin));
    for (idx, p) in ranked.iter().enumerate() {
        debug!(
            "rank: {}: {} -> {} (margin {})",
            idx, p.winner, p.loser, p.margin.0
        );
    }
    ranked
}
