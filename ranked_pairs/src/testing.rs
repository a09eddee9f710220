// Helpers shared by the unit tests.

use quickcheck::{Arbitrary, Gen};

use crate::config::CandidateId;
use crate::tally::{Ballot, PreferenceTally};

pub fn ballot(ranks: &[usize]) -> Ballot {
    let n = ranks.len();
    Ballot::new(ranks.iter().map(|r| CandidateId(*r)).collect(), n).unwrap()
}

/// A small election with random complete ballots.
#[derive(Clone, Debug)]
pub struct RandomElection {
    pub candidates: usize,
    pub ballots: Vec<Ballot>,
}

impl RandomElection {
    pub fn tally(&self) -> PreferenceTally {
        let mut tally = PreferenceTally::new(self.candidates);
        for b in self.ballots.iter() {
            tally.record(b).unwrap();
        }
        tally
    }
}

impl Arbitrary for RandomElection {
    fn arbitrary(g: &mut Gen) -> Self {
        // Keep the sizes small: the matrices are quadratic in the number of candidates.
        let candidates = 1 + usize::arbitrary(g) % 6;
        let voters = usize::arbitrary(g) % 30;
        let ballots = (0..voters)
            .map(|_| {
                let mut ranks: Vec<CandidateId> = (0..candidates).map(CandidateId).collect();
                for i in (1..candidates).rev() {
                    let j = usize::arbitrary(g) % (i + 1);
                    ranks.swap(i, j);
                }
                Ballot::new(ranks, candidates).unwrap()
            })
            .collect();
        RandomElection {
            candidates,
            ballots,
        }
    }
}
