//! Ballots and the pairwise preference tally.

use std::{
    collections::HashSet,
    ops::{Add, AddAssign, Sub},
};

use log::debug;

use crate::config::{BallotDefect, CandidateId, VotingErrors};

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub struct VoteCount(pub u64);

impl VoteCount {
    pub const EMPTY: VoteCount = VoteCount(0);
}

impl std::iter::Sum for VoteCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteCount(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

impl Add for VoteCount {
    type Output = VoteCount;
    fn add(self: VoteCount, rhs: VoteCount) -> VoteCount {
        VoteCount(self.0 + rhs.0)
    }
}

impl Sub for VoteCount {
    type Output = VoteCount;
    fn sub(self: VoteCount, rhs: VoteCount) -> VoteCount {
        VoteCount(self.0 - rhs.0)
    }
}

/// A complete ranking of all the candidates, most preferred first.
///
/// Invariant: every candidate of the election appears exactly once.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    ranks: Vec<CandidateId>,
}

impl Ballot {
    /// Checks that the ranks are a permutation of `0..candidate_count`.
    pub fn new(ranks: Vec<CandidateId>, candidate_count: usize) -> Result<Ballot, VotingErrors> {
        if ranks.len() != candidate_count {
            return Err(VotingErrors::InvalidBallot(BallotDefect::WrongLength {
                expected: candidate_count,
                actual: ranks.len(),
            }));
        }
        let mut seen: HashSet<CandidateId> = HashSet::new();
        for cid in ranks.iter() {
            if cid.0 >= candidate_count {
                return Err(VotingErrors::InvalidBallot(
                    BallotDefect::IndexOutOfRange {
                        index: *cid,
                        candidate_count,
                    },
                ));
            }
            if !seen.insert(*cid) {
                return Err(VotingErrors::InvalidBallot(BallotDefect::DuplicateIndex(
                    *cid,
                )));
            }
        }
        Ok(Ballot { ranks })
    }

    pub fn ranks(&self) -> &[CandidateId] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// counts[a][b] is the number of ballots on which candidate a is ranked above candidate b.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PreferenceTally {
    counts: Vec<Vec<VoteCount>>,
    num_ballots: VoteCount,
}

impl PreferenceTally {
    pub fn new(candidate_count: usize) -> PreferenceTally {
        PreferenceTally {
            counts: vec![vec![VoteCount::EMPTY; candidate_count]; candidate_count],
            num_ballots: VoteCount::EMPTY,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.counts.len()
    }

    pub fn num_ballots(&self) -> VoteCount {
        self.num_ballots
    }

    /// The number of voters who prefer `a` over `b`.
    pub fn get(&self, a: CandidateId, b: CandidateId) -> VoteCount {
        self.counts[a.0][b.0]
    }

    /// Adds one ballot: each candidate beats every candidate ranked after it.
    ///
    /// A ballot built for another number of candidates is refused and nothing is recorded.
    pub fn record(&mut self, ballot: &Ballot) -> Result<(), VotingErrors> {
        if ballot.len() != self.candidate_count() {
            return Err(VotingErrors::InvalidBallot(BallotDefect::WrongLength {
                expected: self.candidate_count(),
                actual: ballot.len(),
            }));
        }
        let ranks = ballot.ranks();
        for (pos, winner) in ranks.iter().enumerate() {
            for loser in ranks[pos + 1..].iter() {
                self.counts[winner.0][loser.0] += VoteCount(1);
            }
        }
        self.num_ballots += VoteCount(1);
        debug!(
            "record: ballot {:?}, {:?} ballots recorded",
            ranks, self.num_ballots
        );
        Ok(())
    }

    pub fn to_matrix(&self) -> Vec<Vec<u64>> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|vc| vc.0).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::testing::{ballot, RandomElection};

    #[test]
    fn every_earlier_candidate_beats_every_later_one() {
        let mut tally = PreferenceTally::new(4);
        tally.record(&ballot(&[2, 0, 3, 1])).unwrap();
        let expected: Vec<Vec<u64>> = vec![
            vec![0, 1, 0, 1],
            vec![0, 0, 0, 0],
            vec![1, 1, 0, 1],
            vec![0, 1, 0, 0],
        ];
        assert_eq!(tally.to_matrix(), expected);
        assert_eq!(tally.num_ballots(), VoteCount(1));
    }

    #[test]
    fn ballot_validation() {
        assert_eq!(
            Ballot::new(vec![CandidateId(0)], 2),
            Err(VotingErrors::InvalidBallot(BallotDefect::WrongLength {
                expected: 2,
                actual: 1
            }))
        );
        assert_eq!(
            Ballot::new(vec![CandidateId(1), CandidateId(1)], 2),
            Err(VotingErrors::InvalidBallot(BallotDefect::DuplicateIndex(
                CandidateId(1)
            )))
        );
        assert_eq!(
            Ballot::new(vec![CandidateId(0), CandidateId(2)], 2),
            Err(VotingErrors::InvalidBallot(BallotDefect::IndexOutOfRange {
                index: CandidateId(2),
                candidate_count: 2
            }))
        );
        let err = Ballot::new(vec![CandidateId(3), CandidateId(0)], 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid ballot: candidate index 3 is out of range for 2 candidates"
        );
    }

    #[test]
    fn mismatched_ballot_is_not_recorded() {
        let mut tally = PreferenceTally::new(3);
        tally.record(&ballot(&[0, 1, 2])).unwrap();
        let before = tally.clone();
        assert!(tally.record(&ballot(&[1, 0])).is_err());
        assert_eq!(tally, before);
    }

    #[quickcheck]
    fn tally_does_not_depend_on_ballot_order(election: RandomElection) -> bool {
        let mut forward = PreferenceTally::new(election.candidates);
        for b in election.ballots.iter() {
            forward.record(b).unwrap();
        }
        let mut backward = PreferenceTally::new(election.candidates);
        for b in election.ballots.iter().rev() {
            backward.record(b).unwrap();
        }
        forward == backward
    }

    #[quickcheck]
    fn opposite_cells_add_up_to_ballot_count(election: RandomElection) -> bool {
        let tally = election.tally();
        let n = election.candidates;
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (CandidateId(i), CandidateId(j));
                if i == j {
                    tally.get(a, b) == VoteCount::EMPTY
                } else {
                    tally.get(a, b) + tally.get(b, a) == tally.num_ballots()
                }
            })
        })
    }
}
