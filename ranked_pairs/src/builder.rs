pub use crate::config::*;

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::tally::{Ballot, PreferenceTally};

/// A builder for registering candidates and recording ballots.
///
/// Ballots are recorded into the preference tally as soon as they are added,
/// so the builder does not keep them around.
///
/// ```
/// pub use ranked_pairs::builder::Builder;
/// pub use ranked_pairs::ElectionRules;
/// # use ranked_pairs::VotingErrors;
///
/// let mut builder = Builder::new(&ElectionRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_vote(&["Anna".to_string(), "Bob".to_string()])?;
/// builder.add_vote(&["Bob".to_string(), "Anna".to_string()])?;
/// builder.add_vote(&["Anna".to_string(), "Bob".to_string()])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.winner, "Anna");
///
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) _rules: ElectionRules,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _tally: PreferenceTally,
}

impl Builder {
    pub fn new(rules: &ElectionRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
            _tally: PreferenceTally::new(0),
        })
    }

    /// Registers the candidates, in order. Any ballot recorded before is discarded.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        if cands.is_empty() {
            return Err(VotingErrors::EmptyElection);
        }
        if cands.len() > self._rules.max_candidates {
            return Err(VotingErrors::CandidateCountExceeded {
                count: cands.len(),
                max: self._rules.max_candidates,
            });
        }
        let mut seen: HashSet<&String> = HashSet::new();
        for name in cands.iter() {
            if !seen.insert(name) {
                return Err(VotingErrors::DuplicateCandidate(name.clone()));
            }
        }
        let candidates: Vec<Candidate> = cands
            .iter()
            .enumerate()
            .map(|(idx, name)| Candidate {
                id: CandidateId(idx),
                name: name.clone(),
            })
            .collect();
        for c in candidates.iter() {
            info!("Candidate: {}: {}", c.id, c.name);
        }
        Ok(Builder {
            _rules: self._rules,
            _tally: PreferenceTally::new(candidates.len()),
            _candidates: candidates,
        })
    }

    pub fn rules(&self) -> &ElectionRules {
        &self._rules
    }

    pub fn candidate_names(&self) -> Vec<String> {
        self._candidates.iter().map(|c| c.name.clone()).collect()
    }

    pub fn tally(&self) -> &PreferenceTally {
        &self._tally
    }

    /// Translates a list of names into a ballot, without recording it.
    ///
    /// The names must be a permutation of the registered candidates.
    pub fn ballot(&self, names: &[String]) -> Result<Ballot, VotingErrors> {
        let ids: HashMap<&str, CandidateId> = self
            ._candidates
            .iter()
            .map(|c| (c.name.as_str(), c.id))
            .collect();
        if names.len() != self._candidates.len() {
            return Err(VotingErrors::InvalidBallot(BallotDefect::WrongLength {
                expected: self._candidates.len(),
                actual: names.len(),
            }));
        }
        let mut ranks: Vec<CandidateId> = Vec::with_capacity(names.len());
        for name in names.iter() {
            let cid = ids.get(name.as_str()).ok_or_else(|| {
                VotingErrors::InvalidBallot(BallotDefect::UnknownCandidate(name.clone()))
            })?;
            if ranks.contains(cid) {
                return Err(VotingErrors::InvalidBallot(
                    BallotDefect::DuplicateCandidate(name.clone()),
                ));
            }
            ranks.push(*cid);
        }
        Ballot::new(ranks, self._candidates.len())
    }

    /// Adds a vote to the builder.
    ///
    /// candidates: the names of all the candidates, most preferred first. An invalid
    /// ballot is rejected as a whole and the tally is left untouched.
    pub fn add_vote(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        let ballot = self.ballot(candidates)?;
        debug!("add_vote: {:?} -> {:?}", candidates, ballot.ranks());
        self._tally.record(&ballot)
    }

    /// Runs the election on all the ballots added so far.
    pub fn run(&self) -> Result<ElectionResult, VotingErrors> {
        crate::run_tally(&self._candidates, &self._tally, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    fn builder(ns: &[&str]) -> Builder {
        Builder::new(&ElectionRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(ns))
            .unwrap()
    }

    #[test]
    fn too_many_candidates() {
        let rules = ElectionRules {
            max_candidates: 2,
            ..ElectionRules::DEFAULT_RULES
        };
        let res = Builder::new(&rules)
            .unwrap()
            .candidates(&names(&["a", "b", "c"]));
        assert_eq!(
            res.err(),
            Some(VotingErrors::CandidateCountExceeded { count: 3, max: 2 })
        );
    }

    #[test]
    fn no_candidates() {
        let res = Builder::new(&ElectionRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&[]);
        assert_eq!(res.err(), Some(VotingErrors::EmptyElection));
    }

    #[test]
    fn duplicate_registration() {
        let res = Builder::new(&ElectionRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["a", "b", "a"]));
        assert_eq!(
            res.err(),
            Some(VotingErrors::DuplicateCandidate("a".to_string()))
        );
    }

    #[test]
    fn invalid_votes_are_not_recorded() {
        let mut b = builder(&["a", "b", "c"]);
        b.add_vote(&names(&["c", "a", "b"])).unwrap();
        let before = b.tally().clone();

        assert_eq!(
            b.add_vote(&names(&["a", "b"])),
            Err(VotingErrors::InvalidBallot(BallotDefect::WrongLength {
                expected: 3,
                actual: 2
            }))
        );
        assert_eq!(
            b.add_vote(&names(&["a", "b", "d"])),
            Err(VotingErrors::InvalidBallot(BallotDefect::UnknownCandidate(
                "d".to_string()
            )))
        );
        assert_eq!(
            b.add_vote(&names(&["a", "b", "a"])),
            Err(VotingErrors::InvalidBallot(
                BallotDefect::DuplicateCandidate("a".to_string())
            ))
        );
        assert_eq!(b.tally(), &before);
    }

    #[test]
    fn names_are_case_sensitive() {
        let b = builder(&["Alice", "Bob"]);
        assert!(b.ballot(&names(&["alice", "Bob"])).is_err());
    }
}
