// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The index of a candidate, in the order in which the candidates were registered.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub usize);

impl Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
}

// ******** Output data structures *********

/// A majority pair as reported in the final result.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairStats {
    pub winner: String,
    pub loser: String,
    /// Votes for the winner over the loser minus votes for the loser over the winner.
    pub margin: u64,
    /// True if the pair was admitted in the locked graph.
    pub locked: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub winner: String,
    pub winner_id: CandidateId,
    /// The names of the candidates, in registration order.
    pub candidates: Vec<String>,
    pub num_ballots: u64,
    /// tally[i][j] is the number of voters who prefer candidate i over candidate j.
    pub tally: Vec<Vec<u64>>,
    /// The majority pairs, in the order in which they were considered for locking.
    pub ranked_pairs: Vec<PairStats>,
}

/// What makes a ballot unacceptable.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotDefect {
    /// The ballot does not rank exactly as many candidates as there are in the election.
    WrongLength { expected: usize, actual: usize },
    /// The name does not belong to a registered candidate.
    UnknownCandidate(String),
    /// The candidate is ranked more than once.
    DuplicateCandidate(String),
    /// A ballot built from indices refers to a candidate that does not exist.
    IndexOutOfRange {
        index: CandidateId,
        candidate_count: usize,
    },
    /// A ballot built from indices ranks the same index more than once.
    DuplicateIndex(CandidateId),
}

impl Display for BallotDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotDefect::WrongLength { expected, actual } => write!(
                f,
                "expected {} ranked candidates, found {}",
                expected, actual
            ),
            BallotDefect::UnknownCandidate(name) => write!(f, "unknown candidate {:?}", name),
            BallotDefect::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} is ranked more than once", name)
            }
            BallotDefect::IndexOutOfRange {
                index,
                candidate_count,
            } => write!(
                f,
                "candidate index {} is out of range for {} candidates",
                index, candidate_count
            ),
            BallotDefect::DuplicateIndex(index) => {
                write!(f, "candidate index {} is ranked more than once", index)
            }
        }
    }
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// No candidate was registered.
    EmptyElection,
    /// The same display name was registered twice.
    DuplicateCandidate(String),
    CandidateCountExceeded {
        count: usize,
        max: usize,
    },
    /// The ballot is not a permutation of the registered candidates. It was not recorded.
    InvalidBallot(BallotDefect),
    /// The locked graph does not have a reachable source. This is a bug in the locking
    /// procedure and the election cannot be decided.
    InternalConsistencyFault(String),
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::EmptyElection => write!(f, "no candidates in the election"),
            VotingErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} is registered more than once", name)
            }
            VotingErrors::CandidateCountExceeded { count, max } => write!(
                f,
                "{} candidates registered, the maximum number of candidates is {}",
                count, max
            ),
            VotingErrors::InvalidBallot(defect) => write!(f, "invalid ballot: {}", defect),
            VotingErrors::InternalConsistencyFault(msg) => {
                write!(f, "internal consistency fault: {}", msg)
            }
        }
    }
}

// ********* Configuration **********

/// The procedure used to decide whether a pair can be locked in the graph.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LockingRule {
    /// Every candidate loses at most once: a pair is rejected if its loser already
    /// has an incoming edge. The graph is a forest and the current source is
    /// tracked while locking.
    Forest,
    /// The textbook method: a pair is rejected only if it would close a cycle.
    Canonical,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionRules {
    /// The maximum number of candidates accepted for one election.
    pub max_candidates: usize,
    pub locking_rule: LockingRule,
}

impl ElectionRules {
    pub const DEFAULT_MAX_CANDIDATES: usize = 9;

    pub const DEFAULT_RULES: ElectionRules = ElectionRules {
        max_candidates: ElectionRules::DEFAULT_MAX_CANDIDATES,
        locking_rule: LockingRule::Forest,
    };
}

impl Default for ElectionRules {
    fn default() -> Self {
        ElectionRules::DEFAULT_RULES
    }
}
