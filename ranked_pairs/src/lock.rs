//! Locking of the ranked pairs into the preference graph, and resolution of its source.

use log::{debug, warn};

use crate::config::{CandidateId, LockingRule, VotingErrors};
use crate::pairs::MajorityPair;

/// A directed graph over the candidates. An edge winner -> loser means that
/// the winner is locked in ahead of the loser.
///
/// Edges are only ever added, and the graph never contains a cycle.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LockedGraph {
    edges: Vec<Vec<bool>>,
    in_degree: Vec<usize>,
    // The pairs admitted so far, in locking order.
    locked: Vec<MajorityPair>,
    // Only tracked under the forest rule.
    source: Option<CandidateId>,
}

impl LockedGraph {
    pub fn new(candidate_count: usize) -> LockedGraph {
        LockedGraph {
            edges: vec![vec![false; candidate_count]; candidate_count],
            in_degree: vec![0; candidate_count],
            locked: Vec::new(),
            source: None,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, winner: CandidateId, loser: CandidateId) -> bool {
        self.edges[winner.0][loser.0]
    }

    pub fn in_degree(&self, cid: CandidateId) -> usize {
        self.in_degree[cid.0]
    }

    pub fn locked_pairs(&self) -> &[MajorityPair] {
        &self.locked
    }

    pub fn is_locked(&self, pair: &MajorityPair) -> bool {
        self.has_edge(pair.winner, pair.loser)
    }

    /// The root tracked while locking with the forest rule.
    pub fn current_source(&self) -> Option<CandidateId> {
        self.source
    }

    /// The first candidate (by index) with an edge into `cid`.
    pub fn first_parent(&self, cid: CandidateId) -> Option<CandidateId> {
        (0..self.candidate_count())
            .map(CandidateId)
            .find(|p| self.edges[p.0][cid.0])
    }

    /// True if there is a path of locked edges from `from` to `to`.
    pub fn reaches(&self, from: CandidateId, to: CandidateId) -> bool {
        let n = self.candidate_count();
        let mut visited = vec![false; n];
        let mut stack = vec![from];
        while let Some(cid) = stack.pop() {
            if cid == to {
                return true;
            }
            if visited[cid.0] {
                continue;
            }
            visited[cid.0] = true;
            for next in 0..n {
                if self.edges[cid.0][next] && !visited[next] {
                    stack.push(CandidateId(next));
                }
            }
        }
        false
    }

    fn add_edge(&mut self, pair: &MajorityPair) {
        self.edges[pair.winner.0][pair.loser.0] = true;
        self.in_degree[pair.loser.0] += 1;
        self.locked.push(*pair);
    }
}

// Why a pair was left out of the graph.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Rejection {
    LoserAlreadyLost,
    SourceTakenByNonRoot,
    ClosesCycle,
}

fn check_forest(graph: &LockedGraph, pair: &MajorityPair, source: CandidateId) -> Option<Rejection> {
    if graph.in_degree(pair.loser) > 0 {
        Some(Rejection::LoserAlreadyLost)
    } else if pair.loser == source && graph.in_degree(pair.winner) > 0 {
        Some(Rejection::SourceTakenByNonRoot)
    } else if graph.reaches(pair.loser, pair.winner) {
        Some(Rejection::ClosesCycle)
    } else {
        None
    }
}

fn check_canonical(graph: &LockedGraph, pair: &MajorityPair) -> Option<Rejection> {
    if graph.reaches(pair.loser, pair.winner) {
        Some(Rejection::ClosesCycle)
    } else {
        None
    }
}

/// Locks the pairs one by one, in the given order.
///
/// Each pair is checked against the graph as it stands before the pair is
/// applied. Rejected pairs contribute nothing to the graph.
pub fn lock(ranked: &[MajorityPair], candidate_count: usize, rule: LockingRule) -> LockedGraph {
    let mut graph = LockedGraph::new(candidate_count);
    for pair in ranked.iter() {
        let rejection = match rule {
            LockingRule::Forest => {
                let source = *graph.source.get_or_insert(pair.winner);
                check_forest(&graph, pair, source)
            }
            LockingRule::Canonical => check_canonical(&graph, pair),
        };
        match rejection {
            Some(reason) => {
                debug!(
                    "lock: rejected {} -> {} (margin {}): {:?}",
                    pair.winner, pair.loser, pair.margin.0, reason
                );
            }
            None => {
                debug!(
                    "lock: locked {} -> {} (margin {})",
                    pair.winner, pair.loser, pair.margin.0
                );
                graph.add_edge(pair);
                if graph.source == Some(pair.loser) {
                    graph.source = Some(pair.winner);
                }
            }
        }
    }
    graph
}

/// Follows the incoming edges from `start` until a candidate without one is found.
///
/// More steps than there are candidates means that the graph has a cycle.
pub fn resolve(graph: &LockedGraph, start: CandidateId) -> Result<CandidateId, VotingErrors> {
    let n = graph.candidate_count();
    if start.0 >= n {
        return Err(VotingErrors::InternalConsistencyFault(format!(
            "start candidate {} out of range for {} candidates",
            start, n
        )));
    }
    let mut current = start;
    for _ in 0..=n {
        match graph.first_parent(current) {
            Some(parent) => current = parent,
            None => {
                if let Some(source) = graph.current_source() {
                    if source != current {
                        warn!(
                            "resolve: reached candidate {} from {} but the tracked source is {}",
                            current, start, source
                        );
                    }
                }
                return Ok(current);
            }
        }
    }
    Err(VotingErrors::InternalConsistencyFault(format!(
        "no source reachable from candidate {}: the locked graph has a cycle",
        start
    )))
}
