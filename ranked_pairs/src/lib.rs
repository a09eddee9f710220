/*!
Tabulation of elections with the ranked pairs method (also known as the Tideman method).

Every voter ranks all the candidates. The pairwise preferences of the voters
are counted, and each head-to-head contest with a strict winner becomes a
majority pair. The pairs are sorted by decreasing margin of victory and
locked one after the other into a graph, skipping the pairs that the locking
rule rejects. The candidate at the top of the graph wins.

```
use ranked_pairs::{run_election, ElectionRules};

let candidates: Vec<String> = vec!["Alice".into(), "Bob".into(), "Charlie".into()];
let ballots: Vec<Vec<String>> = vec![
    vec!["Alice".into(), "Bob".into(), "Charlie".into()],
    vec!["Bob".into(), "Charlie".into(), "Alice".into()],
    vec!["Alice".into(), "Charlie".into(), "Bob".into()],
];
let result = run_election(&candidates, &ballots, &ElectionRules::DEFAULT_RULES)?;
assert_eq!(result.winner, "Alice");
# Ok::<(), ranked_pairs::VotingErrors>(())
```
*/

pub mod builder;
mod config;
pub mod lock;
pub mod manual;
pub mod pairs;
pub mod tally;

#[cfg(test)]
mod testing;

use log::{debug, info, warn};

pub use crate::config::*;
use crate::lock::{lock, resolve};
use crate::pairs::{extract, rank, MajorityPair};
use crate::tally::PreferenceTally;

/// The candidate from which the winner is searched in the locked graph.
const RESOLVE_START: CandidateId = CandidateId(0);

/// Runs the election with the given rules for the given ballots.
///
/// Arguments:
/// * `candidates` the names of the registered candidates, in order
/// * `ballots` one complete ranking of the candidate names per voter, most preferred first
/// * `rules` the rules that govern this election
///
/// The first invalid ballot aborts the election: no partial result is returned.
pub fn run_election(
    candidates: &[String],
    ballots: &[Vec<String>],
    rules: &ElectionRules,
) -> Result<ElectionResult, VotingErrors> {
    info!(
        "Processing {:?} ballots, candidates: {:?}, rules: {:?}",
        ballots.len(),
        candidates,
        rules
    );
    let mut builder = builder::Builder::new(rules)?.candidates(candidates)?;
    for b in ballots.iter() {
        builder.add_vote(b)?;
    }
    builder.run()
}

pub(crate) fn run_tally(
    candidates: &[Candidate],
    tally: &PreferenceTally,
    rules: &ElectionRules,
) -> Result<ElectionResult, VotingErrors> {
    if candidates.is_empty() {
        return Err(VotingErrors::EmptyElection);
    }
    if tally.candidate_count() != candidates.len() {
        return Err(VotingErrors::InternalConsistencyFault(format!(
            "tally sized for {} candidates, {} registered",
            tally.candidate_count(),
            candidates.len()
        )));
    }
    info!("Counted {} ballots", tally.num_ballots().0);
    if tally.num_ballots().0 == 0 {
        warn!("No ballots were recorded");
    }

    let (winner_id, ranked_pairs) = if candidates.len() == 1 {
        // Nothing to compare.
        (candidates[0].id, Vec::new())
    } else {
        let pairs: Vec<MajorityPair> = extract(tally);
        let ranked = rank(&pairs);
        info!("{} majority pairs", ranked.len());
        let graph = lock(&ranked, candidates.len(), rules.locking_rule);
        debug!(
            "run_tally: locked {} of {} pairs",
            graph.locked_pairs().len(),
            ranked.len()
        );
        let winner_id = resolve(&graph, RESOLVE_START)?;
        let stats: Vec<PairStats> = ranked
            .iter()
            .map(|p| PairStats {
                winner: candidates[p.winner.0].name.clone(),
                loser: candidates[p.loser.0].name.clone(),
                margin: p.margin.0,
                locked: graph.is_locked(p),
            })
            .collect();
        (winner_id, stats)
    };

    let winner = candidates
        .get(winner_id.0)
        .map(|c| c.name.clone())
        .ok_or_else(|| {
            VotingErrors::InternalConsistencyFault(format!("unknown winner {}", winner_id))
        })?;
    info!("Winner: {}: {}", winner_id, winner);

    Ok(ElectionResult {
        winner,
        winner_id,
        candidates: candidates.iter().map(|c| c.name.clone()).collect(),
        num_ballots: tally.num_ballots().0,
        tally: tally.to_matrix(),
        ranked_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_candidate_wins_without_ballots() {
        let res = run_election(&names(&["Alice"]), &[], &ElectionRules::DEFAULT_RULES).unwrap();
        assert_eq!(res.winner, "Alice");
        assert!(res.ranked_pairs.is_empty());
        assert_eq!(res.tally, vec![vec![0]]);
    }

    #[test]
    fn no_ballots_elects_the_first_candidate() {
        let res = run_election(&names(&["Alice", "Bob"]), &[], &ElectionRules::DEFAULT_RULES)
            .unwrap();
        assert_eq!(res.winner, "Alice");
        assert_eq!(res.num_ballots, 0);
    }

    #[test]
    fn invalid_ballot_aborts_the_election() {
        let ballots = vec![names(&["Alice", "Bob"]), names(&["Alice", "Alice"])];
        let res = run_election(
            &names(&["Alice", "Bob"]),
            &ballots,
            &ElectionRules::DEFAULT_RULES,
        );
        assert!(matches!(res, Err(VotingErrors::InvalidBallot(_))));
    }

    #[test]
    fn pair_stats_report_locking() {
        let ballots = vec![
            names(&["a", "b", "c"]),
            names(&["b", "c", "a"]),
            names(&["c", "a", "b"]),
            names(&["a", "b", "c"]),
        ];
        let res = run_election(&names(&["a", "b", "c"]), &ballots, &ElectionRules::DEFAULT_RULES)
            .unwrap();
        // a>b 3-1, b>c 3-1, c>a 2-2.
        assert_eq!(res.tally, vec![vec![0, 3, 2], vec![1, 0, 3], vec![2, 1, 0]]);
        assert_eq!(
            res.ranked_pairs,
            vec![
                PairStats {
                    winner: "a".to_string(),
                    loser: "b".to_string(),
                    margin: 2,
                    locked: true
                },
                PairStats {
                    winner: "b".to_string(),
                    loser: "c".to_string(),
                    margin: 2,
                    locked: true
                },
            ]
        );
        assert_eq!(res.winner, "a");
    }
}
