// Interactive collection of the ballots.

use std::collections::HashSet;
use std::io::BufRead;

use crate::election::*;

// None at the end of the input.
fn read_line<R: BufRead>(input: &mut R) -> TidemanResult<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context(PromptSnafu {})?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, msg: &str) -> TidemanResult<String> {
    write!(output, "{}", msg).context(PromptSnafu {})?;
    output.flush().context(PromptSnafu {})?;
    match read_line(input)? {
        Some(line) => Ok(line),
        None => {
            whatever!("Unexpected end of input after {:?}", msg.trim())
        }
    }
}

/// Asks until a non-negative integer is entered.
fn prompt_count<R: BufRead, W: Write>(input: &mut R, output: &mut W, msg: &str) -> TidemanResult<usize> {
    loop {
        let line = prompt(input, output, msg)?;
        match line.parse::<usize>() {
            Ok(x) => return Ok(x),
            Err(_) => debug!("prompt_count: not a count: {:?}", line),
        }
    }
}

/// Asks for the number of voters, then for every rank of every ballot.
///
/// A name that is not a candidate aborts the collection immediately. Complete
/// ballots are recorded in the builder as they are entered.
pub fn read_ballots<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    builder: &mut Builder,
) -> TidemanResult<()> {
    let candidates = builder.candidate_names();
    let known: HashSet<&str> = candidates.iter().map(|s| s.as_str()).collect();
    let voter_count = prompt_count(input, output, "Number of voters: ")?;
    info!("Collecting {} ballots", voter_count);

    for voter in 0..voter_count {
        let mut ranks: Vec<String> = Vec::with_capacity(candidates.len());
        for rank in 0..candidates.len() {
            let name = prompt(input, output, &format!("Rank {}: ", rank + 1))?;
            if !known.contains(name.as_str()) {
                warn!("voter {}: unknown candidate {:?}", voter + 1, name);
                return Err(VotingErrors::InvalidBallot(BallotDefect::UnknownCandidate(
                    name,
                )))
                .context(VotingSnafu {});
            }
            ranks.push(name);
        }
        builder.add_vote(&ranks).context(VotingSnafu {})?;
        writeln!(output).context(PromptSnafu {})?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn builder() -> Builder {
        Builder::new(&ElectionRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&["Alice".to_string(), "Bob".to_string()])
            .unwrap()
    }

    fn collect(input: &str) -> (TidemanResult<()>, Builder, String) {
        let mut b = builder();
        let mut output: Vec<u8> = Vec::new();
        let res = read_ballots(&mut Cursor::new(input.as_bytes()), &mut output, &mut b);
        (res, b, String::from_utf8(output).unwrap())
    }

    #[test]
    fn prompts_for_every_rank() {
        let (res, b, output) = collect("2\nAlice\nBob\nBob\nAlice\n");
        assert!(res.is_ok());
        assert_eq!(
            output,
            "Number of voters: Rank 1: Rank 2: \nRank 1: Rank 2: \n"
        );
        assert_eq!(b.tally().to_matrix(), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn voter_count_is_asked_again() {
        let (res, b, output) = collect("two\n-1\n1\n Alice \nBob\n");
        assert!(res.is_ok());
        assert!(output.starts_with("Number of voters: Number of voters: Number of voters: Rank 1: "));
        assert_eq!(b.tally().num_ballots().0, 1);
    }

    #[test]
    fn unknown_name_stops_immediately() {
        let (res, b, output) = collect("1\nCharlie\nAlice\n");
        let err = res.unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(output, "Number of voters: Rank 1: ");
        assert_eq!(b.tally().num_ballots().0, 0);
    }

    #[test]
    fn duplicate_name_is_an_invalid_vote() {
        let (res, _, _) = collect("1\nAlice\nAlice\n");
        assert_eq!(res.unwrap_err().exit_code(), 3);
    }

    #[test]
    fn truncated_input() {
        let (res, _, _) = collect("1\nAlice\n");
        assert_eq!(res.unwrap_err().exit_code(), 1);
    }
}
