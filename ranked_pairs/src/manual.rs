/*!

This is the long-form manual for `ranked_pairs` and `tideman`.

## Running an election

```bash
tideman Alice Bob Charlie
```

Without any other option, `tideman` asks for the number of voters and then for
each ballot, one rank at a time:

```text
Number of voters: 2
Rank 1: Alice
Rank 2: Charlie
Rank 3: Bob

Rank 1: Bob
Rank 2: Alice
Rank 3: Charlie

Alice
```

Every ballot must rank all the candidates exactly once. The name of the winner is printed at the end.

Exit codes:
* `1` no candidate was given, or an input file could not be read
* `2` too many candidates (see `--max-candidates`)
* `3` invalid vote
* `4` the locked graph has no source (this is a bug)

## Input formats

### csv

One ballot per line, the candidates in order of preference. There is no header.

```text
Alice,Bob,Charlie
Charlie,Alice,Bob
```

Blank cells around the names are trimmed. A line that does not rank all the candidates is an invalid vote.

## Configuration

The program accepts a configuration file in JSON with the `--config` flag:

```json
{
  "outputSettings": { "contestName": "Class president" },
  "ballotSources": [ { "provider": "csv", "filePath": "ballots.csv" } ],
  "candidates": [ { "name": "Alice" }, { "name": "Bob" }, { "name": "Charlie" } ],
  "rules": { "maxCandidates": 9, "lockingRule": "forest" }
}
```

The paths of the ballot sources are relative to the directory of the configuration file.
Candidates given on the command line take precedence over the candidates of the file, and
`--input` takes precedence over the ballot sources.

## Locking rules

Both rules consider the pairs by decreasing margin of victory. Pairs with the same margin
are considered in the order of the candidates (by winner, then by loser).

`forest` (default): a candidate may only lose once. A pair is rejected if its loser already
lost to someone, or if it would put a candidate that already lost above the current top of
the graph, or if it would create a cycle.

`canonical`: the textbook ranked pairs method. A pair is rejected only if it would create a cycle.

The two rules elect the same candidate when there is a Condorcet winner (a candidate who beats
every other candidate head-to-head).

## Output

With `--out`, a summary of the election is written in JSON:

```json
{
  "config": { "contest": "Class president", "date": null, "jurisdiction": null, "office": null },
  "results": {
    "winner": "Alice",
    "ballots": 5,
    "tally": { "Alice": { "Bob": 3 }, "Bob": { "Alice": 2 } },
    "pairs": [ { "winner": "Alice", "loser": "Bob", "margin": 1, "locked": true } ]
  }
}
```

With `--reference`, the summary is compared to a summary produced previously, and
the differences are printed.

 */
