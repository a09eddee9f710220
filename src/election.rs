use log::{debug, info, warn};

use ranked_pairs::builder::Builder;
use ranked_pairs::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::election::config_reader::*;

pub mod config_reader;
pub mod io_csv;
pub mod io_prompt;

#[derive(Debug, Snafu)]
pub enum TidemanError {
    #[snafu(display("Usage: tideman [candidate ...]"))]
    MissingCandidates {},
    #[snafu(display("Error opening file {path}"))]
    OpeningFile { source: io::Error, path: String },
    #[snafu(display("Error writing file {path}"))]
    WritingFile { source: io::Error, path: String },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error reading the ballots from the terminal"))]
    Prompt { source: io::Error },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("{source}"))]
    Voting { source: VotingErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TidemanResult<T> = Result<T, TidemanError>;

impl TidemanError {
    /// The exit code of the program for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TidemanError::Voting { source } => match source {
                VotingErrors::CandidateCountExceeded { .. } => 2,
                VotingErrors::InvalidBallot(_) => 3,
                VotingErrors::InternalConsistencyFault(_) => 4,
                _ => 1,
            },
            _ => 1,
        }
    }

    /// The message presented to the user.
    pub fn user_message(&self) -> String {
        match self {
            TidemanError::Voting {
                source: VotingErrors::CandidateCountExceeded { max, .. },
            } => format!("Maximum number of candidates is {}", max),
            TidemanError::Voting {
                source: VotingErrors::InvalidBallot(_),
            } => "Invalid vote.".to_string(),
            x => x.to_string(),
        }
    }
}

fn validate_rules(config_rules: Option<&ConfigRules>, args: &Args) -> TidemanResult<ElectionRules> {
    let max_candidates = args
        .max_candidates
        .or_else(|| config_rules.and_then(|r| r.max_candidates))
        .unwrap_or(ElectionRules::DEFAULT_MAX_CANDIDATES);
    if max_candidates == 0 {
        whatever!("The maximum number of candidates must be at least 1")
    }
    let locking_rule = match args
        .locking_rule
        .clone()
        .or_else(|| config_rules.and_then(|r| r.locking_rule.clone()))
    {
        None => LockingRule::Forest,
        Some(x) => match x.as_str() {
            "forest" => LockingRule::Forest,
            "canonical" => LockingRule::Canonical,
            _ => {
                whatever!(
                    "Unknown locking rule {:?}: expected 'forest' or 'canonical'",
                    x
                )
            }
        },
    };
    Ok(ElectionRules {
        max_candidates,
        locking_rule,
    })
}

fn add_ballots(builder: &mut Builder, ballots: &[Vec<String>], origin: &str) -> TidemanResult<()> {
    for (idx, b) in ballots.iter().enumerate() {
        if let Err(e) = builder.add_vote(b) {
            warn!("{}: ballot {}: {:?}: {}", origin, idx + 1, b, e);
            return Err(e).context(VotingSnafu {});
        }
    }
    info!("{}: {} ballots", origin, ballots.len());
    Ok(())
}

fn read_ballot_sources(
    builder: &mut Builder,
    config_path: &str,
    sources: &[FileSource],
) -> TidemanResult<()> {
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu { path: config_path })?;
    for cfs in sources.iter() {
        let p: PathBuf = root_p.join(&cfs.file_path);
        let p2 = p.as_path().display().to_string();
        info!("Attempting to read ballot file {:?}", p2);
        let ballots = match cfs.provider.as_str() {
            "csv" => io_csv::read_csv_file(&p2)?,
            x => {
                whatever!("Provider not implemented {:?}", x)
            }
        };
        add_ballots(builder, &ballots, &p2)?;
    }
    Ok(())
}

pub fn build_summary_js(settings: &OutputSettings, result: &ElectionResult) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        date: settings.contest_date.clone(),
        jurisdiction: settings.contest_jurisdiction.clone(),
        office: settings.contest_office.clone(),
    };

    let mut tally: JSMap<String, JSValue> = JSMap::new();
    for (i, row) in result.tally.iter().enumerate() {
        let mut prefs: JSMap<String, JSValue> = JSMap::new();
        for (j, count) in row.iter().enumerate() {
            if i != j {
                prefs.insert(result.candidates[j].clone(), json!(count));
            }
        }
        tally.insert(result.candidates[i].clone(), JSValue::Object(prefs));
    }

    let pairs: Vec<JSValue> = result
        .ranked_pairs
        .iter()
        .map(|p| {
            json!({
                "winner": p.winner,
                "loser": p.loser,
                "margin": p.margin,
                "locked": p.locked
            })
        })
        .collect();

    json!({
        "config": c,
        "results": {
            "winner": result.winner,
            "ballots": result.num_ballots,
            "tally": tally,
            "pairs": pairs
        }
    })
}

/// Fails if the computed summary is not the same as the reference.
pub fn check_summary(summary_ref: &JSValue, summary: &JSValue) -> TidemanResult<()> {
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

fn write_summary(out: &str, summary: &JSValue) -> TidemanResult<()> {
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty).context(WritingFileSnafu { path: out })?;
    }
    Ok(())
}

/// Collects the candidates and the ballots, and runs the election.
pub fn run_election(args: &Args) -> TidemanResult<ElectionResult> {
    let config: Option<TidemanConfig> = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    debug!("config: {:?}", config);

    let candidates: Vec<String> = if !args.candidates.is_empty() {
        args.candidates.clone()
    } else {
        config
            .as_ref()
            .map(|c| c.candidates.iter().map(|cc| cc.name.clone()).collect())
            .unwrap_or_default()
    };
    ensure!(!candidates.is_empty(), MissingCandidatesSnafu {});

    let rules = validate_rules(config.as_ref().and_then(|c| c.rules.as_ref()), args)?;
    let mut builder = Builder::new(&rules)
        .context(VotingSnafu {})?
        .candidates(&candidates)
        .context(VotingSnafu {})?;

    match (&args.input, &config, &args.config) {
        (Some(input), _, _) => {
            let ballots = io_csv::read_csv_file(input)?;
            add_ballots(&mut builder, &ballots, input)?;
        }
        (None, Some(c), Some(config_path)) if !c.ballot_sources.is_empty() => {
            read_ballot_sources(&mut builder, config_path, &c.ballot_sources)?;
        }
        _ => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut output = stdout.lock();
            io_prompt::read_ballots(&mut stdin.lock(), &mut output, &mut builder)?;
            output.flush().context(PromptSnafu {})?;
        }
    }

    let result = builder.run().context(VotingSnafu {})?;
    info!("result: {:?}", result);

    if args.out.is_some() || args.reference.is_some() {
        let settings = config
            .as_ref()
            .and_then(|c| c.output_settings.clone())
            .unwrap_or_default();
        let summary = build_summary_js(&settings, &result);
        if let Some(out) = &args.out {
            write_summary(out, &summary)?;
        }
        // The reference summary, if provided for comparison
        if let Some(summary_p) = &args.reference {
            let summary_ref = read_summary(summary_p)?;
            check_summary(&summary_ref, &summary)?;
        }
    }

    Ok(result)
}
