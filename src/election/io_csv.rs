// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use crate::election::*;

/// Reads one ballot per line, the candidate names in order of preference.
///
/// The lines are not required to have the same length: a short or long
/// ballot is reported by the election as an invalid vote.
pub fn read_csv_ballots<R: Read>(rdr: csv::Reader<R>) -> TidemanResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let choices: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_ballots: lineno: {:?} row: {:?}", lineno, choices);
        res.push(choices);
    }
    Ok(res)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

pub fn read_csv_file(path: &str) -> TidemanResult<Vec<Vec<String>>> {
    let rdr: csv::Reader<File> = reader_builder()
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_csv_ballots(rdr)
}
