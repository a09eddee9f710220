use clap::Parser;

/// Runs an election with the ranked pairs (Tideman) method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// The names of the candidates, in order. If empty, the candidates are read from the
    /// configuration file.
    #[clap(value_parser)]
    pub candidates: Vec<String>,

    /// (file path, optional) The file containing the election description in JSON format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided, tideman will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A CSV file with one ballot per line. Setting this option overrides the ballot
    /// sources of the configuration file. If no ballots are provided, they are asked interactively.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default 9) The maximum number of candidates.
    #[clap(long, value_parser)]
    pub max_candidates: Option<usize>,

    /// (forest or canonical, default forest) The rule used to lock the pairs.
    #[clap(long, value_parser)]
    pub locking_rule: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
