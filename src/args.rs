use clap::Parser;

/// Works out the results of council elections: winners, turnout and vote shares.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the election results. See the manual of the
    /// council_politics crate for the accepted formats.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default json) The type of the input: json or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the summary of the election, in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided,
    /// councilpoll will check that its own summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (csv only, NAME=SEATS) The number of seats of a division, when it is not 1. May be repeated.
    #[clap(long, value_parser)]
    pub division_seats: Vec<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
