use log::{debug, info, warn};

use council_politics::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use chrono::NaiveDate;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
mod io_common;
mod io_csv;

use crate::results::config_reader::*;
use crate::results::io_common::{parse_division_seats, read_summary, simplify_file_name, write_output};

#[derive(Debug, Snafu)]
pub enum CliError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} of the CSV file is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno} of the CSV file: {votes:?} is not a number of votes"))]
    CsvVotes { lineno: usize, votes: String },
    #[snafu(display("Unknown input type {input_type:?} (expected json or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Cannot understand division seats {text:?} (expected NAME=1 or NAME=2)"))]
    InvalidDivisionSeats { text: String },
    #[snafu(display("Error in the poll of {division}: {source}"))]
    Politics {
        source: PoliticsError,
        division: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CliResult<T> = Result<T, CliError>;

fn candidate_to_json(cand: &ElectionCandidate, poll: &Poll) -> CliResult<JSValue> {
    let percent = match (cand.votes, poll.actual_votes) {
        (Some(_), Some(actual)) if actual > 0 => Some(
            cand.percent_of_votes(actual as i64)
                .context(PoliticsSnafu {
                    division: poll.electoral_division.name.clone(),
                })?,
        ),
        _ => None,
    };
    Ok(json!({
        "name": cand.name.to_string(),
        "party": cand.party.name,
        "votes": cand.votes,
        "percent": percent,
        "elected": cand.won_seat,
    }))
}

fn poll_to_json(poll: &Poll) -> CliResult<JSValue> {
    let division = poll.electoral_division.name.clone();
    let turnout = match (poll.possible_votes, poll.actual_votes) {
        (Some(possible), Some(_)) if possible > 0 => {
            Some(poll.turnout().context(PoliticsSnafu {
                division: division.clone(),
            })?)
        }
        _ => None,
    };
    let mut candidates: Vec<JSValue> = Vec::new();
    for cand in poll.candidates.iter() {
        candidates.push(candidate_to_json(cand, poll)?);
    }
    let winners: Vec<String> = poll.winners().map(|c| c.name.to_string()).collect();
    Ok(json!({
        "division": division,
        "seats": poll.seats().count(),
        "turnout": turnout,
        "winners": winners,
        "summary": poll.winning_party_names(),
        "candidates": candidates,
    }))
}

fn read_polls(
    input: &str,
    input_type: Option<&str>,
    division_seats: &[String],
) -> CliResult<(OutputConfig, Vec<Poll>)> {
    info!("Attempting to read election file {:?}", input);
    match input_type.unwrap_or("json") {
        "json" => {
            let election = read_election(input)?;
            let date = match &election.election_date {
                Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => whatever!("Cannot read the election date {:?} (expected yyyy-mm-dd)", s),
                },
                None => None,
            };
            let mut polls: Vec<Poll> = Vec::new();
            for p in election.polls.iter() {
                let mut poll = p.to_poll().context(PoliticsSnafu {
                    division: p.division.name.clone(),
                })?;
                poll.election_date = date;
                polls.push(poll);
            }
            let config = OutputConfig {
                election: election.election_name,
                date: election.election_date,
            };
            Ok((config, polls))
        }
        "csv" => {
            let seats = parse_division_seats(division_seats)?;
            let polls = io_csv::read_csv_polls(input, &seats)?;
            let config = OutputConfig {
                election: simplify_file_name(input),
                date: None,
            };
            Ok((config, polls))
        }
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

/// Reads an election, works out every poll and assembles the summary.
pub fn build_summary(
    input: &str,
    input_type: Option<&str>,
    division_seats: &[String],
) -> CliResult<JSValue> {
    let (config, mut polls) = read_polls(input, input_type, division_seats)?;
    let mut results: Vec<JSValue> = Vec::new();
    for poll in polls.iter_mut() {
        poll.calculate_winner();
        results.push(poll_to_json(poll)?);
    }
    info!("Processed {} polls", results.len());
    Ok(json!({
        "config": config,
        "results": results,
    }))
}

pub fn run_election(
    input: &str,
    input_type: Option<&str>,
    division_seats: &[String],
    out: Option<&str>,
    reference: Option<&str>,
) -> CliResult<()> {
    let result_js = build_summary(input, input_type, division_seats)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(WritingJsonSnafu {})?;
    write_output(out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file(name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn county_2021_matches_reference() {
        init();
        let res = run_election(
            &test_file("county_2021.json"),
            None,
            &[],
            None,
            Some(&test_file("county_2021_expected_summary.json")),
        );
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn county_2021_details() {
        let js = build_summary(&test_file("county_2021.json"), Some("json"), &[]).unwrap();
        let results = js["results"].as_array().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[1]["summary"], json!("Labour win (two seats)."));
        assert_eq!(results[1]["turnout"], json!(38.1));
        assert_eq!(results[1]["winners"], json!(["Gill Hart", "Kate Lowe"]));
        // by-election: one seat, no electorate
        assert_eq!(results[2]["seats"], json!(1));
        assert_eq!(results[2]["turnout"], JSValue::Null);
        let uncounted = &results[3]["candidates"][3];
        assert_eq!(uncounted["votes"], JSValue::Null);
        assert_eq!(uncounted["percent"], JSValue::Null);
        assert_eq!(uncounted["elected"], json!(false));
    }

    #[test]
    fn reference_mismatch_fails() {
        let res = run_election(
            &test_file("by_election.csv"),
            Some("csv"),
            &[],
            None,
            Some(&test_file("county_2021_expected_summary.json")),
        );
        assert!(matches!(res, Err(CliError::ReferenceMismatch {})));
    }

    #[test]
    fn csv_single_seats() {
        init();
        let js = build_summary(&test_file("by_election.csv"), Some("csv"), &[]).unwrap();
        assert_eq!(js["config"]["election"], json!("by_election"));
        let results = js["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        // A tie goes to the candidate listed first.
        let hastings = &results[0];
        assert_eq!(hastings["winners"], json!(["Gill Hart"]));
        assert_eq!(hastings["summary"], json!("Labour win."));
        assert_eq!(hastings["turnout"], JSValue::Null);
        assert_eq!(hastings["candidates"][0]["percent"], json!(40.3));
        assert_eq!(hastings["candidates"][2]["percent"], json!(19.3));

        // The uncounted candidate cannot keep the seat.
        let rye = &results[1];
        assert_eq!(rye["winners"], json!(["Paul Quinn"]));
        assert_eq!(rye["candidates"][0]["percent"], JSValue::Null);
        assert_eq!(rye["candidates"][1]["percent"], json!(100.0));
    }

    #[test]
    fn csv_with_division_seats() {
        let js = build_summary(
            &test_file("by_election.csv"),
            Some("csv"),
            &["Hastings Old Town=2".to_string()],
        )
        .unwrap();
        let hastings = &js["results"][0];
        assert_eq!(hastings["seats"], json!(2));
        assert_eq!(hastings["winners"], json!(["Gill Hart", "Ian Jones"]));
        assert_eq!(hastings["summary"], json!("Labour/Green win (one seat each)."));
    }

    #[test]
    fn bad_inputs() {
        assert!(matches!(
            build_summary(&test_file("county_2021.json"), Some("xlsx"), &[]),
            Err(CliError::UnknownInputType { .. })
        ));
        assert!(matches!(
            build_summary(&test_file("missing.json"), None, &[]),
            Err(CliError::OpeningFile { .. })
        ));
        assert!(matches!(
            build_summary(&test_file("bad_seats.json"), None, &[]),
            Err(CliError::Politics { .. })
        ));
    }
}
