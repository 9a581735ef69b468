// Primitives for reading CSV files.

use council_politics::builder::PollBuilder;

use crate::results::*;

struct CsvCandidate {
    name: String,
    party: String,
    votes: i64,
}

/// Reads one candidate per line: `division,candidate,party,votes`, after a header.
///
/// An empty vote count means the candidate has not been counted yet.
pub fn read_csv_polls(path: &str, division_seats: &[(String, Seats)]) -> CliResult<Vec<Poll>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    // Divisions in order of first appearance.
    let mut divisions: Vec<(String, Vec<CsvCandidate>)> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_polls: lineno: {:?} row: {:?}", lineno, line);
        let field = |i: usize| line.get(i).context(CsvLineTooShortSnafu { lineno });
        let division = field(0)?.to_string();
        let votes_text = field(3)?;
        let votes: i64 = if votes_text.is_empty() {
            -1
        } else {
            votes_text
                .parse::<i64>()
                .ok()
                .context(CsvVotesSnafu { lineno, votes: votes_text })?
        };
        let cand = CsvCandidate {
            name: field(1)?.to_string(),
            party: field(2)?.to_string(),
            votes,
        };
        match divisions.iter_mut().find(|(d, _)| *d == division) {
            Some((_, cands)) => cands.push(cand),
            None => divisions.push((division, vec![cand])),
        }
    }

    let mut res: Vec<Poll> = Vec::new();
    for (division, cands) in divisions {
        let seats = division_seats
            .iter()
            .find(|(name, _)| *name == division)
            .map(|(_, s)| *s)
            .unwrap_or_default();
        let counted: u64 = cands
            .iter()
            .filter(|c| c.votes > 0)
            .map(|c| c.votes as u64)
            .sum();
        let actual_votes = match u32::try_from(counted) {
            Ok(x) => x,
            Err(_) => whatever!("Division {}: {} votes is out of range", division, counted),
        };
        let mut builder = PollBuilder::new(ElectoralDivision::new(&division, seats))
            .electorate(None, Some(actual_votes));
        for c in cands.iter() {
            builder = builder
                .candidate_raw(&c.name, &c.party, c.votes)
                .context(PoliticsSnafu {
                    division: division.clone(),
                })?;
        }
        res.push(builder.build());
    }
    info!("Read {} polls from {}", res.len(), path);
    Ok(res)
}
