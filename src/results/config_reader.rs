use crate::results::*;

use council_politics::builder::PollBuilder;
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionInput {
    #[serde(rename = "electionName")]
    pub election_name: String,
    #[serde(rename = "electionDate")]
    pub election_date: Option<String>,
    pub polls: Vec<PollInput>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DivisionInput {
    pub id: Option<u32>,
    pub name: String,
    pub seats: Option<i32>,
    #[serde(rename = "folderName")]
    pub folder_name: Option<String>,
    #[serde(rename = "districtName")]
    pub district_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollInput {
    pub division: DivisionInput,
    #[serde(rename = "byElectionSeats")]
    pub by_election_seats: Option<i32>,
    #[serde(rename = "possibleVotes")]
    pub possible_votes: Option<i64>,
    #[serde(rename = "actualVotes")]
    pub actual_votes: Option<i64>,
    pub candidates: Vec<CandidateInput>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateInput {
    pub name: String,
    pub party: String,
    pub votes: Option<i64>,
}

/// What the summary says about the election itself.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub election: String,
    pub date: Option<String>,
}

impl DivisionInput {
    pub fn to_division(&self) -> PoliticsResult<ElectoralDivision> {
        let mut division = ElectoralDivision::new(&self.name, Seats::try_from(self.seats.unwrap_or(1))?);
        division.id = self.id.unwrap_or(0);
        division.folder_name = self.folder_name.clone();
        division.district_name = self.district_name.clone();
        Ok(division)
    }
}

impl PollInput {
    /// Missing numbers are read like the -1 sentinel.
    pub fn to_poll(&self) -> PoliticsResult<Poll> {
        let mut builder = PollBuilder::new(self.division.to_division()?)
            .by_election_seats(Seats::by_election_from_sentinel(
                self.by_election_seats.unwrap_or(-1),
            )?)
            .electorate(
                vote_count_from_sentinel(self.possible_votes.unwrap_or(-1))?,
                vote_count_from_sentinel(self.actual_votes.unwrap_or(-1))?,
            );
        for c in self.candidates.iter() {
            builder = builder.candidate_raw(&c.name, &c.party, c.votes.unwrap_or(-1))?;
        }
        Ok(builder.build())
    }
}

pub fn read_election(path: &str) -> CliResult<ElectionInput> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read content: {:?}", contents);
    let election: ElectionInput =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(election)
}
