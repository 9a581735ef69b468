// ********* Election data structures ***********

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::council::PersonName;
use crate::error::{invalid_argument, PoliticsResult};

/// The number of seats returned by an electoral division.
///
/// No division returns more than two councillors, so anything else is rejected
/// when the value is read from outside.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Seats {
    #[default]
    One,
    Two,
}

impl Seats {
    pub fn count(self) -> usize {
        match self {
            Seats::One => 1,
            Seats::Two => 2,
        }
    }

    /// Reads a by-election seat count, where -1 means "use the division's seats".
    pub fn by_election_from_sentinel(value: i32) -> PoliticsResult<Option<Seats>> {
        match value {
            -1 => Ok(None),
            x => Seats::try_from(x).map(Some),
        }
    }
}

impl TryFrom<i32> for Seats {
    type Error = crate::error::PoliticsError;

    fn try_from(value: i32) -> PoliticsResult<Seats> {
        match value {
            1 => Ok(Seats::One),
            2 => Ok(Seats::Two),
            x => invalid_argument(
                "seats",
                format!("a division returns 1 or 2 councillors, not {}", x),
            ),
        }
    }
}

impl From<Seats> for i32 {
    fn from(seats: Seats) -> i32 {
        seats.count() as i32
    }
}

/// Reads a vote count where -1 means "not counted yet".
pub fn vote_count_from_sentinel(value: i64) -> PoliticsResult<Option<u32>> {
    match value {
        -1 => Ok(None),
        x if x < -1 => invalid_argument("votes", format!("{} is not a vote count", x)),
        x => match u32::try_from(x) {
            Ok(v) => Ok(Some(v)),
            Err(_) => invalid_argument("votes", format!("{} votes is out of range", x)),
        },
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliticalParty {
    pub id: u32,
    pub name: String,
    pub party_url: Option<Url>,
}

impl PoliticalParty {
    pub fn new(id: u32, name: &str) -> PoliticalParty {
        PoliticalParty {
            id,
            name: name.to_string(),
            party_url: None,
        }
    }
}

/// A fixed geographic area electing one or two councillors.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectoralDivision {
    pub id: u32,
    pub name: String,
    pub seats: Seats,
    /// Folder holding the division's pages, also used in councillor links.
    pub folder_name: Option<String>,
    pub district_name: Option<String>,
    pub district_url: Option<Url>,
    pub division_url: Option<Url>,
}

impl ElectoralDivision {
    pub fn new(name: &str, seats: Seats) -> ElectoralDivision {
        ElectoralDivision {
            name: name.to_string(),
            seats,
            ..Default::default()
        }
    }

    /// The division name reduced to lowercase letters, for use as a page anchor.
    pub fn xhtml_id(&self) -> String {
        self.name
            .to_lowercase()
            .replace(' ', "")
            .replace(',', "")
            .replace('.', "")
            .replace('\'', "")
            .replace("&amp;", "")
            .replace('&', "")
    }
}

/// A person standing in a poll.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCandidate {
    pub name: PersonName,
    pub party: PoliticalParty,
    /// `None` until the votes have been counted.
    pub votes: Option<u32>,
    /// Only written by `Poll::calculate_winner`.
    pub won_seat: bool,
}

impl ElectionCandidate {
    pub fn new(name: PersonName, party: PoliticalParty, votes: Option<u32>) -> ElectionCandidate {
        ElectionCandidate {
            name,
            party,
            votes,
            won_seat: false,
        }
    }
}

/// The contest in one electoral division, usually part of a wider election.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub electoral_division: ElectoralDivision,
    /// Overrides the division's seats for a by-election.
    pub by_election_seats: Option<Seats>,
    pub election_date: Option<NaiveDate>,
    pub poll_url: Option<Url>,
    /// In the order they were added, which decides ties.
    pub candidates: Vec<ElectionCandidate>,
    /// Registered voters.
    pub possible_votes: Option<u32>,
    /// Ballots cast.
    pub actual_votes: Option<u32>,
    pub last_updated: Option<NaiveDateTime>,
}

impl Poll {
    pub fn new(division: ElectoralDivision) -> Poll {
        Poll {
            electoral_division: division,
            by_election_seats: None,
            election_date: None,
            poll_url: None,
            candidates: Vec::new(),
            possible_votes: None,
            actual_votes: None,
            last_updated: None,
        }
    }

    /// The number of seats being filled by this poll.
    pub fn seats(&self) -> Seats {
        self.by_election_seats
            .unwrap_or(self.electoral_division.seats)
    }

    pub fn add_candidate(&mut self, candidate: ElectionCandidate) {
        self.candidates.push(candidate);
    }

    pub fn winners(&self) -> impl Iterator<Item = &ElectionCandidate> {
        self.candidates.iter().filter(|c| c.won_seat)
    }
}
