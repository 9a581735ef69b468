use crate::council::PersonName;
use crate::election::*;
use crate::error::PoliticsResult;

/// A builder for assembling a poll from plain names and counts.
///
/// Parties are given by name; candidates of the same party share one party record
/// (and id), in order of first appearance.
///
/// ```
/// use council_politics::builder::PollBuilder;
/// use council_politics::{ElectoralDivision, Seats};
/// # use council_politics::PoliticsError;
///
/// let poll = PollBuilder::new(ElectoralDivision::new("Hastings Old Town", Seats::Two))
///     .candidate("Gill Hart", "Labour", Some(2100))
///     .candidate("Ian Jones", "Green", None)
///     .candidate_raw("Kate Lowe", "Labour", -1)?
///     .build();
///
/// assert_eq!(poll.candidates.len(), 3);
/// # Ok::<(), PoliticsError>(())
/// ```
pub struct PollBuilder {
    pub(crate) _poll: Poll,
    pub(crate) _parties: Vec<PoliticalParty>,
}

impl PollBuilder {
    pub fn new(division: ElectoralDivision) -> PollBuilder {
        PollBuilder {
            _poll: Poll::new(division),
            _parties: Vec::new(),
        }
    }

    pub fn by_election_seats(self, seats: Option<Seats>) -> PollBuilder {
        let mut poll = self._poll;
        poll.by_election_seats = seats;
        PollBuilder {
            _poll: poll,
            _parties: self._parties,
        }
    }

    /// Registered voters and ballots cast, when known.
    pub fn electorate(self, possible_votes: Option<u32>, actual_votes: Option<u32>) -> PollBuilder {
        let mut poll = self._poll;
        poll.possible_votes = possible_votes;
        poll.actual_votes = actual_votes;
        PollBuilder {
            _poll: poll,
            _parties: self._parties,
        }
    }

    /// Registers a party up front, to keep its id.
    pub fn party(mut self, party: PoliticalParty) -> PollBuilder {
        if !self._parties.iter().any(|p| p.name == party.name) {
            self._parties.push(party);
        }
        self
    }

    /// Adds a candidate. `votes` is `None` when the count is not known yet.
    pub fn candidate(mut self, name: &str, party_name: &str, votes: Option<u32>) -> PollBuilder {
        let party = self.party_named(party_name);
        self._poll
            .add_candidate(ElectionCandidate::new(PersonName::parse(name), party, votes));
        self
    }

    /// Adds a candidate using the -1 convention for uncounted votes.
    pub fn candidate_raw(self, name: &str, party_name: &str, votes: i64) -> PoliticsResult<PollBuilder> {
        let votes = vote_count_from_sentinel(votes)?;
        Ok(self.candidate(name, party_name, votes))
    }

    pub fn build(self) -> Poll {
        self._poll
    }

    fn party_named(&mut self, name: &str) -> PoliticalParty {
        if let Some(p) = self._parties.iter().find(|p| p.name == name) {
            return p.clone();
        }
        let id = self._parties.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let party = PoliticalParty::new(id, name);
        self._parties.push(party.clone());
        party
    }
}
