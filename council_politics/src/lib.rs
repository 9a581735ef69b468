/*!
Council politics: committees, councillors, meetings and surgeries of a local authority,
and the results of the polls that elect its councillors.

The part with real logic is the result calculation for a [`Poll`]: who wins the seats
of an electoral division, the turnout, each candidate's share of the vote and a sentence
saying which parties won.

```
use council_politics::builder::PollBuilder;
use council_politics::{ElectoralDivision, Seats};
# use council_politics::PoliticsError;

let mut poll = PollBuilder::new(ElectoralDivision::new("Rye", Seats::One))
    .electorate(Some(10000), Some(4567))
    .candidate("Anne Baker", "Independents", Some(2500))
    .candidate("Colin Dale", "Labour", Some(2067))
    .build();

poll.calculate_winner();
assert_eq!(poll.winning_party_names(), "Independents win.");
assert_eq!(poll.turnout()?, 45.7);
# Ok::<(), PoliticsError>(())
```
*/

pub mod builder;
mod council;
mod election;
mod error;
pub mod links;
pub mod manual;
mod meeting;
pub mod ordering;
pub mod store;

use log::{debug, info};

use crate::error::{invalid_argument, InvalidOperationSnafu};

pub use crate::council::*;
pub use crate::election::*;
pub use crate::error::*;
pub use crate::meeting::*;

/// Turnout as a percentage of the electorate, rounded to one decimal place.
///
/// Fails with `InvalidOperation` when there is no electorate to divide by.
pub fn compute_turnout(possible_votes: i64, actual_votes: i64) -> PoliticsResult<f64> {
    if possible_votes <= 0 {
        return InvalidOperationSnafu {
            message: format!(
                "turnout needs a positive number of possible votes, got {}",
                possible_votes
            ),
        }
        .fail();
    }
    if actual_votes < 0 {
        return InvalidOperationSnafu {
            message: "turnout needs the number of votes cast".to_string(),
        }
        .fail();
    }
    Ok(percent_one_decimal(actual_votes, possible_votes))
}

/// A candidate's share of the votes cast in the division, rounded to one decimal place.
pub fn compute_candidate_percentage(votes: i64, division_actual_votes: i64) -> PoliticsResult<f64> {
    if division_actual_votes <= 0 {
        return invalid_argument(
            "division_actual_votes",
            "votes for division must be greater than 0",
        );
    }
    if votes < 0 {
        return invalid_argument("votes", "the candidate's votes have not been counted");
    }
    Ok(percent_one_decimal(votes, division_actual_votes))
}

// Rounds part / whole * 100 to the nearest tenth, halves away from zero.
// Done in integers so that values such as 45.65 are not at the mercy of binary floats.
// i128 holds any i64 times 1000. Requires part >= 0 and whole > 0.
fn percent_one_decimal(part: i64, whole: i64) -> f64 {
    let whole = i128::from(whole);
    let scaled = i128::from(part) * 1000;
    let mut tenths = scaled / whole;
    if 2 * (scaled % whole) >= whole {
        tenths += 1;
    }
    tenths as f64 / 10.0
}

impl ElectionCandidate {
    /// The percentage of the division's votes received by this candidate.
    pub fn percent_of_votes(&self, actual_votes_for_division: i64) -> PoliticsResult<f64> {
        compute_candidate_percentage(
            self.votes.map(i64::from).unwrap_or(-1),
            actual_votes_for_division,
        )
    }
}

impl Poll {
    /// Turnout as a percentage of the electorate, rounded to one decimal place.
    pub fn turnout(&self) -> PoliticsResult<f64> {
        compute_turnout(
            self.possible_votes.map(i64::from).unwrap_or(-1),
            self.actual_votes.map(i64::from).unwrap_or(-1),
        )
    }

    /// Works out which candidates won the seats and sets their `won_seat` flag.
    ///
    /// Candidates are streamed in the order they were added into a slate with one slot
    /// per seat. A newcomer takes the first empty slot; once the slate is full, they
    /// replace the weakest holder (the first one found with the lowest count) only with
    /// strictly more votes. An equal count never displaces an earlier candidate, so the
    /// insertion order breaks ties. Uncounted candidates rank below any counted one.
    ///
    /// Every candidate is reset as it is visited, so running this again gives the same
    /// result.
    pub fn calculate_winner(&mut self) {
        let seats = self.seats().count();
        let mut slate: Vec<Option<usize>> = vec![None; seats];

        for idx in 0..self.candidates.len() {
            if let Some(slot) = slate.iter_mut().find(|s| s.is_none()) {
                debug!(
                    "calculate_winner: {} takes an empty slot",
                    self.candidates[idx].name
                );
                *slot = Some(idx);
            } else if let Some((lowest_slot, lowest_votes)) =
                lowest_slot(&slate, &self.candidates)
            {
                if self.candidates[idx].votes > lowest_votes {
                    debug!(
                        "calculate_winner: {} ({:?}) displaces slot {} ({:?})",
                        self.candidates[idx].name,
                        self.candidates[idx].votes,
                        lowest_slot,
                        lowest_votes
                    );
                    slate[lowest_slot] = Some(idx);
                }
            }

            self.candidates[idx].won_seat = false;
        }

        for idx in slate.into_iter().flatten() {
            self.candidates[idx].won_seat = true;
        }
        info!(
            "Poll in {}: winners {:?}",
            self.electoral_division.name,
            self.winners()
                .map(|c| c.name.to_string())
                .collect::<Vec<String>>()
        );
    }

    /// Says which party or parties won the division, and how multiple seats were shared.
    ///
    /// Parties are listed once each, separated by `/`, in the order their first winning
    /// candidate was added: `Labour win (two seats).`, `Green/Labour win (one seat each).`
    pub fn winning_party_names(&self) -> String {
        let mut parties_done: Vec<u32> = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for cand in self.winners() {
            if !parties_done.contains(&cand.party.id) {
                parties_done.push(cand.party.id);
                names.push(cand.party.name.as_str());
            }
        }

        let mut sentence = names.join("/");
        sentence.push_str(" win");
        if self.seats() == Seats::Two {
            if parties_done.len() == 1 {
                sentence.push_str(" (two seats)");
            } else {
                sentence.push_str(" (one seat each)");
            }
        }
        sentence.push('.');
        sentence
    }
}

// The first slot holding the fewest votes. Only called on a full slate.
fn lowest_slot(
    slate: &[Option<usize>],
    candidates: &[ElectionCandidate],
) -> Option<(usize, Option<u32>)> {
    let mut lowest: Option<(usize, Option<u32>)> = None;
    for (slot, holder) in slate.iter().enumerate() {
        if let Some(idx) = holder {
            let votes = candidates[*idx].votes;
            match lowest {
                Some((_, lowest_votes)) if votes >= lowest_votes => {}
                _ => lowest = Some((slot, votes)),
            }
        }
    }
    lowest
}

#[cfg(test)]
mod tests {
    use super::builder::PollBuilder;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn poll_with(seats: Seats, candidates: &[(&str, &str, u32)]) -> Poll {
        let mut builder = PollBuilder::new(ElectoralDivision::new("Test Division", seats));
        for (name, party, votes) in candidates {
            builder = builder.candidate(name, party, Some(*votes));
        }
        builder.build()
    }

    fn winner_names(poll: &Poll) -> Vec<String> {
        poll.winners().map(|c| c.name.to_string()).collect()
    }

    #[test]
    fn single_seat_clear_winner() {
        init();
        let mut poll = poll_with(
            Seats::One,
            &[("A", "P1", 120), ("B", "P2", 80), ("C", "P3", 40)],
        );
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A"]);
    }

    #[test]
    fn by_election_overrides_division_seats() {
        init();
        let mut poll = poll_with(
            Seats::One,
            &[("A", "P1", 50), ("B", "P2", 40), ("C", "P3", 30), ("D", "P4", 20)],
        );
        poll.by_election_seats = Some(Seats::Two);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A", "B"]);
    }

    #[test]
    fn by_election_can_fill_fewer_seats() {
        let mut poll = poll_with(Seats::Two, &[("A", "P1", 50), ("B", "P2", 40)]);
        poll.by_election_seats = Some(Seats::One);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A"]);
        assert_eq!(poll.winning_party_names(), "P1 win.");
    }

    #[test]
    fn equal_votes_keep_the_earlier_candidate() {
        let mut poll = poll_with(Seats::One, &[("A", "P1", 50), ("B", "P2", 50)]);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A"]);

        // Reversing the insertion order reverses the outcome.
        let mut poll = poll_with(Seats::One, &[("B", "P2", 50), ("A", "P1", 50)]);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["B"]);
    }

    #[test]
    fn tie_among_slot_holders_replaces_the_first_slot() {
        // A and B both hold 40 votes; C displaces the first of them found (A).
        let mut poll = poll_with(
            Seats::Two,
            &[("A", "P1", 40), ("B", "P2", 40), ("C", "P3", 45)],
        );
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["B", "C"]);
    }

    #[test]
    fn later_stronger_candidates_displace_earlier_ones() {
        let mut poll = poll_with(
            Seats::Two,
            &[("A", "P1", 10), ("B", "P2", 20), ("C", "P3", 30), ("D", "P4", 40)],
        );
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["C", "D"]);
    }

    #[test]
    fn fewer_candidates_than_seats() {
        let mut poll = poll_with(Seats::Two, &[("A", "P1", 10)]);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A"]);

        let mut empty = poll_with(Seats::Two, &[]);
        empty.calculate_winner();
        assert_eq!(empty.winners().count(), 0);
    }

    #[test]
    fn no_winners_names_no_party() {
        let mut empty = poll_with(Seats::One, &[]);
        empty.calculate_winner();
        assert_eq!(empty.winning_party_names(), " win.");
    }

    #[test]
    fn recalculating_clears_previous_winners() {
        let mut poll = poll_with(Seats::One, &[("A", "P1", 50), ("B", "P2", 40)]);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["A"]);

        poll.candidates[1].votes = Some(60);
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["B"]);
        assert!(!poll.candidates[0].won_seat);
    }

    #[test]
    fn uncounted_candidates_rank_below_counted_ones() {
        let mut poll = PollBuilder::new(ElectoralDivision::new("Test", Seats::One))
            .candidate("A", "P1", None)
            .candidate("B", "P2", Some(0))
            .build();
        poll.calculate_winner();
        assert_eq!(winner_names(&poll), vec!["B"]);
    }

    #[test]
    fn turnout_is_rounded_to_one_decimal() {
        assert_eq!(compute_turnout(10000, 4567).unwrap(), 45.7);
        assert_eq!(compute_turnout(3, 1).unwrap(), 33.3);
        assert_eq!(compute_turnout(3, 2).unwrap(), 66.7);
        assert_eq!(compute_turnout(100, 0).unwrap(), 0.0);
        assert_eq!(compute_turnout(100, 100).unwrap(), 100.0);
    }

    #[test]
    fn halves_round_away_from_zero() {
        // 45.65% and 45.75% exactly
        assert_eq!(compute_turnout(2000, 913).unwrap(), 45.7);
        assert_eq!(compute_turnout(2000, 915).unwrap(), 45.8);
        // 0.05% exactly
        assert_eq!(compute_candidate_percentage(1, 2000).unwrap(), 0.1);
        // just under a half
        assert_eq!(compute_candidate_percentage(9129, 20000).unwrap(), 45.6);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        assert_eq!(
            compute_candidate_percentage(10_000_000_000_000_000, 20_000_000_000_000_000).unwrap(),
            50.0
        );
        assert_eq!(compute_turnout(i64::MAX, i64::MAX).unwrap(), 100.0);
        assert_eq!(compute_turnout(i64::MAX, i64::MAX / 3).unwrap(), 33.3);
    }

    #[test]
    fn turnout_without_electorate_is_an_invalid_operation() {
        assert!(matches!(
            compute_turnout(0, 10),
            Err(PoliticsError::InvalidOperation { .. })
        ));
        assert!(matches!(
            compute_turnout(-1, 10),
            Err(PoliticsError::InvalidOperation { .. })
        ));
        let poll = poll_with(Seats::One, &[]);
        assert!(matches!(
            poll.turnout(),
            Err(PoliticsError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn candidate_percentage_needs_votes_cast() {
        assert!(matches!(
            compute_candidate_percentage(10, 0),
            Err(PoliticsError::InvalidArgument { .. })
        ));
        assert!(matches!(
            compute_candidate_percentage(10, -5),
            Err(PoliticsError::InvalidArgument { .. })
        ));
        assert_eq!(compute_candidate_percentage(600, 3000).unwrap(), 20.0);

        let uncounted = ElectionCandidate::new(
            PersonName::parse("Jo Bloggs"),
            PoliticalParty::new(1, "P1"),
            None,
        );
        assert!(matches!(
            uncounted.percent_of_votes(100),
            Err(PoliticsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn winning_party_single_seat() {
        let mut poll = poll_with(Seats::One, &[("A", "Independents", 500), ("B", "P2", 10)]);
        poll.calculate_winner();
        assert_eq!(poll.winning_party_names(), "Independents win.");
    }

    #[test]
    fn winning_parties_one_seat_each() {
        let mut poll = poll_with(
            Seats::Two,
            &[("A", "PartyX", 500), ("B", "PartyY", 400), ("C", "PartyX", 10)],
        );
        poll.calculate_winner();
        assert_eq!(poll.winning_party_names(), "PartyX/PartyY win (one seat each).");
    }

    #[test]
    fn winning_party_two_seats() {
        let mut poll = poll_with(
            Seats::Two,
            &[("A", "Labour", 500), ("B", "Green", 100), ("C", "Labour", 400)],
        );
        poll.calculate_winner();
        assert_eq!(poll.winning_party_names(), "Labour win (two seats).");
    }

    #[test]
    fn winning_party_order_follows_candidates() {
        let mut poll = poll_with(
            Seats::Two,
            &[("A", "PartyY", 10), ("B", "PartyX", 500), ("C", "PartyY", 400)],
        );
        poll.calculate_winner();
        assert_eq!(poll.winning_party_names(), "PartyX/PartyY win (one seat each).");
    }

    #[test]
    fn division_xhtml_id() {
        let d = ElectoralDivision::new("Crowborough North & Jarvis Brook", Seats::One);
        assert_eq!(d.xhtml_id(), "crowboroughnorthjarvisbrook");
        let d = ElectoralDivision::new("St. Leonard's, Ore &amp; Hollington", Seats::Two);
        assert_eq!(d.xhtml_id(), "stleonardsorehollington");
    }

    #[test]
    fn seat_values_outside_one_or_two_are_rejected() {
        assert_eq!(Seats::try_from(2).unwrap(), Seats::Two);
        assert_eq!(Seats::default(), Seats::One);
        assert_eq!(ElectoralDivision::default().seats, Seats::One);
        assert!(Seats::try_from(3).is_err());
        assert!(Seats::try_from(0).is_err());
        assert_eq!(Seats::by_election_from_sentinel(-1).unwrap(), None);
        assert!(Seats::by_election_from_sentinel(-2).is_err());
        let parsed: Result<ElectoralDivision, _> =
            serde_json::from_str(r#"{"id":1,"name":"X","seats":3,"folder_name":null,"district_name":null,"district_url":null,"division_url":null}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn vote_sentinels() {
        assert_eq!(vote_count_from_sentinel(-1).unwrap(), None);
        assert_eq!(vote_count_from_sentinel(0).unwrap(), Some(0));
        assert!(vote_count_from_sentinel(-2).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn candidates_strategy() -> impl Strategy<Value = Vec<Option<u32>>> {
            proptest::collection::vec(proptest::option::weighted(0.9, 0u32..200), 0..8)
        }

        fn poll_from(seats: Seats, votes: &[Option<u32>]) -> Poll {
            let mut builder = PollBuilder::new(ElectoralDivision::new("Prop", seats));
            for (i, v) in votes.iter().enumerate() {
                builder = builder.candidate(&format!("C{}", i), &format!("P{}", i % 3), *v);
            }
            builder.build()
        }

        proptest! {
            #[test]
            fn turnout_stays_in_range(possible in 1i64..1_000_000, frac in 0.0f64..=1.0) {
                let actual = ((possible as f64) * frac).floor() as i64;
                let t = compute_turnout(possible, actual).unwrap();
                prop_assert!((0.0..=100.0).contains(&t));
                prop_assert_eq!((t * 10.0).round() / 10.0, t);
            }

            #[test]
            fn seat_count_matches(votes in candidates_strategy(), two in any::<bool>()) {
                let seats = if two { Seats::Two } else { Seats::One };
                let mut poll = poll_from(seats, &votes);
                poll.calculate_winner();
                prop_assert_eq!(poll.winners().count(), seats.count().min(votes.len()));
            }

            #[test]
            fn calculate_winner_is_idempotent(votes in candidates_strategy(), two in any::<bool>()) {
                let seats = if two { Seats::Two } else { Seats::One };
                let mut poll = poll_from(seats, &votes);
                poll.calculate_winner();
                let first: Vec<bool> = poll.candidates.iter().map(|c| c.won_seat).collect();
                poll.calculate_winner();
                let second: Vec<bool> = poll.candidates.iter().map(|c| c.won_seat).collect();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn no_loser_outpolls_a_winner(votes in candidates_strategy(), two in any::<bool>()) {
                let seats = if two { Seats::Two } else { Seats::One };
                let mut poll = poll_from(seats, &votes);
                poll.calculate_winner();
                let weakest_winner = poll.winners().map(|c| c.votes).min();
                if let Some(weakest) = weakest_winner {
                    for c in poll.candidates.iter().filter(|c| !c.won_seat) {
                        prop_assert!(c.votes <= weakest);
                    }
                }
            }
        }
    }
}
