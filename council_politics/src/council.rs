// ********* Council data structures ***********

use std::fmt::Display;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::election::{ElectoralDivision, PoliticalParty};
use crate::meeting::Surgery;

/// The name of a person, split into its parts.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonName {
    pub titles: Vec<String>,
    pub given_names: Vec<String>,
    pub family_name: String,
    pub suffixes: Vec<String>,
}

impl PersonName {
    /// Splits a display name: the last word is the family name, the others are given names.
    pub fn parse(name: &str) -> PersonName {
        let mut words: Vec<String> = name.split_whitespace().map(|w| w.to_string()).collect();
        let family_name = words.pop().unwrap_or_default();
        PersonName {
            titles: Vec::new(),
            given_names: words,
            family_name,
            suffixes: Vec::new(),
        }
    }

    /// Titles, first given name, family name and suffixes.
    pub fn full_name(&self) -> String {
        match self.given_names.first() {
            Some(first) => join_words(
                self.titles
                    .iter()
                    .chain(std::iter::once(first))
                    .chain(std::iter::once(&self.family_name))
                    .chain(self.suffixes.iter()),
            ),
            None => self.to_string(),
        }
    }

    /// "Family, Given Names", as used in alphabetical lists.
    pub fn name_reversed(&self) -> String {
        format!("{}, {}", self.family_name, self.given_names.join(" "))
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = join_words(
            self.titles
                .iter()
                .chain(self.given_names.iter())
                .chain(std::iter::once(&self.family_name))
                .chain(self.suffixes.iter()),
        );
        write!(f, "{}", s)
    }
}

fn join_words<'a>(words: impl Iterator<Item = &'a String>) -> String {
    words
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// A postal address with BS7666 fields.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub id: Option<u32>,
    /// Secondary addressable object, e.g. a flat or a room.
    pub saon: String,
    /// Primary addressable object, e.g. a house name or number.
    pub paon: String,
    pub street: String,
    pub locality: String,
    pub town: String,
    pub administrative_area: String,
    pub postcode: String,
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = [
            &self.saon,
            &self.paon,
            &self.street,
            &self.locality,
            &self.town,
            &self.administrative_area,
            &self.postcode,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CommitteeType {
    Other,
    Scrutiny,
    PanelBoardOrForum,
    /// Only meaningful as a filter.
    AllTypes,
}

impl CommitteeType {
    /// Guesses the type of a committee from its name.
    pub fn from_committee_name(name: &str) -> CommitteeType {
        lazy_static! {
            static ref SCRUTINY_RX: Regex = Regex::new(r"(?i)\bscrutiny\b").unwrap();
            static ref PANEL_RX: Regex = Regex::new(r"(?i)\b(panel|board|forum)\b").unwrap();
        }
        if SCRUTINY_RX.is_match(name) {
            CommitteeType::Scrutiny
        } else if PANEL_RX.is_match(name) {
            CommitteeType::PanelBoardOrForum
        } else {
            CommitteeType::Other
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Committee {
    pub id: u32,
    pub name: String,
    /// When not set, the type is guessed from the name.
    pub committee_type: Option<CommitteeType>,
    pub description: Option<String>,
    /// Some committees meet in private, for example on adoption cases.
    pub confidential: bool,
    pub navigate_url: Option<Url>,
    pub meeting_papers_url: Option<Url>,
    pub navigate_url_external: Option<Url>,
    pub membership_approved: Option<NaiveDate>,
    pub usual_meeting_venue: Option<Address>,
    pub members: Vec<CommitteeMembership>,
}

impl Committee {
    pub fn new(name: &str) -> Committee {
        Committee {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn committee_type(&self) -> CommitteeType {
        self.committee_type
            .unwrap_or_else(|| CommitteeType::from_committee_name(&self.name))
    }

    pub fn summary(&self) -> CommitteeSummary {
        CommitteeSummary {
            id: self.id,
            name: self.name.clone(),
            confidential: self.confidential,
            navigate_url: self.navigate_url.clone(),
            meeting_papers_url: self.meeting_papers_url.clone(),
        }
    }
}

/// The part of a committee carried by its meetings and memberships.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitteeSummary {
    pub id: u32,
    pub name: String,
    pub confidential: bool,
    pub navigate_url: Option<Url>,
    pub meeting_papers_url: Option<Url>,
}

/// Anyone sitting on a committee, councillor or not.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub id: u32,
    pub name: PersonName,
    pub navigate_url: Option<Url>,
    pub personal_website_url: Option<Url>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Councillor,
    /// Co-opted from outside the council.
    CoOpted,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeMembership {
    pub member: CommitteeMember,
    pub kind: MemberKind,
    pub role: Option<String>,
    pub committee: CommitteeSummary,
}

impl CommitteeMembership {
    /// "Committee (Role)", or the committee name alone.
    pub fn membership_text(&self) -> String {
        with_role(&self.committee.name, &self.role)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouncillorAffiliation {
    pub councillor_id: u32,
    pub role: Option<String>,
    pub organisation_name: String,
    pub organisation_id: u32,
}

impl CouncillorAffiliation {
    pub fn affiliation_text(&self) -> String {
        with_role(&self.organisation_name, &self.role)
    }
}

fn with_role(name: &str, role: &Option<String>) -> String {
    match role.as_deref() {
        Some(r) if !r.is_empty() => format!("{} ({})", name, r),
        _ => name.to_string(),
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PhoneUsage {
    Home,
    Work,
    Mobile,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phones: Vec<(PhoneUsage, String)>,
    pub emails: Vec<String>,
    pub fax: Vec<String>,
}

/// A question on the register of interests, with its answer.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Question {
    pub id: Option<u32>,
    pub reference: Option<String>,
    pub subject: Option<String>,
    pub text: String,
    pub answer: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Councillor {
    pub member: CommitteeMember,
    pub home_address: Option<Address>,
    pub work_address: Option<Address>,
    pub interests: Option<String>,
    pub affiliations: Vec<CouncillorAffiliation>,
    pub committees: Vec<CommitteeMembership>,
    pub date_elected: Option<NaiveDate>,
    pub image_url: Option<Url>,
    pub party: Option<PoliticalParty>,
    pub electoral_division: Option<ElectoralDivision>,
    /// Positions held on the council, such as "Chairman".
    pub council_status: Vec<String>,
    pub financial_interests: Vec<Question>,
    pub financial_interests_of_partner: Vec<Question>,
    pub financial_interests_url: Option<Url>,
    pub surgery_dates: Vec<Surgery>,
    pub contact: ContactDetails,
}

impl Councillor {
    pub fn new(id: u32, mut name: PersonName) -> Councillor {
        if !name.titles.iter().any(|t| t == "Councillor") {
            name.titles.insert(0, "Councillor".to_string());
        }
        Councillor {
            member: CommitteeMember {
                id,
                name,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn id(&self) -> u32 {
        self.member.id
    }

    pub fn full_name(&self) -> String {
        self.member.name.full_name()
    }

    pub fn name_reversed(&self) -> String {
        self.member.name.name_reversed()
    }

    /// A membership of this councillor on the given committee.
    pub fn membership(&self, committee: &Committee, role: Option<&str>) -> CommitteeMembership {
        CommitteeMembership {
            member: self.member.clone(),
            kind: MemberKind::Councillor,
            role: role.map(|r| r.to_string()),
            committee: committee.summary(),
        }
    }
}

/// A parish within an electoral division.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parish {
    pub name: String,
    /// Set when only part of the parish lies in the division.
    pub partially_represented: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CouncillorSortOrder {
    ElectoralDivision,
    CouncillorName,
    Party,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committee_type_from_name() {
        assert_eq!(
            Committee::new("Audit, Best Value and Community Services Scrutiny Committee")
                .committee_type(),
            CommitteeType::Scrutiny
        );
        assert_eq!(
            Committee::new("Health and Wellbeing Board").committee_type(),
            CommitteeType::PanelBoardOrForum
        );
        assert_eq!(
            Committee::new("Schools Forum").committee_type(),
            CommitteeType::PanelBoardOrForum
        );
        assert_eq!(Committee::new("Cabinet").committee_type(), CommitteeType::Other);
        // whole words only
        assert_eq!(
            Committee::new("Keyboard Skills Group").committee_type(),
            CommitteeType::Other
        );
        let mut c = Committee::new("Cabinet");
        c.committee_type = Some(CommitteeType::Scrutiny);
        assert_eq!(c.committee_type(), CommitteeType::Scrutiny);
    }

    #[test]
    fn councillor_names() {
        let mut name = PersonName::parse("Mary Ann Smith");
        name.suffixes.push("MBE".to_string());
        let cllr = Councillor::new(7, name);
        assert_eq!(cllr.full_name(), "Councillor Mary Smith MBE");
        assert_eq!(cllr.name_reversed(), "Smith, Mary Ann");
        assert_eq!(cllr.member.name.to_string(), "Councillor Mary Ann Smith MBE");
    }

    #[test]
    fn full_name_without_given_names() {
        let name = PersonName {
            titles: vec!["Lord".to_string()],
            family_name: "Smith".to_string(),
            ..Default::default()
        };
        assert_eq!(name.full_name(), "Lord Smith");
    }

    #[test]
    fn membership_and_affiliation_text() {
        let cllr = Councillor::new(1, PersonName::parse("Jo Bloggs"));
        let committee = Committee::new("Cabinet");
        assert_eq!(
            cllr.membership(&committee, Some("Chair")).membership_text(),
            "Cabinet (Chair)"
        );
        assert_eq!(cllr.membership(&committee, Some("")).membership_text(), "Cabinet");
        let affiliation = CouncillorAffiliation {
            councillor_id: 1,
            role: None,
            organisation_name: "Fire Authority".to_string(),
            organisation_id: 3,
        };
        assert_eq!(affiliation.affiliation_text(), "Fire Authority");
    }

    #[test]
    fn address_display_skips_empty_parts() {
        let address = Address {
            paon: "County Hall".to_string(),
            street: "St Anne's Crescent".to_string(),
            town: "Lewes".to_string(),
            postcode: "BN7 1UE".to_string(),
            ..Default::default()
        };
        assert_eq!(
            address.to_string(),
            "County Hall, St Anne's Crescent, Lewes, BN7 1UE"
        );
    }
}
