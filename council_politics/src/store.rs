//! Reading and writing council records.
//!
//! [`PoliticsStore`] is the gateway used by the rest of the system: one method per kind
//! of read or write, with query records instead of positional parameters.
//! [`MemoryStore`] keeps everything in memory and can be saved to, and loaded from,
//! a JSON snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::council::*;
use crate::election::ElectoralDivision;
use crate::error::{not_found, PoliticsResult, SnapshotFormatSnafu, SnapshotIoSnafu};
use crate::links::{meeting_papers_due, meeting_papers_url};
use crate::meeting::{CommitteeMeeting, MeetingStatus, Surgery};
use crate::ordering::sort_by_sort_key;

/// Which committee meetings to read.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MeetingQuery {
    /// `None` for all committees.
    pub committee_id: Option<u32>,
    /// Only meetings on or after this day.
    pub from_date: Option<NaiveDate>,
    /// The day used to decide whether papers are published. Defaults to today.
    pub as_of: Option<NaiveDate>,
}

/// Which surgeries to read.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SurgeryQuery {
    pub councillor_id: Option<u32>,
    pub from_date: Option<NaiveDate>,
}

/// Access to the council's records.
///
/// Saving a record with id 0 inserts it and returns its new id; any other id updates the
/// existing record, or fails with `NotFound`.
pub trait PoliticsStore {
    fn committee(&self, id: u32) -> PoliticsResult<Option<Committee>>;
    fn committee_by_name(&self, name: &str) -> PoliticsResult<Option<Committee>>;
    /// Sorted by name. `CommitteeType::AllTypes` reads every committee.
    fn committees(&self, committee_type: CommitteeType) -> PoliticsResult<Vec<Committee>>;
    fn save_committee(&mut self, committee: &Committee) -> PoliticsResult<u32>;
    fn delete_committee(&mut self, id: u32) -> PoliticsResult<()>;

    fn venues(&self) -> PoliticsResult<Vec<Address>>;
    fn venue(&self, id: u32) -> PoliticsResult<Option<Address>>;
    fn save_venue(&mut self, venue: &Address) -> PoliticsResult<u32>;
    fn delete_venue(&mut self, id: u32) -> PoliticsResult<()>;

    /// Sorted by date.
    fn meetings(&self, query: &MeetingQuery) -> PoliticsResult<Vec<CommitteeMeeting>>;
    fn save_meeting(&mut self, meeting: &CommitteeMeeting) -> PoliticsResult<u32>;
    fn save_meeting_status(&mut self, meeting_id: u32, status: MeetingStatus) -> PoliticsResult<()>;
    fn delete_meeting(&mut self, id: u32) -> PoliticsResult<()>;

    fn councillors(&self, order: CouncillorSortOrder) -> PoliticsResult<Vec<Councillor>>;
    fn councillor(&self, id: u32) -> PoliticsResult<Option<Councillor>>;
    fn save_councillor(&mut self, councillor: &Councillor) -> PoliticsResult<u32>;
    fn delete_councillor(&mut self, id: u32) -> PoliticsResult<()>;

    fn add_membership(&mut self, membership: &CommitteeMembership) -> PoliticsResult<()>;
    fn remove_membership(&mut self, membership: &CommitteeMembership) -> PoliticsResult<()>;

    fn add_affiliation(&mut self, affiliation: &CouncillorAffiliation) -> PoliticsResult<()>;
    fn remove_affiliation(&mut self, affiliation: &CouncillorAffiliation) -> PoliticsResult<()>;

    fn electoral_divisions(&self) -> PoliticsResult<Vec<ElectoralDivision>>;
    fn parishes_in_division(&self, division_id: u32) -> PoliticsResult<Vec<Parish>>;

    /// Sorted by date.
    fn surgeries(&self, query: &SurgeryQuery) -> PoliticsResult<Vec<Surgery>>;
    fn save_surgery(&mut self, surgery: &Surgery) -> PoliticsResult<u32>;
    fn save_surgery_status(&mut self, surgery_id: u32, status: MeetingStatus) -> PoliticsResult<()>;
    fn delete_surgery(&mut self, id: u32) -> PoliticsResult<()>;
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    committees: BTreeMap<u32, Committee>,
    venues: BTreeMap<u32, Address>,
    meetings: BTreeMap<u32, CommitteeMeeting>,
    councillors: BTreeMap<u32, Councillor>,
    divisions: BTreeMap<u32, ElectoralDivision>,
    parishes: BTreeMap<u32, Vec<Parish>>,
    surgeries: BTreeMap<u32, Surgery>,
}

fn next_id<V>(map: &BTreeMap<u32, V>) -> u32 {
    map.keys().next_back().map(|k| k + 1).unwrap_or(1)
}

fn same_member(a: &CommitteeMembership, b: &CommitteeMembership) -> bool {
    a.committee.id == b.committee.id && a.member.id == b.member.id && a.kind == b.kind
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn load(path: &Path) -> PoliticsResult<MemoryStore> {
        let p = path.display().to_string();
        let contents = fs::read_to_string(path).context(SnapshotIoSnafu { path: p.clone() })?;
        let store: MemoryStore =
            serde_json::from_str(&contents).context(SnapshotFormatSnafu { path: p.clone() })?;
        info!(
            "Loaded snapshot {}: {} committees, {} councillors, {} divisions",
            p,
            store.committees.len(),
            store.councillors.len(),
            store.divisions.len()
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> PoliticsResult<()> {
        let p = path.display().to_string();
        let js = serde_json::to_string_pretty(self).context(SnapshotFormatSnafu { path: p.clone() })?;
        fs::write(path, js).context(SnapshotIoSnafu { path: p })?;
        Ok(())
    }

    /// Adds or replaces a division. Id 0 assigns a new id.
    pub fn insert_division(&mut self, division: &ElectoralDivision) -> u32 {
        let id = match division.id {
            0 => next_id(&self.divisions),
            x => x,
        };
        let mut stored = division.clone();
        stored.id = id;
        self.divisions.insert(id, stored);
        id
    }

    pub fn insert_parish(&mut self, division_id: u32, parish: Parish) -> PoliticsResult<()> {
        if !self.divisions.contains_key(&division_id) {
            return not_found("electoral division", division_id);
        }
        self.parishes.entry(division_id).or_default().push(parish);
        Ok(())
    }

    fn fresh_membership(&self, membership: &CommitteeMembership) -> CommitteeMembership {
        let mut m = membership.clone();
        if let Some(c) = self.committees.get(&m.committee.id) {
            m.committee = c.summary();
        }
        m
    }

    fn fresh_meeting(&self, meeting: &CommitteeMeeting, today: NaiveDate) -> PoliticsResult<CommitteeMeeting> {
        let mut m = meeting.clone();
        if let Some(c) = self.committees.get(&m.committee.id) {
            m.committee = c.summary();
        }
        if let Some(venue_id) = m.meeting.venue.as_ref().and_then(|v| v.id) {
            if let Some(v) = self.venues.get(&venue_id) {
                m.meeting.venue = Some(v.clone());
            }
        }
        m.meeting_papers_url = if meeting_papers_due(m.meeting.date, today) {
            meeting_papers_url(&m)?
        } else {
            None
        };
        Ok(m)
    }
}

impl PoliticsStore for MemoryStore {
    fn committee(&self, id: u32) -> PoliticsResult<Option<Committee>> {
        Ok(self.committees.get(&id).cloned())
    }

    fn committee_by_name(&self, name: &str) -> PoliticsResult<Option<Committee>> {
        Ok(self
            .committees
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn committees(&self, committee_type: CommitteeType) -> PoliticsResult<Vec<Committee>> {
        let mut res: Vec<Committee> = self
            .committees
            .values()
            .filter(|c| {
                committee_type == CommitteeType::AllTypes || c.committee_type() == committee_type
            })
            .cloned()
            .collect();
        sort_by_sort_key(&mut res);
        Ok(res)
    }

    fn save_committee(&mut self, committee: &Committee) -> PoliticsResult<u32> {
        let mut stored = committee.clone();
        if committee.id == 0 {
            stored.id = next_id(&self.committees);
            stored.members = Vec::new();
            debug!("save_committee: inserting {} as {}", stored.name, stored.id);
        } else {
            // Members change through add_membership and remove_membership only.
            match self.committees.get(&committee.id) {
                Some(existing) => stored.members = existing.members.clone(),
                None => return not_found("committee", committee.id),
            }
        }
        let id = stored.id;
        self.committees.insert(id, stored);
        Ok(id)
    }

    fn delete_committee(&mut self, id: u32) -> PoliticsResult<()> {
        if self.committees.remove(&id).is_none() {
            return not_found("committee", id);
        }
        self.meetings.retain(|_, m| m.committee.id != id);
        for cllr in self.councillors.values_mut() {
            cllr.committees.retain(|m| m.committee.id != id);
        }
        Ok(())
    }

    fn venues(&self) -> PoliticsResult<Vec<Address>> {
        Ok(self.venues.values().cloned().collect())
    }

    fn venue(&self, id: u32) -> PoliticsResult<Option<Address>> {
        Ok(self.venues.get(&id).cloned())
    }

    fn save_venue(&mut self, venue: &Address) -> PoliticsResult<u32> {
        let id = match venue.id {
            None | Some(0) => next_id(&self.venues),
            Some(x) if self.venues.contains_key(&x) => x,
            Some(x) => return not_found("meeting venue", x),
        };
        let mut stored = venue.clone();
        stored.id = Some(id);
        self.venues.insert(id, stored);
        Ok(id)
    }

    fn delete_venue(&mut self, id: u32) -> PoliticsResult<()> {
        match self.venues.remove(&id) {
            Some(_) => Ok(()),
            None => not_found("meeting venue", id),
        }
    }

    fn meetings(&self, query: &MeetingQuery) -> PoliticsResult<Vec<CommitteeMeeting>> {
        let today = query.as_of.unwrap_or_else(|| Local::now().date_naive());
        let mut res: Vec<CommitteeMeeting> = Vec::new();
        for m in self.meetings.values() {
            if query.committee_id.map_or(false, |cid| cid != m.committee.id) {
                continue;
            }
            if query.from_date.map_or(false, |from| m.meeting.day() < from) {
                continue;
            }
            res.push(self.fresh_meeting(m, today)?);
        }
        sort_by_sort_key(&mut res);
        Ok(res)
    }

    fn save_meeting(&mut self, meeting: &CommitteeMeeting) -> PoliticsResult<u32> {
        if !self.committees.contains_key(&meeting.committee.id) {
            return not_found("committee", meeting.committee.id);
        }
        let id = match meeting.meeting.id {
            0 => next_id(&self.meetings),
            x if self.meetings.contains_key(&x) => x,
            x => return not_found("meeting", x),
        };
        let mut stored = meeting.clone();
        stored.meeting.id = id;
        stored.meeting_papers_url = None;
        self.meetings.insert(id, stored);
        Ok(id)
    }

    fn save_meeting_status(&mut self, meeting_id: u32, status: MeetingStatus) -> PoliticsResult<()> {
        match self.meetings.get_mut(&meeting_id) {
            Some(m) => {
                m.meeting.status = status;
                Ok(())
            }
            None => not_found("meeting", meeting_id),
        }
    }

    fn delete_meeting(&mut self, id: u32) -> PoliticsResult<()> {
        match self.meetings.remove(&id) {
            Some(_) => Ok(()),
            None => not_found("meeting", id),
        }
    }

    fn councillors(&self, order: CouncillorSortOrder) -> PoliticsResult<Vec<Councillor>> {
        let mut res: Vec<Councillor> = self.councillors.values().cloned().collect();
        res.sort_by_cached_key(|c| {
            let name = c.name_reversed().to_lowercase();
            let first = match order {
                CouncillorSortOrder::ElectoralDivision => c
                    .electoral_division
                    .as_ref()
                    .map(|d| d.name.to_lowercase())
                    .unwrap_or_default(),
                CouncillorSortOrder::Party => c
                    .party
                    .as_ref()
                    .map(|p| p.name.to_lowercase())
                    .unwrap_or_default(),
                CouncillorSortOrder::CouncillorName => String::new(),
            };
            (first, name)
        });
        Ok(res)
    }

    fn councillor(&self, id: u32) -> PoliticsResult<Option<Councillor>> {
        let mut cllr = match self.councillors.get(&id) {
            Some(c) => c.clone(),
            None => return Ok(None),
        };
        cllr.committees = cllr
            .committees
            .iter()
            .map(|m| self.fresh_membership(m))
            .collect();
        sort_by_sort_key(&mut cllr.committees);
        cllr.surgery_dates = self.surgeries(&SurgeryQuery {
            councillor_id: Some(id),
            from_date: None,
        })?;
        Ok(Some(cllr))
    }

    fn save_councillor(&mut self, councillor: &Councillor) -> PoliticsResult<u32> {
        let mut stored = councillor.clone();
        stored.surgery_dates = Vec::new();
        if councillor.id() == 0 {
            stored.member.id = next_id(&self.councillors);
            stored.committees = Vec::new();
            stored.affiliations = Vec::new();
            debug!("save_councillor: inserting {} as {}", stored.full_name(), stored.id());
        } else {
            match self.councillors.get(&councillor.id()) {
                Some(existing) => {
                    stored.committees = existing.committees.clone();
                    stored.affiliations = existing.affiliations.clone();
                }
                None => return not_found("councillor", councillor.id()),
            }
        }
        let id = stored.id();
        self.councillors.insert(id, stored);
        Ok(id)
    }

    fn delete_councillor(&mut self, id: u32) -> PoliticsResult<()> {
        if self.councillors.remove(&id).is_none() {
            return not_found("councillor", id);
        }
        for c in self.committees.values_mut() {
            c.members
                .retain(|m| !(m.kind == MemberKind::Councillor && m.member.id == id));
        }
        self.surgeries.retain(|_, s| s.councillor_id != id);
        Ok(())
    }

    fn add_membership(&mut self, membership: &CommitteeMembership) -> PoliticsResult<()> {
        let m = match self.committees.get(&membership.committee.id) {
            Some(c) => CommitteeMembership {
                committee: c.summary(),
                ..membership.clone()
            },
            None => return not_found("committee", membership.committee.id),
        };
        if m.kind == MemberKind::Councillor {
            match self.councillors.get_mut(&m.member.id) {
                Some(cllr) => {
                    cllr.committees.retain(|x| !same_member(x, &m));
                    cllr.committees.push(m.clone());
                }
                None => return not_found("councillor", m.member.id),
            }
        }
        if let Some(c) = self.committees.get_mut(&m.committee.id) {
            c.members.retain(|x| !same_member(x, &m));
            c.members.push(m);
        }
        Ok(())
    }

    fn remove_membership(&mut self, membership: &CommitteeMembership) -> PoliticsResult<()> {
        match self.committees.get_mut(&membership.committee.id) {
            Some(c) => c.members.retain(|x| !same_member(x, membership)),
            None => return not_found("committee", membership.committee.id),
        }
        if membership.kind == MemberKind::Councillor {
            if let Some(cllr) = self.councillors.get_mut(&membership.member.id) {
                cllr.committees.retain(|x| !same_member(x, membership));
            }
        }
        Ok(())
    }

    fn add_affiliation(&mut self, affiliation: &CouncillorAffiliation) -> PoliticsResult<()> {
        match self.councillors.get_mut(&affiliation.councillor_id) {
            Some(cllr) => {
                let exists = cllr.affiliations.iter().any(|a| {
                    a.organisation_id == affiliation.organisation_id && a.role == affiliation.role
                });
                if !exists {
                    cllr.affiliations.push(affiliation.clone());
                }
                Ok(())
            }
            None => not_found("councillor", affiliation.councillor_id),
        }
    }

    fn remove_affiliation(&mut self, affiliation: &CouncillorAffiliation) -> PoliticsResult<()> {
        match self.councillors.get_mut(&affiliation.councillor_id) {
            Some(cllr) => {
                cllr.affiliations.retain(|a| {
                    !(a.organisation_id == affiliation.organisation_id && a.role == affiliation.role)
                });
                Ok(())
            }
            None => not_found("councillor", affiliation.councillor_id),
        }
    }

    fn electoral_divisions(&self) -> PoliticsResult<Vec<ElectoralDivision>> {
        let mut res: Vec<ElectoralDivision> = self.divisions.values().cloned().collect();
        res.sort_by_cached_key(|d| d.name.to_lowercase());
        Ok(res)
    }

    fn parishes_in_division(&self, division_id: u32) -> PoliticsResult<Vec<Parish>> {
        if !self.divisions.contains_key(&division_id) {
            return not_found("electoral division", division_id);
        }
        let mut res = self.parishes.get(&division_id).cloned().unwrap_or_default();
        res.sort_by_cached_key(|p| p.name.to_lowercase());
        Ok(res)
    }

    fn surgeries(&self, query: &SurgeryQuery) -> PoliticsResult<Vec<Surgery>> {
        let mut res: Vec<Surgery> = self
            .surgeries
            .values()
            .filter(|s| query.councillor_id.map_or(true, |cid| cid == s.councillor_id))
            .filter(|s| query.from_date.map_or(true, |from| s.meeting.day() >= from))
            .cloned()
            .collect();
        sort_by_sort_key(&mut res);
        Ok(res)
    }

    fn save_surgery(&mut self, surgery: &Surgery) -> PoliticsResult<u32> {
        if !self.councillors.contains_key(&surgery.councillor_id) {
            return not_found("councillor", surgery.councillor_id);
        }
        let id = match surgery.meeting.id {
            0 => next_id(&self.surgeries),
            x if self.surgeries.contains_key(&x) => x,
            x => return not_found("surgery", x),
        };
        let mut stored = surgery.clone();
        stored.meeting.id = id;
        self.surgeries.insert(id, stored);
        Ok(id)
    }

    fn save_surgery_status(&mut self, surgery_id: u32, status: MeetingStatus) -> PoliticsResult<()> {
        match self.surgeries.get_mut(&surgery_id) {
            Some(s) => {
                s.meeting.status = status;
                Ok(())
            }
            None => not_found("surgery", surgery_id),
        }
    }

    fn delete_surgery(&mut self, id: u32) -> PoliticsResult<()> {
        match self.surgeries.remove(&id) {
            Some(_) => Ok(()),
            None => not_found("surgery", id),
        }
    }
}
