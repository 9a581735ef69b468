// ********* Meetings ***********

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::council::{Address, CommitteeSummary};

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default, Serialize, Deserialize)]
pub enum MeetingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

/// What every kind of meeting has.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub id: u32,
    pub date: NaiveDateTime,
    pub venue: Option<Address>,
    pub status: MeetingStatus,
    pub date_modified: NaiveDateTime,
}

impl MeetingInfo {
    pub fn new(date: NaiveDateTime) -> MeetingInfo {
        MeetingInfo {
            id: 0,
            date,
            venue: None,
            status: MeetingStatus::Confirmed,
            date_modified: date,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeMeeting {
    pub meeting: MeetingInfo,
    pub committee: CommitteeSummary,
    /// Only known once the papers are expected to be published.
    pub meeting_papers_url: Option<Url>,
}

/// A councillor's advice session for residents.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Surgery {
    pub meeting: MeetingInfo,
    pub councillor_id: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub enum Meeting {
    Committee(CommitteeMeeting),
    Surgery(Surgery),
}

/// Access to the shared part of any meeting.
pub trait MeetingDetails {
    fn meeting(&self) -> &MeetingInfo;
}

impl MeetingDetails for MeetingInfo {
    fn meeting(&self) -> &MeetingInfo {
        self
    }
}

impl MeetingDetails for CommitteeMeeting {
    fn meeting(&self) -> &MeetingInfo {
        &self.meeting
    }
}

impl MeetingDetails for Surgery {
    fn meeting(&self) -> &MeetingInfo {
        &self.meeting
    }
}

impl MeetingDetails for Meeting {
    fn meeting(&self) -> &MeetingInfo {
        match self {
            Meeting::Committee(m) => &m.meeting,
            Meeting::Surgery(s) => &s.meeting,
        }
    }
}
