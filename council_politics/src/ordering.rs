//! Ordering of council records by a key extracted from each record.
//!
//! Committees sort by name, ignoring case, memberships by the name of their committee,
//! and meetings and surgeries by date.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::council::{Committee, CommitteeMembership};
use crate::meeting::{CommitteeMeeting, MeetingDetails, Surgery};

pub trait SortKey {
    type Key: Ord;
    fn sort_key(&self) -> Self::Key;
}

pub fn compare_by_key<T: SortKey>(a: &T, b: &T) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

pub fn compare_by_key_descending<T: SortKey>(a: &T, b: &T) -> Ordering {
    compare_by_key(b, a)
}

/// Stable: records with equal keys keep their order.
pub fn sort_by_sort_key<T: SortKey>(items: &mut [T]) {
    items.sort_by_cached_key(|item| item.sort_key());
}

pub fn sort_descending<T: SortKey>(items: &mut [T]) {
    items.sort_by(compare_by_key_descending);
}

/// Most recently modified first.
pub fn sort_by_date_modified_descending<T: MeetingDetails>(items: &mut [T]) {
    items.sort_by(|a, b| b.meeting().date_modified.cmp(&a.meeting().date_modified));
}

impl SortKey for Committee {
    type Key = String;
    fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl SortKey for CommitteeMembership {
    type Key = String;
    fn sort_key(&self) -> String {
        self.committee.name.to_lowercase()
    }
}

impl SortKey for CommitteeMeeting {
    type Key = NaiveDateTime;
    fn sort_key(&self) -> NaiveDateTime {
        self.meeting.date
    }
}

impl SortKey for Surgery {
    type Key = NaiveDateTime;
    fn sort_key(&self) -> NaiveDateTime {
        self.meeting.date
    }
}
