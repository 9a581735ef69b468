//! Links to pages about councillors and to committee meeting papers.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use snafu::ResultExt;
use url::Url;

use crate::error::{InvalidUrlSnafu, PoliticsResult};
use crate::meeting::CommitteeMeeting;

pub const DEFAULT_COUNCILLOR_DIRECTORY: &str =
    "https://www.eastsussex.gov.uk/yourcouncil/about/people/councillors/find/";

/// Papers are expected to be online this many days after the meeting.
pub const PAPERS_PUBLISHED_AFTER_DAYS: i64 = 5;

/// The page of a councillor, found under the folder of their division.
pub fn councillor_url(directory: &Url, division_folder: &str, councillor_id: u32) -> PoliticsResult<Url> {
    let folder = format!("{}/", division_folder.trim_matches('/'));
    let mut url = directory
        .join(&folder)
        .context(InvalidUrlSnafu { input: folder })?;
    url.query_pairs_mut()
        .append_pair("councillor", &councillor_id.to_string());
    Ok(url)
}

pub fn default_councillor_url(division_folder: &str, councillor_id: u32) -> PoliticsResult<Url> {
    let directory = Url::parse(DEFAULT_COUNCILLOR_DIRECTORY).context(InvalidUrlSnafu {
        input: DEFAULT_COUNCILLOR_DIRECTORY,
    })?;
    councillor_url(&directory, division_folder, councillor_id)
}

/// Whether the papers of a meeting held at `meeting_date` should be published by `today`.
///
/// The meeting must have started by midnight at the start of the day five days ago.
pub fn meeting_papers_due(meeting_date: NaiveDateTime, today: NaiveDate) -> bool {
    (today - Duration::days(PAPERS_PUBLISHED_AFTER_DAYS))
        .and_hms_opt(0, 0, 0)
        .map_or(false, |cutoff| meeting_date <= cutoff)
}

/// The expected location of the papers for a meeting.
///
/// Papers follow a naming convention next to the committee's papers page:
/// `{folder}/{year}/{day}{month}.htm`, e.g. `2024/5march.htm`.
/// Returns `None` when the committee has no papers page.
pub fn meeting_papers_url(meeting: &CommitteeMeeting) -> PoliticsResult<Option<Url>> {
    let base = match &meeting.committee.meeting_papers_url {
        Some(u) => u,
        None => return Ok(None),
    };
    let page = format!("{}.htm", meeting.meeting.date.format("%Y/%-d%B")).to_lowercase();
    let url = base.join(&page).context(InvalidUrlSnafu { input: page })?;
    Ok(Some(url))
}
