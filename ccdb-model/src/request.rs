//! Namepath requests
//!
//! The common CCDB request string is `/path/to/data:run:variation:time`.
//! Sections may be skipped: `/path/to/data` is just the data path,
//! `/path/to/data::mc` names a variation with no run or time, and
//! `/path/to/data:::2029` gives only path and time.

use crate::error::RequestError;
use crate::identity::{RunNumber, Timestamp};
use crate::path;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Variation used when a request names none.
pub const DEFAULT_VARIATION: &str = "default";

/// A parsed constants request.
///
/// Unparsed sections stay `None` and are filled from caller defaults by
/// [`Self::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantsRequest {
    /// Absolute data path of the requested table.
    pub path: String,
    pub run: Option<RunNumber>,
    pub variation: Option<String>,
    pub time: Option<Timestamp>,
}

impl ConstantsRequest {
    /// Parse a namepath request.
    ///
    /// The path section is normalized to an absolute path. The time
    /// section uses the CCDB notation `YYYY[-MM[-DD[-HH[-mm[-ss]]]]]`;
    /// omitted components round the instant up to the end of the stated
    /// interval, so `2029` means the last second of 2029.
    pub fn parse(namepath: &str) -> Result<Self, RequestError> {
        let sections: Vec<&str> = namepath.trim().split(':').collect();
        if sections.len() > 4 {
            return Err(RequestError::TooManySections(sections.len()));
        }

        let raw_path = sections[0].trim();
        if raw_path.is_empty() {
            return Err(RequestError::EmptyPath);
        }
        let path = path::make_absolute(raw_path);

        let run = match sections.get(1).map(|section| section.trim()) {
            Some(token) if !token.is_empty() => Some(
                token
                    .parse::<RunNumber>()
                    .ok()
                    .filter(|run| *run >= 0)
                    .ok_or_else(|| RequestError::BadRunNumber(token.to_string()))?,
            ),
            _ => None,
        };

        let variation = sections
            .get(2)
            .map(|section| section.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        let time = match sections.get(3).map(|section| section.trim()) {
            Some(token) if !token.is_empty() => Some(
                parse_time(token).ok_or_else(|| RequestError::BadTime(token.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            path,
            run,
            variation,
            time,
        })
    }

    /// Fill unparsed sections from caller defaults.
    pub fn resolve(&self, default_run: RunNumber, default_variation: &str) -> ResolvedRequest {
        ResolvedRequest {
            path: self.path.clone(),
            run: self.run.unwrap_or(default_run),
            variation: self
                .variation
                .clone()
                .unwrap_or_else(|| default_variation.to_string()),
            time: self.time,
        }
    }
}

/// A request with defaults applied; what the data-access layer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    pub path: String,
    pub run: RunNumber,
    pub variation: String,
    /// `None` requests the currently valid constants.
    pub time: Option<Timestamp>,
}

/// Parse the CCDB time notation into an UTC instant.
///
/// Digit groups are read as year, month, day, hour, minute, second; any
/// non-digit characters delimit them. Omitted components default to the
/// end of the stated interval.
fn parse_time(token: &str) -> Option<Timestamp> {
    let mut groups: Vec<u32> = Vec::new();
    for part in token.split(|c: char| !c.is_ascii_digit()) {
        if part.is_empty() {
            continue;
        }
        groups.push(part.parse().ok()?);
    }
    if groups.is_empty() || groups.len() > 6 {
        return None;
    }

    let year = groups[0] as i32;
    if !(1970..=9999).contains(&year) {
        return None;
    }
    let month = groups.get(1).copied().unwrap_or(12);
    if !(1..=12).contains(&month) {
        return None;
    }
    let day = match groups.get(2) {
        Some(&day) => day,
        None => last_day_of_month(year, month)?,
    };
    let hour = groups.get(3).copied().unwrap_or(23);
    let minute = groups.get(4).copied().unwrap_or(59);
    let second = groups.get(5).copied().unwrap_or(59);

    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

// ============================================================================
// TESTS
// ============================================================================
