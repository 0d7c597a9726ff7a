use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Error, Result};

/// header date formatting string, e.g. `08/14/2025`
pub static HEADER_DATEFMT: &'static str = "%m/%d/%Y";

/// `YYYY-MM-DD`
static DASHED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid dashed date regex")
});

/// `MM/DD/YYYY`
static SLASHED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid slashed date regex")
});

/// `MMDDYYYY`, month and day may drop a leading zero when unambiguous
static COMPACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3,4})(\d{4})$").expect("valid compact date regex")
});

/// Source of "today" for entries written without `--date`.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always answers with the same date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The calendar day an entry is filed under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NoteDate(NaiveDate);

impl NoteDate {
    /// `MM/DD/YYYY`, the form used in section headers
    pub fn header(&self) -> String {
        self.0.format(HEADER_DATEFMT).to_string()
    }

    /// four digit year, used to name the year file
    pub fn year(&self) -> String {
        format!("{:04}", self.0.year())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// parse a user supplied date, trying each accepted format in turn
pub fn parse_date_string(s: &str) -> Result<NoteDate> {
    let s = s.trim();
    let parsed = if DASHED_RE.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else if SLASHED_RE.is_match(s) {
        NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
    } else if let Some(caps) = COMPACT_RE.captures(s) {
        parse_compact(&caps[1], &caps[2])
    } else {
        None
    };
    match parsed {
        Some(d) => {
            log::debug!("parsed date '{}' as {}", s, d);
            Ok(NoteDate(d))
        }
        None => Err(Error::invalid_date(s)),
    }
}

/// split the month/day digits of a compact date; with three digits a two digit
/// month is tried first, so `1012025` is October 1st and `1312025` January 31st
fn parse_compact(md: &str, year: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let splits: &[usize] = if md.len() == 4 { &[2] } else { &[2, 1] };
    splits.iter().find_map(|&at| {
        let month: u32 = md[..at].parse().ok()?;
        let day: u32 = md[at..].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// resolve the `--date` argument, falling back to the clock when absent
pub fn resolve_date<C: Clock + ?Sized>(date: Option<&str>, clock: &C) -> Result<NoteDate> {
    match date {
        Some(s) => parse_date_string(s),
        None => {
            let today = clock.today();
            log::debug!("no date given, using today ({})", today);
            Ok(NoteDate(today))
        }
    }
}
