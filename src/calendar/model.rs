use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("trip ends ({end}) before it starts ({start})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Parse a `YYYY-MM-DD` form value.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(s.trim().to_string()))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A yearly recurring birthday. Only month and day take part in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
}

impl Birthday {
    pub fn new(name: &str, date: NaiveDate) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        Ok(Self {
            id: new_id(),
            name: name.to_string(),
            date,
        })
    }

    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date.month() == date.month() && self.date.day() == date.day()
    }

    /// First anniversary on or after `from`. Feb 29 birthdays skip to the
    /// next leap year.
    pub fn next_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        (from.year()..=from.year() + 8)
            .filter_map(|year| NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day()))
            .find(|d| *d >= from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Trip {
    pub fn new(
        title: &str,
        start: NaiveDate,
        end: NaiveDate,
        location: Option<&str>,
    ) -> Result<Self, RecordError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        if start > end {
            return Err(RecordError::InvertedRange { start, end });
        }
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        Ok(Self {
            id: new_id(),
            title: title.to_string(),
            start,
            end,
            location,
        })
    }

    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A single-day event added from a calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
}

impl CustomEvent {
    pub fn new(title: &str, date: NaiveDate) -> Result<Self, RecordError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        Ok(Self {
            id: new_id(),
            title: title.to_string(),
            date,
        })
    }
}
