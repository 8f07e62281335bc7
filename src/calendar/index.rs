use chrono::NaiveDate;

use super::model::{Birthday, CustomEvent, Trip};

/// Everything that occurs on one date, borrowed from the source collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEvents<'a> {
    pub birthdays: Vec<&'a Birthday>,
    pub trips: Vec<&'a Trip>,
    pub events: Vec<&'a CustomEvent>,
}

impl DayEvents<'_> {
    pub fn is_empty(&self) -> bool {
        self.birthdays.is_empty() && self.trips.is_empty() && self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.birthdays.len() + self.trips.len() + self.events.len()
    }
}

/// Read-only join over birthdays, trips and custom events.
#[derive(Debug, Clone, Copy)]
pub struct EventIndex<'a> {
    birthdays: &'a [Birthday],
    trips: &'a [Trip],
    events: &'a [CustomEvent],
}

impl<'a> EventIndex<'a> {
    pub fn new(birthdays: &'a [Birthday], trips: &'a [Trip], events: &'a [CustomEvent]) -> Self {
        Self {
            birthdays,
            trips,
            events,
        }
    }

    pub fn on_date(&self, date: NaiveDate) -> DayEvents<'a> {
        DayEvents {
            birthdays: self.birthdays.iter().filter(|b| b.falls_on(date)).collect(),
            trips: self.trips.iter().filter(|t| t.covers(date)).collect(),
            events: self.events.iter().filter(|e| e.date == date).collect(),
        }
    }

    pub fn has_any_event(&self, date: NaiveDate) -> bool {
        self.birthdays.iter().any(|b| b.falls_on(date))
            || self.trips.iter().any(|t| t.covers(date))
            || self.events.iter().any(|e| e.date == date)
    }
}
