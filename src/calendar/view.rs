use chrono::{Datelike, Month, NaiveDate};

use super::grid::{self, CalendarCell};
use super::index::{DayEvents, EventIndex};
use super::model::RecordError;
use super::records::Records;

/// The displayed month. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: Month,
}

impl CalendarCursor {
    /// Accepts any integer month counted from 0 = January; values outside
    /// 0..=11 carry into the year.
    pub fn new(year: i32, month0: i32) -> Self {
        let year = year + month0.div_euclid(12);
        let index = month0.rem_euclid(12) as u8;
        let month = Month::try_from(index + 1).unwrap_or(Month::January);
        Self { year, month }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn prev(&mut self) {
        if self.month == Month::January {
            self.year -= 1;
        }
        self.month = self.month.pred();
    }

    pub fn next(&mut self) {
        if self.month == Month::December {
            self.year += 1;
        }
        self.month = self.month.succ();
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }
}

/// Render-ready description of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRender {
    pub label: String,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    cursor: CalendarCursor,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: CalendarCursor::containing(today),
        }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn prev(&mut self) {
        self.cursor.prev();
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    /// Jump straight to the month containing `date`.
    pub fn show(&mut self, date: NaiveDate) {
        self.cursor = CalendarCursor::containing(date);
    }

    pub fn render(&self, index: &EventIndex<'_>) -> MonthRender {
        let CalendarCursor { year, month } = self.cursor;
        let cells = grid::build(year, month)
            .into_iter()
            .map(|cell| CalendarCell {
                has_event: index.has_any_event(cell.date),
                ..cell
            })
            .collect();
        MonthRender {
            label: format!("{} {}", month.name(), year),
            cells,
        }
    }

    /// Details for `date`. With `new_title`, a custom event is added there
    /// first; a blank title adds nothing and is reported back.
    pub fn select_cell<'r>(
        &self,
        records: &'r mut Records,
        date: NaiveDate,
        new_title: Option<&str>,
    ) -> (DayEvents<'r>, Option<RecordError>) {
        let rejected = new_title.and_then(|title| records.add_event(title, date).err());
        if let Some(err) = &rejected {
            log::debug!("Not adding event on {date}: {err}");
        }
        let records: &'r Records = records;
        (records.index().on_date(date), rejected)
    }
}
