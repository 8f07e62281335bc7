use chrono::{Datelike, Days, Month, NaiveDate};

/// Six full weeks, so the grid never reflows between months.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub has_event: bool,
}

/// Build the Monday-first month grid for `month` of `year`.
///
/// Leading cells are the trailing days of the previous month, trailing cells
/// the first days of the following month; both are tagged as outside the
/// displayed month. Years outside chrono's supported range yield an empty
/// grid.
pub fn build(year: i32, month: Month) -> Vec<CalendarCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1) else {
        return Vec::new();
    };
    let lead = u64::from(first.weekday().num_days_from_monday());
    let Some(grid_start) = first.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };

    let cells: Vec<CalendarCell> = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            is_current_month: date.year() == year && date.month() == month.number_from_month(),
            has_event: false,
        })
        .collect();

    if cells.len() == GRID_CELLS {
        cells
    } else {
        Vec::new()
    }
}

/// Number of days in `month` of `year`: day 0 of the following month.
pub fn days_in_month(year: i32, month: Month) -> u32 {
    let (next_year, next_month) = match month {
        Month::December => (year + 1, 1),
        _ => (year, month.number_from_month() + 1),
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
