use std::path::PathBuf;

use chrono::{Datelike, Days, Local, NaiveDate};
use color_eyre::Result;

use crate::calendar::grid::days_in_month;
use crate::calendar::{ics, CalendarView, DayEvents, JsonStore, MonthRender, Records};
use crate::components::record_form::{FormKind, RecordFormState, Submission};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
}

/// A record listed under the selected day, by id.
#[derive(Debug, Clone, PartialEq)]
pub enum DayItem {
    Birthday(String),
    Trip(String),
    Event(String),
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub month: MonthRender,
    pub selected_item: usize,
    pub form_state: Option<RecordFormState>,
    pub show_help: bool,
    pub show_lists: bool,
    pub status_message: Option<String>,
    records: Records,
    view: CalendarView,
    store: JsonStore,
    export_dir: PathBuf,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let store = JsonStore::open(config.data_dir())?;
        Ok(Self::with_store(
            store,
            Local::now().date_naive(),
            config.export_dir(),
        ))
    }

    pub fn with_store(store: JsonStore, today: NaiveDate, export_dir: PathBuf) -> Self {
        let records = Records::load(&store);
        let view = CalendarView::new(today);
        let month = view.render(&records.index());
        Self {
            running: true,
            input_mode: InputMode::Normal,
            selected_date: today,
            today,
            month,
            selected_item: 0,
            form_state: None,
            show_help: false,
            show_lists: false,
            status_message: None,
            records,
            view,
            store,
            export_dir,
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn day_events(&self) -> DayEvents<'_> {
        self.records.index().on_date(self.selected_date)
    }

    pub fn day_items(&self) -> Vec<DayItem> {
        let day = self.day_events();
        day.birthdays
            .iter()
            .map(|b| DayItem::Birthday(b.id.clone()))
            .chain(day.trips.iter().map(|t| DayItem::Trip(t.id.clone())))
            .chain(day.events.iter().map(|e| DayItem::Event(e.id.clone())))
            .collect()
    }

    fn refresh(&mut self) {
        self.month = self.view.render(&self.records.index());
        let count = self.day_events().len();
        self.selected_item = self.selected_item.min(count.saturating_sub(1));
    }

    fn persist(&mut self) {
        if let Err(err) = self.records.save(&self.store) {
            log::error!("Saving records failed: {err:#}");
            self.status_message = Some(format!("Save failed: {err}"));
        }
    }

    // ── Navigation ──

    fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.selected_item = 0;
        if !self.view.cursor().contains(date) {
            self.view.show(date);
        }
        self.refresh();
    }

    pub fn next_day(&mut self) {
        let date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.select_date(date);
    }

    pub fn prev_day(&mut self) {
        let date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.select_date(date);
    }

    pub fn next_month(&mut self) {
        self.view.next();
        self.follow_cursor();
    }

    pub fn prev_month(&mut self) {
        self.view.prev();
        self.follow_cursor();
    }

    /// Keep the day of month when the cursor moves, clamped to the new month.
    fn follow_cursor(&mut self) {
        let cursor = self.view.cursor();
        let day = self.selected_date.day().min(days_in_month(cursor.year, cursor.month));
        if let Some(date) = NaiveDate::from_ymd_opt(cursor.year, cursor.month.number_from_month(), day) {
            self.selected_date = date;
        }
        self.selected_item = 0;
        self.refresh();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.select_date(self.today);
    }

    pub fn next_item(&mut self) {
        let count = self.day_events().len();
        if count > 0 {
            self.selected_item = (self.selected_item + 1) % count;
        }
    }

    pub fn prev_item(&mut self) {
        let count = self.day_events().len();
        if count > 0 {
            self.selected_item = (self.selected_item + count - 1) % count;
        }
    }

    // ── Forms ──

    pub fn open_form(&mut self, kind: FormKind) {
        self.form_state = Some(RecordFormState::new(kind, self.selected_date));
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = self.form_state.as_mut() {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = self.form_state.as_mut() {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(form) = self.form_state.as_mut() {
            form.next_field();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(form) = self.form_state.as_mut() {
            form.prev_field();
        }
    }

    /// Add the record described by the form. Invalid input leaves the form
    /// open and nothing is added.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form_state.as_ref() else {
            return;
        };

        let outcome = form.parse().and_then(|submission| match submission {
            Submission::Event { title, date } => {
                let (_, rejected) = self.view.select_cell(&mut self.records, date, Some(&title));
                rejected.map_or(Ok(date), Err)
            }
            Submission::Birthday { name, date } => {
                self.records.add_birthday(&name, date).map(|_| self.selected_date)
            }
            Submission::Trip {
                title,
                start,
                end,
                location,
            } => self
                .records
                .add_trip(&title, start, end, location.as_deref())
                .map(|_| start),
        });

        match outcome {
            Ok(date) => {
                self.close_form();
                self.persist();
                self.select_date(date);
            }
            Err(err) => {
                log::debug!("Form rejected: {err}");
                self.status_message = Some(format!("Not added: {err}"));
            }
        }
    }

    // ── Item actions ──

    pub fn delete_selected(&mut self) {
        let Some(item) = self.day_items().into_iter().nth(self.selected_item) else {
            return;
        };
        let id = match &item {
            DayItem::Birthday(id) | DayItem::Trip(id) | DayItem::Event(id) => id,
        };
        if self.records.remove(id) {
            self.persist();
            self.refresh();
            if self.status_message.is_none() {
                self.status_message = Some("Deleted".to_string());
            }
        }
    }

    /// Write the selected item as an all-day `.ics` file.
    pub fn export_selected(&mut self) -> Option<PathBuf> {
        let item = self.day_items().into_iter().nth(self.selected_item)?;
        let (title, start, last_day, details) = self.export_fields(&item)?;
        let end = last_day.checked_add_days(Days::new(1))?;

        let text = ics::build(
            &title,
            start.and_time(chrono::NaiveTime::MIN),
            end.and_time(chrono::NaiveTime::MIN),
            &details,
            true,
        );
        match ics::export_to_file(&self.export_dir, &title, &text) {
            Ok(path) => {
                self.status_message = Some(format!("Exported {} ({})", path.display(), ics::ICS_MIME_TYPE));
                Some(path)
            }
            Err(err) => {
                log::error!("Export failed: {err:#}");
                self.status_message = Some(format!("Export failed: {err}"));
                None
            }
        }
    }

    /// Title, first day, last day (inclusive) and description of an item.
    fn export_fields(&self, item: &DayItem) -> Option<(String, NaiveDate, NaiveDate, String)> {
        match item {
            DayItem::Birthday(id) => {
                let b = self.records.birthdays.iter().find(|b| &b.id == id)?;
                let date = b.next_occurrence(self.selected_date)?;
                Some((
                    format!("{}'s birthday", b.name),
                    date,
                    date,
                    format!("Birthday of {}", b.name),
                ))
            }
            DayItem::Trip(id) => {
                let t = self.records.trips.iter().find(|t| &t.id == id)?;
                Some((
                    t.title.clone(),
                    t.start,
                    t.end,
                    t.location.clone().unwrap_or_default(),
                ))
            }
            DayItem::Event(id) => {
                let e = self.records.events.iter().find(|e| &e.id == id)?;
                Some((e.title.clone(), e.date, e.date, String::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;
    use crate::calendar::store::Storage;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn app_at(dir: &std::path::Path, today: &str) -> App {
        let store = JsonStore::open(dir.join("data")).unwrap();
        App::with_store(store, date(today), dir.join("exports"))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form_input_char(c);
        }
    }

    #[test]
    fn month_navigation_clamps_day_and_wraps_year() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-01-31");

        app.next_month();
        assert_eq!(app.selected_date, date("2024-02-29"));
        assert_eq!(app.month.label, "February 2024");

        app.prev_month();
        app.prev_month();
        assert_eq!(app.selected_date, date("2023-12-29"));
        assert_eq!(app.month.label, "December 2023");
    }

    #[test]
    fn stepping_past_month_end_moves_the_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-12-31");

        app.next_day();
        assert_eq!(app.selected_date, date("2025-01-01"));
        assert_eq!(app.month.label, "January 2025");
    }

    #[test]
    fn submitting_event_form_marks_cell_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-05-10");

        app.open_form(FormKind::Event);
        type_text(&mut app, "Dentist");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        let cell = app.month.cells.iter().find(|c| c.date == date("2024-05-10")).unwrap();
        assert!(cell.has_event);
        assert_eq!(app.month.cells.iter().filter(|c| c.has_event).count(), 1);

        let store = JsonStore::open(dir.path().join("data")).unwrap();
        let reloaded = Records::load(&store);
        assert_eq!(reloaded.events.len(), 1);
        assert_eq!(reloaded.events[0].title, "Dentist");
    }

    #[test]
    fn invalid_form_keeps_form_open_and_adds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-05-10");

        app.open_form(FormKind::Trip);
        type_text(&mut app, "Backwards");
        app.form_tab();
        app.form_tab();
        for _ in 0.."2024-05-10".len() {
            app.form_backspace();
        }
        type_text(&mut app, "2024-05-01");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.status_message.as_deref().unwrap().starts_with("Not added"));
        assert!(app.records().trips.is_empty());
    }

    #[test]
    fn trip_form_adds_range_and_jumps_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-05-10");

        app.open_form(FormKind::Trip);
        type_text(&mut app, "Coast");
        app.form_tab();
        app.form_tab();
        app.form_backspace();
        app.form_input_char('2');
        app.submit_form();

        assert_eq!(app.records().trips.len(), 1);
        let trip = &app.records().trips[0];
        assert_eq!((trip.start, trip.end), (date("2024-05-10"), date("2024-05-12")));
        let marked = app.month.cells.iter().filter(|c| c.has_event).count();
        assert_eq!(marked, 3);
    }

    #[test]
    fn delete_and_export_act_on_selected_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), "2024-05-10");

        app.open_form(FormKind::Birthday);
        type_text(&mut app, "Ada");
        app.submit_form();
        app.open_form(FormKind::Event);
        type_text(&mut app, "Picnic");
        app.submit_form();
        assert_eq!(app.day_items().len(), 2);

        app.next_item();
        let path = app.export_selected().unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("SUMMARY:Picnic\r\n"));
        assert!(text.contains("DTSTART;VALUE=DATE:20240510\r\n"));
        assert!(text.contains("DTEND;VALUE=DATE:20240511\r\n"));

        app.delete_selected();
        assert!(app.records().events.is_empty());
        assert_eq!(app.records().birthdays.len(), 1);
        assert_eq!(app.selected_item, 0);
    }

    #[test]
    fn exported_trip_end_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("data")).unwrap();
        let mut records = Records::default();
        records
            .add_trip("Lisbon, Portugal", date("2024-03-10"), date("2024-03-14"), Some("Alfama"))
            .unwrap();
        records.save(&store).unwrap();

        let mut app = App::with_store(store, date("2024-03-12"), dir.path().join("exports"));
        let path = app.export_selected().unwrap();
        let text = std::fs::read_to_string(path).unwrap();

        assert!(text.contains("SUMMARY:Lisbon\\, Portugal\r\n"));
        assert!(text.contains("DESCRIPTION:Alfama\r\n"));
        assert!(text.contains("DTEND;VALUE=DATE:20240315\r\n"));
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("organizer.events.json"), "garbage").unwrap();

        let app = app_at(dir.path(), "2024-05-10");
        assert!(app.records().events.is_empty());
        assert!(app.month.cells.iter().all(|c| !c.has_event));

        let store = JsonStore::open(&data).unwrap();
        let untouched: Vec<String> = store.load("organizer.birthdays", Vec::new());
        assert!(untouched.is_empty());
    }
}
