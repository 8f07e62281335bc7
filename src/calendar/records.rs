use chrono::NaiveDate;
use color_eyre::Result;

use super::index::EventIndex;
use super::model::{Birthday, CustomEvent, RecordError, Trip};
use super::store::{Storage, BIRTHDAYS_KEY, EVENTS_KEY, TRIPS_KEY};

/// The three calendar record collections, owned in one place and handed to
/// the views by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub birthdays: Vec<Birthday>,
    pub trips: Vec<Trip>,
    pub events: Vec<CustomEvent>,
}

/// Home-screen summary of what is coming up next.
#[derive(Debug, Clone, PartialEq)]
pub struct Upcoming<'a> {
    /// Birthdays paired with their next occurrence.
    pub birthdays: Vec<(NaiveDate, &'a Birthday)>,
    pub trips: Vec<&'a Trip>,
}

impl Records {
    pub fn load(store: &impl Storage) -> Self {
        let records = Self {
            birthdays: store.load(BIRTHDAYS_KEY, Vec::new()),
            trips: store.load(TRIPS_KEY, Vec::new()),
            events: store.load(EVENTS_KEY, Vec::new()),
        };
        log::info!(
            "Loaded {} birthdays, {} trips, {} events",
            records.birthdays.len(),
            records.trips.len(),
            records.events.len()
        );
        records
    }

    pub fn save(&self, store: &impl Storage) -> Result<()> {
        store.save(BIRTHDAYS_KEY, &self.birthdays)?;
        store.save(TRIPS_KEY, &self.trips)?;
        store.save(EVENTS_KEY, &self.events)?;
        Ok(())
    }

    pub fn index(&self) -> EventIndex<'_> {
        EventIndex::new(&self.birthdays, &self.trips, &self.events)
    }

    pub fn add_birthday(&mut self, name: &str, date: NaiveDate) -> Result<&Birthday, RecordError> {
        let birthday = Birthday::new(name, date)?;
        log::info!("Added birthday {}", birthday.id);
        self.birthdays.push(birthday);
        Ok(&self.birthdays[self.birthdays.len() - 1])
    }

    pub fn add_trip(
        &mut self,
        title: &str,
        start: NaiveDate,
        end: NaiveDate,
        location: Option<&str>,
    ) -> Result<&Trip, RecordError> {
        let trip = Trip::new(title, start, end, location)?;
        log::info!("Added trip {}", trip.id);
        self.trips.push(trip);
        Ok(&self.trips[self.trips.len() - 1])
    }

    pub fn add_event(&mut self, title: &str, date: NaiveDate) -> Result<&CustomEvent, RecordError> {
        let event = CustomEvent::new(title, date)?;
        log::info!("Added event {} on {}", event.id, event.date);
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Delete the record with `id`, whatever its kind.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.birthdays.len() + self.trips.len() + self.events.len();
        self.birthdays.retain(|b| b.id != id);
        self.trips.retain(|t| t.id != id);
        self.events.retain(|e| e.id != id);
        let removed = before != self.birthdays.len() + self.trips.len() + self.events.len();
        if removed {
            log::info!("Removed record {id}");
        }
        removed
    }

    pub fn birthdays_sorted(&self) -> Vec<&Birthday> {
        let mut out: Vec<&Birthday> = self.birthdays.iter().collect();
        out.sort_by_key(|b| b.date);
        out
    }

    pub fn trips_sorted(&self) -> Vec<&Trip> {
        let mut out: Vec<&Trip> = self.trips.iter().collect();
        out.sort_by_key(|t| t.start);
        out
    }

    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Upcoming<'_> {
        let mut birthdays: Vec<(NaiveDate, &Birthday)> = self
            .birthdays
            .iter()
            .filter_map(|b| b.next_occurrence(today).map(|d| (d, b)))
            .collect();
        birthdays.sort_by_key(|(d, _)| *d);
        birthdays.truncate(limit);

        let mut trips: Vec<&Trip> = self.trips.iter().filter(|t| t.end >= today).collect();
        trips.sort_by_key(|t| t.start);
        trips.truncate(limit);

        Upcoming { birthdays, trips }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::model::parse_date;
    use crate::calendar::store::tests::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn sample() -> Records {
        let mut records = Records::default();
        records.add_birthday("Ada", date("1990-05-14")).unwrap();
        records.add_birthday("Grace", date("1985-01-09")).unwrap();
        records
            .add_trip("Coast", date("2024-06-01"), date("2024-06-05"), Some("Porto"))
            .unwrap();
        records
            .add_trip("Past", date("2024-01-01"), date("2024-01-03"), None)
            .unwrap();
        records.add_event("Dentist", date("2024-05-20")).unwrap();
        records
    }

    #[test]
    fn save_then_load_restores_all_collections() {
        let store = MemoryStore::default();
        let records = sample();
        records.save(&store).unwrap();

        assert_eq!(Records::load(&store), records);
    }

    #[test]
    fn corrupt_collection_loads_empty_without_touching_others() {
        let store = MemoryStore::default();
        sample().save(&store).unwrap();
        store
            .entries
            .borrow_mut()
            .insert(TRIPS_KEY.to_string(), "[{\"broken\":".to_string());

        let loaded = Records::load(&store);
        assert!(loaded.trips.is_empty());
        assert_eq!(loaded.birthdays.len(), 2);
        assert_eq!(loaded.events.len(), 1);
    }

    #[test]
    fn rejected_input_leaves_collections_unchanged() {
        let mut records = sample();
        let before = records.clone();

        assert!(records.add_event("", date("2024-05-20")).is_err());
        assert!(records
            .add_trip("Backwards", date("2024-02-02"), date("2024-02-01"), None)
            .is_err());
        assert!(records.add_birthday(" ", date("2000-01-01")).is_err());
        assert_eq!(records, before);
    }

    #[test]
    fn remove_deletes_by_id_across_kinds() {
        let mut records = sample();
        let trip_id = records.trips[0].id.clone();
        let event_id = records.events[0].id.clone();

        assert!(records.remove(&trip_id));
        assert!(records.remove(&event_id));
        assert!(!records.remove("missing"));
        assert_eq!(records.trips.len(), 1);
        assert!(records.events.is_empty());
    }

    #[test]
    fn listings_sort_by_their_own_date() {
        let records = sample();
        let names: Vec<&str> = records.birthdays_sorted().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Grace", "Ada"]);
        let titles: Vec<&str> = records.trips_sorted().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Past", "Coast"]);
    }

    #[test]
    fn upcoming_orders_by_next_occurrence_and_skips_finished_trips() {
        let records = sample();
        let upcoming = records.upcoming(date("2024-03-01"), 3);

        let names: Vec<&str> = upcoming.birthdays.iter().map(|(_, b)| b.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Grace"]);
        assert_eq!(upcoming.birthdays[0].0, date("2024-05-14"));
        assert_eq!(upcoming.birthdays[1].0, date("2025-01-09"));

        assert_eq!(upcoming.trips.len(), 1);
        assert_eq!(upcoming.trips[0].title, "Coast");

        assert_eq!(records.upcoming(date("2024-03-01"), 1).birthdays.len(), 1);
    }
}
