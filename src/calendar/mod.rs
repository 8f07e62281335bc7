pub mod grid;
pub mod ics;
pub mod index;
pub mod model;
pub mod records;
pub mod store;
pub mod view;

pub use grid::CalendarCell;
pub use index::DayEvents;
pub use model::{parse_date, RecordError};
pub use records::{Records, Upcoming};
pub use store::JsonStore;
pub use view::{CalendarView, MonthRender};
