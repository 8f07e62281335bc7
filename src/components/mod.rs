pub mod day_view;
pub mod help;
pub mod month_view;
pub mod record_form;
pub mod status_bar;
pub mod upcoming;

pub use day_view::DayView;
pub use help::Help;
pub use month_view::MonthView;
pub use record_form::RecordForm;
pub use status_bar::StatusBar;
pub use upcoming::{RecordsList, UpcomingView};
