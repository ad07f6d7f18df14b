//! Month-grid calendar logic: month arithmetic, grid layout, event overlay,
//! the events listing and the view state that ties them together.
//!
//! Nothing in here performs I/O; events arrive through [`EventSource`].

pub mod grid;
pub mod listing;
pub mod month;
pub mod view;

pub use grid::{DayCell, MonthGrid};
pub use listing::{event_cards, EventCard};
pub use month::YearMonth;
pub use view::{CalendarView, EventSource, EventsPanel, LoadTicket, Navigation};
