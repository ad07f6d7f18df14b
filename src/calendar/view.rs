use super::grid::MonthGrid;
use super::listing::{event_cards, EventCard};
use super::month::YearMonth;
use crate::error::AgendaResult;
use crate::models::Event;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Where the calendar view gets a month's events from
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events dated within `month`
    async fn list_month(&self, month: YearMonth) -> AgendaResult<Vec<Event>>;
}

/// Month navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
}

/// State of the events panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsPanel {
    /// A fetch is in flight
    Loading,
    /// The last fetch failed with this reason
    Failed(String),
    /// The month has no events
    Empty,
    Ready(Vec<EventCard>),
}

/// Sequence token for one load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    month: YearMonth,
}

impl LoadTicket {
    pub fn month(&self) -> YearMonth {
        self.month
    }
}

/// The calendar view: displayed month, its grid and the events panel.
///
/// Every load cycle hands out a [`LoadTicket`]; only the result for the
/// latest ticket is applied, so slow responses for a month the user has
/// already navigated away from are dropped.
#[derive(Debug, Clone)]
pub struct CalendarView {
    month: YearMonth,
    locale: String,
    grid: MonthGrid,
    panel: EventsPanel,
    generation: u64,
}

impl CalendarView {
    pub fn new(month: YearMonth, locale: impl Into<String>) -> Self {
        Self {
            month,
            locale: locale.into(),
            grid: MonthGrid::build(month),
            panel: EventsPanel::Loading,
            generation: 0,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn panel(&self) -> &EventsPanel {
        &self.panel
    }

    /// Move to the adjacent month and start reloading it
    pub fn navigate(&mut self, nav: Navigation) -> LoadTicket {
        self.month = match nav {
            Navigation::Previous => self.month.previous(),
            Navigation::Next => self.month.next(),
        };
        self.grid = MonthGrid::build(self.month);
        self.begin_load()
    }

    /// Start a load cycle for the displayed month
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.grid.clear_markers();
        self.panel = EventsPanel::Loading;
        LoadTicket {
            generation: self.generation,
            month: self.month,
        }
    }

    /// Apply the result of a load cycle.
    ///
    /// Returns `false` and leaves the view untouched when the ticket has been
    /// superseded by a later load.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: AgendaResult<Vec<Event>>) -> bool {
        if ticket.generation != self.generation || ticket.month != self.month {
            debug!(
                "Dropping stale events for {} (generation {})",
                ticket.month, ticket.generation
            );
            return false;
        }

        self.panel = match result {
            Ok(events) if events.is_empty() => {
                self.grid.clear_markers();
                EventsPanel::Empty
            }
            Ok(events) => {
                self.grid.overlay(&events);
                EventsPanel::Ready(event_cards(&events, &self.locale))
            }
            Err(e) => {
                warn!("Failed to load events for {}: {}", self.month, e);
                self.grid.clear_markers();
                EventsPanel::Failed(e.to_string())
            }
        };
        true
    }

    /// Run one full load cycle against `source`
    pub async fn reload(&mut self, source: &dyn EventSource) {
        let ticket = self.begin_load();
        let result = source.list_month(ticket.month()).await;
        self.finish_load(ticket, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::client_error;
    use crate::models::EventType;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn event(id: &str, date: &str, kind: EventType) -> Event {
        Event {
            id: id.to_string(),
            date: date.to_string(),
            title: format!("Title {}", id),
            description: String::new(),
            kind,
            created_at: None,
        }
    }

    struct FixedSource(Vec<Event>);

    #[async_trait]
    impl EventSource for FixedSource {
        async fn list_month(&self, month: YearMonth) -> AgendaResult<Vec<Event>> {
            let (start, end) = month.date_range();
            Ok(self
                .0
                .iter()
                .filter(|e| e.date >= start && e.date <= end)
                .cloned()
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl EventSource for FailingSource {
        async fn list_month(&self, _month: YearMonth) -> AgendaResult<Vec<Event>> {
            Err(client_error("HTTP 500"))
        }
    }

    #[test]
    fn test_new_view_is_loading() {
        let view = CalendarView::new(ym(2024, 3), "pt-BR");
        assert_eq!(view.panel(), &EventsPanel::Loading);
        assert_eq!(view.grid().month(), ym(2024, 3));
    }

    #[test]
    fn test_navigation_wraps_and_rebuilds_grid() {
        let mut view = CalendarView::new(ym(2024, 1), "pt-BR");
        let ticket = view.navigate(Navigation::Previous);
        assert_eq!(ticket.month(), ym(2023, 12));
        assert_eq!(view.grid().month(), ym(2023, 12));

        let ticket = view.navigate(Navigation::Next);
        assert_eq!(ticket.month(), ym(2024, 1));
        assert_eq!(view.panel(), &EventsPanel::Loading);
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut view = CalendarView::new(ym(2024, 3), "en");
        let stale = view.begin_load();
        let latest = view.navigate(Navigation::Next);

        let applied = view.finish_load(stale, Ok(vec![event("a", "2024-03-15", EventType::Task)]));
        assert!(!applied);
        assert_eq!(view.panel(), &EventsPanel::Loading);

        assert!(view.finish_load(latest, Ok(vec![])));
        assert_eq!(view.panel(), &EventsPanel::Empty);
    }

    #[test]
    fn test_failed_load_shows_reason() {
        let mut view = CalendarView::new(ym(2024, 3), "en");
        let ticket = view.begin_load();
        view.finish_load(ticket, Err(client_error("HTTP 503")));
        match view.panel() {
            EventsPanel::Failed(reason) => assert!(reason.contains("HTTP 503")),
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reload_overlays_and_lists() {
        let source = FixedSource(vec![
            event("a", "2024-03-15", EventType::Task),
            event("b", "2024-03-15", EventType::Visit),
            event("c", "2024-04-02", EventType::Visit),
        ]);
        let mut view = CalendarView::new(ym(2024, 3), "pt-BR");
        view.reload(&source).await;

        match view.panel() {
            EventsPanel::Ready(cards) => assert_eq!(cards.len(), 2),
            other => panic!("unexpected panel {:?}", other),
        }
        let marked: Vec<&str> = view
            .grid()
            .cells()
            .iter()
            .filter(|c| c.has_event())
            .filter_map(|c| c.date.as_deref())
            .collect();
        assert_eq!(marked, vec!["2024-03-15"]);
    }

    #[tokio::test]
    async fn test_reload_failure_clears_markers() {
        let mut view = CalendarView::new(ym(2024, 3), "pt-BR");
        view.reload(&FixedSource(vec![event("a", "2024-03-15", EventType::Task)]))
            .await;
        view.reload(&FailingSource).await;
        assert!(matches!(view.panel(), EventsPanel::Failed(_)));
        assert!(view.grid().cells().iter().all(|c| !c.has_event()));
    }
}
