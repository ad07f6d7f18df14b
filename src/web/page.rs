use askama::Template;
use chrono::Local;

use crate::calendar::{CalendarView, DayCell, EventCard, EventsPanel, YearMonth};
use crate::i18n;
use crate::models::EventType;

/// One grid cell as the template sees it
#[derive(Debug, Clone)]
pub struct CellView {
    pub day: u32,
    pub other_month: bool,
    pub has_date: bool,
    pub date: String,
    pub has_event: bool,
    /// CSS classes of the marker dots
    pub markers: Vec<&'static str>,
}

impl From<&DayCell> for CellView {
    fn from(cell: &DayCell) -> Self {
        Self {
            day: cell.day,
            other_month: cell.other_month,
            has_date: cell.date.is_some(),
            date: cell.date.clone().unwrap_or_default(),
            has_event: cell.has_event(),
            markers: cell.markers.iter().map(|m| m.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CardView {
    pub id: String,
    pub type_class: &'static str,
    pub icon_class: &'static str,
    pub type_label: String,
    pub display_date: String,
    pub title: String,
    pub description: String,
    pub delete_action: String,
}

impl From<&EventCard> for CardView {
    fn from(card: &EventCard) -> Self {
        Self {
            id: card.id.clone(),
            type_class: card.type_class(),
            icon_class: card.icon_class(),
            type_label: card.type_label.clone(),
            display_date: card.display_date.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            delete_action: format!("/agenda/events/{}/delete", card.id),
        }
    }
}

/// The events panel; exactly one of the flags is set unless cards are shown
#[derive(Debug, Clone, Default)]
pub struct PanelView {
    pub loading: bool,
    pub failed: bool,
    pub empty: bool,
    pub message: String,
    pub cards: Vec<CardView>,
}

impl PanelView {
    fn new(panel: &EventsPanel, locale: &str) -> Self {
        match panel {
            EventsPanel::Loading => Self {
                loading: true,
                message: i18n::text("loading_events", locale),
                ..Self::default()
            },
            EventsPanel::Failed(reason) => Self {
                failed: true,
                message: t!("load_failed", locale = locale, reason = reason).to_string(),
                ..Self::default()
            },
            EventsPanel::Empty => Self {
                empty: true,
                message: i18n::text("no_events", locale),
                ..Self::default()
            },
            EventsPanel::Ready(cards) => Self {
                cards: cards.iter().map(CardView::from).collect(),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeOption {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

/// Labels of the page chrome
#[derive(Debug, Clone)]
pub struct Labels {
    pub app_title: String,
    pub previous_month: String,
    pub next_month: String,
    pub events_heading: String,
    pub delete_event: String,
    pub confirm_delete: String,
    pub new_event: String,
    pub field_date: String,
    pub field_title: String,
    pub field_description: String,
    pub field_type: String,
    pub save_event: String,
}

impl Labels {
    fn new(locale: &str) -> Self {
        Self {
            app_title: i18n::text("app_title", locale),
            previous_month: i18n::text("previous_month", locale),
            next_month: i18n::text("next_month", locale),
            events_heading: i18n::text("events_heading", locale),
            delete_event: i18n::text("delete_event", locale),
            confirm_delete: i18n::text("confirm_delete", locale),
            new_event: i18n::text("new_event", locale),
            field_date: i18n::text("field_date", locale),
            field_title: i18n::text("field_title", locale),
            field_description: i18n::text("field_description", locale),
            field_type: i18n::text("field_type", locale),
            save_event: i18n::text("save_event", locale),
        }
    }
}

/// The calendar page
#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarPage {
    pub lang: String,
    pub labels: Labels,
    pub month_label: String,
    pub month: u32,
    pub year: i32,
    pub prev_href: String,
    pub next_href: String,
    pub weekday_headers: Vec<String>,
    pub weeks: Vec<Vec<CellView>>,
    pub panel: PanelView,
    pub has_alert: bool,
    pub alert: String,
    pub today: String,
    pub type_options: Vec<TypeOption>,
}

/// Link to the page showing `month`
pub fn page_href(month: YearMonth) -> String {
    format!("/?month={}&year={}", month.month(), month.year())
}

impl CalendarPage {
    /// Page for the current view state, optionally with a blocking alert
    pub fn new(view: &CalendarView, alert: Option<String>) -> Self {
        let locale = view.locale();
        let month = view.month();

        Self {
            lang: locale.to_string(),
            labels: Labels::new(locale),
            month_label: i18n::month_year(month, locale),
            month: month.month(),
            year: month.year(),
            prev_href: page_href(month.previous()),
            next_href: page_href(month.next()),
            weekday_headers: i18n::weekday_headers(locale),
            weeks: view
                .grid()
                .weeks()
                .map(|week| week.iter().map(CellView::from).collect())
                .collect(),
            panel: PanelView::new(view.panel(), locale),
            has_alert: alert.is_some(),
            alert: alert
                .map(|reason| t!("action_failed", locale = locale, reason = reason).to_string())
                .unwrap_or_default(),
            today: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            type_options: EventType::ALL
                .into_iter()
                .map(|kind| TypeOption {
                    value: kind.as_str(),
                    label: i18n::type_label(kind, locale),
                    selected: kind == EventType::default(),
                })
                .collect(),
        }
    }
}
