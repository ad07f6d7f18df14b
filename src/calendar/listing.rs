use crate::i18n;
use crate::models::{Event, EventType};

/// One card of the events panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    /// Id the card's delete action is bound to
    pub id: String,
    pub date: String,
    pub display_date: String,
    pub kind: EventType,
    pub type_label: String,
    pub title: String,
    pub description: String,
}

impl EventCard {
    pub fn type_class(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn icon_class(&self) -> &'static str {
        self.kind.icon_class()
    }
}

/// Cards for the events panel, sorted by date ascending.
///
/// The sort is stable, so events on the same date keep the order they were
/// listed in.
pub fn event_cards(events: &[Event], locale: &str) -> Vec<EventCard> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    sorted
        .into_iter()
        .map(|event| EventCard {
            id: event.id.clone(),
            date: event.date.clone(),
            display_date: i18n::display_date(&event.date, locale),
            kind: event.kind,
            type_label: i18n::type_label(event.kind, locale),
            title: event.title.clone(),
            description: event.description.clone(),
        })
        .collect()
}
