//! Locale-aware labels for the calendar page.
//!
//! Every function takes the locale explicitly so concurrent requests never
//! share a process-wide locale.

use crate::calendar::YearMonth;
use crate::models::EventType;
use chrono::{Datelike, NaiveDate};

/// Whether translations exist for `locale`
pub fn is_supported(locale: &str) -> bool {
    rust_i18n::available_locales!()
        .iter()
        .any(|available| *available == locale)
}

/// Translate a plain key
pub fn text(key: &str, locale: &str) -> String {
    t!(key, locale = locale).to_string()
}

/// Display name of an event type ("Afazer", "Visita", ...)
pub fn type_label(kind: EventType, locale: &str) -> String {
    text(&format!("type_{}", kind.as_str()), locale)
}

/// Full month name, `month` 1-based
pub fn month_name(month: u32, locale: &str) -> String {
    text(&format!("month_{}", month), locale)
}

/// Full weekday name, 0 = Sunday
pub fn weekday_name(weekday: u32, locale: &str) -> String {
    text(&format!("weekday_{}", weekday), locale)
}

/// Short weekday names for the grid header, Sunday first
pub fn weekday_headers(locale: &str) -> Vec<String> {
    (0..7)
        .map(|d| text(&format!("weekday_short_{}", d), locale))
        .collect()
}

/// Header of the displayed month ("março de 2024")
pub fn month_year(month: YearMonth, locale: &str) -> String {
    t!(
        "month_year",
        locale = locale,
        month = month_name(month.month(), locale),
        year = month.year()
    )
    .to_string()
}

/// Card date ("sexta-feira, 15 de março").
///
/// Dates that do not exist on the calendar are shown verbatim.
pub fn display_date(date: &str, locale: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => t!(
            "display_date",
            locale = locale,
            weekday = weekday_name(parsed.weekday().num_days_from_sunday(), locale),
            day = parsed.day(),
            month = month_name(parsed.month(), locale)
        )
        .to_string(),
        Err(_) => date.to_string(),
    }
}
