use super::month::YearMonth;
use crate::models::{Event, EventType};
use std::collections::{BTreeMap, BTreeSet};

/// Number of columns in the month grid (Sunday .. Saturday)
pub const WEEK_LEN: usize = 7;

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Day number shown in the cell
    pub day: u32,
    /// Padding day from the previous or next month
    pub other_month: bool,
    /// `YYYY-MM-DD` key; only days of the displayed month carry one
    pub date: Option<String>,
    /// One marker per distinct event type on this date
    pub markers: Vec<EventType>,
}

impl DayCell {
    fn current(day: u32, date: String) -> Self {
        Self {
            day,
            other_month: false,
            date: Some(date),
            markers: Vec::new(),
        }
    }

    fn padding(day: u32) -> Self {
        Self {
            day,
            other_month: true,
            date: None,
            markers: Vec::new(),
        }
    }

    pub fn has_event(&self) -> bool {
        !self.markers.is_empty()
    }
}

/// Full-week grid for one month, padded with days of the adjacent months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Lay out the month as whole weeks starting on Sunday
    pub fn build(month: YearMonth) -> Self {
        let start_offset = month.start_offset();
        let days_in_month = month.days_in_month();
        let prev_month_days = month.previous().days_in_month();

        let filled = (days_in_month + start_offset) as usize;
        let total = filled.div_ceil(WEEK_LEN) * WEEK_LEN;
        let mut cells = Vec::with_capacity(total);

        // Trailing days of the previous month
        for i in 0..start_offset {
            cells.push(DayCell::padding(prev_month_days - start_offset + i + 1));
        }

        for day in 1..=days_in_month {
            cells.push(DayCell::current(day, month.date_key(day)));
        }

        // Leading days of the next month
        for day in 1..=(total - filled) as u32 {
            cells.push(DayCell::padding(day));
        }

        Self { month, cells }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Rows of seven cells
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(WEEK_LEN)
    }

    /// Mark every dated cell with the distinct types of its events.
    ///
    /// Replaces markers from a previous overlay. Padding cells are never
    /// marked, whatever the events' dates are.
    pub fn overlay(&mut self, events: &[Event]) {
        let mut types_by_date: BTreeMap<&str, BTreeSet<EventType>> = BTreeMap::new();
        for event in events {
            types_by_date
                .entry(event.date.as_str())
                .or_default()
                .insert(event.kind);
        }

        for cell in &mut self.cells {
            cell.markers = match cell.date.as_deref().and_then(|d| types_by_date.get(d)) {
                Some(types) => types.iter().copied().collect(),
                None => Vec::new(),
            };
        }
    }

    /// Drop all markers
    pub fn clear_markers(&mut self) {
        for cell in &mut self.cells {
            cell.markers.clear();
        }
    }
}
