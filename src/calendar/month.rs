use crate::error::{validation_error, AgendaResult};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// A displayed calendar month.
///
/// `month` is 1-based (1 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, rejecting months outside 1..=12 and years outside 1..=9999
    pub fn new(year: i32, month: u32) -> AgendaResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(validation_error(&format!("Invalid month: {}", month)));
        }
        if !(1..=9999).contains(&year) {
            return Err(validation_error(&format!("Invalid year: {}", year)));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Build from a possibly out-of-range month index, wrapping into the
    /// neighbouring years the same way navigation does.
    pub fn wrapping(year: i32, month: i64) -> AgendaResult<Self> {
        let zero_based = month
            .checked_sub(1)
            .ok_or_else(|| validation_error(&format!("Invalid month: {}", month)))?;
        let year = i64::from(year) + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;
        let year = i32::try_from(year).map_err(|_| validation_error("Year out of range"))?;
        Self::new(year, month as u32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before, wrapping into December of the previous year
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after, wrapping into January of the next year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // chrono covers every year reachable from a validated month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Weekday of the first day, 0 = Sunday .. 6 = Saturday
    pub fn start_offset(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Number of days in the month
    pub fn days_in_month(&self) -> u32 {
        self.next()
            .first_day()
            .pred_opt()
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Canonical `YYYY-MM-DD` key for a day of this month
    pub fn date_key(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }

    /// Inclusive date-string range covering the month, ending on its real last day
    pub fn date_range(&self) -> (String, String) {
        (self.date_key(1), self.date_key(self.days_in_month()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_rejects_invalid_month() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(0, 1).is_err());
    }

    #[test]
    fn test_navigation_wraps_year() {
        assert_eq!(ym(2024, 1).previous(), ym(2023, 12));
        assert_eq!(ym(2023, 12).next(), ym(2024, 1));
        assert_eq!(ym(2024, 6).next(), ym(2024, 7));
        assert_eq!(ym(2024, 6).previous(), ym(2024, 5));
    }

    #[test]
    fn test_wrapping_constructor() {
        assert_eq!(YearMonth::wrapping(2024, 0).unwrap(), ym(2023, 12));
        assert_eq!(YearMonth::wrapping(2024, 13).unwrap(), ym(2025, 1));
        assert_eq!(YearMonth::wrapping(2024, -11).unwrap(), ym(2022, 12));
        assert_eq!(YearMonth::wrapping(2024, 3).unwrap(), ym(2024, 3));
        assert!(YearMonth::wrapping(2024, i64::MIN).is_err());
        assert!(YearMonth::wrapping(2024, i64::MAX).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2023, 2).days_in_month(), 28);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2024, 4).days_in_month(), 30);
        assert_eq!(ym(2024, 12).days_in_month(), 31);
    }

    #[test]
    fn test_start_offset() {
        // 2024-03-01 was a Friday
        assert_eq!(ym(2024, 3).start_offset(), 5);
        // 2023-10-01 was a Sunday
        assert_eq!(ym(2023, 10).start_offset(), 0);
    }

    #[test]
    fn test_date_range_uses_real_month_end() {
        assert_eq!(
            ym(2023, 2).date_range(),
            ("2023-02-01".to_string(), "2023-02-28".to_string())
        );
        assert_eq!(
            ym(2024, 11).date_range(),
            ("2024-11-01".to_string(), "2024-11-30".to_string())
        );
    }

    #[test]
    fn test_date_key_padding() {
        assert_eq!(ym(2024, 3).date_key(5), "2024-03-05");
        assert_eq!(ym(987, 3).date_key(15), "0987-03-15");
    }
}
