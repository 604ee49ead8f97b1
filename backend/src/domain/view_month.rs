//! The (year, month) pair shown by the calendar and its date arithmetic.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CalendarError, CalendarResult};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A displayed calendar month. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth {
    year: i32,
    month: u32,
}

impl ViewMonth {
    /// Create a view month, validating month (1-12) and year (1-9999)
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, with the year held to `MIN_YEAR..=MAX_YEAR`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// One calendar month earlier, rolling January back to December.
    /// January of `MIN_YEAR` has no predecessor and is returned unchanged.
    pub fn previous(&self) -> Self {
        if self.month == 1 && self.year <= MIN_YEAR {
            *self
        } else if self.month == 1 {
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

    /// One calendar month later, rolling December over to January.
    /// December of `MAX_YEAR` has no successor and is returned unchanged.
    pub fn next(&self) -> Self {
        if self.month == 12 && self.year >= MAX_YEAR {
            *self
        } else if self.month == 12 {
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

    /// Number of days in this month (28/29 for February)
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Clamp a day of month into 1..=days_in_month
    pub fn clamp_day(&self, day: u32) -> u32 {
        day.clamp(1, self.days_in_month())
    }

    /// Weekday of the first day with a Monday start (Mon = 0 ... Sun = 6)
    pub fn first_day_offset(&self) -> u32 {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.weekday().num_days_from_monday())
            .unwrap_or(0)
    }

    /// Whether `date` falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}
