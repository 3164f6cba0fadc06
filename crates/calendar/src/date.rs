//! No-leap simulation date.

use crate::error::CalendarError;
use crate::month::{DAYS_PER_MONTH, days_in_month};

/// A date on a simulation time axis using the 365-day no-leap calendar.
///
/// Years are signed so that paleo simulations running through negative
/// model years are representable. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimDate {
    year: i32,
    month: u8,
    day: u8,
}

impl SimDate {
    /// Creates a new `SimDate`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month or day is invalid for the
    /// 365-day no-leap calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let max_day = days_in_month(month)?;
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the next calendar day, wrapping December 31 to January 1.
    pub fn next_day(self) -> Self {
        let max_day = DAYS_PER_MONTH[self.month as usize];
        if self.day < max_day {
            Self {
                day: self.day + 1,
                ..self
            }
        } else {
            self.first_of_next_month()
        }
    }

    /// Returns the same day-of-month in the following month.
    ///
    /// The day is clamped to the length of the target month, so January 31
    /// advances to February 28.
    pub fn next_month(self) -> Self {
        let next = self.first_of_next_month();
        Self {
            day: self.day.min(DAYS_PER_MONTH[next.month as usize]),
            ..next
        }
    }

    fn first_of_next_month(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
                day: 1,
            }
        }
    }
}
