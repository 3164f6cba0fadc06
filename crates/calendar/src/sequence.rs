//! Date sequence generation for simulation time axes.

use crate::date::SimDate;

/// Generates `n` consecutive daily dates starting at `start`.
///
/// Year boundaries are handled automatically (Dec 31 wraps to Jan 1 of the
/// following year).
pub fn daily_sequence(start: SimDate, n: usize) -> Vec<SimDate> {
    std::iter::successors(Some(start), |d| Some(d.next_day()))
        .take(n)
        .collect()
}

/// Generates `n` consecutive monthly dates starting at `start`.
///
/// Monthly model output is usually stamped mid-month; the day of `start` is
/// kept where the month allows it.
///
/// # Example
///
/// ```ignore
/// let start = SimDate::new(0, 11, 15).unwrap();
/// let dates = monthly_sequence(start, 3);
/// // Nov 15, Dec 15, Jan 15 (year 1)
/// ```
pub fn monthly_sequence(start: SimDate, n: usize) -> Vec<SimDate> {
    let day = start.day();
    let mut dates = Vec::with_capacity(n);
    let mut current = start;
    for _ in 0..n {
        dates.push(current);
        let next = current.next_month();
        // Re-anchor on the original day after a short month clamped it.
        current = SimDate::new(next.year(), next.month(), day).unwrap_or(next);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_empty() {
        let start = SimDate::new(2000, 1, 1).unwrap();
        assert!(daily_sequence(start, 0).is_empty());
    }

    #[test]
    fn daily_full_year() {
        let start = SimDate::new(2000, 1, 1).unwrap();
        let dates = daily_sequence(start, 365);
        assert_eq!(dates.len(), 365);
        let last = dates[364];
        assert_eq!((last.year(), last.month(), last.day()), (2000, 12, 31));
    }

    #[test]
    fn monthly_crosses_year() {
        let start = SimDate::new(0, 11, 15).unwrap();
        let dates = monthly_sequence(start, 3);
        assert_eq!(dates[2], SimDate::new(1, 1, 15).unwrap());
    }

    #[test]
    fn monthly_reanchors_after_february() {
        let start = SimDate::new(2000, 1, 31).unwrap();
        let dates = monthly_sequence(start, 3);
        assert_eq!(dates[1], SimDate::new(2000, 2, 28).unwrap());
        assert_eq!(dates[2], SimDate::new(2000, 3, 31).unwrap());
    }
}
