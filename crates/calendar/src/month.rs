//! Month validation and the no-leap month-length table.

use crate::error::CalendarError;

/// Number of days in each month (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns the number of days in `month` on the no-leap calendar.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok(DAYS_PER_MONTH[month as usize])
}

/// Validates a list of month indices and returns it sorted and deduplicated.
///
/// # Errors
///
/// Returns [`CalendarError::EmptyMonths`] for an empty list and
/// [`CalendarError::InvalidMonth`] for the first value outside 1..=12.
pub fn validate_months(months: &[u8]) -> Result<Vec<u8>, CalendarError> {
    if months.is_empty() {
        return Err(CalendarError::EmptyMonths);
    }
    if let Some(&month) = months.iter().find(|m| !(1..=12).contains(*m)) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let mut out = months.to_vec();
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        let total: u32 = (1..=12).map(|m| days_in_month(m).unwrap() as u32).sum();
        assert_eq!(total, 365);
        assert_eq!(days_in_month(2).unwrap(), 28);
        assert_eq!(days_in_month(12).unwrap(), 31);
    }

    #[test]
    fn month_length_invalid() {
        assert_eq!(
            days_in_month(0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn validate_sorts_and_dedups() {
        assert_eq!(validate_months(&[12, 1, 2, 1]).unwrap(), vec![1, 2, 12]);
    }

    #[test]
    fn validate_rejects_empty() {
        assert_eq!(
            validate_months(&[]).unwrap_err(),
            CalendarError::EmptyMonths
        );
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            validate_months(&[6, 13]).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }
}
