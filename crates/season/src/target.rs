//! Habitat-season target of a proxy variable.

use psm_calendar::{Season, season_months, validate_months};

use crate::error::SeasonError;

/// Which part of the year a proxy records.
///
/// Resolved once from the raw `habitatSeason` / `month_i` attributes of a
/// proxy variable, so call sites never probe for optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonalTarget {
    /// The whole year (also used for an `"unknown"` habitat season).
    Annual,
    /// A named local season; its months depend on the site hemisphere.
    Named(Season),
    /// An explicit, validated, sorted set of calendar months.
    Months(Vec<u8>),
}

impl SeasonalTarget {
    /// Builds a target from an explicit month list.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::Calendar`] if the list is empty or contains a
    /// month outside 1..=12.
    pub fn months(months: &[u8]) -> Result<Self, SeasonError> {
        Ok(Self::Months(validate_months(months)?))
    }

    /// Resolves the raw attribute pair of a proxy variable.
    ///
    /// - `"annual"`, `"annual mean"` and `"unknown"` give [`Self::Annual`],
    ///   regardless of `month_i`.
    /// - `"summer"`, `"winter"` and `"boreal winter"` give [`Self::Named`],
    ///   unless `month_i` is set, which then wins verbatim.
    /// - A bare `month_i` gives [`Self::Months`].
    ///
    /// Labels are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::MissingHabitatSeason`] when both inputs are
    /// absent and [`SeasonError::UnknownHabitatSeason`] for other labels.
    pub fn from_attributes(
        habitat_season: Option<&str>,
        month_i: Option<&[u8]>,
    ) -> Result<Self, SeasonError> {
        let Some(label) = habitat_season else {
            return match month_i {
                Some(m) => Self::months(m),
                None => Err(SeasonError::MissingHabitatSeason),
            };
        };

        let season = match label.trim().to_lowercase().as_str() {
            "annual" | "annual mean" | "unknown" => return Ok(Self::Annual),
            "summer" => Season::Summer,
            "winter" | "boreal winter" => Season::Winter,
            _ => {
                return Err(SeasonError::UnknownHabitatSeason {
                    label: label.to_string(),
                });
            }
        };

        match month_i {
            Some(m) => Self::months(m),
            None => Ok(Self::Named(season)),
        }
    }

    /// Returns the calendar months selected at latitude `lat`, or `None`
    /// when every month is used.
    pub fn months_at(&self, lat: f64) -> Option<Vec<u8>> {
        match self {
            Self::Annual => None,
            Self::Named(season) => Some(season_months(*season, lat).to_vec()),
            Self::Months(m) => Some(m.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psm_calendar::CalendarError;

    #[test]
    fn annual_labels() {
        for label in ["annual", "Annual mean", "unknown"] {
            assert_eq!(
                SeasonalTarget::from_attributes(Some(label), None).unwrap(),
                SeasonalTarget::Annual
            );
        }
    }

    #[test]
    fn annual_ignores_month_list() {
        let t = SeasonalTarget::from_attributes(Some("annual"), Some(&[1, 2])).unwrap();
        assert_eq!(t, SeasonalTarget::Annual);
    }

    #[test]
    fn named_season() {
        let t = SeasonalTarget::from_attributes(Some("summer"), None).unwrap();
        assert_eq!(t, SeasonalTarget::Named(Season::Summer));
        let t = SeasonalTarget::from_attributes(Some("boreal winter"), None).unwrap();
        assert_eq!(t, SeasonalTarget::Named(Season::Winter));
    }

    #[test]
    fn named_season_with_month_list_uses_list() {
        let t = SeasonalTarget::from_attributes(Some("summer"), Some(&[7, 8])).unwrap();
        assert_eq!(t, SeasonalTarget::Months(vec![7, 8]));
        assert_eq!(t.months_at(-40.0), Some(vec![7, 8]));
    }

    #[test]
    fn bare_month_list() {
        let t = SeasonalTarget::from_attributes(None, Some(&[3, 4, 5])).unwrap();
        assert_eq!(t, SeasonalTarget::Months(vec![3, 4, 5]));
    }

    #[test]
    fn missing_everything_is_an_error() {
        assert_eq!(
            SeasonalTarget::from_attributes(None, None),
            Err(SeasonError::MissingHabitatSeason)
        );
    }

    #[test]
    fn unknown_label() {
        assert!(matches!(
            SeasonalTarget::from_attributes(Some("spring"), None),
            Err(SeasonError::UnknownHabitatSeason { .. })
        ));
    }

    #[test]
    fn invalid_month_list() {
        assert_eq!(
            SeasonalTarget::months(&[0, 1]),
            Err(SeasonError::Calendar(CalendarError::InvalidMonth { month: 0 }))
        );
    }

    #[test]
    fn months_at_by_hemisphere() {
        let t = SeasonalTarget::Named(Season::Summer);
        assert_eq!(t.months_at(-10.0), Some(vec![12, 1, 2]));
        assert_eq!(t.months_at(10.0), Some(vec![6, 7, 8]));
        assert_eq!(SeasonalTarget::Annual.months_at(10.0), None);
    }
}
