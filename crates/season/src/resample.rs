//! Seasonal reduction of simulated series to one value per year.

use std::ops::Range;

use ndarray::{Array2, ArrayView1};
use psm_calendar::SimDate;
use tracing::debug;

use crate::error::SeasonError;
use crate::series::{AnnualEnsemble, AnnualSeries, SimEnsemble, SimSeries};
use crate::target::SeasonalTarget;

/// Which time steps feed which year, computed once per time axis.
struct YearPlan {
    /// Time-step indices in chronological order, restricted to the season.
    order: Vec<usize>,
    /// One entry per retained year, ascending.
    years: Vec<i32>,
    /// Slice of `order` belonging to each year.
    groups: Vec<Range<usize>>,
}

impl YearPlan {
    fn build(dates: &[SimDate], target: &SeasonalTarget, lat: f64) -> Result<Self, SeasonError> {
        if !lat.is_finite() {
            return Err(SeasonError::InvalidLatitude { lat });
        }
        if dates.is_empty() {
            return Err(SeasonError::EmptyData);
        }

        let months = target.months_at(lat);
        let mut order: Vec<usize> = (0..dates.len())
            .filter(|&i| {
                months
                    .as_ref()
                    .is_none_or(|m| m.contains(&dates[i].month()))
            })
            .collect();
        // Stable, so equal stamps keep their input order.
        order.sort_by_key(|&i| dates[i]);

        let mut years = Vec::new();
        let mut groups = Vec::new();
        let mut start = 0;
        while start < order.len() {
            let year = dates[order[start]].year();
            let len = order[start..]
                .iter()
                .take_while(|&&i| dates[i].year() == year)
                .count();
            years.push(year);
            groups.push(start..start + len);
            start += len;
        }

        Ok(Self {
            order,
            years,
            groups,
        })
    }

    fn reduce(&self, values: ArrayView1<'_, f64>) -> Vec<f64> {
        self.groups
            .iter()
            .map(|g| psm_stats::nan_mean_iter(self.order[g.clone()].iter().map(|&i| values[i])))
            .collect()
    }
}

/// Reduces a simulated series to one value per calendar year.
///
/// For [`SeasonalTarget::Annual`] every time step is averaged within its
/// calendar year. Otherwise only time steps whose month belongs to the
/// target's season at latitude `lat` are kept before averaging. Grouping
/// is by calendar year, so a December-February season combines December
/// with January and February of the same year.
///
/// NaN values are skipped; a year whose retained values are all NaN maps to
/// NaN. Years without any retained time step are omitted, so the result may
/// be empty when the series never touches the season.
///
/// # Errors
///
/// Returns [`SeasonError::InvalidLatitude`] for a non-finite latitude.
#[tracing::instrument(skip_all, fields(name = series.name(), n = series.len(), lat))]
pub fn resample_annual(
    series: &SimSeries,
    target: &SeasonalTarget,
    lat: f64,
) -> Result<AnnualSeries, SeasonError> {
    let plan = YearPlan::build(series.dates(), target, lat)?;
    let values = plan.reduce(ArrayView1::from(series.values()));
    debug!(
        n_years = plan.years.len(),
        "resampled series to annual values"
    );
    Ok(AnnualSeries::from_parts(
        series.name().to_string(),
        series.units().map(str::to_string),
        plan.years,
        values,
    ))
}

/// Reduces every member of a simulated ensemble independently.
///
/// Members share one time axis, so they also share the resulting years.
///
/// # Errors
///
/// Returns [`SeasonError::InvalidLatitude`] for a non-finite latitude.
#[tracing::instrument(
    skip_all,
    fields(name = ensemble.name(), n_members = ensemble.n_members(), lat)
)]
pub fn resample_ensemble(
    ensemble: &SimEnsemble,
    target: &SeasonalTarget,
    lat: f64,
) -> Result<AnnualEnsemble, SeasonError> {
    let plan = YearPlan::build(ensemble.dates(), target, lat)?;
    let mut values = Array2::from_elem((ensemble.n_members(), plan.years.len()), f64::NAN);
    for (member, mut row) in values.rows_mut().into_iter().enumerate() {
        let reduced = plan.reduce(ensemble.member(member));
        row.iter_mut().zip(reduced).for_each(|(dst, v)| *dst = v);
    }
    debug!(
        n_years = plan.years.len(),
        "resampled ensemble to annual values"
    );
    Ok(AnnualEnsemble::from_parts(
        ensemble.name().to_string(),
        ensemble.units().map(str::to_string),
        plan.years,
        values,
    ))
}
