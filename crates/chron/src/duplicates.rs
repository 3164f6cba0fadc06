//! Year lookup for point sampling, tolerant of repeated ages.

use std::collections::BTreeMap;

use psm_season::AnnualSlice;

/// Simulated values looked up for a reduced age column.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSamples {
    /// One value per retained age, NaN where the year is not simulated.
    pub values: Vec<f64>,
    /// Years shared by more than one depth sample, ascending.
    pub duplicated_years: Vec<i32>,
}

/// Looks up the simulated value of every age in `years`.
///
/// Several depth samples may resolve to the same year, for example after
/// an age inversion. Each of them receives that year's value; no sample is
/// dropped. The colliding years are reported in
/// [`PointSamples::duplicated_years`].
pub fn lookup_points(years: &[i32], annual: AnnualSlice<'_>) -> PointSamples {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &y in years {
        *counts.entry(y).or_default() += 1;
    }
    let duplicated_years = counts
        .into_iter()
        .filter_map(|(y, c)| (c > 1).then_some(y))
        .collect();

    let values = years
        .iter()
        .map(|&y| annual.value_at(y).unwrap_or(f64::NAN))
        .collect();

    PointSamples {
        values,
        duplicated_years,
    }
}
