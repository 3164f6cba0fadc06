//! Simulated series at sub-annual and annual resolution.

use ndarray::{Array1, Array2, ArrayView1, Axis, s};
use psm_calendar::SimDate;

use crate::error::SeasonError;

/// A single simulated time series at sub-annual resolution.
///
/// Values may be NaN where the model provides no data.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSeries {
    name: String,
    units: Option<String>,
    dates: Vec<SimDate>,
    values: Vec<f64>,
}

impl SimSeries {
    /// Creates a series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::EmptyData`] for an empty series and
    /// [`SeasonError::LengthMismatch`] if the vectors differ in length.
    pub fn new(
        name: impl Into<String>,
        dates: Vec<SimDate>,
        values: Vec<f64>,
    ) -> Result<Self, SeasonError> {
        if dates.is_empty() {
            return Err(SeasonError::EmptyData);
        }
        if values.len() != dates.len() {
            return Err(SeasonError::LengthMismatch {
                field: "values",
                expected: dates.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            units: None,
            dates,
            values,
        })
    }

    /// Attaches a units label.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the units label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the time stamps.
    pub fn dates(&self) -> &[SimDate] {
        &self.dates
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of time steps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no time steps.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A stack of simulated series sharing one time axis.
///
/// Rows of the value matrix are ensemble members. By convention member 0
/// is the noise-free simulation and members `1..` are noise replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEnsemble {
    name: String,
    units: Option<String>,
    dates: Vec<SimDate>,
    values: Array2<f64>,
}

impl SimEnsemble {
    /// Creates an ensemble from a `members × time` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::EmptyData`] if there are no members or no
    /// time steps, and [`SeasonError::LengthMismatch`] if the matrix width
    /// differs from the number of dates.
    pub fn new(
        name: impl Into<String>,
        dates: Vec<SimDate>,
        values: Array2<f64>,
    ) -> Result<Self, SeasonError> {
        if dates.is_empty() || values.nrows() == 0 {
            return Err(SeasonError::EmptyData);
        }
        if values.ncols() != dates.len() {
            return Err(SeasonError::LengthMismatch {
                field: "values",
                expected: dates.len(),
                got: values.ncols(),
            });
        }
        Ok(Self {
            name: name.into(),
            units: None,
            dates,
            values,
        })
    }

    /// Attaches a units label.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the units label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the shared time stamps.
    pub fn dates(&self) -> &[SimDate] {
        &self.dates
    }

    /// Returns the `members × time` value matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the values of one member.
    ///
    /// # Panics
    ///
    /// Panics if `member >= self.n_members()`.
    pub fn member(&self, member: usize) -> ArrayView1<'_, f64> {
        self.values.row(member)
    }

    /// Returns the number of members.
    pub fn n_members(&self) -> usize {
        self.values.nrows()
    }

    /// Returns the number of time steps.
    pub fn n_times(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` when the ensemble carries noise replicates besides
    /// the original simulation.
    pub fn has_noise_members(&self) -> bool {
        self.n_members() > 1
    }
}

impl From<SimSeries> for SimEnsemble {
    fn from(series: SimSeries) -> Self {
        Self {
            name: series.name,
            units: series.units,
            dates: series.dates,
            values: Array1::from(series.values).insert_axis(Axis(0)),
        }
    }
}

/// A borrowed annual series: strictly ascending years with one value each.
#[derive(Debug, Clone, Copy)]
pub struct AnnualSlice<'a> {
    years: &'a [i32],
    values: ArrayView1<'a, f64>,
}

impl<'a> AnnualSlice<'a> {
    /// Returns the years.
    pub fn years(&self) -> &'a [i32] {
        self.years
    }

    /// Returns the values.
    pub fn values(&self) -> ArrayView1<'a, f64> {
        self.values
    }

    /// Returns the first and last covered year.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Looks up the value of an exact year.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.years
            .binary_search(&year)
            .ok()
            .map(|k| self.values[k])
    }

    /// Mean of the values whose year lies in the closed interval
    /// `[lower, upper]`, skipping NaN. NaN if the window is empty.
    pub fn mean_over(&self, lower: f64, upper: f64) -> f64 {
        let start = self.years.partition_point(|&y| f64::from(y) < lower);
        let end = self.years.partition_point(|&y| f64::from(y) <= upper);
        if start >= end {
            return f64::NAN;
        }
        psm_stats::nan_mean_iter(self.values.slice(s![start..end]).iter().copied())
    }
}

/// An owned annual series.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualSeries {
    name: String,
    units: Option<String>,
    years: Vec<i32>,
    values: Array1<f64>,
}

impl AnnualSeries {
    pub(crate) fn from_parts(
        name: String,
        units: Option<String>,
        years: Vec<i32>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name,
            units,
            years,
            values: Array1::from(values),
        }
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the units label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the number of years.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns `true` if no year has data.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Borrows the series for lookups.
    pub fn view(&self) -> AnnualSlice<'_> {
        AnnualSlice {
            years: &self.years,
            values: self.values.view(),
        }
    }
}

/// An annual ensemble: members sharing one ascending year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualEnsemble {
    name: String,
    units: Option<String>,
    years: Vec<i32>,
    values: Array2<f64>,
}

impl AnnualEnsemble {
    pub(crate) fn from_parts(
        name: String,
        units: Option<String>,
        years: Vec<i32>,
        values: Array2<f64>,
    ) -> Self {
        Self {
            name,
            units,
            years,
            values,
        }
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the units label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the shared years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the `members × years` value matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the number of members.
    pub fn n_members(&self) -> usize {
        self.values.nrows()
    }

    /// Returns the number of years.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// Returns the first and last covered year.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Borrows one member for lookups.
    ///
    /// # Panics
    ///
    /// Panics if `member >= self.n_members()`.
    pub fn member(&self, member: usize) -> AnnualSlice<'_> {
        AnnualSlice {
            years: &self.years,
            values: self.values.row(member),
        }
    }
}
