//! Output types of age-model mapping.

use ndarray::{Array2, ArrayView1};
use psm_season::AnnualEnsemble;

use crate::chronology::DepthUnit;
use crate::error::ChronError;
use crate::site::Coordinates;

/// Forward-modelled proxy values: one column per chronology member.
///
/// The value matrix is `depth × member`; NaN marks an undefined value.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardProxySeries {
    name: String,
    site: String,
    coordinates: Coordinates,
    units: Option<String>,
    depths: Vec<f64>,
    depth_unit: DepthUnit,
    values: Array2<f64>,
}

impl ForwardProxySeries {
    /// Creates a forward proxy series.
    ///
    /// # Errors
    ///
    /// Returns [`ChronError::EmptyData`] without depths or members and
    /// [`ChronError::LengthMismatch`] if the row count differs from the
    /// number of depths.
    pub fn new(
        name: impl Into<String>,
        site: impl Into<String>,
        coordinates: Coordinates,
        depths: Vec<f64>,
        depth_unit: DepthUnit,
        values: Array2<f64>,
    ) -> Result<Self, ChronError> {
        if depths.is_empty() || values.ncols() == 0 {
            return Err(ChronError::EmptyData);
        }
        if values.nrows() != depths.len() {
            return Err(ChronError::LengthMismatch {
                field: "values",
                expected: depths.len(),
                got: values.nrows(),
            });
        }
        Ok(Self {
            name: name.into(),
            site: site.into(),
            coordinates,
            units: None,
            depths,
            depth_unit,
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

    /// Returns the site name.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns the longitude.
    pub fn lon(&self) -> f64 {
        self.coordinates.lon
    }

    /// Returns the latitude.
    pub fn lat(&self) -> f64 {
        self.coordinates.lat
    }

    /// Returns the units label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the depths.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the depth unit.
    pub fn depth_unit(&self) -> DepthUnit {
        self.depth_unit
    }

    /// Returns the `depth × member` value matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the values of one chronology member.
    ///
    /// # Panics
    ///
    /// Panics if `member >= self.n_members()`.
    pub fn member(&self, member: usize) -> ArrayView1<'_, f64> {
        self.values.column(member)
    }

    /// Returns the number of depth samples.
    pub fn n_depths(&self) -> usize {
        self.depths.len()
    }

    /// Returns the number of chronology members.
    pub fn n_members(&self) -> usize {
        self.values.ncols()
    }
}

/// Result of [`time2chron`](crate::time2chron).
#[derive(Debug, Clone)]
pub struct ForwardProxy {
    series: ForwardProxySeries,
    resampled: AnnualEnsemble,
}

impl ForwardProxy {
    pub(crate) fn new(series: ForwardProxySeries, resampled: AnnualEnsemble) -> Self {
        Self { series, resampled }
    }

    /// Returns the forward-modelled proxy series.
    pub fn series(&self) -> &ForwardProxySeries {
        &self.series
    }

    /// Returns the seasonally resampled simulation it was drawn from.
    pub fn resampled(&self) -> &AnnualEnsemble {
        &self.resampled
    }

    /// Consumes the result and returns both parts.
    pub fn into_parts(self) -> (ForwardProxySeries, AnnualEnsemble) {
        (self.series, self.resampled)
    }
}
