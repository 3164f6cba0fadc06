//! Age-model ensembles: raw kiloyear tables and their year-resolved form.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::error::ChronError;

/// Physical unit of a depth axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthUnit {
    /// Metres.
    #[default]
    Meters,
    /// Centimetres.
    Centimeters,
    /// Millimetres.
    Millimeters,
}

impl DepthUnit {
    /// Length of one millimetre expressed in this unit.
    pub fn per_millimeter(self) -> f64 {
        match self {
            Self::Meters => 1e-3,
            Self::Centimeters => 1e-1,
            Self::Millimeters => 1.0,
        }
    }

    /// Short label (`"m"`, `"cm"`, `"mm"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
        }
    }
}

impl fmt::Display for DepthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepthUnit {
    type Err = ChronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeters),
            _ => Err(ChronError::InvalidArgument {
                reason: format!("unknown depth unit {s:?} (expected m, cm or mm)"),
            }),
        }
    }
}

fn check_depths(depths: &[f64], n_rows: usize, n_members: usize) -> Result<(), ChronError> {
    if depths.is_empty() || n_members == 0 {
        return Err(ChronError::EmptyData);
    }
    if n_rows != depths.len() {
        return Err(ChronError::LengthMismatch {
            field: "ages",
            expected: depths.len(),
            got: n_rows,
        });
    }
    if depths.iter().any(|d| !d.is_finite()) {
        return Err(ChronError::NonFiniteInput { field: "depths" });
    }
    Ok(())
}

/// A chronology ensemble as stored by an archive: ages in kiloyears.
///
/// The age matrix is `depth × member`; NaN marks a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct KiloyearEnsemble {
    depths: Vec<f64>,
    depth_unit: DepthUnit,
    ages_ka: Array2<f64>,
}

impl KiloyearEnsemble {
    /// Creates a kiloyear ensemble.
    ///
    /// # Errors
    ///
    /// Returns [`ChronError::EmptyData`] without depths or members,
    /// [`ChronError::LengthMismatch`] if the row count differs from the
    /// number of depths and [`ChronError::NonFiniteInput`] for NaN or
    /// infinite depths.
    pub fn new(
        depths: Vec<f64>,
        depth_unit: DepthUnit,
        ages_ka: Array2<f64>,
    ) -> Result<Self, ChronError> {
        check_depths(&depths, ages_ka.nrows(), ages_ka.ncols())?;
        Ok(Self {
            depths,
            depth_unit,
            ages_ka,
        })
    }

    /// Returns the depths.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the depth unit.
    pub fn depth_unit(&self) -> DepthUnit {
        self.depth_unit
    }

    /// Returns the `depth × member` age matrix in kiloyears.
    pub fn ages_ka(&self) -> &Array2<f64> {
        &self.ages_ka
    }

    /// Returns the number of depth samples.
    pub fn n_depths(&self) -> usize {
        self.depths.len()
    }

    /// Returns the number of ensemble members.
    pub fn n_members(&self) -> usize {
        self.ages_ka.ncols()
    }

    /// Drops rows whose depth repeats an earlier row; the first is kept.
    pub fn dedup_depths(self) -> Self {
        let mut keep = Vec::with_capacity(self.depths.len());
        for (i, d) in self.depths.iter().enumerate() {
            if !self.depths[..i].contains(d) {
                keep.push(i);
            }
        }
        if keep.len() == self.depths.len() {
            return self;
        }
        debug!(
            dropped = self.depths.len() - keep.len(),
            "dropped duplicate depth rows"
        );
        Self {
            depths: keep.iter().map(|&i| self.depths[i]).collect(),
            depth_unit: self.depth_unit,
            ages_ka: self.ages_ka.select(Axis(0), &keep),
        }
    }

    /// Converts ages to integer years (`ka * 1000`, half years rounded to
    /// even) and discards any age outside the inclusive `year_range`.
    pub fn to_years(&self, year_range: (i32, i32)) -> ChronologyEnsemble {
        let (first, last) = year_range;
        let ages = self.ages_ka.mapv(|ka| {
            let year = (ka * 1000.0).round_ties_even();
            (year.is_finite() && year >= f64::from(first) && year <= f64::from(last))
                .then_some(year as i32)
        });
        ChronologyEnsemble {
            depths: self.depths.clone(),
            depth_unit: self.depth_unit,
            ages,
        }
    }
}

/// A chronology ensemble resolved to integer simulation years.
///
/// The age matrix is `depth × member`; `None` marks a gap or an age outside
/// the simulated period.
#[derive(Debug, Clone, PartialEq)]
pub struct ChronologyEnsemble {
    depths: Vec<f64>,
    depth_unit: DepthUnit,
    ages: Array2<Option<i32>>,
}

impl ChronologyEnsemble {
    /// Creates a year-resolved ensemble.
    ///
    /// # Errors
    ///
    /// Same conditions as [`KiloyearEnsemble::new`].
    pub fn new(
        depths: Vec<f64>,
        depth_unit: DepthUnit,
        ages: Array2<Option<i32>>,
    ) -> Result<Self, ChronError> {
        check_depths(&depths, ages.nrows(), ages.ncols())?;
        Ok(Self {
            depths,
            depth_unit,
            ages,
        })
    }

    /// Returns the depths.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the depth unit.
    pub fn depth_unit(&self) -> DepthUnit {
        self.depth_unit
    }

    /// Returns the `depth × member` age matrix.
    pub fn ages(&self) -> &Array2<Option<i32>> {
        &self.ages
    }

    /// Returns the number of depth samples.
    pub fn n_depths(&self) -> usize {
        self.depths.len()
    }

    /// Returns the number of ensemble members.
    pub fn n_members(&self) -> usize {
        self.ages.ncols()
    }

    /// Returns the ages of one member in depth order.
    ///
    /// # Panics
    ///
    /// Panics if `member >= self.n_members()`.
    pub fn member(&self, member: usize) -> Vec<Option<i32>> {
        self.ages.column(member).to_vec()
    }

    /// Returns `true` if at least one member has at least one age.
    pub fn has_any_age(&self) -> bool {
        self.ages.iter().any(Option::is_some)
    }
}

/// One member's age column with gaps removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReducedAges {
    /// Depth-sample index of each retained age.
    pub rows: Vec<usize>,
    /// Retained ages in depth-sample order.
    pub years: Vec<i32>,
}

impl ReducedAges {
    pub fn from_column(ages: &[Option<i32>]) -> Self {
        let (rows, years) = ages
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.map(|y| (i, y)))
            .unzip();
        Self { rows, years }
    }

    /// Writes one value per retained age back into a full-length column.
    pub fn scatter<T: Clone>(&self, n_rows: usize, fill: T, values: Vec<T>) -> Vec<T> {
        let mut out = vec![fill; n_rows];
        for (&row, v) in self.rows.iter().zip(values) {
            out[row] = v;
        }
        out
    }
}
