//! Time windows covered by each depth sample under slice sampling.
//!
//! Both policies work on one ensemble member at a time: gaps are removed,
//! windows are built over the retained samples in depth order, the two
//! outermost edges are extended outwards, every edge is clamped to the
//! simulated period and the result is scattered back to the full depth
//! index.

use tracing::trace;

use crate::chronology::{DepthUnit, ReducedAges};
use crate::error::ChronError;

/// Per-depth-sample time windows of one ensemble member.
///
/// Both vectors are aligned with the depth index; `None` where the age is
/// missing. A window may be given high-to-low when ages decrease with
/// depth; consumers use `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceBounds {
    lower: Vec<Option<f64>>,
    upper: Vec<Option<f64>>,
}

impl SliceBounds {
    fn scatter(reduced: &ReducedAges, n_rows: usize, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            lower: reduced.scatter(n_rows, None, lower.into_iter().map(Some).collect()),
            upper: reduced.scatter(n_rows, None, upper.into_iter().map(Some).collect()),
        }
    }

    /// Returns the lower edges.
    pub fn lower(&self) -> &[Option<f64>] {
        &self.lower
    }

    /// Returns the upper edges.
    pub fn upper(&self) -> &[Option<f64>] {
        &self.upper
    }

    /// Returns the number of depth samples.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Returns `true` if there are no depth samples.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Returns the window of one depth sample ordered low-to-high.
    pub fn window(&self, row: usize) -> Option<(f64, f64)> {
        let lo = self.lower.get(row).copied().flatten()?;
        let up = self.upper.get(row).copied().flatten()?;
        Some((lo.min(up), lo.max(up)))
    }
}

fn clamp_to_range(edges: &mut [f64], year_range: (i32, i32)) {
    let (first, last) = (f64::from(year_range.0), f64::from(year_range.1));
    for e in edges.iter_mut() {
        let clamped = e.clamp(first, last);
        if clamped != *e {
            trace!(edge = *e, clamped, "slice edge cut to simulated period");
            *e = clamped;
        }
    }
}

/// Builds windows for contiguous samples.
///
/// Each boundary between consecutive retained samples sits at the midpoint
/// of their ages. The first lower and the last upper edge mirror the
/// neighbouring half gap outwards. A single retained sample gets the
/// window `[age, age]`. Edges are clamped to `year_range`.
pub fn bounds_adjacent(ages: &[Option<i32>], year_range: (i32, i32)) -> SliceBounds {
    let reduced = ReducedAges::from_column(ages);
    let a: Vec<f64> = reduced.years.iter().map(|&y| f64::from(y)).collect();
    let n = a.len();
    if n == 0 {
        return SliceBounds::scatter(&reduced, ages.len(), Vec::new(), Vec::new());
    }

    let mut lower = vec![a[0]; n];
    let mut upper = vec![a[n - 1]; n];
    if n > 1 {
        for k in 0..n - 1 {
            let mid = 0.5 * (a[k] + a[k + 1]);
            upper[k] = mid;
            lower[k + 1] = mid;
        }
        lower[0] = a[0] - 0.5 * (a[1] - a[0]);
        upper[n - 1] = a[n - 1] + 0.5 * (a[n - 1] - a[n - 2]);
    }

    clamp_to_range(&mut lower, year_range);
    clamp_to_range(&mut upper, year_range);
    SliceBounds::scatter(&reduced, ages.len(), lower, upper)
}

/// The physical extent of a sample of thickness `sampling_size_mm` centred
/// on `depth`, in the depth unit.
pub fn depth_window(depth: f64, sampling_size_mm: f64, unit: DepthUnit) -> (f64, f64) {
    let half = 0.5 * sampling_size_mm * unit.per_millimeter();
    (depth - half, depth + half)
}

/// Linear age-depth model on a 1 mm grid with ages rounded to whole years,
/// half years to the even neighbour.
struct AgeGrid {
    start: f64,
    step: f64,
    n_nodes: usize,
    xp: Vec<f64>,
    fp: Vec<f64>,
}

impl AgeGrid {
    fn new(mut pairs: Vec<(f64, f64)>, unit: DepthUnit) -> Self {
        pairs.sort_by(|x, y| x.0.total_cmp(&y.0));
        let (xp, fp): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let start = xp[0];
        let step = unit.per_millimeter();
        let span = xp[xp.len() - 1] - start;
        let n_nodes = (span / step).round() as usize + 1;
        Self {
            start,
            step,
            n_nodes,
            xp,
            fp,
        }
    }

    /// Index of the grid node nearest to `depth`, clamped to the grid.
    fn snap(&self, depth: f64) -> usize {
        let j = ((depth - self.start) / self.step).round();
        if j <= 0.0 {
            0
        } else {
            (j as usize).min(self.n_nodes - 1)
        }
    }

    fn age_at_node(&self, j: usize) -> f64 {
        interp(self.start + j as f64 * self.step, &self.xp, &self.fp).round_ties_even()
    }
}

/// Piecewise-linear interpolation with constant extension past the ends.
/// `xp` must be sorted ascending.
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len();
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    let k = xp.partition_point(|&p| p <= x);
    let (x0, x1, y0, y1) = (xp[k - 1], xp[k], fp[k - 1], fp[k]);
    if x1 == x0 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Builds windows for samples of fixed physical thickness.
///
/// Each retained depth is widened to [`depth_window`]; both edges are
/// mapped to ages through the member's own age-depth relation, linearly
/// interpolated on a 1 mm grid spanning the retained depths and rounded to
/// whole years, with each edge snapped to the nearest grid node. Because
/// the grid ends at the outermost samples, the first lower edge is moved
/// down by the first window's width and the last upper edge up by the last
/// window's width. Edges are clamped to `year_range`.
///
/// # Errors
///
/// Returns [`ChronError::InvalidArgument`] for a sampling size that is not
/// finite and positive, [`ChronError::LengthMismatch`] if `depths` and
/// `ages` differ in length and [`ChronError::NonFiniteInput`] for NaN or
/// infinite depths.
pub fn bounds_distant(
    ages: &[Option<i32>],
    depths: &[f64],
    unit: DepthUnit,
    year_range: (i32, i32),
    sampling_size_mm: f64,
) -> Result<SliceBounds, ChronError> {
    if !sampling_size_mm.is_finite() || sampling_size_mm <= 0.0 {
        return Err(ChronError::InvalidArgument {
            reason: format!("sampling size must be finite and positive, got {sampling_size_mm}"),
        });
    }
    if depths.len() != ages.len() {
        return Err(ChronError::LengthMismatch {
            field: "depths",
            expected: ages.len(),
            got: depths.len(),
        });
    }
    if depths.iter().any(|d| !d.is_finite()) {
        return Err(ChronError::NonFiniteInput { field: "depths" });
    }

    let reduced = ReducedAges::from_column(ages);
    let n = reduced.rows.len();
    if n == 0 {
        return Ok(SliceBounds::scatter(&reduced, ages.len(), Vec::new(), Vec::new()));
    }

    let pairs = reduced
        .rows
        .iter()
        .zip(&reduced.years)
        .map(|(&r, &y)| (depths[r], f64::from(y)))
        .collect();
    let grid = AgeGrid::new(pairs, unit);

    let (mut lower, mut upper): (Vec<f64>, Vec<f64>) = reduced
        .rows
        .iter()
        .map(|&r| {
            let (lo, up) = depth_window(depths[r], sampling_size_mm, unit);
            (
                grid.age_at_node(grid.snap(lo)),
                grid.age_at_node(grid.snap(up)),
            )
        })
        .unzip();

    lower[0] -= upper[0] - lower[0];
    upper[n - 1] += upper[n - 1] - lower[n - 1];

    clamp_to_range(&mut lower, year_range);
    clamp_to_range(&mut upper, year_range);
    Ok(SliceBounds::scatter(&reduced, ages.len(), lower, upper))
}
