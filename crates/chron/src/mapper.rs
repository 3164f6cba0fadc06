//! Mapping of simulated annual series onto chronology ensembles.

use ndarray::Array2;
use psm_season::{AnnualSlice, SeasonalTarget, SimEnsemble, resample_ensemble};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bounds::{bounds_adjacent, bounds_distant};
use crate::chronology::{ChronologyEnsemble, ReducedAges};
use crate::config::{ChronConfig, SamplingMethod, SliceSampling};
use crate::duplicates::lookup_points;
use crate::error::ChronError;
use crate::result::{ForwardProxy, ForwardProxySeries};
use crate::site::ChronologySource;

/// Read-only inputs shared by all member tasks.
struct MemberContext<'a> {
    chron: &'a ChronologyEnsemble,
    year_range: (i32, i32),
    method: SamplingMethod,
    site: &'a str,
    quiet: bool,
}

impl MemberContext<'_> {
    /// Forward-models one chronology member against one simulation member.
    fn map_member(&self, member: usize, sim: AnnualSlice<'_>) -> Result<Vec<f64>, ChronError> {
        let ages = self.chron.member(member);
        let n_rows = ages.len();

        match self.method {
            SamplingMethod::PointToPoint => {
                let reduced = ReducedAges::from_column(&ages);
                let points = lookup_points(&reduced.years, sim);
                if !points.duplicated_years.is_empty() && !self.quiet {
                    info!(
                        site = self.site,
                        member,
                        years = ?points.duplicated_years,
                        "duplicate ages, broadcasting the simulated value to every colliding sample"
                    );
                }
                Ok(reduced.scatter(n_rows, f64::NAN, points.values))
            }
            SamplingMethod::SliceToPoint(sampling) => {
                let bounds = match sampling {
                    SliceSampling::Adjacent => bounds_adjacent(&ages, self.year_range),
                    SliceSampling::Distant { sampling_size_mm } => bounds_distant(
                        &ages,
                        self.chron.depths(),
                        self.chron.depth_unit(),
                        self.year_range,
                        sampling_size_mm,
                    )?,
                };
                Ok((0..n_rows)
                    .map(|row| {
                        bounds
                            .window(row)
                            .map_or(f64::NAN, |(lo, up)| sim.mean_over(lo, up))
                    })
                    .collect())
            }
        }
    }
}

/// Forward-models a simulated series into the depth domain of a proxy site.
///
/// The simulation is first reduced to one value per year over the target
/// habitat season at the site latitude. The site chronology is converted
/// to whole years and ages outside the simulated period are discarded.
/// Every chronology member is then paired with a simulation member and
/// each depth sample receives either the value of its year
/// ([`SamplingMethod::PointToPoint`]) or the mean over its time slice
/// ([`SamplingMethod::SliceToPoint`]).
///
/// When `sim` carries noise replicates (two or more members), each
/// chronology member is paired with a replicate drawn uniformly from
/// members `1..`, member 0 being the noise-free original. All draws come
/// from `rng` before members are processed in parallel, so a seeded `rng`
/// gives reproducible output.
///
/// Depth samples whose age is missing or outside the simulated period are
/// NaN in the output, as are slices that capture no simulated year.
///
/// # Errors
///
/// - [`ChronError::InvalidArgument`] if `config` is invalid.
/// - [`ChronError::Season`] if seasonal resampling fails.
/// - [`ChronError::DataUnavailable`] if the season never occurs in the
///   simulation or no chronology age falls inside the simulated period.
#[tracing::instrument(
    skip_all,
    fields(site = site.site_name(), variable = sim.name(), method = config.method().name())
)]
pub fn time2chron<S>(
    sim: &SimEnsemble,
    site: &S,
    target: &SeasonalTarget,
    config: &ChronConfig,
    rng: &mut impl Rng,
) -> Result<ForwardProxy, ChronError>
where
    S: ChronologySource + ?Sized,
{
    config.validate()?;
    let site_name = site.site_name();
    let coordinates = site.coordinates();

    let resampled = resample_ensemble(sim, target, coordinates.lat)?;
    let Some(year_range) = resampled.year_range() else {
        return Err(ChronError::DataUnavailable {
            reason: format!(
                "simulation {:?} has no data in the target season",
                sim.name()
            ),
        });
    };
    let sim_noise = sim.has_noise_members();
    debug!(
        first_year = year_range.0,
        last_year = year_range.1,
        sim_noise,
        "resampled simulation"
    );

    let chron = site.load_chron_data()?.to_years(year_range);
    if !chron.has_any_age() {
        return Err(ChronError::DataUnavailable {
            reason: format!(
                "no chronology age of site {site_name:?} lies within years {}..={}",
                year_range.0, year_range.1
            ),
        });
    }

    let pairing: Vec<usize> = (0..chron.n_members())
        .map(|_| {
            if sim_noise {
                rng.random_range(1..resampled.n_members())
            } else {
                0
            }
        })
        .collect();

    let ctx = MemberContext {
        chron: &chron,
        year_range,
        method: config.method(),
        site: site_name,
        quiet: config.quiet(),
    };
    let columns = pairing
        .par_iter()
        .enumerate()
        .map(|(member, &sim_member)| ctx.map_member(member, resampled.member(sim_member)))
        .collect::<Result<Vec<_>, _>>()?;

    let values = Array2::from_shape_fn((chron.n_depths(), chron.n_members()), |(row, member)| {
        columns[member][row]
    });
    let mut series = ForwardProxySeries::new(
        sim.name(),
        site_name,
        coordinates,
        chron.depths().to_vec(),
        chron.depth_unit(),
        values,
    )?;
    if let Some(units) = sim.units() {
        series = series.with_units(units);
    }

    Ok(ForwardProxy::new(series, resampled))
}
