//! Noise replicate generation.

use ndarray::{Array2, ArrayView1};
use psm_season::{SimEnsemble, SimSeries};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::{NoiseConfig, NoiseKind};
use crate::error::NoiseError;

fn normal(mean: f64, sd: f64) -> Result<Normal<f64>, NoiseError> {
    Normal::new(mean, sd).map_err(|e| NoiseError::InvalidArgument {
        reason: format!("cannot build normal distribution N({mean}, {sd}): {e}"),
    })
}

/// Stacks `series` with noisy replicates of itself.
///
/// Member 0 of the result is `series` unchanged; members `1..=n_members`
/// each add an independent realisation of the configured noise process
/// along the time axis. Name, units and dates are carried over.
///
/// For AR(1) noise the process starts from a uniform draw on `[0, 1)`.
///
/// # Errors
///
/// Returns [`NoiseError::InvalidArgument`] if `config` is invalid.
#[tracing::instrument(skip_all, fields(name = series.name(), n_members = config.n_members()))]
pub fn add_noise(
    series: &SimSeries,
    config: &NoiseConfig,
    rng: &mut impl Rng,
) -> Result<SimEnsemble, NoiseError> {
    config.validate()?;
    let x = series.values();
    let mut values = Array2::zeros((config.n_members() + 1, x.len()));
    values.row_mut(0).assign(&ArrayView1::from(x));

    match config.kind() {
        NoiseKind::White { mu, sigma } => {
            let dist = normal(mu, sigma)?;
            for mut row in values.rows_mut().into_iter().skip(1) {
                for (dst, &xt) in row.iter_mut().zip(x) {
                    *dst = xt + dist.sample(rng);
                }
            }
        }
        NoiseKind::Ar1 { rho, sigma } => {
            let dist = normal(0.0, sigma * (1.0 - rho * rho).sqrt())?;
            for mut row in values.rows_mut().into_iter().skip(1) {
                let mut y: f64 = rng.random();
                for (t, (dst, &xt)) in row.iter_mut().zip(x).enumerate() {
                    if t > 0 {
                        y = rho * y + dist.sample(rng);
                    }
                    *dst = xt + y;
                }
            }
        }
    }

    let mut ensemble = SimEnsemble::new(series.name(), series.dates().to_vec(), values)?;
    if let Some(units) = series.units() {
        ensemble = ensemble.with_units(units);
    }
    debug!(n_times = ensemble.n_times(), "generated noise ensemble");
    Ok(ensemble)
}

/// Adds `n_members` white-noise replicates drawn from `N(mu, sigma)`.
///
/// See [`add_noise`].
pub fn white_noise(
    series: &SimSeries,
    n_members: usize,
    mu: f64,
    sigma: f64,
    rng: &mut impl Rng,
) -> Result<SimEnsemble, NoiseError> {
    let config = NoiseConfig::new(NoiseKind::White { mu, sigma }).with_n_members(n_members);
    add_noise(series, &config, rng)
}

/// Adds `n_members` AR(1) replicates with autocorrelation `rho` and
/// stationary standard deviation `sigma`.
///
/// See [`add_noise`].
pub fn ar1_noise(
    series: &SimSeries,
    n_members: usize,
    rho: f64,
    sigma: f64,
    rng: &mut impl Rng,
) -> Result<SimEnsemble, NoiseError> {
    let config = NoiseConfig::new(NoiseKind::Ar1 { rho, sigma }).with_n_members(n_members);
    add_noise(series, &config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psm_calendar::{SimDate, daily_sequence};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn series(n: usize) -> SimSeries {
        let dates = daily_sequence(SimDate::new(1, 1, 1).unwrap(), n);
        let values = (0..n).map(|i| (i as f64 * 0.01).sin()).collect();
        SimSeries::new("tas", dates, values)
            .unwrap()
            .with_units("K")
    }

    #[test]
    fn member_zero_is_the_original() {
        let s = series(100);
        let mut rng = StdRng::seed_from_u64(42);
        let e = white_noise(&s, 4, 0.0, 1.0, &mut rng).unwrap();
        assert_eq!(e.n_members(), 5);
        assert_eq!(e.member(0).to_vec(), s.values());
        assert_ne!(e.member(1).to_vec(), s.values());
        assert_eq!(e.units(), Some("K"));
        assert_eq!(e.dates(), s.dates());
    }

    #[test]
    fn ar1_member_zero_is_the_original() {
        let s = series(50);
        let mut rng = StdRng::seed_from_u64(1);
        let e = ar1_noise(&s, 2, 0.5, 0.2, &mut rng).unwrap();
        assert_eq!(e.member(0).to_vec(), s.values());
        assert_eq!(e.n_members(), 3);
    }

    #[test]
    fn ar1_first_step_is_uniform_offset() {
        let s = series(10);
        let mut rng = StdRng::seed_from_u64(9);
        let e = ar1_noise(&s, 20, 0.3, 1.0, &mut rng).unwrap();
        for m in 1..=20 {
            let y0 = e.member(m)[0] - s.values()[0];
            assert!((0.0..1.0).contains(&y0), "y0 = {y0}");
        }
    }

    #[test]
    fn invalid_parameters() {
        let s = series(5);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(white_noise(&s, 3, 0.0, 0.0, &mut rng).is_err());
        assert!(white_noise(&s, 0, 0.0, 1.0, &mut rng).is_err());
        assert!(ar1_noise(&s, 3, 1.0, 1.0, &mut rng).is_err());
        assert!(ar1_noise(&s, 3, 0.5, -1.0, &mut rng).is_err());
    }
}
