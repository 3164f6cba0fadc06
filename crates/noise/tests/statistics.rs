use approx::assert_abs_diff_eq;
use psm_calendar::{SimDate, daily_sequence};
use psm_noise::{NoiseConfig, NoiseKind, add_noise, ar1_noise, white_noise};
use psm_season::SimSeries;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn flat(n: usize) -> SimSeries {
    let dates = daily_sequence(SimDate::new(0, 1, 1).unwrap(), n);
    SimSeries::new("x", dates, vec![10.0; n]).unwrap()
}

/// Noise of member `m`, i.e. the member minus the original.
fn noise_of(e: &psm_season::SimEnsemble, m: usize) -> Vec<f64> {
    e.member(m)
        .iter()
        .zip(e.member(0))
        .map(|(a, b)| a - b)
        .collect()
}

#[test]
fn white_noise_moments() {
    let mut rng = StdRng::seed_from_u64(2024);
    let e = white_noise(&flat(20_000), 1, 0.5, 2.0, &mut rng).unwrap();
    let n = noise_of(&e, 1);
    assert_abs_diff_eq!(psm_stats::nan_mean(&n), 0.5, epsilon = 0.1);
    assert_abs_diff_eq!(psm_stats::nan_sd(&n), 2.0, epsilon = 0.1);
    assert!(psm_stats::lag1_autocorrelation(&n).unwrap().abs() < 0.05);
}

#[test]
fn ar1_noise_moments() {
    let mut rng = StdRng::seed_from_u64(7);
    let e = ar1_noise(&flat(50_000), 1, 0.7, 1.5, &mut rng).unwrap();
    let n = noise_of(&e, 1);
    let r1 = psm_stats::lag1_autocorrelation(&n).unwrap();
    assert_abs_diff_eq!(r1, 0.7, epsilon = 0.05);
    assert_abs_diff_eq!(psm_stats::nan_sd(&n), 1.5, epsilon = 0.15);
}

#[test]
fn seeded_generation_is_reproducible() {
    let config = NoiseConfig::new(NoiseKind::Ar1 {
        rho: 0.4,
        sigma: 1.0,
    })
    .with_n_members(5);
    let a = add_noise(&flat(300), &config, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = add_noise(&flat(300), &config, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn replicates_are_independent() {
    let mut rng = StdRng::seed_from_u64(3);
    let e = white_noise(&flat(100), 2, 0.0, 1.0, &mut rng).unwrap();
    assert_ne!(noise_of(&e, 1), noise_of(&e, 2));
}
