use approx::assert_relative_eq;
use ndarray::{Array2, array};
use psm_calendar::{SimDate, monthly_sequence};
use psm_chron::{
    ChronConfig, ChronError, ChronologySource, Coordinates, DepthUnit, KiloyearEnsemble,
    SamplingMethod, Site, SliceSampling, time2chron,
};
use psm_season::{SeasonalTarget, SimEnsemble, SimSeries};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Monthly dates over `n_years` starting at year 0.
fn dates(n_years: usize) -> Vec<SimDate> {
    monthly_sequence(SimDate::new(0, 1, 15).unwrap(), n_years * 12)
}

/// Noise ensemble: member 0 is a huge sentinel, member `m` holds `year + 1000 * m`.
fn noise_ensemble(n_years: usize, n_members: usize) -> SimEnsemble {
    let d = dates(n_years);
    let values = Array2::from_shape_fn((n_members, d.len()), |(m, t)| {
        if m == 0 {
            1e9
        } else {
            f64::from(d[t].year()) + 1000.0 * m as f64
        }
    });
    SimEnsemble::new("d18O", d, values).unwrap()
}

fn site_at(ka: Array2<f64>, lat: f64) -> Site {
    let depths = (0..ka.nrows()).map(|i| 0.01 * i as f64).collect();
    let chron = KiloyearEnsemble::new(depths, DepthUnit::Meters, ka).unwrap();
    Site::new("MD95-2042", Coordinates::new(-10.2, lat), chron)
}

/// A source that must never be read.
struct Untouchable;

impl ChronologySource for Untouchable {
    fn site_name(&self) -> &str {
        "untouchable"
    }

    fn coordinates(&self) -> Coordinates {
        Coordinates::new(0.0, 0.0)
    }

    fn load_chron_data(&self) -> Result<KiloyearEnsemble, ChronError> {
        panic!("chronology loaded despite invalid configuration");
    }
}

#[test]
fn invalid_config_fails_before_loading() {
    let config = ChronConfig::new().with_method(SamplingMethod::SliceToPoint(
        SliceSampling::Distant {
            sampling_size_mm: -1.0,
        },
    ));
    let mut rng = StdRng::seed_from_u64(1);
    let err = time2chron(
        &noise_ensemble(5, 2),
        &Untouchable,
        &SeasonalTarget::Annual,
        &config,
        &mut rng,
    );
    assert!(matches!(err, Err(ChronError::InvalidArgument { .. })));
}

#[test]
fn seeded_runs_are_identical() {
    let ka = Array2::from_shape_fn((20, 8), |(i, m)| 0.01 * (i as f64 + 1.0) + 0.001 * m as f64);
    let site = site_at(ka, 30.0);
    let sim = noise_ensemble(300, 5);
    let config = ChronConfig::from_names("slice2point", Some("adjacent"), None).unwrap();

    let target = SeasonalTarget::Annual;
    let a = time2chron(&sim, &site, &target, &config, &mut StdRng::seed_from_u64(3)).unwrap();
    let b = time2chron(&sim, &site, &target, &config, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(a.series(), b.series());
}

#[test]
fn noise_free_member_is_never_paired() {
    let ka = Array2::from_shape_fn((5, 50), |(i, _)| 0.02 * (i as f64 + 1.0));
    let out = time2chron(
        &noise_ensemble(200, 4),
        &site_at(ka, 30.0),
        &SeasonalTarget::Annual,
        &ChronConfig::new(),
        &mut StdRng::seed_from_u64(11),
    )
    .unwrap();
    assert_eq!(out.resampled().n_members(), 4);
    for v in out.series().values() {
        assert!(*v < 1e8, "member 0 leaked into output: {v}");
    }
}

#[test]
fn single_series_uses_member_zero() {
    let d = dates(50);
    let values = d.iter().map(|x| f64::from(x.year())).collect();
    let sim: SimEnsemble = SimSeries::new("sst", d, values).unwrap().into();
    let out = time2chron(
        &sim,
        &site_at(array![[0.01, 0.02], [0.02, 0.03]], 30.0),
        &SeasonalTarget::Annual,
        &ChronConfig::new(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(out.series().member(0).to_vec(), vec![10.0, 20.0]);
    assert_eq!(out.series().member(1).to_vec(), vec![20.0, 30.0]);
}

#[test]
fn duplicate_ages_broadcast_end_to_end() {
    let d = dates(200);
    let values = d.iter().map(|x| f64::from(x.year()) * 0.5).collect();
    let sim: SimEnsemble = SimSeries::new("x", d, values).unwrap().into();
    let out = time2chron(
        &sim,
        &site_at(array![[0.1], [0.1], [0.105]], 0.0),
        &SeasonalTarget::Annual,
        &ChronConfig::new().with_quiet(true),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(out.series().member(0).to_vec(), vec![50.0, 50.0, 52.5]);
}

#[test]
fn southern_summer_reads_december_to_february() {
    // Value encodes the month, so a DJF mean is (12 + 1 + 2) / 3.
    let d = dates(100);
    let values = d.iter().map(|x| f64::from(x.month())).collect();
    let sim: SimEnsemble = SimSeries::new("sst", d, values).unwrap().into();
    let target = SeasonalTarget::from_attributes(Some("summer"), None).unwrap();
    let out = time2chron(
        &sim,
        &site_at(array![[0.05]], -10.0),
        &target,
        &ChronConfig::new(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_relative_eq!(out.series().member(0)[0], 5.0, epsilon = 1e-12);
    assert_eq!(out.series().lat(), -10.0);
}

#[test]
fn slices_are_clipped_to_the_simulation() {
    // Years 0..=99; ages 90 and 99. The last slice would reach 103.5.
    let d = dates(100);
    let values = d.iter().map(|x| f64::from(x.year())).collect();
    let sim: SimEnsemble = SimSeries::new("x", d, values).unwrap().into();
    let config = ChronConfig::from_names("slice2point", Some("adjacent"), None).unwrap();
    let out = time2chron(
        &sim,
        &site_at(array![[0.090], [0.099]], 0.0),
        &SeasonalTarget::Annual,
        &config,
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    let col = out.series().member(0);
    // [85.5, 94.5] holds years 86..=94.
    assert_relative_eq!(col[0], 90.0, epsilon = 1e-12);
    // [94.5, 99] holds years 95..=99.
    assert_relative_eq!(col[1], 97.0, epsilon = 1e-12);
}

#[test]
fn out_of_range_ages_are_undefined() {
    let d = dates(100);
    let values = vec![1.0; d.len()];
    let sim: SimEnsemble = SimSeries::new("x", d, values).unwrap().into();
    let out = time2chron(
        &sim,
        &site_at(array![[0.05], [0.5]], 0.0),
        &SeasonalTarget::Annual,
        &ChronConfig::new(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(out.series().member(0)[0], 1.0);
    assert!(out.series().member(0)[1].is_nan());
}

#[test]
fn trait_objects_are_accepted() {
    let site = site_at(array![[0.01]], 0.0);
    let source: &dyn ChronologySource = &site;
    let out = time2chron(
        &noise_ensemble(20, 1),
        source,
        &SeasonalTarget::Annual,
        &ChronConfig::new(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(out.series().n_members(), 1);
}
