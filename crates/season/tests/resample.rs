use approx::assert_relative_eq;
use psm_calendar::{SimDate, daily_sequence, monthly_sequence};
use psm_season::{
    Season, SeasonalTarget, SimEnsemble, SimSeries, resample_annual, resample_ensemble,
};

#[test]
fn daily_series_collapses_to_calendar_years() {
    let dates = daily_sequence(SimDate::new(1850, 1, 1).unwrap(), 365 * 3);
    let values: Vec<f64> = dates.iter().map(|d| f64::from(d.year() - 1850)).collect();
    let s = SimSeries::new("tas", dates, values)
        .unwrap()
        .with_units("K");
    let a = resample_annual(&s, &SeasonalTarget::Annual, 60.0).unwrap();
    assert_eq!(a.years(), &[1850, 1851, 1852]);
    assert_eq!(a.units(), Some("K"));
    for (k, v) in a.view().values().iter().enumerate() {
        assert_relative_eq!(*v, k as f64, epsilon = 1e-12);
    }
}

#[test]
fn winter_flips_with_hemisphere() {
    let dates = monthly_sequence(SimDate::new(0, 1, 15).unwrap(), 12);
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let s = SimSeries::new("sst", dates, values).unwrap();
    let t = SeasonalTarget::Named(Season::Winter);

    let north = resample_annual(&s, &t, 30.0).unwrap();
    assert_relative_eq!(north.view().values()[0], 5.0, epsilon = 1e-12);

    let south = resample_annual(&s, &t, -30.0).unwrap();
    assert_relative_eq!(south.view().values()[0], 7.0, epsilon = 1e-12);
}

#[test]
fn explicit_months_skip_years_without_samples() {
    // Mar 0 .. Feb 2: year 2 only has Jan and Feb.
    let dates = monthly_sequence(SimDate::new(0, 3, 15).unwrap(), 24);
    let s = SimSeries::new("x", dates, vec![1.0; 24]).unwrap();
    let t = SeasonalTarget::months(&[6]).unwrap();
    let a = resample_annual(&s, &t, 0.0).unwrap();
    assert_eq!(a.years(), &[0, 1]);
}

#[test]
fn single_member_ensemble_matches_series() {
    let dates = monthly_sequence(SimDate::new(5, 1, 15).unwrap(), 36);
    let values: Vec<f64> = (0..36).map(|i| f64::from(i) * 0.5).collect();
    let s = SimSeries::new("x", dates, values).unwrap();
    let t = SeasonalTarget::from_attributes(Some("summer"), None).unwrap();

    let single = resample_annual(&s, &t, 12.0).unwrap();
    let ens = resample_ensemble(&SimEnsemble::from(s), &t, 12.0).unwrap();
    assert_eq!(ens.years(), single.years());
    assert_eq!(ens.member(0).values(), single.view().values());
}
