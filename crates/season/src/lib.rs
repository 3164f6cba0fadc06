//! Simulated time series and their reduction to one value per year.
//!
//! A proxy archive only records the climate of the season in which its
//! organisms lived. This crate holds the simulated series types shared by
//! the rest of the toolkit and the seasonal resampler that turns
//! sub-annual model output into an annual series restricted to a habitat
//! season.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  SimSeries /  │────▶│ SeasonalTarget │────▶│  AnnualSeries /  │
//!  │  SimEnsemble  │     │ (months filter)│     │  AnnualEnsemble  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use psm_calendar::{SimDate, monthly_sequence};
//! use psm_season::{SeasonalTarget, SimSeries, resample_annual};
//!
//! let dates = monthly_sequence(SimDate::new(0, 1, 15)?, 24);
//! let series = SimSeries::new("sst", dates, values)?.with_units("degC");
//! let target = SeasonalTarget::from_attributes(Some("summer"), None)?;
//! let annual = resample_annual(&series, &target, -10.0)?;
//! ```

mod error;
mod resample;
mod series;
mod target;

pub use error::SeasonError;
pub use psm_calendar::Season;
pub use resample::{resample_annual, resample_ensemble};
pub use series::{AnnualEnsemble, AnnualSeries, AnnualSlice, SimEnsemble, SimSeries};
pub use target::SeasonalTarget;
