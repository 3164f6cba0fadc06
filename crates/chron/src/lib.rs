//! Age-model mapping of simulated climate onto proxy depth samples.
//!
//! A sediment core is dated by an ensemble of age-depth curves. This crate
//! takes a simulated series, reduces it to the habitat season of the proxy
//! and reads it out at the ages of every depth sample in every chronology
//! member, either at single years or averaged over the time slice a
//! physical sample spans.
//!
//! # Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["SimEnsemble"] -->|"resample_ensemble()"| B["AnnualEnsemble"]
//!     S["ChronologySource"] -->|"load_chron_data()"| K["KiloyearEnsemble"]
//!     K -->|"to_years()"| C["ChronologyEnsemble"]
//!     B --> M["time2chron()"]
//!     C --> M
//!     M -->|"point2point"| P["lookup_points()"]
//!     M -->|"slice2point"| Q["bounds_adjacent() / bounds_distant()"]
//!     P --> F["ForwardProxySeries"]
//!     Q --> F
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use psm_chron::{ChronConfig, Coordinates, DepthUnit, KiloyearEnsemble, Site, time2chron};
//! use psm_season::{SeasonalTarget, SimEnsemble};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let chron = KiloyearEnsemble::new(depths, DepthUnit::Meters, ages_ka)?;
//! let site = Site::new("GeoB1023-5", Coordinates::new(11.5, -17.2), chron);
//! let target = SeasonalTarget::from_attributes(Some("summer"), None)?;
//! let config = ChronConfig::from_names("slice2point", Some("distant"), Some(5.0))?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let proxy = time2chron(&sim, &site, &target, &config, &mut rng)?;
//! ```

mod bounds;
mod chronology;
mod config;
mod duplicates;
mod error;
mod mapper;
mod result;
mod site;

pub use bounds::{SliceBounds, bounds_adjacent, bounds_distant, depth_window};
pub use chronology::{ChronologyEnsemble, DepthUnit, KiloyearEnsemble};
pub use config::{ChronConfig, DEFAULT_SAMPLING_SIZE_MM, SamplingMethod, SliceSampling};
pub use duplicates::{PointSamples, lookup_points};
pub use error::ChronError;
pub use mapper::time2chron;
pub use result::{ForwardProxy, ForwardProxySeries};
pub use site::{ChronologySource, Coordinates, Site};
