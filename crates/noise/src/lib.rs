//! Noise ensembles for simulated series.
//!
//! Proxy-climate relationships and archival processes blur the signal a
//! sediment core records. This crate imitates that by stacking a simulated
//! series with noisy replicates of itself. The result is a
//! [`SimEnsemble`](psm_season::SimEnsemble) whose member 0 is the original
//! and whose other members carry either white or AR(1) noise, ready to be
//! paired at random with chronology members.
//!
//! # Quick start
//!
//! ```ignore
//! use psm_noise::{NoiseConfig, NoiseKind, add_noise};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = NoiseConfig::new(NoiseKind::White { mu: 0.0, sigma: 0.5 }).with_n_members(100);
//! let mut rng = StdRng::seed_from_u64(42);
//! let ensemble = add_noise(&series, &config, &mut rng)?;
//! assert_eq!(ensemble.n_members(), 101);
//! ```

mod config;
mod error;
mod noise;

pub use config::{NoiseConfig, NoiseKind};
pub use error::NoiseError;
pub use noise::{add_noise, ar1_noise, white_noise};
