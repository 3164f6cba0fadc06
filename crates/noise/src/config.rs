//! Noise model parameters.

use crate::error::NoiseError;

/// Stochastic process added to each noise replicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseKind {
    /// Independent Gaussian draws `N(mu, sigma)`.
    White {
        /// Mean of the noise.
        mu: f64,
        /// Standard deviation of the noise.
        sigma: f64,
    },
    /// First-order autoregressive noise `y[t] = rho * y[t-1] + v[t]` with
    /// `v ~ N(0, sigma * sqrt(1 - rho^2))`, so `y` has standard deviation
    /// `sigma` once stationary.
    Ar1 {
        /// Lag-one autocorrelation.
        rho: f64,
        /// Stationary standard deviation.
        sigma: f64,
    },
}

impl NoiseKind {
    /// Checks the process parameters.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidArgument`] if `sigma` is not finite and
    /// positive, `mu` is not finite, or `|rho| >= 1`.
    pub fn validate(&self) -> Result<(), NoiseError> {
        let sigma = match *self {
            Self::White { mu, sigma } => {
                if !mu.is_finite() {
                    return Err(NoiseError::InvalidArgument {
                        reason: format!("mu must be finite, got {mu}"),
                    });
                }
                sigma
            }
            Self::Ar1 { rho, sigma } => {
                if !rho.is_finite() || rho.abs() >= 1.0 {
                    return Err(NoiseError::InvalidArgument {
                        reason: format!("|rho| must be < 1 for a stationary process, got {rho}"),
                    });
                }
                sigma
            }
        };
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(NoiseError::InvalidArgument {
                reason: format!("sigma must be finite and positive, got {sigma}"),
            });
        }
        Ok(())
    }
}

/// Configuration for [`add_noise`](crate::add_noise).
///
/// # Example
///
/// ```
/// use psm_noise::{NoiseConfig, NoiseKind};
///
/// let config = NoiseConfig::new(NoiseKind::Ar1 { rho: 0.6, sigma: 0.3 })
///     .with_n_members(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    kind: NoiseKind,
    n_members: usize,
}

impl NoiseConfig {
    /// Creates a configuration for `kind` with 10 noise replicates.
    pub fn new(kind: NoiseKind) -> Self {
        Self {
            kind,
            n_members: 10,
        }
    }

    /// Sets the number of noise replicates added next to the original.
    pub fn with_n_members(mut self, n: usize) -> Self {
        self.n_members = n;
        self
    }

    /// Returns the noise process.
    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Returns the number of noise replicates.
    pub fn n_members(&self) -> usize {
        self.n_members
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.n_members == 0 {
            return Err(NoiseError::InvalidArgument {
                reason: "n_members must be >= 1".to_string(),
            });
        }
        self.kind.validate()
    }
}
