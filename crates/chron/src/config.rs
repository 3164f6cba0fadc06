//! Configuration for age-model mapping.

use tracing::info;

use crate::error::ChronError;

/// Slice width used for distant sampling when none is given.
pub const DEFAULT_SAMPLING_SIZE_MM: f64 = 10.0;

/// Geometry of the time slice a depth sample integrates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceSampling {
    /// Samples are contiguous; each slice reaches halfway to its neighbours.
    Adjacent,
    /// Samples have a fixed physical thickness and may be spaced apart.
    Distant {
        /// Sample thickness in millimetres.
        sampling_size_mm: f64,
    },
}

/// How a depth sample relates to simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMethod {
    /// A depth sample records a single year.
    PointToPoint,
    /// A depth sample records the mean over a slice of years.
    SliceToPoint(SliceSampling),
}

impl SamplingMethod {
    /// Parses the textual method and sampling names.
    ///
    /// `method` is `"point2point"` or `"slice2point"`. The latter needs
    /// `sampling` set to `"adjacent"` or `"distant"`; distant sampling
    /// without a size falls back to [`DEFAULT_SAMPLING_SIZE_MM`].
    /// `sampling` and `sampling_size_mm` are ignored for point sampling.
    ///
    /// # Errors
    ///
    /// Returns [`ChronError::InvalidArgument`] for unknown names, a missing
    /// sampling policy, or a sampling size that is not finite and positive.
    pub fn from_names(
        method: &str,
        sampling: Option<&str>,
        sampling_size_mm: Option<f64>,
    ) -> Result<Self, ChronError> {
        match method {
            "point2point" => Ok(Self::PointToPoint),
            "slice2point" => {
                let sampling = match sampling {
                    Some("adjacent") => SliceSampling::Adjacent,
                    Some("distant") => {
                        let size = sampling_size_mm.unwrap_or_else(|| {
                            info!(
                                default_mm = DEFAULT_SAMPLING_SIZE_MM,
                                "no sampling size given for distant sampling, using default"
                            );
                            DEFAULT_SAMPLING_SIZE_MM
                        });
                        SliceSampling::Distant {
                            sampling_size_mm: size,
                        }
                    }
                    other => {
                        return Err(ChronError::InvalidArgument {
                            reason: format!(
                                "slice2point needs sampling \"adjacent\" or \"distant\", got {other:?}"
                            ),
                        });
                    }
                };
                let method = Self::SliceToPoint(sampling);
                method.validate()?;
                Ok(method)
            }
            other => Err(ChronError::InvalidArgument {
                reason: format!(
                    "method must be \"point2point\" or \"slice2point\", got {other:?}"
                ),
            }),
        }
    }

    /// Checks the numeric parameters of the method.
    pub fn validate(&self) -> Result<(), ChronError> {
        if let Self::SliceToPoint(SliceSampling::Distant { sampling_size_mm }) = *self {
            if !sampling_size_mm.is_finite() || sampling_size_mm <= 0.0 {
                return Err(ChronError::InvalidArgument {
                    reason: format!(
                        "sampling size must be finite and positive, got {sampling_size_mm}"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Short name used in logs and output metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointToPoint => "point2point",
            Self::SliceToPoint(SliceSampling::Adjacent) => "slice2point/adjacent",
            Self::SliceToPoint(SliceSampling::Distant { .. }) => "slice2point/distant",
        }
    }
}

/// Configuration for [`time2chron`](crate::time2chron).
///
/// # Example
///
/// ```
/// use psm_chron::{ChronConfig, SamplingMethod, SliceSampling};
///
/// let config = ChronConfig::new()
///     .with_method(SamplingMethod::SliceToPoint(SliceSampling::Adjacent))
///     .with_quiet(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChronConfig {
    method: SamplingMethod,
    quiet: bool,
}

impl ChronConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `method = PointToPoint`, `quiet = false`.
    pub fn new() -> Self {
        Self {
            method: SamplingMethod::PointToPoint,
            quiet: false,
        }
    }

    /// Builds a configuration from textual names, see
    /// [`SamplingMethod::from_names`].
    pub fn from_names(
        method: &str,
        sampling: Option<&str>,
        sampling_size_mm: Option<f64>,
    ) -> Result<Self, ChronError> {
        let method = SamplingMethod::from_names(method, sampling, sampling_size_mm)?;
        Ok(Self::new().with_method(method))
    }

    /// Sets the sampling method.
    pub fn with_method(mut self, method: SamplingMethod) -> Self {
        self.method = method;
        self
    }

    /// Suppresses per-member diagnostics.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Returns the sampling method.
    pub fn method(&self) -> SamplingMethod {
        self.method
    }

    /// Returns whether diagnostics are suppressed.
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ChronError> {
        self.method.validate()
    }
}

impl Default for ChronConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ChronConfig::new();
        assert_eq!(cfg.method(), SamplingMethod::PointToPoint);
        assert!(!cfg.quiet());
        assert_eq!(cfg, ChronConfig::default());
    }

    #[test]
    fn parse_valid_combinations() {
        assert_eq!(
            SamplingMethod::from_names("point2point", None, None).unwrap(),
            SamplingMethod::PointToPoint
        );
        assert_eq!(
            SamplingMethod::from_names("point2point", Some("bogus"), None).unwrap(),
            SamplingMethod::PointToPoint
        );
        assert_eq!(
            SamplingMethod::from_names("slice2point", Some("adjacent"), None).unwrap(),
            SamplingMethod::SliceToPoint(SliceSampling::Adjacent)
        );
        assert_eq!(
            SamplingMethod::from_names("slice2point", Some("distant"), Some(4.0)).unwrap(),
            SamplingMethod::SliceToPoint(SliceSampling::Distant {
                sampling_size_mm: 4.0
            })
        );
    }

    #[test]
    fn distant_defaults_to_ten_mm() {
        assert_eq!(
            SamplingMethod::from_names("slice2point", Some("distant"), None).unwrap(),
            SamplingMethod::SliceToPoint(SliceSampling::Distant {
                sampling_size_mm: DEFAULT_SAMPLING_SIZE_MM
            })
        );
    }

    #[test]
    fn invalid_combinations() {
        for (method, sampling, size) in [
            ("nearest", None, None),
            ("slice2point", None, None),
            ("slice2point", Some("point"), None),
            ("slice2point", Some("distant"), Some(0.0)),
            ("slice2point", Some("distant"), Some(-2.0)),
            ("slice2point", Some("distant"), Some(f64::NAN)),
        ] {
            assert!(
                matches!(
                    SamplingMethod::from_names(method, sampling, size),
                    Err(ChronError::InvalidArgument { .. })
                ),
                "{method} {sampling:?} {size:?}"
            );
        }
    }

    #[test]
    fn config_validate_catches_builder_values() {
        let cfg = ChronConfig::new().with_method(SamplingMethod::SliceToPoint(
            SliceSampling::Distant {
                sampling_size_mm: f64::INFINITY,
            },
        ));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn method_names() {
        assert_eq!(SamplingMethod::PointToPoint.name(), "point2point");
        assert_eq!(
            SamplingMethod::SliceToPoint(SliceSampling::Adjacent).name(),
            "slice2point/adjacent"
        );
    }
}
