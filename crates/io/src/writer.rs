//! High-level Parquet writer configuration and orchestration.

use std::path::Path;

use parquet::file::properties::WriterProperties;
use psm_chron::{ForwardProxySeries, KiloyearEnsemble};
use psm_season::SimEnsemble;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing tables to Parquet.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Returns the compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        self.validate()?;
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Writes a simulated ensemble in long format, one batch per member.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_simulation(
    path: &Path,
    ensemble: &SimEnsemble,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::simulation_schema(ensemble);
    let batches = (0..ensemble.n_members())
        .map(|m| parquet_write::simulation_batch(ensemble, m, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, schema, props)?;
    info!(
        n_members = ensemble.n_members(),
        n_times = ensemble.n_times(),
        "wrote simulation"
    );
    Ok(())
}

/// Writes a chronology ensemble as a wide table: `depth` plus one age
/// column (kiloyears) per member.
///
/// # Errors
///
/// Same as [`write_simulation`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_chronology(
    path: &Path,
    chron: &KiloyearEnsemble,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::chronology_schema(chron);
    let batch = parquet_write::chronology_batch(chron, &schema)?;
    parquet_write::write_batches(path, &[batch], schema, props)?;
    info!(
        n_depths = chron.n_depths(),
        n_members = chron.n_members(),
        "wrote chronology"
    );
    Ok(())
}

/// Writes a forward proxy series in long format, one batch per chronology
/// member, with site, location and units as schema metadata.
///
/// # Errors
///
/// Same as [`write_simulation`].
#[tracing::instrument(skip_all, fields(path = %path.display(), site = series.site()))]
pub fn write_forward_proxy(
    path: &Path,
    series: &ForwardProxySeries,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::forward_proxy_schema(series);
    let batches = (0..series.n_members())
        .map(|m| parquet_write::forward_proxy_batch(series, m, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, schema, props)?;
    info!(
        n_depths = series.n_depths(),
        n_members = series.n_members(),
        "wrote forward proxy"
    );
    Ok(())
}
