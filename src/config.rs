use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level psm configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PsmConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Sediment core site.
    pub site: SiteToml,

    /// Habitat season of the proxy variable.
    #[serde(default)]
    pub target: TargetToml,

    /// Time-to-depth mapping settings.
    #[serde(default)]
    pub chron: ChronToml,

    /// Optional noise ensemble settings.
    #[serde(default)]
    pub noise: Option<NoiseToml>,
}

impl PsmConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub simulation: Option<PathBuf>,
    pub chronology: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            simulation: None,
            chronology: None,
            output: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteToml {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    /// Overrides the depth unit stored with the chronology.
    #[serde(default)]
    pub depth_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    /// Defaults to `"annual"` only when the whole `[target]` table is absent.
    #[serde(default)]
    pub habitat_season: Option<String>,
    #[serde(default)]
    pub months: Option<Vec<u8>>,
}

impl Default for TargetToml {
    fn default() -> Self {
        Self {
            habitat_season: default_habitat_season(),
            months: None,
        }
    }
}

fn default_habitat_season() -> Option<String> {
    Some("annual".to_string())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChronToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub sampling: Option<String>,
    /// Slice thickness in millimetres for distant sampling.
    #[serde(default)]
    pub sampling_size: Option<f64>,
    #[serde(default)]
    pub quiet: bool,
}

impl Default for ChronToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            sampling: None,
            sampling_size: None,
            quiet: false,
        }
    }
}

fn default_method() -> String {
    "point2point".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseToml {
    /// `"white"` or `"ar1"`.
    pub kind: String,
    #[serde(default = "default_members")]
    pub members: usize,
    #[serde(default)]
    pub mu: f64,
    pub sigma: f64,
    #[serde(default)]
    pub rho: Option<f64>,
}

fn default_members() -> usize {
    10
}
