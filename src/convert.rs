//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use psm_chron::{ChronConfig, Coordinates, DepthUnit};
use psm_io::{Compression, WriterConfig};
use psm_noise::{NoiseConfig, NoiseKind};
use psm_season::SeasonalTarget;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}

/// Builds site [`Coordinates`] from the TOML site table.
pub fn build_coordinates(site: &SiteToml) -> Coordinates {
    let coords = Coordinates::new(site.lon, site.lat);
    match site.elevation {
        Some(e) => coords.with_elevation(e),
        None => coords,
    }
}

/// Parses the optional depth unit override of the site table.
pub fn parse_depth_unit(site: &SiteToml) -> Result<Option<DepthUnit>> {
    site.depth_unit
        .as_deref()
        .map(|u| u.parse::<DepthUnit>().context("invalid [site].depth_unit"))
        .transpose()
}

/// Resolves the habitat season of the proxy variable.
pub fn build_target(target: &TargetToml) -> Result<SeasonalTarget> {
    SeasonalTarget::from_attributes(target.habitat_season.as_deref(), target.months.as_deref())
        .context("invalid [target] section")
}

/// Builds a [`ChronConfig`] from the TOML chron configuration.
pub fn build_chron_config(chron: &ChronToml) -> Result<ChronConfig> {
    let cfg = ChronConfig::from_names(
        &chron.method,
        chron.sampling.as_deref(),
        chron.sampling_size,
    )
    .context("invalid [chron] section")?;
    Ok(cfg.with_quiet(chron.quiet))
}

/// Builds a [`NoiseConfig`] from the TOML noise configuration.
///
/// AR(1) noise requires `rho`; white noise rejects it.
pub fn build_noise_config(noise: &NoiseToml) -> Result<NoiseConfig> {
    let kind = match (noise.kind.to_lowercase().as_str(), noise.rho) {
        ("white", None) => NoiseKind::White {
            mu: noise.mu,
            sigma: noise.sigma,
        },
        ("white", Some(_)) => bail!("rho is only valid for ar1 noise"),
        ("ar1", Some(rho)) => NoiseKind::Ar1 {
            rho,
            sigma: noise.sigma,
        },
        ("ar1", None) => bail!("ar1 noise requires rho"),
        (other, _) => bail!("unknown noise kind: {other:?}"),
    };
    let cfg = NoiseConfig::new(kind).with_n_members(noise.members);
    cfg.validate().context("invalid [noise] section")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psm_chron::{SamplingMethod, SliceSampling};
    use psm_season::Season;

    fn site(depth_unit: Option<&str>) -> SiteToml {
        SiteToml {
            name: "core".to_string(),
            lon: 10.0,
            lat: -30.0,
            elevation: Some(-2500.0),
            depth_unit: depth_unit.map(str::to_string),
        }
    }

    fn noise(kind: &str, rho: Option<f64>) -> NoiseToml {
        NoiseToml {
            kind: kind.to_string(),
            members: 3,
            mu: 0.0,
            sigma: 1.0,
            rho,
        }
    }

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert!(parse_compression("lz4").is_err());
    }

    #[test]
    fn writer_config_from_toml() {
        let io = IoConfig {
            compression: "zstd".to_string(),
            row_group_size: 10,
            ..IoConfig::default()
        };
        let writer = build_writer_config(&io).unwrap();
        assert_eq!(writer.compression(), Compression::Zstd);
    }

    #[test]
    fn coordinates_and_depth_unit() {
        let coords = build_coordinates(&site(None));
        assert_eq!(coords.lat, -30.0);
        assert_eq!(coords.elevation, Some(-2500.0));
        assert_eq!(parse_depth_unit(&site(None)).unwrap(), None);
        assert_eq!(
            parse_depth_unit(&site(Some("mm"))).unwrap(),
            Some(DepthUnit::Millimeters)
        );
        assert!(parse_depth_unit(&site(Some("ft"))).is_err());
    }

    #[test]
    fn target_resolution() {
        let annual = build_target(&TargetToml::default()).unwrap();
        assert_eq!(annual, SeasonalTarget::Annual);
        let winter = TargetToml {
            habitat_season: Some("winter".to_string()),
            months: None,
        };
        assert_eq!(
            build_target(&winter).unwrap(),
            SeasonalTarget::Named(Season::Winter)
        );
        let nothing = TargetToml {
            habitat_season: None,
            months: None,
        };
        assert!(build_target(&nothing).is_err());
    }

    #[test]
    fn chron_config_from_toml() {
        let toml = ChronToml {
            method: "slice2point".to_string(),
            sampling: Some("adjacent".to_string()),
            sampling_size: None,
            quiet: true,
        };
        let cfg = build_chron_config(&toml).unwrap();
        assert_eq!(
            cfg.method(),
            SamplingMethod::SliceToPoint(SliceSampling::Adjacent)
        );
        assert!(cfg.quiet());

        let bad = ChronToml {
            method: "slice2point".to_string(),
            ..ChronToml::default()
        };
        assert!(build_chron_config(&bad).is_err());
    }

    #[test]
    fn noise_kinds() {
        let white = build_noise_config(&noise("white", None)).unwrap();
        assert_eq!(white.n_members(), 3);
        assert!(matches!(white.kind(), NoiseKind::White { .. }));
        assert!(matches!(
            build_noise_config(&noise("AR1", Some(0.5))).unwrap().kind(),
            NoiseKind::Ar1 { .. }
        ));
        assert!(build_noise_config(&noise("ar1", None)).is_err());
        assert!(build_noise_config(&noise("white", Some(0.5))).is_err());
        assert!(build_noise_config(&noise("red", None)).is_err());
        assert!(build_noise_config(&noise("ar1", Some(1.0))).is_err());
    }
}
