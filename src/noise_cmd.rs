//! Noise command: add a noise ensemble to a simulated series.

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use psm_io::{read_simulation, write_simulation};
use psm_noise::add_noise;
use psm_season::{SimEnsemble, SimSeries};

use crate::cli::NoiseArgs;
use crate::config::PsmConfig;
use crate::convert;

/// Returns the only member of `sim` as a plain series.
pub(crate) fn single_series(sim: &SimEnsemble) -> Result<SimSeries> {
    if sim.n_members() != 1 {
        bail!(
            "noise can only be added to a single series, input has {} members",
            sim.n_members()
        );
    }
    let series = SimSeries::new(sim.name(), sim.dates().to_vec(), sim.member(0).to_vec())?;
    Ok(match sim.units() {
        Some(units) => series.with_units(units),
        None => series,
    })
}

/// Seeded RNG, or one seeded from the OS when no seed is configured.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Run the noise pipeline.
pub fn run(args: NoiseArgs) -> Result<()> {
    let _cmd = info_span!("noise").entered();
    let config = PsmConfig::load(&args.config)?;

    let input = config
        .io
        .simulation
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no simulation path: set [io].simulation in config"))?;
    let noise_toml = config
        .noise
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no [noise] section in config"))?;
    let noise_cfg = convert::build_noise_config(noise_toml)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let mut rng = make_rng(args.seed.or(config.seed));

    info!(path = %input.display(), "reading simulation");
    let sim = read_simulation(input)
        .with_context(|| format!("failed to read Parquet: {}", input.display()))?;
    let series = single_series(&sim)?;

    let ensemble = add_noise(&series, &noise_cfg, &mut rng).context("noise generation failed")?;
    info!(n_members = ensemble.n_members(), "noise ensemble generated");

    write_simulation(&args.output, &ensemble, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", args.output.display()))?;
    info!(path = %args.output.display(), "wrote noise ensemble");
    Ok(())
}
