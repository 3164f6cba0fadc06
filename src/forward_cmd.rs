//! Forward command: map a simulation onto a site's chronology ensemble.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use psm_chron::{KiloyearEnsemble, Site, time2chron};
use psm_io::{read_chronology, read_simulation, write_forward_proxy};
use psm_noise::add_noise;

use crate::cli::ForwardArgs;
use crate::config::PsmConfig;
use crate::convert;
use crate::noise_cmd::{make_rng, single_series};

/// Run the forward-modelling pipeline.
pub fn run(args: ForwardArgs) -> Result<()> {
    let _cmd = info_span!("forward").entered();
    let config = PsmConfig::load(&args.config)?;

    // Step 1: Resolve paths
    let sim_path = config
        .io
        .simulation
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no simulation path: set [io].simulation in config"))?;
    let chron_path = config
        .io
        .chronology
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no chronology path: set [io].chronology in config"))?;
    let output = args
        .output
        .as_ref()
        .or(config.io.output.as_ref())
        .ok_or_else(|| {
            anyhow::anyhow!("no output path: set [io].output in config or use --output")
        })?;

    // Step 2: Build configs from TOML
    let target = convert::build_target(&config.target)?;
    let chron_cfg = convert::build_chron_config(&config.chron)?;
    let noise_cfg = config
        .noise
        .as_ref()
        .map(convert::build_noise_config)
        .transpose()?;
    let depth_unit = convert::parse_depth_unit(&config.site)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let mut rng = make_rng(args.seed.or(config.seed));

    // Step 3: Read inputs
    info!(path = %sim_path.display(), "reading simulation");
    let mut sim = read_simulation(sim_path)
        .with_context(|| format!("failed to read Parquet: {}", sim_path.display()))?;
    if let Some(noise_cfg) = noise_cfg {
        sim = add_noise(&single_series(&sim)?, &noise_cfg, &mut rng)
            .context("noise generation failed")?;
        info!(n_members = sim.n_members(), "added noise ensemble");
    }

    info!(path = %chron_path.display(), "reading chronology");
    let mut chron = read_chronology(chron_path)
        .with_context(|| format!("failed to read Parquet: {}", chron_path.display()))?;
    if let Some(unit) = depth_unit {
        chron = KiloyearEnsemble::new(chron.depths().to_vec(), unit, chron.ages_ka().clone())?;
    }
    info!(
        n_depths = chron.n_depths(),
        n_members = chron.n_members(),
        depth_unit = %chron.depth_unit(),
        "chronology loaded"
    );

    // Step 4: Map time to depth
    let site = Site::new(
        config.site.name.clone(),
        convert::build_coordinates(&config.site),
        chron,
    );
    let proxy = time2chron(&sim, &site, &target, &chron_cfg, &mut rng)
        .with_context(|| format!("forward modelling failed for site {}", config.site.name))?;

    let series = proxy.series();
    let mut n_defined = 0;
    for member in 0..series.n_members() {
        let column = series.member(member).to_vec();
        let defined = psm_stats::count_defined(&column);
        debug!(
            member,
            n_defined = defined,
            mean = psm_stats::nan_mean(&column),
            "forward proxy member"
        );
        n_defined += defined;
    }
    let n_missing = series.n_depths() * series.n_members() - n_defined;
    if n_defined == 0 {
        warn!("every forward proxy value is missing");
    }
    info!(
        n_depths = series.n_depths(),
        n_members = series.n_members(),
        n_missing,
        "forward proxy complete"
    );

    // Step 5: Write output
    write_forward_proxy(output, series, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), "wrote forward proxy");
    Ok(())
}
