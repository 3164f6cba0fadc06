use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Proxy system model: forward-model climate simulations into proxy space.
#[derive(Parser)]
#[command(
    name = "psm",
    version,
    about = "Proxy system model: map simulated climate onto sediment core depths"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Map a simulated series onto a site's chronology ensemble.
    Forward(ForwardArgs),
    /// Add a noise ensemble to a simulated series.
    Noise(NoiseArgs),
}

/// Arguments for the `forward` subcommand.
#[derive(clap::Args)]
pub struct ForwardArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "psm.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `noise` subcommand.
#[derive(clap::Args)]
pub struct NoiseArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "psm.toml")]
    pub config: PathBuf,

    /// Path for the noisy simulation Parquet file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
