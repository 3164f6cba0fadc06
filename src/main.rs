mod cli;
mod config;
mod convert;
mod forward_cmd;
mod logging;
mod noise_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Forward(args) => forward_cmd::run(args),
        Command::Noise(args) => noise_cmd::run(args),
    }
}
