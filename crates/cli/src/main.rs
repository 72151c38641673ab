mod cli;
mod commands;
mod config;

use std::process;

use anyhow::Context;
use clap::Parser;
use fleetops::{
    config::{AppConfig, ApplyToConfig, ConfigLoader, YamlLoader},
    fs::RealFileSystem,
};
use tracing::{Level, debug};

use crate::{cli::ClapCli, commands::dispatch_command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = ClapCli::parse();

    let fs = RealFileSystem;

    // 1. Load config.yaml and FLEETOPS_* environment variables
    let (config, ignored_load_error) = match YamlLoader::new(&fs).load_config() {
        Ok(config) => (config, None),
        // Usage and unknown tokens never read the configuration
        Err(err) if !args.needs_config() => (AppConfig::default(), Some(err)),
        Err(err) => return Err(err).context("Failed to load configuration"),
    };

    // 2. Apply CLI args to config (overriding)
    let config = args.apply_to_config(config);

    init_tracing(config.verbose());
    if let Some(err) = ignored_load_error {
        debug!("Configuration not loaded: {err}");
    }
    debug!("CLI arguments: {:#?}", &args);
    debug!("Final config: {:#?}", &config);

    // 3. Dispatch and execute the requested command
    let exit_code = dispatch_command(&args, &config, &fs).await;

    process::exit(exit_code)
}

/// Diagnostics go to stderr so they never mix with backend output on stdout
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
