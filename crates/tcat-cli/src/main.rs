//! Main entry point for tcat.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tcat_cli::{execute, init_logging, Args, CliResult};
use tcat_common::TcatError;
use tcat_config::{Config, ConfigLoader, ConfigValidator};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("tcat: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CliResult<()> {
    let config = load_config(args)?;
    init_logging(&config.logging);
    info!("Starting tcat {}", env!("CARGO_PKG_VERSION"));

    let bundle = config.build_bundle()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &bundle, &mut out)?;
    out.flush()?;
    Ok(())
}

fn load_config(args: &Args) -> CliResult<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    args.apply_to(&mut config);
    ConfigValidator::validate(&config).map_err(TcatError::from)?;
    Ok(config)
}
