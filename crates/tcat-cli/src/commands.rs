//! Command execution against a loaded bundle.

use crate::cli::Command;
use crate::error::CliResult;
use std::io::Write;
use tcat_i18n::Bundle;
use tracing::debug;

/// Run `command` against `bundle`, writing its output to `out`.
pub fn execute(command: &Command, bundle: &Bundle, out: &mut dyn Write) -> CliResult<()> {
    debug!("Executing {:?}", command);

    match command {
        Command::Get { key, .. } => {
            let params = command.params();
            bundle.resolve_to(key, out, &[Some(&params)])?;
            writeln!(out)?;
        }
        Command::Try { key, .. } => {
            let params = command.params();
            bundle.set_not_found_handler(|key, out, _| {
                let _ = write!(out, "[missing: {key}]");
            });
            bundle.try_resolve_to(key, out, &[Some(&params)]);
            writeln!(out)?;
        }
        Command::Keys => {
            for key in bundle.keys() {
                writeln!(out, "{key}")?;
            }
        }
        Command::Stats => {
            writeln!(out, "locale: {}", bundle.locale())?;
            writeln!(out, "keys: {}", bundle.len())?;
            writeln!(out, "cache: {}/{}", bundle.cache_len(), bundle.cache_capacity())?;
        }
    }

    Ok(())
}
