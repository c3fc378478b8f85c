// SPDX-License-Identifier: MIT OR Apache-2.0
//! `exo_tool`: check, dump and normalize exedit object files.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use cli::{Args, Command};
use config::ToolConfig;
use error::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log target of this binary
const TOOL_TARGET: &str = "exo_tool";

/// Filter directive for a verbosity level, `configured` used at level 0.
///
/// The tool's own target is always enabled so failures reach stderr.
fn log_directive(verbosity: u8, configured: Option<&str>) -> String {
    let level = match verbosity {
        0 => {
            return match configured {
                Some(filter) if filter.contains(TOOL_TARGET) => filter.to_string(),
                Some(filter) => format!("{filter},{TOOL_TARGET}=info"),
                None => format!("exedit=info,{TOOL_TARGET}=info"),
            }
        }
        1 => "debug",
        _ => "trace",
    };
    format!("exedit={level},{TOOL_TARGET}={level}")
}

fn init_logging(directive: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // stdout carries command output
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: &Command, config: &ToolConfig) -> Result<()> {
    let options = &config.codec;
    tracing::debug!(file = %command.file().display(), ?command, "Running");
    match command {
        Command::Check { file } => {
            let summary = commands::check(file, options)?;
            println!("{}: {summary}", file.display());
        }
        Command::Dump { file } => {
            println!("{}", commands::dump(file, options)?);
        }
        Command::Normalize { file, output } => {
            if let Some(text) = commands::normalize(file, output.as_deref(), options)? {
                print!("{text}");
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = ToolConfig::resolve(args.config.as_deref());
    let configured = config.as_ref().ok().and_then(|c| c.log_filter.as_deref());
    init_logging(&log_directive(args.verbosity, configured));

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };
    config.apply_overrides(args.strict, args.sequential);
    tracing::debug!(?config, "Configuration");

    if let Err(e) = run(&args.command, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_for(directive: &str, check: impl FnOnce() -> bool) -> bool {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(directive));
        tracing::subscriber::with_default(subscriber, check)
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(0, None), "exedit=info,exo_tool=info");
        assert_eq!(log_directive(0, Some("exedit_exo=trace")), "exedit_exo=trace,exo_tool=info");
        assert_eq!(log_directive(0, Some("exo_tool=warn")), "exo_tool=warn");
        assert_eq!(log_directive(1, Some("exedit_exo=trace")), "exedit=debug,exo_tool=debug");
        assert_eq!(log_directive(5, None), "exedit=trace,exo_tool=trace");
    }

    #[test]
    fn test_default_directive_reports_tool_errors() {
        let directive = log_directive(0, None);
        assert!(enabled_for(&directive, || {
            tracing::enabled!(target: "exo_tool", tracing::Level::ERROR)
        }));
        assert!(enabled_for(&directive, || {
            tracing::enabled!(target: "exo_tool", tracing::Level::INFO)
        }));
        assert!(enabled_for(&directive, || {
            tracing::enabled!(target: "exedit_exo::object", tracing::Level::INFO)
        }));
        assert!(!enabled_for(&directive, || {
            tracing::enabled!(target: "exo_tool", tracing::Level::DEBUG)
        }));

        let configured = log_directive(0, Some("exedit_exo=trace"));
        assert!(enabled_for(&configured, || {
            tracing::enabled!(target: "exo_tool", tracing::Level::ERROR)
        }));
    }
}
