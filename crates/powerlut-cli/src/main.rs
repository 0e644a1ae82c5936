//! PowerLut - rescale simulated car power and torque curves
//!
//! Entry point for the `powerlut` command.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};
use config::{Settings, CARS_PATH_ENV};

/// Log filter: `RUST_LOG` when set, otherwise `warn` raised by `-v` for our crates
fn build_env_filter(rust_log: Option<&str>, verbose: u8) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("warning: ignoring invalid RUST_LOG '{}': {}", directives, e),
        }
    }

    let mut env_filter = EnvFilter::new("warn");
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    };
    if let Some(level) = level {
        for target in ["powerlut", "powerlut_core"] {
            if let Ok(parsed) = format!("{}={}", target, level).parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }
    env_filter
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;
    let env_path = std::env::var_os(CARS_PATH_ENV).map(PathBuf::from);
    let cars_dir = settings.resolve_cars_path(cli.path, env_path)?;
    tracing::debug!("Using cars directory {}", cars_dir.display());

    match &cli.command {
        Commands::Cars { filter } => commands::run_cars(&cars_dir, filter.as_deref(), cli.json),
        Commands::Inspect(args) => commands::run_inspect(&cars_dir, &args.car, cli.json),
        Commands::Validate(args) => commands::run_validate(&cars_dir, &args.car, cli.json),
        Commands::Modify(args) => commands::run_modify(&cars_dir, args, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_rust_log_takes_precedence() {
        let filter = build_env_filter(Some("debug"), 0);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = build_env_filter(Some("error"), 2);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_default_is_warn() {
        assert_eq!(build_env_filter(None, 0).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_env_filter(Some("  "), 0).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_verbose_raises_level() {
        assert_eq!(build_env_filter(None, 1).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(build_env_filter(None, 2).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
