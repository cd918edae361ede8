//! Tracing setup for the `chaingen` binary.
//!
//! The library crates only emit events; this module installs the one
//! subscriber. Levels by flag:
//!
//! | Flag(s)  | Level |
//! |----------|-------|
//! | (none)   | WARN  |
//! | `-v`     | INFO  |
//! | `-vv`    | DEBUG |
//! | `-vvv`   | TRACE |
//! | `--quiet`| ERROR |
//!
//! A set `RUST_LOG` wins over the flags.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::Directive, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Our crates. Dependencies stay at WARN whatever the verbosity.
const LOG_TARGETS: &[&str] = &["chaingen", "chaingen_core", "chaingen_adapters"];

/// Install the global subscriber. Call once, first thing after parsing.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => flag_filter(level_for(args))?,
    };

    // Events share stderr with error reports, so they follow the same
    // colour decision.
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(args.verbose >= 2)
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("tracing subscriber already installed")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn flag_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    LOG_TARGETS
        .iter()
        .try_fold(
            EnvFilter::default().add_directive(LevelFilter::WARN.into()),
            |filter, target| {
                let directive: Directive = format!("{target}={}", level.to_string().to_lowercase())
                    .parse()
                    .with_context(|| format!("bad log directive for {target}"))?;
                Ok(filter.add_directive(directive))
            },
        )
}
