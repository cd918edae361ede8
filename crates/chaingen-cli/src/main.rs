//! `chaingen`: compile build settings into a CMake toolchain file.
//!
//! Exit codes:
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal or I/O failure                  |
//! |  2   | Bad input (flags, profile, template)     |
//! |  3   | Profile or template not found            |
//! |  4   | Configuration or template directory      |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod profile;

fn main() -> ExitCode {
    // .env may set RUST_LOG or CHAINGEN__* so it is read before anything else.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("chaingen: {e:#}");
        return ExitCode::from(1);
    }
    debug!(command = ?cli.command, "arguments parsed");

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return report(&err, verbose, !cli.global.no_color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let color = output.supports_color();
    match run(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Templates(args) => commands::templates::execute(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, cli.global.config.as_ref(), config, output)
        }
    }
}

/// Log `err`, print it to stderr and map it to the process exit code.
fn report(err: &CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color && std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}
