//! Command-line plumbing shared by the workload binaries
//!
//! Both binaries exit with [`exit_codes::USAGE_ERROR`] on bad arguments and
//! with the error's own exit code when a run fails. Log lines go to stderr;
//! use `--log-level` or `RUST_LOG` to change verbosity.

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use index_workloads::error::{exit_codes, Error};
use index_workloads::logging;
use std::str::FromStr;
use tracing::Level;

/// Add the global logging options to `cmd`
pub fn with_logging_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("log-level")
            .help("Log verbosity")
            .long("log-level")
            .value_parser(["error", "warn", "info", "debug", "trace"])
            .default_value("info"),
    )
    .arg(
        Arg::new("json-logs")
            .help("Emit logs as JSON lines")
            .long("json-logs")
            .action(ArgAction::SetTrue),
    )
}

/// Parse the process arguments, exiting with a usage error on failure
pub fn parse_args(cmd: Command) -> ArgMatches {
    match cmd.try_get_matches() {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(exit_codes::USAGE_ERROR);
            }
        },
    }
}

pub fn init_logging(matches: &ArgMatches) {
    let level = matches
        .get_one::<String>("log-level")
        .and_then(|s| Level::from_str(s).ok())
        .unwrap_or(Level::INFO);
    logging::init_logging(level, matches.get_flag("json-logs"));
}

/// Fetch a required string argument
pub fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| Error::Usage(format!("{} argument is required", name)))
}

/// Report `err` and terminate with its exit code
pub fn exit_with(err: Error) -> ! {
    tracing::error!(exit_code = err.exit_code(), "{}", err);
    eprintln!("Error: {}", err);
    std::process::exit(err.exit_code());
}
