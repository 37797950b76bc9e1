//! Key remapper
//!
//! Rewrites a transaction trace so that every referenced key becomes the
//! corpus entry at that key's position in the load trace.
//!
//! ```text
//! remap-keys load.txt txn.txt emails.txt txn_email.txt
//! remap-keys none none emails.txt load_email.txt
//! ```

mod cli;

use clap::{Arg, ArgMatches, Command};
use index_workloads::{RemapJob, RemapReport, Result};

fn main() {
    let matches = cli::parse_args(create_cli());
    cli::init_logging(&matches);

    if let Err(e) = run(&matches) {
        cli::exit_with(e);
    }
}

fn create_cli() -> Command {
    let cmd = Command::new("remap-keys")
        .about("Remap trace keys onto a corpus of string keys")
        .version(env!("CARGO_PKG_VERSION"))
        .after_help("If LOAD and TXN are both 'none', the corpus is converted into an INSERT trace.")
        .arg(
            Arg::new("load")
                .help("Load trace of 'INSERT <key>' lines, or 'none'")
                .value_name("LOAD")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("txn")
                .help("Transaction trace to rewrite, or 'none'")
                .value_name("TXN")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("corpus")
                .help("One string key per line")
                .value_name("CORPUS")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::new("output")
                .help("Output trace")
                .value_name("OUTPUT")
                .required(true)
                .index(4),
        );
    cli::with_logging_args(cmd)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let job = RemapJob::from_args(
        cli::required(matches, "load")?,
        cli::required(matches, "txn")?,
        cli::required(matches, "corpus")?,
        cli::required(matches, "output")?,
    )?;

    match job.run()? {
        RemapReport::Converted { entries } => {
            println!("✓ Converted {} corpus entries -> {}", entries, job.output.display());
        }
        RemapReport::Rewritten(stats) => {
            println!(
                "✓ Rewrote {} lines ({} substituted, {} wrapped, {} inserts) -> {}",
                stats.lines,
                stats.substituted,
                stats.wrapped,
                stats.inserts,
                job.output.display()
            );
        }
    }
    Ok(())
}
