//! Workload generator
//!
//! Runs the YCSB generator for the workload named in a config file and
//! writes load and transaction traces with the requested key encoding.
//!
//! ```text
//! gen-workload workload.cfg
//! gen-workload --output-dir /data/workloads --keep-string-traces workload.cfg
//! ```

mod cli;

use clap::{Arg, ArgAction, ArgMatches, Command};
use index_workloads::{GeneratorSettings, Result, WorkloadConfig, WorkloadPipeline, YcsbGenerator};
use std::path::Path;

fn main() {
    let matches = cli::parse_args(create_cli());
    cli::init_logging(&matches);

    if let Err(e) = run(&matches) {
        cli::exit_with(e);
    }
}

fn create_cli() -> Command {
    let cmd = Command::new("gen-workload")
        .about("Generate key-value index benchmark workloads with YCSB")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .help("Workload config: workload name, then key type (randint, monoint or email)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("settings")
                .help("JSON file with generator settings")
                .long("settings")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("generator-dir")
                .help("YCSB installation directory [default: YCSB]")
                .long("generator-dir")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("spec-dir")
                .help("Directory holding workload spec files [default: workload_spec]")
                .long("spec-dir")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("output-dir")
                .help("Directory for generated traces [default: workloads]")
                .long("output-dir")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("corpus")
                .help("Email list sampled by the email key type [default: list.txt]")
                .long("corpus")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("key-prefix")
                .help("Prefix the generator puts on every key [default: user]")
                .long("key-prefix")
                .value_name("PREFIX"),
        )
        .arg(
            Arg::new("keep-string-traces")
                .help("Keep the traces with prefixed string keys for remap-keys")
                .long("keep-string-traces")
                .action(ArgAction::SetTrue),
        );
    cli::with_logging_args(cmd)
}

fn load_settings(matches: &ArgMatches) -> Result<GeneratorSettings> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(path) => GeneratorSettings::from_json_file(Path::new(path))?,
        None => GeneratorSettings::default(),
    };

    if let Some(dir) = matches.get_one::<String>("generator-dir") {
        settings = settings.with_generator_home(dir);
    }
    if let Some(dir) = matches.get_one::<String>("spec-dir") {
        settings = settings.with_spec_dir(dir);
    }
    if let Some(dir) = matches.get_one::<String>("output-dir") {
        settings = settings.with_output_dir(dir);
    }
    if let Some(corpus) = matches.get_one::<String>("corpus") {
        settings = settings.with_corpus(corpus);
    }
    if let Some(prefix) = matches.get_one::<String>("key-prefix") {
        settings = settings.with_key_prefix(prefix.as_str());
    }
    if matches.get_flag("keep-string-traces") {
        settings = settings.with_string_traces(true);
    }
    Ok(settings)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config_path = cli::required(matches, "config")?;
    let config = WorkloadConfig::from_file(Path::new(config_path))?;
    let settings = load_settings(matches)?;

    println!("workload = {}", config.workload);
    println!("key type = {}", config.key_type);

    let generator = YcsbGenerator::from_settings(&settings);
    let report = WorkloadPipeline::new(settings, generator).run(&config)?;

    println!(
        "✓ {} load records -> {}",
        report.load_records,
        report.load_output.display()
    );
    println!(
        "✓ {} transaction records -> {}",
        report.txn_records,
        report.txn_output.display()
    );
    if let Some((load, txn)) = &report.string_traces {
        println!("  string-key traces kept: {}, {}", load.display(), txn.display());
    }
    Ok(())
}
