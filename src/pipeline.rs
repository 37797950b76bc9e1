//! Workload generation pipeline
//!
//! Runs the generator for both phases, extracts compact traces, re-encodes
//! their keys and writes `load_<key type>_<workload>` and
//! `txn_<key type>_<workload>` into the output directory. Every file made
//! along the way is removed before returning, including on failure.

use crate::config::{GeneratorSettings, WorkloadConfig};
use crate::corpus::Corpus;
use crate::encoder::{build_encoder, encode_workload};
use crate::error::{Error, Result};
use crate::extract::{extract_file, KeyPrefix};
use crate::generator::{Phase, TraceGenerator};
use crate::record::{read_trace, write_trace, Record};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Every file the pipeline reads or writes for one workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadPaths {
    /// Raw generator output, load phase
    pub raw_load: PathBuf,
    /// Raw generator output, run phase
    pub raw_txn: PathBuf,
    pub load_stripped: PathBuf,
    pub txn_stripped: PathBuf,
    /// Load trace with the generator's key prefix intact
    pub load_string: PathBuf,
    /// Run trace with the generator's key prefix intact
    pub txn_string: PathBuf,
    pub load: PathBuf,
    pub txn: PathBuf,
}

impl WorkloadPaths {
    pub fn new(output_dir: &Path, config: &WorkloadConfig) -> Self {
        let workload = config.workload.as_str();
        let key_type = config.key_type.as_str();
        Self {
            raw_load: output_dir.join(format!("ycsb_load_{}_{}", key_type, workload)),
            raw_txn: output_dir.join(format!("ycsb_txn_{}_{}", key_type, workload)),
            load_stripped: output_dir.join(format!("load_ycsbkey_{}", workload)),
            txn_stripped: output_dir.join(format!("txn_ycsbkey_{}", workload)),
            load_string: output_dir.join(format!("ycsbkey_load_{}", workload)),
            txn_string: output_dir.join(format!("ycsbkey_run_{}", workload)),
            load: output_dir.join(format!("load_{}_{}", key_type, workload)),
            txn: output_dir.join(format!("txn_{}_{}", key_type, workload)),
        }
    }
}

/// Deletes tracked scratch files when dropped
#[derive(Debug, Default)]
struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    fn track(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    /// Stop tracking `path` so it outlives the run
    fn release(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        self.release(path);
        remove_if_exists(path)
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            if let Err(e) = remove_if_exists(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
            }
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::file(path, e)),
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub config: WorkloadConfig,
    pub load_records: usize,
    pub txn_records: usize,
    pub load_output: PathBuf,
    pub txn_output: PathBuf,
    /// Prefix-preserving traces, when they were kept
    pub string_traces: Option<(PathBuf, PathBuf)>,
}

pub struct WorkloadPipeline<G> {
    settings: GeneratorSettings,
    generator: G,
}

impl<G: TraceGenerator> WorkloadPipeline<G> {
    pub fn new(settings: GeneratorSettings, generator: G) -> Self {
        Self {
            settings,
            generator,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn run(&self, config: &WorkloadConfig) -> Result<PipelineReport> {
        let settings = &self.settings;
        tracing::info!(workload = %config.workload, key_type = %config.key_type, "Generating workload");

        fs::create_dir_all(&settings.output_dir)
            .map_err(|e| Error::file(&settings.output_dir, e))?;
        let paths = WorkloadPaths::new(&settings.output_dir, config);
        let spec = settings.workload_spec(&config.workload);
        let mut scratch = ScratchFiles::default();

        scratch.track(&paths.raw_load);
        self.generator.generate(Phase::Load, &spec, &paths.raw_load)?;
        scratch.track(&paths.raw_txn);
        self.generator.generate(Phase::Run, &spec, &paths.raw_txn)?;

        let strip = KeyPrefix::Strip(settings.key_prefix.clone());
        let keep = KeyPrefix::Keep;
        for (raw, out, phase, prefix) in [
            (&paths.raw_load, &paths.load_stripped, Phase::Load, &strip),
            (&paths.raw_txn, &paths.txn_stripped, Phase::Run, &strip),
            (&paths.raw_load, &paths.load_string, Phase::Load, &keep),
            (&paths.raw_txn, &paths.txn_string, Phase::Run, &keep),
        ] {
            scratch.track(out);
            extract_file(raw, out, phase, prefix)?;
        }
        scratch.remove(&paths.raw_load)?;
        scratch.remove(&paths.raw_txn)?;

        let load = read_trace(&paths.load_stripped)?;
        let txn = read_trace(&paths.txn_stripped)?;
        tracing::info!(load = load.len(), txn = txn.len(), "Read extracted traces");
        if load.is_empty() {
            return Err(Error::Generator {
                phase: Phase::Load.to_string(),
                detail: "generator output contained no INSERT records".to_string(),
            });
        }

        let mut encoder = build_encoder(config.key_type, &load, &txn, || {
            Corpus::from_file(&settings.corpus)
        })?;
        let encoded = encode_workload(encoder.as_mut(), &load, &txn)?;

        write_output(&paths.load, &encoded.load)?;
        write_output(&paths.txn, &encoded.txn)?;

        scratch.remove(&paths.load_stripped)?;
        scratch.remove(&paths.txn_stripped)?;
        let string_traces = if settings.keep_string_traces {
            scratch.release(&paths.load_string);
            scratch.release(&paths.txn_string);
            Some((paths.load_string.clone(), paths.txn_string.clone()))
        } else {
            scratch.remove(&paths.load_string)?;
            scratch.remove(&paths.txn_string)?;
            None
        };

        tracing::info!(
            load = %paths.load.display(),
            txn = %paths.txn.display(),
            "Workload written"
        );
        Ok(PipelineReport {
            config: config.clone(),
            load_records: encoded.load.len(),
            txn_records: encoded.txn.len(),
            load_output: paths.load,
            txn_output: paths.txn,
            string_traces,
        })
    }
}

fn write_output(path: &Path, records: &[Record]) -> Result<usize> {
    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    write_trace(file, records)
}
