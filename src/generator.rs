//! External trace generator invocation

use crate::config::GeneratorSettings;
use crate::error::{Error, Result};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Generator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Populate the store; emits INSERTs only
    Load,
    /// Run the transaction mix
    Run,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Load => "load",
            Phase::Run => "run",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces a raw operation trace for one phase of a workload
pub trait TraceGenerator {
    /// Write the raw trace for `phase` of the workload described by `spec`
    /// to `output`. Must not return until the trace is complete.
    fn generate(&self, phase: Phase, spec: &Path, output: &Path) -> Result<()>;
}

/// Runs `ycsb <phase> basic -P <spec> -s` with stdout sent to the output file
#[derive(Debug, Clone)]
pub struct YcsbGenerator {
    binary: PathBuf,
}

impl YcsbGenerator {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self::new(settings.generator_binary())
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl TraceGenerator for YcsbGenerator {
    fn generate(&self, phase: Phase, spec: &Path, output: &Path) -> Result<()> {
        let stdout = File::create(output).map_err(|e| Error::file(output, e))?;

        tracing::info!(
            binary = %self.binary.display(),
            phase = %phase,
            spec = %spec.display(),
            output = %output.display(),
            "Running trace generator"
        );

        let status = Command::new(&self.binary)
            .arg(phase.as_str())
            .arg("basic")
            .arg("-P")
            .arg(spec)
            .arg("-s")
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Generator {
                phase: phase.to_string(),
                detail: format!("failed to launch {}: {}", self.binary.display(), e),
            })?;

        if !status.success() {
            return Err(Error::generator_status(phase.as_str(), status));
        }
        Ok(())
    }
}
