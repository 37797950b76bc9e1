//! Workload configuration
//!
//! A workload config file names the generator workload spec on its first
//! non-empty line and the key type on its second:
//!
//! ```text
//! workloada
//! monoint
//! ```
//!
//! Where the generator and its inputs live is described separately by
//! [`GeneratorSettings`], which defaults to the conventional directory layout
//! and can be loaded from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Key encoding applied to a whole workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    RandInt,
    MonoInt,
    Email,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::RandInt => "randint",
            KeyType::MonoInt => "monoint",
            KeyType::Email => "email",
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "randint" => Ok(KeyType::RandInt),
            "monoint" => Ok(KeyType::MonoInt),
            "email" => Ok(KeyType::Email),
            _ => Err(format!(
                "Invalid key type: {}. Use 'randint', 'monoint' or 'email'.",
                s
            )),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which workload to generate and how to encode its keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub workload: String,
    pub key_type: KeyType,
}

impl WorkloadConfig {
    pub fn new(workload: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            workload: workload.into(),
            key_type,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        contents.parse::<WorkloadConfig>().map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }
}

impl FromStr for WorkloadConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
        let workload = lines
            .next()
            .ok_or_else(|| Error::Config("missing workload name".to_string()))?;
        let key_type = lines
            .next()
            .ok_or_else(|| Error::Config("missing key type".to_string()))?
            .parse::<KeyType>()
            .map_err(Error::Config)?;
        Ok(Self::new(workload, key_type))
    }
}

fn default_generator_home() -> PathBuf {
    PathBuf::from("YCSB")
}

fn default_spec_dir() -> PathBuf {
    PathBuf::from("workload_spec")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("workloads")
}

fn default_corpus() -> PathBuf {
    PathBuf::from("list.txt")
}

fn default_key_prefix() -> String {
    "user".to_string()
}

/// Locations and knobs for the generator pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Generator installation; the launcher is `<home>/bin/ycsb`
    #[serde(default = "default_generator_home")]
    pub generator_home: PathBuf,
    /// Directory holding the workload spec files passed with `-P`
    #[serde(default = "default_spec_dir")]
    pub spec_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Email list sampled by the email key type
    #[serde(default = "default_corpus")]
    pub corpus: PathBuf,
    /// Prefix the generator puts in front of every key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Keep the prefix-preserving traces for the key remapper
    #[serde(default)]
    pub keep_string_traces: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            generator_home: default_generator_home(),
            spec_dir: default_spec_dir(),
            output_dir: default_output_dir(),
            corpus: default_corpus(),
            key_prefix: default_key_prefix(),
            keep_string_traces: false,
        }
    }
}

impl GeneratorSettings {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn generator_binary(&self) -> PathBuf {
        self.generator_home.join("bin").join("ycsb")
    }

    pub fn workload_spec(&self, workload: &str) -> PathBuf {
        self.spec_dir.join(workload)
    }

    pub fn with_generator_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.generator_home = home.into();
        self
    }

    pub fn with_spec_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_corpus(mut self, corpus: impl Into<PathBuf>) -> Self {
        self.corpus = corpus.into();
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_string_traces(mut self, keep: bool) -> Self {
        self.keep_string_traces = keep;
        self
    }
}
