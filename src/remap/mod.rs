//! Remapping of trace keys onto a corpus of real string keys
//!
//! Given a load trace, a transaction trace and a corpus, every key a
//! transaction references is replaced by the corpus entry at that key's
//! load ordinal. Passing `none` for both traces instead converts the corpus
//! itself into an INSERT trace.

pub mod ordinal_map;
pub mod rewriter;

pub use ordinal_map::OrdinalMap;
pub use rewriter::{convert_corpus, RewriteStats, TransactionRewriter};

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Argument value that selects conversion-only mode
pub const NONE_SENTINEL: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapMode {
    /// Emit the corpus as an INSERT trace
    ConvertCorpus,
    /// Rewrite `txn` against the ordinals of `load`
    Rewrite { load: PathBuf, txn: PathBuf },
}

impl RemapMode {
    pub fn from_args(load: &str, txn: &str) -> Result<Self> {
        match (load == NONE_SENTINEL, txn == NONE_SENTINEL) {
            (true, true) => Ok(RemapMode::ConvertCorpus),
            (false, false) => Ok(RemapMode::Rewrite {
                load: PathBuf::from(load),
                txn: PathBuf::from(txn),
            }),
            _ => Err(Error::Usage(format!(
                "load and transaction files must both be '{}' to convert the corpus",
                NONE_SENTINEL
            ))),
        }
    }
}

/// What a finished remap produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapReport {
    Converted { entries: usize },
    Rewritten(RewriteStats),
}

/// One invocation of the remapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapJob {
    pub mode: RemapMode,
    pub corpus: PathBuf,
    pub output: PathBuf,
}

impl RemapJob {
    pub fn new(mode: RemapMode, corpus: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            corpus: corpus.into(),
            output: output.into(),
        }
    }

    /// Build a job from the four positional arguments
    pub fn from_args(load: &str, txn: &str, corpus: &str, output: &str) -> Result<Self> {
        Ok(Self::new(RemapMode::from_args(load, txn)?, corpus, output))
    }

    pub fn run(&self) -> Result<RemapReport> {
        match &self.mode {
            RemapMode::ConvertCorpus => {
                tracing::info!(corpus = %self.corpus.display(), "Converting the corpus into a load trace");
                let corpus = read_corpus(&self.corpus)?;
                let output = create_output(&self.output)?;
                let entries = convert_corpus(&corpus, output)?;
                tracing::info!(entries, output = %self.output.display(), "Wrote corpus load trace");
                Ok(RemapReport::Converted { entries })
            }
            RemapMode::Rewrite { load, txn } => {
                require_file(load, "load")?;
                let ordinals = OrdinalMap::from_load_file(load)?;
                tracing::info!("Read {} items", ordinals.len());

                let corpus = read_corpus(&self.corpus)?;
                tracing::info!("Read {} new strings", corpus.len());

                require_file(txn, "txn")?;
                let input = File::open(txn).map_err(|e| Error::file(txn, e))?;
                let output = create_output(&self.output)?;
                let stats = TransactionRewriter::new(&ordinals, &corpus)
                    .rewrite(BufReader::new(input), output)?;
                tracing::info!(
                    lines = stats.lines,
                    inserts = stats.inserts,
                    substituted = stats.substituted,
                    wrapped = stats.wrapped,
                    output = %self.output.display(),
                    "Rewrote transaction trace"
                );
                Ok(RemapReport::Rewritten(stats))
            }
        }
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::Usage(format!("Illegal {} file: {}", what, path.display())))
    }
}

fn read_corpus(path: &Path) -> Result<Corpus> {
    require_file(path, "corpus")?;
    Corpus::from_file(path)
}

fn create_output(path: &Path) -> Result<File> {
    if path.is_dir() {
        return Err(Error::Usage(format!("Illegal output file: {}", path.display())));
    }
    File::create(path).map_err(|e| Error::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_args() {
        assert_eq!(RemapMode::from_args("none", "none").unwrap(), RemapMode::ConvertCorpus);
        assert_eq!(
            RemapMode::from_args("load.txt", "txn.txt").unwrap(),
            RemapMode::Rewrite {
                load: PathBuf::from("load.txt"),
                txn: PathBuf::from("txn.txt"),
            }
        );
        assert!(matches!(RemapMode::from_args("none", "txn.txt"), Err(Error::Usage(_))));
        assert!(matches!(RemapMode::from_args("load.txt", "none"), Err(Error::Usage(_))));
    }

    #[test]
    fn test_missing_inputs_are_usage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let job = RemapJob::new(
            RemapMode::Rewrite {
                load: dir.path().join("absent"),
                txn: dir.path().join("absent-too"),
            },
            dir.path().join("corpus"),
            dir.path().join("out"),
        );
        let err = job.run().unwrap_err();
        assert!(err.to_string().starts_with("Illegal load file"));
    }

    #[test]
    fn test_output_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus");
        std::fs::write(&corpus, "a@b.com\n").unwrap();
        let job = RemapJob::new(RemapMode::ConvertCorpus, &corpus, dir.path());
        assert!(job.run().unwrap_err().to_string().starts_with("Illegal output file"));
    }
}
