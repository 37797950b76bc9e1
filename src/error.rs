use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the workload binaries
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Invalid command line usage
    pub const USAGE_ERROR: i32 = 1;
    /// Filesystem error
    pub const IO_ERROR: i32 = 2;
    /// Malformed trace line
    pub const MALFORMED_INPUT: i32 = 3;
    /// Referenced key was never inserted
    pub const MISSING_KEY: i32 = 4;
    /// Config or settings file problem
    pub const CONFIG_ERROR: i32 = 5;
    /// Trace generator failed
    pub const GENERATOR_FAILED: i32 = 6;
    /// Corpus cannot serve the request
    pub const CORPUS_ERROR: i32 = 7;
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("Illegal line @ {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Key {key} @ {line} does not exist")]
    MissingKey { key: String, line: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generator failed during {phase} phase: {detail}")]
    Generator { phase: String, detail: String },

    #[error("Corpus error: {0}")]
    Corpus(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn generator_status(phase: impl Into<String>, status: ExitStatus) -> Self {
        let detail = match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };
        Error::Generator {
            phase: phase.into(),
            detail,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => exit_codes::USAGE_ERROR,
            Error::Io(_) | Error::File { .. } => exit_codes::IO_ERROR,
            Error::MalformedLine { .. } => exit_codes::MALFORMED_INPUT,
            Error::MissingKey { .. } => exit_codes::MISSING_KEY,
            Error::Config(_) => exit_codes::CONFIG_ERROR,
            Error::Generator { .. } => exit_codes::GENERATOR_FAILED,
            Error::Corpus(_) => exit_codes::CORPUS_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_line_numbers() {
        let err = Error::malformed(0, "expected INSERT");
        assert_eq!(err.to_string(), "Illegal line @ 0: expected INSERT");

        let err = Error::MissingKey {
            key: "user9".to_string(),
            line: 12,
        };
        assert_eq!(err.to_string(), "Key user9 @ 12 does not exist");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Usage("bad".into()).exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(
            Error::file("/tmp/x", std::io::Error::from(std::io::ErrorKind::NotFound)).exit_code(),
            exit_codes::IO_ERROR
        );
        assert_eq!(Error::Corpus("empty".into()).exit_code(), exit_codes::CORPUS_ERROR);
        assert_ne!(exit_codes::SUCCESS, exit_codes::USAGE_ERROR);
    }
}
