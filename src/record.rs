//! Trace record model and line parsers
//!
//! A compact trace line is `<OP> <key>` or, for scans, `<OP> <key> <count>`.
//! Two parsers exist: [`Record::parse`] splits on any whitespace and is used
//! for the traces the generator pipeline writes; [`StrictLine::parse`] is the
//! single-space-delimited form the remapper accepts, which keeps the scan
//! tail byte for byte.

use crate::error::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Operation carried by a trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Read,
    Update,
    Scan,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Read => "READ",
            Operation::Update => "UPDATE",
            Operation::Scan => "SCAN",
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Operation::Insert)
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Operation::Insert),
            "READ" => Ok(Operation::Read),
            "UPDATE" => Ok(Operation::Update),
            "SCAN" => Ok(Operation::Scan),
            _ => Err(format!("unrecognized operation '{}'", s)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed trace line
///
/// `scan_len` is `Some` exactly when `op` is [`Operation::Scan`]; it is kept
/// as the original token so it is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub op: Operation,
    pub key: String,
    pub scan_len: Option<String>,
}

impl Record {
    pub fn new(op: Operation, key: impl Into<String>) -> Self {
        Self {
            op,
            key: key.into(),
            scan_len: None,
        }
    }

    pub fn scan(key: impl Into<String>, scan_len: impl Into<String>) -> Self {
        Self {
            op: Operation::Scan,
            key: key.into(),
            scan_len: Some(scan_len.into()),
        }
    }

    /// Same operation and scan count, different key
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            op: self.op,
            key: key.into(),
            scan_len: self.scan_len.clone(),
        }
    }

    /// Parse a whitespace-separated trace line
    pub fn parse(line: &str, line_num: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let op: Operation = tokens
            .next()
            .ok_or_else(|| Error::malformed(line_num, "empty line"))?
            .parse()
            .map_err(|e: String| Error::malformed(line_num, e))?;
        let key = tokens
            .next()
            .ok_or_else(|| Error::malformed(line_num, format!("{} without a key", op)))?;

        if op == Operation::Scan {
            let count = tokens
                .next()
                .ok_or_else(|| Error::malformed(line_num, "SCAN without a count"))?;
            Ok(Record::scan(key, count))
        } else {
            Ok(Record::new(op, key))
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.key)?;
        if let Some(count) = &self.scan_len {
            write!(f, " {}", count)?;
        }
        Ok(())
    }
}

/// A trace line split on single spaces, borrowing from the input
///
/// `tail` is empty for everything but scans, where it holds the text from
/// the space after the key to the end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictLine<'a> {
    pub op: Operation,
    pub key: &'a str,
    pub tail: &'a str,
}

impl<'a> StrictLine<'a> {
    pub fn parse(line: &'a str, line_num: usize) -> Result<Self> {
        let line = line.trim();
        let index = line
            .find(' ')
            .ok_or_else(|| Error::malformed(line_num, "operation is not followed by a space"))?;
        let op: Operation = line[..index]
            .parse()
            .map_err(|e: String| Error::malformed(line_num, e))?;
        let rest = &line[index + 1..];

        if op == Operation::Scan {
            let index2 = rest
                .find(' ')
                .ok_or_else(|| Error::malformed(line_num, "scan line without a count"))?;
            Ok(StrictLine {
                op,
                key: &rest[..index2],
                tail: &rest[index2..],
            })
        } else {
            Ok(StrictLine { op, key: rest, tail: "" })
        }
    }
}

/// Read a whole compact trace into memory
pub fn read_trace(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| Error::file(path, e))?;
    let mut records = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::file(path, e))?;
        records.push(Record::parse(&line, line_num)?);
    }
    Ok(records)
}

/// Write records one per line, each newline terminated
pub fn write_trace<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = BufWriter::new(writer);
    let mut written = 0;
    for record in records {
        writeln!(writer, "{}", record)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Read lines from any buffered source, annotating failures with `path`
pub(crate) fn read_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>> {
    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::file(path, e))
}
