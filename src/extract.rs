//! Extraction of compact traces from raw generator output
//!
//! The generator prints one operation per line as
//! `<OP> <table> <key> [<scan count>] [ <fields> ]`, interleaved with banner
//! and status lines. Extraction keeps the operation, the key and the scan
//! count, and drops everything else.

use crate::error::{Error, Result};
use crate::generator::Phase;
use crate::record::{Operation, Record};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// What to do with the fixed prefix the generator puts on every key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Remove the prefix wherever a key starts with it
    Strip(String),
    Keep,
}

impl KeyPrefix {
    pub fn apply<'a>(&self, key: &'a str) -> &'a str {
        match self {
            KeyPrefix::Strip(prefix) => key.strip_prefix(prefix.as_str()).unwrap_or(key),
            KeyPrefix::Keep => key,
        }
    }
}

/// Counters from one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines_read: usize,
    pub records_written: usize,
}

/// Parse one line of generator output
///
/// Returns `Ok(None)` for lines that are not operations.
pub fn parse_generator_line(
    line: &str,
    line_num: usize,
    prefix: &KeyPrefix,
) -> Result<Option<Record>> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    let Some(op) = cols.first().and_then(|token| token.parse::<Operation>().ok()) else {
        return Ok(None);
    };
    let key = cols
        .get(2)
        .map(|key| prefix.apply(key))
        .ok_or_else(|| Error::malformed(line_num, format!("{} line without a key", op)))?;

    if op == Operation::Scan {
        let count = cols
            .get(3)
            .ok_or_else(|| Error::malformed(line_num, "SCAN line without a count"))?;
        Ok(Some(Record::scan(key, *count)))
    } else {
        Ok(Some(Record::new(op, key)))
    }
}

/// Extract the records of `phase` from `input` into `output`
///
/// The load phase keeps INSERTs only; the run phase keeps every operation.
pub fn extract_trace<R, W>(
    input: R,
    output: W,
    phase: Phase,
    prefix: &KeyPrefix,
) -> Result<ExtractStats>
where
    R: BufRead,
    W: Write,
{
    let mut writer = BufWriter::new(output);
    let mut stats = ExtractStats::default();

    for (line_num, line) in input.lines().enumerate() {
        let line = line?;
        stats.lines_read += 1;
        let Some(record) = parse_generator_line(&line, line_num, prefix)? else {
            continue;
        };
        if phase == Phase::Load && !record.op.is_insert() {
            continue;
        }
        writeln!(writer, "{}", record)?;
        stats.records_written += 1;
    }

    writer.flush()?;
    Ok(stats)
}

pub fn extract_file(
    input: &Path,
    output: &Path,
    phase: Phase,
    prefix: &KeyPrefix,
) -> Result<ExtractStats> {
    let reader = BufReader::new(File::open(input).map_err(|e| Error::file(input, e))?);
    let writer = File::create(output).map_err(|e| Error::file(output, e))?;
    let stats = extract_trace(reader, writer, phase, prefix)?;
    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        phase = %phase,
        lines = stats.lines_read,
        records = stats.records_written,
        "Extracted trace"
    );
    Ok(stats)
}
