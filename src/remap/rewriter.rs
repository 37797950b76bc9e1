use super::ordinal_map::OrdinalMap;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::record::StrictLine;
use std::io::{BufRead, BufWriter, Write};

/// Counters from one rewrite pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub lines: usize,
    /// INSERT lines copied through unchanged
    pub inserts: usize,
    pub substituted: usize,
    /// Substitutions whose ordinal was past the end of the corpus
    pub wrapped: usize,
}

/// Replaces load-trace keys in a transaction trace with corpus entries
///
/// A referenced key resolves to its load ordinal `k`, and is replaced by
/// `corpus[k mod corpus.len()]`.
pub struct TransactionRewriter<'a> {
    ordinals: &'a OrdinalMap,
    corpus: &'a Corpus,
}

impl<'a> TransactionRewriter<'a> {
    pub fn new(ordinals: &'a OrdinalMap, corpus: &'a Corpus) -> Self {
        Self { ordinals, corpus }
    }

    /// Rewrite a single transaction line, updating `stats`
    pub fn rewrite_line(
        &self,
        line: &str,
        line_num: usize,
        stats: &mut RewriteStats,
    ) -> Result<String> {
        let parsed = StrictLine::parse(line, line_num)?;
        if parsed.op.is_insert() {
            stats.inserts += 1;
            return Ok(line.trim().to_string());
        }

        let ordinal = self.ordinals.resolve(parsed.key, line_num)?;
        if ordinal >= self.corpus.len() {
            stats.wrapped += 1;
        }
        let entry = self.corpus.get_wrapped(ordinal)?;
        stats.substituted += 1;
        Ok(format!("{} {}{}", parsed.op, entry, parsed.tail))
    }

    /// Rewrite every line of `input`; output lines are newline separated
    /// with no newline after the last one.
    pub fn rewrite<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RewriteStats> {
        let mut writer = BufWriter::new(output);
        let mut stats = RewriteStats::default();

        for (line_num, line) in input.lines().enumerate() {
            let line = line?;
            let rewritten = self.rewrite_line(&line, line_num, &mut stats)?;
            if line_num != 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(rewritten.as_bytes())?;
            stats.lines += 1;
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// Write `INSERT <entry>` for every corpus entry, in order, with the same
/// line joining as [`TransactionRewriter::rewrite`]
pub fn convert_corpus<W: Write>(corpus: &Corpus, output: W) -> Result<usize> {
    let mut writer = BufWriter::new(output);
    for (index, entry) in corpus.iter().enumerate() {
        if index != 0 {
            writer.write_all(b"\n")?;
        }
        write!(writer, "INSERT {}", entry)?;
    }
    writer.flush()?;
    Ok(corpus.len())
}
