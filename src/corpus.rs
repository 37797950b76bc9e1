//! Candidate string keys sampled in place of generated keys

use crate::error::{Error, Result};
use crate::record::read_lines;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Ordered, read-only list of candidate keys
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<String>,
}

impl Corpus {
    /// Load one entry per line, trimmed
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        let corpus = Self::from_reader(BufReader::new(file), path)?;
        tracing::debug!(path = %path.display(), entries = corpus.len(), "Loaded corpus");
        Ok(corpus)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let entries = read_lines(reader, path)?
            .into_iter()
            .map(|line| line.trim().to_string())
            .collect();
        Ok(Self { entries })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Entry at `index mod len`
    pub fn get_wrapped(&self, index: usize) -> Result<&str> {
        if self.entries.is_empty() {
            return Err(Error::Corpus("cannot index into an empty corpus".to_string()));
        }
        Ok(&self.entries[index % self.entries.len()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Reverse the DNS labels of an address's host and move the local part last
///
/// `alice@mail.example.com` becomes `com.example.mail.@alice`. Every label
/// keeps a trailing dot so reversed hosts sort by top-level domain first.
/// Entries without an `@` are returned unchanged.
pub fn reverse_host_name(entry: &str) -> String {
    let entry = entry.trim();
    let Some((name, host)) = entry.split_once('@') else {
        return entry.to_string();
    };

    let mut reversed = String::with_capacity(entry.len() + 2);
    for label in host.split('.').rev() {
        reversed.push_str(label);
        reversed.push('.');
    }
    reversed.push('@');
    reversed.push_str(name);
    reversed
}
