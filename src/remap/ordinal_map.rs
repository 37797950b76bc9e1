use crate::error::{Error, Result};
use crate::keymap::KeyMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Key to load-trace line number
#[derive(Debug, Clone, Default)]
pub struct OrdinalMap {
    keys: KeyMap<usize>,
    lines: usize,
}

impl OrdinalMap {
    pub fn from_load_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Every line must be `INSERT <key>`; the key's ordinal is its 0-based
    /// line number. A repeated key keeps its last ordinal.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut map = Self::default();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let key = match line.split_once(' ') {
                Some(("INSERT", key)) => key,
                _ => {
                    return Err(Error::malformed(
                        line_num,
                        "load file lines must be 'INSERT <key>'",
                    ))
                }
            };
            map.keys.insert(key, line_num);
            map.lines += 1;
        }
        Ok(map)
    }

    pub fn resolve(&self, key: &str, line: usize) -> Result<usize> {
        self.keys.resolve(key, line).copied()
    }

    /// Distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Lines read from the load trace
    pub fn lines(&self) -> usize {
        self.lines
    }
}
