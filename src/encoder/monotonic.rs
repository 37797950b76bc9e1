use super::{require_insert, KeyEncoder};
use crate::config::KeyType;
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::record::Record;

/// Replaces keys with a dense, increasing sequence in insertion order
#[derive(Debug, Default)]
pub struct MonotonicIntEncoder {
    next: u64,
    keys: KeyMap<u64>,
}

impl MonotonicIntEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys assigned so far
    pub fn assigned(&self) -> u64 {
        self.next
    }

    pub fn keys(&self) -> &KeyMap<u64> {
        &self.keys
    }

    fn assign(&mut self, record: &Record) -> Record {
        let ordinal = self.next;
        self.keys.insert(record.key.as_str(), ordinal);
        self.next += 1;
        record.with_key(ordinal.to_string())
    }
}

impl KeyEncoder for MonotonicIntEncoder {
    fn key_type(&self) -> KeyType {
        KeyType::MonoInt
    }

    fn encode_load(&mut self, record: &Record, line: usize) -> Result<Record> {
        require_insert(record, line)?;
        Ok(self.assign(record))
    }

    fn encode_txn(&mut self, record: &Record, line: usize) -> Result<Record> {
        if record.op.is_insert() {
            return Ok(self.assign(record));
        }
        let ordinal = self.keys.resolve(&record.key, line)?;
        Ok(record.with_key(ordinal.to_string()))
    }
}
