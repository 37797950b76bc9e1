use super::{require_insert, KeyEncoder};
use crate::config::KeyType;
use crate::error::Result;
use crate::record::Record;

/// Keeps the generator's native integer keys
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIntEncoder;

impl KeyEncoder for RandomIntEncoder {
    fn key_type(&self) -> KeyType {
        KeyType::RandInt
    }

    fn encode_load(&mut self, record: &Record, line: usize) -> Result<Record> {
        require_insert(record, line)?;
        Ok(record.clone())
    }

    fn encode_txn(&mut self, record: &Record, _line: usize) -> Result<Record> {
        Ok(record.clone())
    }
}
