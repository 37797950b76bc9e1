use super::{require_insert, KeyEncoder};
use crate::config::KeyType;
use crate::corpus::{reverse_host_name, Corpus};
use crate::error::{Error, Result};
use crate::keymap::KeyMap;
use crate::record::Record;

/// Picks the corpus index for every INSERT of a workload
///
/// Load inserts are spread evenly across the front of the corpus, `gap`
/// entries apart. Transaction inserts take consecutive entries right after
/// the last load sample. The span sampled by the load phase leaves exactly
/// enough room at the tail for every transaction insert, so indices are
/// strictly increasing across both phases and never leave the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingCursor {
    gap: usize,
    load_len: usize,
    txn_inserts: usize,
    txn_start: usize,
    issued_load: usize,
    issued_txn: usize,
}

impl SamplingCursor {
    pub fn new(corpus_len: usize, load_len: usize, txn_inserts: usize) -> Result<Self> {
        let required = load_len + txn_inserts;
        if corpus_len < required {
            return Err(Error::Corpus(format!(
                "corpus holds {} entries but the workload needs {} distinct keys ({} load, {} transaction inserts)",
                corpus_len, required, load_len, txn_inserts
            )));
        }

        let (gap, txn_start) = if load_len == 0 {
            (0, 0)
        } else {
            let gap = (corpus_len - txn_inserts) / load_len;
            (gap, (load_len - 1) * gap + 1)
        };

        Ok(Self {
            gap,
            load_len,
            txn_inserts,
            txn_start,
            issued_load: 0,
            issued_txn: 0,
        })
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn next_load(&mut self) -> Result<usize> {
        if self.issued_load >= self.load_len {
            return Err(Error::Corpus(format!(
                "load phase requested more than the {} planned samples",
                self.load_len
            )));
        }
        let index = self.issued_load * self.gap;
        self.issued_load += 1;
        Ok(index)
    }

    pub fn next_txn(&mut self) -> Result<usize> {
        if self.issued_txn >= self.txn_inserts {
            return Err(Error::Corpus(format!(
                "transaction phase requested more than the {} planned samples",
                self.txn_inserts
            )));
        }
        let index = self.txn_start + self.issued_txn;
        self.issued_txn += 1;
        Ok(index)
    }
}

/// Replaces keys with host-reversed addresses sampled from a corpus
#[derive(Debug)]
pub struct EmailEncoder {
    corpus: Corpus,
    cursor: SamplingCursor,
    keys: KeyMap<String>,
}

impl EmailEncoder {
    pub fn new(corpus: Corpus, load_len: usize, txn_inserts: usize) -> Result<Self> {
        let cursor = SamplingCursor::new(corpus.len(), load_len, txn_inserts)?;
        tracing::debug!(
            corpus = corpus.len(),
            load = load_len,
            txn_inserts,
            gap = cursor.gap(),
            "Planned email sampling"
        );
        Ok(Self {
            corpus,
            cursor,
            keys: KeyMap::with_capacity(load_len + txn_inserts),
        })
    }

    /// Size the sampling plan from the traces that will be encoded
    pub fn for_traces(corpus: Corpus, load: &[Record], txn: &[Record]) -> Result<Self> {
        let txn_inserts = txn.iter().filter(|r| r.op.is_insert()).count();
        Self::new(corpus, load.len(), txn_inserts)
    }

    pub fn keys(&self) -> &KeyMap<String> {
        &self.keys
    }

    fn assign(&mut self, record: &Record, index: usize) -> Result<Record> {
        let entry = self.corpus.get(index).ok_or_else(|| {
            Error::Corpus(format!(
                "sample index {} is past the end of a {}-entry corpus",
                index,
                self.corpus.len()
            ))
        })?;
        let email = reverse_host_name(entry);
        self.keys.insert(record.key.as_str(), email.clone());
        Ok(record.with_key(email))
    }
}

impl KeyEncoder for EmailEncoder {
    fn key_type(&self) -> KeyType {
        KeyType::Email
    }

    fn encode_load(&mut self, record: &Record, line: usize) -> Result<Record> {
        require_insert(record, line)?;
        let index = self.cursor.next_load()?;
        self.assign(record, index)
    }

    fn encode_txn(&mut self, record: &Record, line: usize) -> Result<Record> {
        if record.op.is_insert() {
            let index = self.cursor.next_txn()?;
            return self.assign(record, index);
        }
        let email = self.keys.resolve(&record.key, line)?;
        Ok(record.with_key(email.as_str()))
    }
}
