//! Key re-encoding strategies
//!
//! Each strategy rewrites the keys of a load trace and its transaction
//! trace. Strategies are stateful: keys assigned while encoding the load
//! phase are what the transaction phase resolves against, so a single
//! encoder instance must see the load trace first.

pub mod email;
pub mod monotonic;
pub mod random_int;

pub use email::{EmailEncoder, SamplingCursor};
pub use monotonic::MonotonicIntEncoder;
pub use random_int::RandomIntEncoder;

use crate::config::KeyType;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::record::Record;

pub trait KeyEncoder {
    fn key_type(&self) -> KeyType;

    /// Encode the `line`-th record of the load trace
    fn encode_load(&mut self, record: &Record, line: usize) -> Result<Record>;

    /// Encode the `line`-th record of the transaction trace
    fn encode_txn(&mut self, record: &Record, line: usize) -> Result<Record>;
}

/// Both traces after key substitution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedWorkload {
    pub load: Vec<Record>,
    pub txn: Vec<Record>,
}

/// Build the encoder for `key_type`
///
/// The corpus is only consulted by the email strategy; `corpus` is invoked
/// lazily so the other strategies never touch the filesystem.
pub fn build_encoder<F>(
    key_type: KeyType,
    load: &[Record],
    txn: &[Record],
    corpus: F,
) -> Result<Box<dyn KeyEncoder>>
where
    F: FnOnce() -> Result<Corpus>,
{
    let encoder: Box<dyn KeyEncoder> = match key_type {
        KeyType::RandInt => Box::new(RandomIntEncoder),
        KeyType::MonoInt => Box::new(MonotonicIntEncoder::new()),
        KeyType::Email => Box::new(EmailEncoder::for_traces(corpus()?, load, txn)?),
    };
    Ok(encoder)
}

/// Run the load trace then the transaction trace through `encoder`
pub fn encode_workload(
    encoder: &mut dyn KeyEncoder,
    load: &[Record],
    txn: &[Record],
) -> Result<EncodedWorkload> {
    let load = load
        .iter()
        .enumerate()
        .map(|(line, record)| encoder.encode_load(record, line))
        .collect::<Result<Vec<_>>>()?;
    let txn = txn
        .iter()
        .enumerate()
        .map(|(line, record)| encoder.encode_txn(record, line))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        key_type = %encoder.key_type(),
        load = load.len(),
        txn = txn.len(),
        "Encoded workload keys"
    );
    Ok(EncodedWorkload { load, txn })
}

pub(crate) fn require_insert(record: &Record, line: usize) -> Result<()> {
    if record.op.is_insert() {
        Ok(())
    } else {
        Err(Error::malformed(
            line,
            format!("load trace may only contain INSERT, found {}", record.op),
        ))
    }
}
