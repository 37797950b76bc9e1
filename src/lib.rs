//! Workload preparation for key-value index microbenchmarks
//!
//! Two pipelines share this crate:
//!
//! - [`pipeline`] drives an external YCSB generator, extracts compact
//!   `OP key[ count]` traces from its output and re-encodes the keys as
//!   random integers, dense monotonic integers, or host-reversed email
//!   addresses ([`encoder`]).
//! - [`remap`] rewrites an existing transaction trace so every key it
//!   references becomes the corpus entry at that key's load ordinal.

pub mod config;
pub mod corpus;
pub mod encoder;
pub mod error;
pub mod extract;
pub mod generator;
pub mod keymap;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod remap;

pub use config::{GeneratorSettings, KeyType, WorkloadConfig};
pub use corpus::{reverse_host_name, Corpus};
pub use encoder::{EncodedWorkload, KeyEncoder};
pub use error::{Error, Result};
pub use generator::{Phase, TraceGenerator, YcsbGenerator};
pub use keymap::KeyMap;
pub use pipeline::{PipelineReport, WorkloadPaths, WorkloadPipeline};
pub use record::{Operation, Record};
pub use remap::{RemapJob, RemapMode, RemapReport};
