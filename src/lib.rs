mod core;
pub mod analysis;
pub mod config;
pub mod logging;
pub mod protocols;
mod sampler;
pub mod trace;

pub use crate::analysis::LogSummary;
pub use crate::config::Config;
pub use crate::core::{
    Basis, BasisString, BitString, CryptoSource, EntropySource, MeasurementOutcome, Party, codec,
    entropy, errors, keygen, measure,
};
pub use crate::sampler::{Corpus, SampleReport, Sampler};
pub use crate::trace::{ProtocolTrace, TraceLog};
