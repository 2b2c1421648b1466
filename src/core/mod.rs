mod basis;
mod bits;
mod channels;
pub mod codec;
pub mod entropy;
pub mod errors;
pub mod keygen;

pub use basis::{Basis, BasisString};
pub use bits::BitString;
pub use channels::{MeasurementOutcome, Party, measure};
pub use entropy::{CryptoSource, EntropySource};
