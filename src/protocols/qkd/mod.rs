//! Quantum Key Distribution (QKD) Protocols.
//!
//! - **BB84**: prepare-and-measure key distribution with an intercepting
//!   eavesdropper.
//! - **Sifting**: basis reconciliation and agreement statistics.

pub mod bb84;
pub mod sifting;
