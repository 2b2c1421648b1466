//! Quantum Cryptography Protocols.
//!
//! This module contains the BB84 key distribution protocol and the
//! one-time pad used to encrypt messages with the distributed key.

pub mod otp;
pub mod qkd;
pub use qkd::{bb84, sifting};
