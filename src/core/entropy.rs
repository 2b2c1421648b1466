//! Randomness capability used by every protocol party.
//!
//! Key bits and basis choices are security bearing, so production sources
//! must be cryptographically secure. The trait keeps the protocol logic
//! independent of where the randomness comes from, which lets tests plug in
//! deterministic sources.

use crate::core::bits::BitString;
use rand::rngs::ThreadRng;
use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of random bits and uniform choices.
pub trait EntropySource {
    /// Draws `n` independent random bits.
    fn next_bits(&mut self, n: usize) -> BitString;

    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Picks one element of `options` uniformly, `None` if it is empty.
    fn choose_one_of<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        if options.is_empty() {
            return None;
        }
        options.get(self.pick_index(options.len())).copied()
    }
}

/// Entropy source backed by a cryptographically secure generator.
#[derive(Debug, Clone)]
pub struct CryptoSource<R> {
    rng: R,
}

impl<R: CryptoRng> CryptoSource<R> {
    /// Underlying generator, for `rand` helpers that take an `Rng`.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl CryptoSource<ThreadRng> {
    /// Thread-local CSPRNG, periodically reseeded from the OS.
    pub fn system() -> Self {
        Self { rng: rand::rng() }
    }
}

impl CryptoSource<ChaCha20Rng> {
    /// ChaCha20 stream seeded from `seed`, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<R: CryptoRng> EntropySource for CryptoSource<R> {
    fn next_bits(&mut self, n: usize) -> BitString {
        let mut bytes = vec![0u8; n.div_ceil(8)];
        self.rng.fill_bytes(&mut bytes);

        let mut bits = BitString::from_bytes(&bytes);
        bits.truncate(n);
        bits
    }

    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index called with an empty range");
        self.rng.random_range(0..len.max(1))
    }
}
