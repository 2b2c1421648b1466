use crate::core::basis::{Basis, BasisString};
use crate::core::bits::BitString;
use crate::core::entropy::EntropySource;

/// Draws a random key of `length` bits.
pub fn random_key<S: EntropySource>(source: &mut S, length: usize) -> BitString {
    source.next_bits(length)
}

/// Draws `length` bases, each uniformly from {rectilinear, diagonal}.
pub fn random_basis<S: EntropySource>(source: &mut S, length: usize) -> BasisString {
    (0..length).map(|_| random_basis_choice(source)).collect()
}

/// Single uniform basis choice.
pub(crate) fn random_basis_choice<S: EntropySource>(source: &mut S) -> Basis {
    source.choose_one_of(&Basis::ALL).unwrap_or_default()
}
