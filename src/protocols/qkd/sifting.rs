//! Key reconciliation for BB84.
//!
//! After the quantum exchange the parties compare basis strings over the
//! classical channel and keep only the positions where the bases agree.

use crate::core::errors::ProtocolError;
use crate::{BasisString, BitString};

/// Alice's and Bob's bits at the retained positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiftedKeyPair {
    pub alice: BitString,
    pub bob: BitString,
}

impl SiftedKeyPair {
    pub fn len(&self) -> usize {
        self.alice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice.is_empty()
    }

    /// Number of retained positions where the two keys disagree.
    pub fn errors(&self) -> usize {
        self.alice
            .iter()
            .zip(self.bob.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Quantum bit error rate of the sifted keys, in percent.
    pub fn error_rate(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            (self.errors() as f64 / self.len() as f64) * 100.0
        }
    }
}

/// Basis agreement rates of one run, in percent of the raw key length.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisturbanceStats {
    /// Alice, Eve and Bob all used the same basis.
    pub with_eavesdropper: f64,
    /// Alice and Bob used the same basis, Eve ignored.
    pub without_eavesdropper: f64,
}

/// Indices where all three basis strings agree, in ascending order.
pub fn matching_positions(
    basis_a: &BasisString,
    basis_b: &BasisString,
    basis_c: &BasisString,
) -> Result<Vec<usize>, ProtocolError> {
    for other in [basis_b, basis_c] {
        if other.len() != basis_a.len() {
            return Err(ProtocolError::LengthMismatch {
                expected: basis_a.len(),
                got: other.len(),
            });
        }
    }

    Ok(basis_a
        .iter()
        .zip(basis_b.iter())
        .zip(basis_c.iter())
        .enumerate()
        .filter_map(|(i, ((a, b), c))| (a == b && b == c).then_some(i))
        .collect())
}

/// Selects the bits of both keys at `indices`, keeping index order.
pub fn sift(
    indices: &[usize],
    key_a: &BitString,
    key_b: &BitString,
) -> Result<SiftedKeyPair, ProtocolError> {
    if key_a.len() != key_b.len() {
        return Err(ProtocolError::LengthMismatch {
            expected: key_a.len(),
            got: key_b.len(),
        });
    }

    let mut alice = BitString::with_capacity(indices.len());
    let mut bob = BitString::with_capacity(indices.len());

    for &index in indices {
        match (key_a.get(index), key_b.get(index)) {
            (Some(a), Some(b)) => {
                alice.push(a);
                bob.push(b);
            }
            _ => {
                return Err(ProtocolError::IndexOutOfBounds {
                    index,
                    len: key_a.len(),
                });
            }
        }
    }

    Ok(SiftedKeyPair { alice, bob })
}

/// Share of retained positions, in percent. Zero for an empty key.
pub fn match_rate(indices: &[usize], total_length: usize) -> f64 {
    if total_length == 0 {
        return 0.0;
    }
    (indices.len() as f64 / total_length as f64) * 100.0
}

/// Computes both agreement rates for one run.
///
/// The eavesdropper-free rate reuses the triple predicate with Alice's
/// basis in Eve's slot, which reduces it to Alice/Bob agreement.
pub fn disturbance_stats(
    alice_basis: &BasisString,
    eve_basis: &BasisString,
    bob_basis: &BasisString,
) -> Result<DisturbanceStats, ProtocolError> {
    let total = alice_basis.len();
    let triple = matching_positions(alice_basis, eve_basis, bob_basis)?;
    let two_way = matching_positions(alice_basis, alice_basis, bob_basis)?;

    Ok(DisturbanceStats {
        with_eavesdropper: match_rate(&triple, total),
        without_eavesdropper: match_rate(&two_way, total),
    })
}
