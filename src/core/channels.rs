use crate::core::basis::BasisString;
use crate::core::bits::BitString;
use crate::core::entropy::EntropySource;
use crate::core::errors::ProtocolError;
use crate::core::keygen::random_basis_choice;
use std::fmt;

/// Protocol roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// Sender
    Alice,
    /// Passive eavesdropper
    Eve,
    /// Receiver
    Bob,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Party::Alice => "Alice",
            Party::Eve => "Eve",
            Party::Bob => "Bob",
        };
        f.write_str(name)
    }
}

/// Key and basis string held by one party after preparation or measurement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasurementOutcome {
    pub key: BitString,
    pub basis: BasisString,
}

/// Measures a qubit stream prepared as `input_key` under `reference_basis`.
///
/// For every position the observer picks its own basis. A matching basis
/// reads the original bit; a mismatch collapses the qubit and yields a
/// uniformly random bit. The returned basis string is the observer's.
pub fn measure<S: EntropySource>(
    source: &mut S,
    input_key: &BitString,
    reference_basis: &BasisString,
) -> Result<MeasurementOutcome, ProtocolError> {
    if input_key.len() != reference_basis.len() {
        return Err(ProtocolError::LengthMismatch {
            expected: reference_basis.len(),
            got: input_key.len(),
        });
    }

    let mut key = BitString::with_capacity(input_key.len());
    let mut basis = BasisString::with_capacity(input_key.len());

    for (bit, reference) in input_key.iter().zip(reference_basis.iter()) {
        let choice = random_basis_choice(source);

        let observed = if choice == reference {
            bit
        } else {
            source.choose_one_of(&[false, true]).unwrap_or_default()
        };

        key.push(observed);
        basis.push(choice);
    }

    Ok(MeasurementOutcome { key, basis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::basis::Basis;
    use crate::core::entropy::CryptoSource;
    use crate::core::keygen::{random_basis, random_key};

    /// Always picks the first option and yields zero bits.
    struct FirstChoice;

    impl EntropySource for FirstChoice {
        fn next_bits(&mut self, n: usize) -> BitString {
            BitString::from(vec![false; n])
        }

        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    #[test]
    fn matching_basis_preserves_bits() {
        let key: BitString = "1011".parse().unwrap();
        let reference: BasisString = "++++".parse().unwrap();

        let outcome = measure(&mut FirstChoice, &key, &reference).unwrap();
        assert_eq!(outcome.key, key);
        assert_eq!(outcome.basis, reference);
    }

    #[test]
    fn mismatched_basis_draws_fresh_bit() {
        // FirstChoice picks rectilinear and then bit 0 on a mismatch.
        let key: BitString = "1111".parse().unwrap();
        let reference: BasisString = "+x+x".parse().unwrap();

        let outcome = measure(&mut FirstChoice, &key, &reference).unwrap();
        assert_eq!(outcome.key.to_string(), "1010");
        assert!(outcome.basis.iter().all(|b| b == Basis::Rectilinear));
    }

    #[test]
    fn rejects_unequal_lengths() {
        let key: BitString = "10".parse().unwrap();
        let reference: BasisString = "+".parse().unwrap();
        assert!(matches!(
            measure(&mut FirstChoice, &key, &reference),
            Err(ProtocolError::LengthMismatch {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn agreeing_positions_always_keep_the_bit() {
        let mut source = CryptoSource::seeded(11);
        let key = random_key(&mut source, 4096);
        let reference = random_basis(&mut source, 4096);

        let outcome = measure(&mut source, &key, &reference).unwrap();

        assert_eq!(outcome.key.len(), key.len());
        assert_eq!(outcome.basis.len(), key.len());
        for i in 0..key.len() {
            if outcome.basis.get(i) == reference.get(i) {
                assert_eq!(outcome.key.get(i), key.get(i), "position {i}");
            }
        }
    }

    #[test]
    fn observer_basis_agrees_about_half_the_time() {
        let mut source = CryptoSource::seeded(5);
        let key = random_key(&mut source, 8000);
        let reference = random_basis(&mut source, 8000);

        let outcome = measure(&mut source, &key, &reference).unwrap();
        let agree = outcome
            .basis
            .iter()
            .zip(reference.iter())
            .filter(|(a, b)| a == b)
            .count();
        let rate = agree as f64 / 8000.0;
        assert!((0.45..0.55).contains(&rate), "agreement rate {rate}");
    }
}
