//! Statistical and end-to-end properties of BB84 runs.

use proptest::prelude::*;
use qkd_sim::protocols::bb84;
use qkd_sim::{BitString, CryptoSource, EntropySource};

/// Fixed source: every basis choice is the first option, bits are ones.
struct AlwaysMatch;

impl EntropySource for AlwaysMatch {
    fn next_bits(&mut self, n: usize) -> BitString {
        BitString::from(vec![true; n])
    }

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

#[test]
fn agreement_rates_converge() {
    let mut source = CryptoSource::seeded(2024);
    let trials = 200;
    let message = "The quick brown fox jumps over the lazy dog";

    let (mut with_eve, mut without_eve) = (0.0, 0.0);
    for _ in 0..trials {
        let trace = bb84::run(message, &mut source).unwrap();
        with_eve += trace.stats().with_eavesdropper;
        without_eve += trace.stats().without_eavesdropper;
    }
    with_eve /= trials as f64;
    without_eve /= trials as f64;

    assert!((with_eve - 25.0).abs() < 2.0, "triple agreement {with_eve:.2}%");
    assert!((without_eve - 50.0).abs() < 2.0, "two-way agreement {without_eve:.2}%");
}

#[test]
fn sifted_keys_agree_wherever_all_bases_match() {
    let mut source = CryptoSource::seeded(77);
    for _ in 0..50 {
        let trace = bb84::run("sifting", &mut source).unwrap();
        assert_eq!(trace.sifted().errors(), 0);
        assert_eq!(trace.sifted().error_rate(), 0.0);
    }
}

#[test]
fn always_matching_source_keeps_full_key() {
    let trace = bb84::run("Hi", &mut AlwaysMatch).unwrap();

    assert_eq!(trace.matching_indices(), (0..16).collect::<Vec<_>>().as_slice());
    assert_eq!(trace.stats().with_eavesdropper, 100.0);
    assert_eq!(trace.sifted().alice.len(), 16);
    assert_eq!(trace.cipher().recovered, "Hi");
    // All-ones pad inverts every byte of "Hi".
    assert_eq!(trace.cipher().ciphertext.hex, "b796");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_run_round_trips(message in any::<String>(), seed in any::<u64>()) {
        let trace = bb84::run(&message, &mut CryptoSource::seeded(seed)).unwrap();
        let bits = 8 * message.len();

        prop_assert_eq!(trace.message_bits().len(), bits);
        for party in [trace.alice(), trace.eve(), trace.bob()] {
            prop_assert_eq!(party.key.len(), bits);
            prop_assert_eq!(party.basis.len(), bits);
        }
        prop_assert_eq!(trace.sifted().len(), trace.matching_indices().len());
        prop_assert_eq!(trace.cipher().ciphertext.bits.len(), bits);
        prop_assert_eq!(&trace.cipher().recovered, &message);
    }
}
