use crate::core::codec::encode;
use crate::core::errors::ProtocolError;
use crate::core::keygen::{random_basis, random_key};
use crate::protocols::otp::seal_and_open;
use crate::protocols::qkd::sifting::{disturbance_stats, matching_positions, sift};
use crate::trace::ProtocolTrace;
use crate::{EntropySource, MeasurementOutcome, Party, measure};
use chrono::{Local, NaiveDateTime};

/// Runs BB84 over `message`, stamping the trace with the local time.
pub fn run<S: EntropySource>(
    message: &str,
    source: &mut S,
) -> Result<ProtocolTrace, ProtocolError> {
    run_at(message, source, Local::now().naive_local())
}

/// Runs BB84 over `message` with an explicit trace timestamp.
///
/// Alice prepares a random key and basis string as long as the encoded
/// message. Eve measures Alice's qubits, and Bob measures the qubits Eve
/// forwards; both are read against Alice's bases. Positions where all
/// three bases agree form the sifted keys. The message is then encrypted
/// with Alice's raw key and decrypted again.
pub fn run_at<S: EntropySource>(
    message: &str,
    source: &mut S,
    timestamp: NaiveDateTime,
) -> Result<ProtocolTrace, ProtocolError> {
    let message_bits = encode(message);
    let num_bits = message_bits.len();

    // Alice prepares qubits
    let alice = MeasurementOutcome {
        key: random_key(source, num_bits),
        basis: random_basis(source, num_bits),
    };
    tracing::debug!(party = %Party::Alice, bits = num_bits, "prepared key and bases");

    // Eavesdropper intercepts
    let eve = measure(source, &alice.key, &alice.basis)?;
    tracing::debug!(party = %Party::Eve, "measured intercepted qubits");

    // Bob measures what Eve forwards
    let bob = measure(source, &eve.key, &alice.basis)?;
    tracing::debug!(party = %Party::Bob, "measured received qubits");

    // Sifting stage
    let matching_indices = matching_positions(&alice.basis, &eve.basis, &bob.basis)?;
    let sifted = sift(&matching_indices, &alice.key, &bob.key)?;
    let stats = disturbance_stats(&alice.basis, &eve.basis, &bob.basis)?;

    let cipher = seal_and_open(&message_bits, &alice.key)?;

    tracing::info!(
        bits = num_bits,
        sifted = sifted.len(),
        with_eve = stats.with_eavesdropper,
        without_eve = stats.without_eavesdropper,
        qber = sifted.error_rate(),
        "BB84 run completed"
    );

    Ok(ProtocolTrace {
        timestamp,
        message: message.to_owned(),
        message_bits,
        alice,
        eve,
        bob,
        matching_indices,
        sifted,
        stats,
        cipher,
    })
}
