//! One-time pad over the raw BB84 key.
//!
//! The pad is Alice's full-length key rather than the sifted key, so the
//! ciphertext always has the same length as the plaintext.

use crate::core::codec::{decode, to_hex, xor};
use crate::core::errors::ProtocolError;
use crate::BitString;

/// Encrypted message bits with their hexadecimal rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ciphertext {
    pub bits: BitString,
    pub hex: String,
}

/// Outcome of encrypting and decrypting one message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CipherResult {
    pub ciphertext: Ciphertext,
    /// Plaintext recovered by decrypting `ciphertext`.
    pub recovered: String,
}

pub fn encrypt(plaintext_bits: &BitString, key: &BitString) -> Result<Ciphertext, ProtocolError> {
    let bits = xor(plaintext_bits, key)?;
    let hex = to_hex(&bits)?;
    Ok(Ciphertext { bits, hex })
}

pub fn decrypt(ciphertext_bits: &BitString, key: &BitString) -> Result<String, ProtocolError> {
    let plain = xor(ciphertext_bits, key)?;
    Ok(decode(&plain)?)
}

/// Encrypts `plaintext_bits` and decrypts the result again with the same key.
pub fn seal_and_open(
    plaintext_bits: &BitString,
    key: &BitString,
) -> Result<CipherResult, ProtocolError> {
    let ciphertext = encrypt(plaintext_bits, key)?;
    let recovered = decrypt(&ciphertext.bits, key)?;
    Ok(CipherResult {
        ciphertext,
        recovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::encode;
    use crate::core::errors::CodecError;
    use crate::core::keygen::random_key;
    use crate::CryptoSource;
    use proptest::prelude::*;

    #[test]
    fn hi_round_trips_with_any_key() {
        let plain = encode("Hi");
        for key in ["0000000000000000", "1111111111111111", "1010011100001101"] {
            let key: BitString = key.parse().unwrap();
            let result = seal_and_open(&plain, &key).unwrap();
            assert_eq!(result.recovered, "Hi");
            assert_eq!(result.ciphertext.bits.len(), 16);
            assert_eq!(result.ciphertext.hex.len(), 4);
        }
    }

    #[test]
    fn zero_key_leaves_plaintext_visible() {
        let plain = encode("Hi");
        let key = BitString::from(vec![false; 16]);
        assert_eq!(encrypt(&plain, &key).unwrap().hex, "4869");
    }

    #[test]
    fn empty_message_is_a_no_op() {
        let result = seal_and_open(&BitString::new(), &BitString::new()).unwrap();
        assert!(result.ciphertext.bits.is_empty());
        assert_eq!(result.ciphertext.hex, "");
        assert_eq!(result.recovered, "");
    }

    #[test]
    fn wrong_key_length_is_rejected() {
        let plain = encode("Hi");
        let key = BitString::from(vec![true; 8]);
        assert!(matches!(
            encrypt(&plain, &key),
            Err(ProtocolError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn corrupted_ciphertext_fails_to_decode() {
        // 0xC3 alone is a truncated two-byte sequence.
        let ciphertext = BitString::from_bytes(&[0xc3]);
        let key = BitString::from(vec![false; 8]);
        assert!(matches!(
            decrypt(&ciphertext, &key),
            Err(ProtocolError::Codec(CodecError::InvalidUtf8(_)))
        ));
    }

    proptest! {
        #[test]
        fn decrypt_inverts_encrypt(message in any::<String>(), seed in any::<u64>()) {
            let plain = encode(&message);
            let key = random_key(&mut CryptoSource::seeded(seed), plain.len());
            let ciphertext = encrypt(&plain, &key).unwrap();
            prop_assert_eq!(ciphertext.bits.len(), plain.len());
            prop_assert_eq!(decrypt(&ciphertext.bits, &key).unwrap(), message);
        }
    }
}
