//! Protocol traces and the append-only trace log.
//!
//! A [`ProtocolTrace`] is the immutable record of one BB84 run. Its text
//! rendering is consumed by external log analysis through line prefixes
//! such as `Percentage Correct:`, so labels and field order are fixed.

use crate::core::errors::TraceError;
use crate::protocols::otp::CipherResult;
use crate::protocols::qkd::sifting::{DisturbanceStats, SiftedKeyPair};
use crate::{BitString, MeasurementOutcome};
use chrono::NaiveDateTime;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything produced by one protocol run.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolTrace {
    pub(crate) timestamp: NaiveDateTime,
    pub(crate) message: String,
    pub(crate) message_bits: BitString,
    pub(crate) alice: MeasurementOutcome,
    pub(crate) eve: MeasurementOutcome,
    pub(crate) bob: MeasurementOutcome,
    pub(crate) matching_indices: Vec<usize>,
    pub(crate) sifted: SiftedKeyPair,
    pub(crate) stats: DisturbanceStats,
    pub(crate) cipher: CipherResult,
}

impl ProtocolTrace {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_bits(&self) -> &BitString {
        &self.message_bits
    }

    pub fn alice(&self) -> &MeasurementOutcome {
        &self.alice
    }

    pub fn eve(&self) -> &MeasurementOutcome {
        &self.eve
    }

    pub fn bob(&self) -> &MeasurementOutcome {
        &self.bob
    }

    /// Positions where all three parties used the same basis.
    pub fn matching_indices(&self) -> &[usize] {
        &self.matching_indices
    }

    pub fn sifted(&self) -> &SiftedKeyPair {
        &self.sifted
    }

    pub fn stats(&self) -> DisturbanceStats {
        self.stats
    }

    pub fn cipher(&self) -> &CipherResult {
        &self.cipher
    }

    /// Renders the fixed-layout log record.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProtocolTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "============================")?;
        writeln!(f, "ITERATION: {}", self.timestamp.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(f, "1. Input Message:")?;
        writeln!(f, "   - Message: {}", self.message)?;
        writeln!(f)?;
        writeln!(f, "2. Message in Binary:")?;
        writeln!(f, "   - Binary: {}", self.message_bits)?;
        writeln!(f)?;

        for (section, name, party) in [
            (3, "Alice", &self.alice),
            (4, "Eve", &self.eve),
            (5, "Bob", &self.bob),
        ] {
            writeln!(f, "{section}. {name}'s Data:")?;
            writeln!(f, "   - {name}'s Key (Binary): {}", party.key)?;
            writeln!(f, "   - {name}'s Basis String: {}", party.basis)?;
            writeln!(f)?;
        }

        writeln!(f, "6. Basis Matching:")?;
        writeln!(f, "   - Correct Bit Locations: {:?}", self.matching_indices)?;
        writeln!(f, "   - New Alice Key (Binary): {}", self.sifted.alice)?;
        writeln!(f, "   - New Bob Key (Binary): {}", self.sifted.bob)?;
        writeln!(
            f,
            "   - Percentage Correct: {:.2}%",
            self.stats.with_eavesdropper
        )?;
        writeln!(f)?;
        writeln!(f, "7. Without Eve:")?;
        writeln!(
            f,
            "   - Percentage Correct Without Eve: {:.2}%",
            self.stats.without_eavesdropper
        )?;
        writeln!(f)?;
        writeln!(f, "8. Encryption:")?;
        writeln!(
            f,
            "   - Encrypted Message (Hexadecimal): {}",
            self.cipher.ciphertext.hex
        )?;
        writeln!(f)?;
        writeln!(f, "9. Decryption:")?;
        writeln!(f, "   - Decrypted Message: {}", self.cipher.recovered)?;
        writeln!(f)?;
        writeln!(f, "--------------------------------------")
    }
}

/// Append-only text store of rendered traces.
///
/// Appends from threads sharing one `TraceLog` are serialised, and each
/// record is written with a single call so records never interleave.
#[derive(Debug)]
pub struct TraceLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TraceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one rendered trace, creating the file if needed.
    pub fn append(&self, trace: &ProtocolTrace) -> Result<(), TraceError> {
        let record = trace.render();
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let io_err = |source| TraceError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(record.as_bytes()).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), bytes = record.len(), "trace appended");
        Ok(())
    }
}
