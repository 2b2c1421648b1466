//! Reads statistics back out of a trace log.
//!
//! Lines are matched the same way external plotting tools match them, by
//! label substring, so any log written by [`TraceLog`](crate::TraceLog)
//! can be summarised.

use crate::core::errors::AnalysisError;
use std::path::Path;

const WITH_EVE_LABEL: &str = "Percentage Correct:";
const WITHOUT_EVE_LABEL: &str = "Percentage Correct Without Eve";
const CIPHERTEXT_LABEL: &str = "Encrypted Message";

/// Per-run series extracted from a trace log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSummary {
    pub with_eavesdropper: Vec<f64>,
    pub without_eavesdropper: Vec<f64>,
    /// Length of each hex ciphertext, in characters.
    pub ciphertext_lengths: Vec<usize>,
}

impl LogSummary {
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        let mut summary = Self::default();

        for (number, line) in text.lines().enumerate() {
            let value = field_value(line);

            if line.contains(WITH_EVE_LABEL) {
                summary
                    .with_eavesdropper
                    .push(parse_percentage(number + 1, value)?);
            } else if line.contains(WITHOUT_EVE_LABEL) {
                summary
                    .without_eavesdropper
                    .push(parse_percentage(number + 1, value)?);
            } else if line.contains(CIPHERTEXT_LABEL) {
                summary.ciphertext_lengths.push(value.len());
            }
        }

        Ok(summary)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of runs, counted by the triple-agreement line.
    pub fn runs(&self) -> usize {
        self.with_eavesdropper.len()
    }

    pub fn mean_with_eavesdropper(&self) -> Option<f64> {
        mean(&self.with_eavesdropper)
    }

    pub fn mean_without_eavesdropper(&self) -> Option<f64> {
        mean(&self.without_eavesdropper)
    }

    pub fn mean_ciphertext_len(&self) -> Option<f64> {
        let lengths: Vec<f64> = self.ciphertext_lengths.iter().map(|&l| l as f64).collect();
        mean(&lengths)
    }
}

/// Text after the last `:` of a line, trimmed.
fn field_value(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or_default().trim()
}

fn parse_percentage(line: usize, value: &str) -> Result<f64, AnalysisError> {
    value
        .trim_end_matches('%')
        .parse()
        .map_err(|_| AnalysisError::MalformedValue {
            line,
            value: value.to_owned(),
        })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
