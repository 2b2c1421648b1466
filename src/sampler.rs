use crate::CryptoSource;
use crate::core::errors::CorpusError;
use crate::protocols::bb84;
use crate::trace::TraceLog;
use rand::seq::index;
use rand::{CryptoRng, Rng};
use std::path::Path;

/// One-message-per-line text corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    messages: Vec<String>,
}

impl Corpus {
    /// Reads a corpus, trimming lines and skipping blank ones.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let corpus = Self::from_lines(&text);
        if corpus.is_empty() {
            return Err(CorpusError::Empty(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), messages = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    pub fn from_lines(text: &str) -> Self {
        let messages = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Aggregate outcome of a sampling session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleReport {
    pub completed: usize,
    pub failed: usize,
    /// Runs whose trace could not be appended to the log.
    pub persist_failures: usize,
    pub mean_with_eavesdropper: Option<f64>,
    pub mean_without_eavesdropper: Option<f64>,
}

/// Repeatedly runs BB84 over messages sampled from a corpus.
///
/// Each batch draws up to `batch_size` distinct messages; every message is
/// its own protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub runs: usize,
    pub batch_size: usize,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            runs: 100,
            batch_size: 10,
        }
    }
}

impl Sampler {
    pub fn new(runs: usize, batch_size: usize) -> Self {
        Self { runs, batch_size }
    }

    /// Runs the sampling session, appending every trace to `log` if given.
    ///
    /// A failing run or append is reported and counted; it never stops the
    /// session.
    pub fn run<R: CryptoRng>(
        &self,
        corpus: &Corpus,
        source: &mut CryptoSource<R>,
        log: Option<&TraceLog>,
    ) -> SampleReport {
        let mut report = SampleReport::default();
        let mut with_eve_sum = 0.0;
        let mut without_eve_sum = 0.0;

        let per_batch = self.batch_size.min(corpus.len());
        if per_batch == 0 {
            return report;
        }

        let mut attempted = 0;
        while attempted < self.runs {
            let take = per_batch.min(self.runs - attempted);
            for index in sample_distinct(source.rng_mut(), corpus.len(), take) {
                let message = &corpus.messages[index];
                attempted += 1;

                let trace = match bb84::run(message, source) {
                    Ok(trace) => trace,
                    Err(err) => {
                        tracing::error!(run = attempted, error = %err, "protocol run failed");
                        report.failed += 1;
                        continue;
                    }
                };

                if let Some(log) = log
                    && let Err(err) = log.append(&trace)
                {
                    tracing::warn!(run = attempted, error = %err, "trace not persisted");
                    report.persist_failures += 1;
                }

                report.completed += 1;
                with_eve_sum += trace.stats().with_eavesdropper;
                without_eve_sum += trace.stats().without_eavesdropper;
            }
        }

        if report.completed > 0 {
            let n = report.completed as f64;
            report.mean_with_eavesdropper = Some(with_eve_sum / n);
            report.mean_without_eavesdropper = Some(without_eve_sum / n);
        }

        tracing::info!(
            completed = report.completed,
            failed = report.failed,
            persist_failures = report.persist_failures,
            "sampling finished"
        );
        report
    }
}

/// Draws `amount` distinct indices from `0..len`, clamped to `len`.
fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    index::sample(rng, len, amount.min(len)).into_vec()
}
