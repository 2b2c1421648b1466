//! Trace log persistence and read-back.

use qkd_sim::errors::TraceError;
use qkd_sim::protocols::bb84;
use qkd_sim::{CryptoSource, LogSummary, TraceLog};
use tempfile::TempDir;

#[test]
fn appends_never_rewrite_earlier_records() {
    let dir = TempDir::new().unwrap();
    let log = TraceLog::new(dir.path().join("qkd_log.txt"));
    let mut source = CryptoSource::seeded(21);

    let first = bb84::run("first message", &mut source).unwrap();
    log.append(&first).unwrap();
    let after_first = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(after_first, first.render());

    let second = bb84::run("second message", &mut source).unwrap();
    log.append(&second).unwrap();
    let after_second = std::fs::read_to_string(log.path()).unwrap();

    assert!(after_second.starts_with(&after_first));
    assert_eq!(after_second, format!("{first}{second}"));
}

#[test]
fn summary_reads_back_appended_statistics() {
    let dir = TempDir::new().unwrap();
    let log = TraceLog::new(dir.path().join("qkd_log.txt"));
    let mut source = CryptoSource::seeded(2);

    let traces: Vec<_> = ["Hi", "", "Grüße, Bob"]
        .into_iter()
        .map(|m| bb84::run(m, &mut source).unwrap())
        .collect();
    for trace in &traces {
        log.append(trace).unwrap();
    }

    let summary = LogSummary::from_path(log.path()).unwrap();
    assert_eq!(summary.runs(), 3);
    assert_eq!(summary.without_eavesdropper.len(), 3);

    for (trace, (with_eve, without_eve)) in traces.iter().zip(
        summary
            .with_eavesdropper
            .iter()
            .zip(&summary.without_eavesdropper),
    ) {
        // Log values carry two decimals.
        assert!((trace.stats().with_eavesdropper - with_eve).abs() < 0.006);
        assert!((trace.stats().without_eavesdropper - without_eve).abs() < 0.006);
    }

    let hex_lengths: Vec<usize> = traces
        .iter()
        .map(|t| t.cipher().ciphertext.hex.len())
        .collect();
    assert_eq!(summary.ciphertext_lengths, hex_lengths);
    assert_eq!(summary.ciphertext_lengths[1], 0);
}

#[test]
fn concurrent_appends_keep_records_whole() {
    let dir = TempDir::new().unwrap();
    let log = TraceLog::new(dir.path().join("qkd_log.txt"));

    std::thread::scope(|scope| {
        for worker in 0..4u64 {
            let log = &log;
            scope.spawn(move || {
                let mut source = CryptoSource::seeded(worker);
                for i in 0..10 {
                    let message = format!("worker {worker} message {i}");
                    let trace = bb84::run(&message, &mut source).unwrap();
                    log.append(&trace).unwrap();
                }
            });
        }
    });

    let text = std::fs::read_to_string(log.path()).unwrap();
    let records: Vec<&str> = text
        .split("--------------------------------------\n")
        .filter(|r| !r.is_empty())
        .collect();
    assert_eq!(records.len(), 40);

    for record in records {
        assert_eq!(record.matches("ITERATION:").count(), 1);
        assert_eq!(record.matches("Percentage Correct:").count(), 1);
        assert_eq!(record.matches("Decrypted Message:").count(), 1);
    }
}

#[test]
fn unwritable_path_is_a_resource_error() {
    let dir = TempDir::new().unwrap();
    let log = TraceLog::new(dir.path().join("missing").join("qkd_log.txt"));

    let trace = bb84::run("still computed", &mut CryptoSource::seeded(3)).unwrap();
    let err = log.append(&trace).unwrap_err();

    assert!(matches!(err, TraceError::Io { .. }));
    // The run result is unaffected by the failed write.
    assert_eq!(trace.cipher().recovered, "still computed");
}
