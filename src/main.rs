//! qkd-sim binary.
//!
//! # Usage
//!
//! ```bash
//! # One run, message from the command line
//! qkd-sim run "Hello, Bob"
//!
//! # One run, first line of stdin
//! echo "Hello, Bob" | qkd-sim run
//!
//! # 100 runs over a corpus, reproducible
//! qkd-sim --seed 7 batch --corpus sentences.txt --runs 100
//!
//! # Average statistics of an existing log
//! qkd-sim summary
//! ```

use clap::{Parser, Subcommand};
use qkd_sim::protocols::bb84;
use qkd_sim::{Config, Corpus, CryptoSource, LogSummary, Sampler, TraceLog};
use rand::CryptoRng;
use std::io::BufRead;
use std::path::PathBuf;

/// BB84 key distribution simulator
#[derive(Parser, Debug)]
#[command(name = "qkd-sim")]
#[command(about = "Simulates BB84 with an eavesdropper and encrypts a message with the key")]
#[command(version)]
struct Args {
    /// Trace log to append runs to
    #[arg(long, global = true, default_value = qkd_sim::config::DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Seed for a reproducible random source
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Do not append traces to the log
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the protocol once
    Run {
        /// Message to exchange; read from the first line of stdin if omitted
        message: Option<String>,
    },

    /// Run the protocol over messages sampled from a corpus
    Batch {
        /// Text file with one message per line
        #[arg(long)]
        corpus: PathBuf,

        /// Total number of runs
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Messages drawn per batch
        #[arg(long, default_value_t = 10)]
        batch_size: usize,
    },

    /// Summarise the statistics recorded in a trace log
    Summary {
        /// Log to read; defaults to --log-file
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

impl Args {
    fn config(&self) -> Config {
        Config {
            log_path: self.log_file.clone(),
            log_filter: self.log_level.clone(),
            seed: self.seed,
            persist: !self.no_persist,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.config();

    qkd_sim::logging::init(&config.log_filter)?;

    match config.seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded random source");
            dispatch(args.command, &config, &mut CryptoSource::seeded(seed))
        }
        None => dispatch(args.command, &config, &mut CryptoSource::system()),
    }
}

fn dispatch<R: CryptoRng>(
    command: Command,
    config: &Config,
    source: &mut CryptoSource<R>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = config.persist.then(|| TraceLog::new(&config.log_path));

    match command {
        Command::Run { message } => {
            let message = match message {
                Some(message) => message,
                None => read_first_line()?,
            };

            let trace = bb84::run(&message, source)?;

            // The computed run stays valid even if it cannot be stored.
            if let Some(log) = &log
                && let Err(err) = log.append(&trace)
            {
                tracing::error!(error = %err, "failed to persist trace");
            }

            print!("{trace}");
            tracing::info!("QKD protocol completed successfully.");
        }

        Command::Batch {
            corpus,
            runs,
            batch_size,
        } => {
            let corpus = Corpus::from_path(&corpus)?;
            let report = Sampler::new(runs, batch_size).run(&corpus, source, log.as_ref());

            println!("Runs completed: {}", report.completed);
            println!("Runs failed: {}", report.failed);
            println!("Traces not persisted: {}", report.persist_failures);
            if let Some(mean) = report.mean_with_eavesdropper {
                println!("Mean Percentage Correct: {mean:.2}%");
            }
            if let Some(mean) = report.mean_without_eavesdropper {
                println!("Mean Percentage Correct Without Eve: {mean:.2}%");
            }
        }

        Command::Summary { log: path } => {
            let path = path.unwrap_or_else(|| config.log_path.clone());
            let summary = LogSummary::from_path(&path)?;

            println!("Runs: {}", summary.runs());
            if let Some(mean) = summary.mean_with_eavesdropper() {
                println!("Mean Percentage Correct: {mean:.2}%");
            }
            if let Some(mean) = summary.mean_without_eavesdropper() {
                println!("Mean Percentage Correct Without Eve: {mean:.2}%");
            }
            if let Some(mean) = summary.mean_ciphertext_len() {
                println!("Mean ciphertext length: {mean:.1} hex characters");
            }
        }
    }

    Ok(())
}

/// Reads one message from stdin; anything after the first line is ignored.
fn read_first_line() -> std::io::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
