//! Bulk download of post game carnage reports
//!
//! Walks match ids one request at a time, appending every report that comes back to a sink.
//! Failed ids are recorded and skipped, nothing is retried.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::bungie::{pgcr, ApiError, BungieClient};
use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Could not write to output: {0}")]
    Io(#[from] io::Error),
    #[error("Could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Match id for iteration {iteration} does not fit in 64 bits")]
    IdentifierOverflow { iteration: u64 },
}

/// Anything that can hand out a report for a match id
pub trait ReportSource {
    fn fetch_report(&self, match_id: u64) -> Result<Value, ApiError>;
}

impl ReportSource for BungieClient {
    fn fetch_report(&self, match_id: u64) -> Result<Value, ApiError> {
        pgcr::request(self, match_id)
    }
}

/// How the match id advances between iterations
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepPolicy {
    /// base, base + 1, base + 2, ...
    Linear,
    /// base, base + 1, base + 3, base + 6, ...
    /// Adds the iteration index to a running id every pass, which skips most ids.
    Cumulative,
}

impl StepPolicy {
    /// `None` once the id would overflow
    pub fn identifier(self, base: u64, iteration: u64) -> Option<u64> {
        match self {
            StepPolicy::Linear => base.checked_add(iteration),
            StepPolicy::Cumulative => {
                // halve the even factor first so only a real overflow fails
                let offset = if iteration % 2 == 0 {
                    (iteration / 2).checked_mul(iteration + 1)
                } else {
                    iteration.checked_mul(iteration / 2 + 1)
                };
                offset.and_then(|offset| base.checked_add(offset))
            }
        }
    }
}

#[derive(Debug)]
pub struct FetchFailure {
    pub iteration: u64,
    pub match_id: u64,
    pub failed_at: String,
    pub cause: ApiError,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Saved {
        iteration: u64,
        match_id: u64,
        bytes: usize,
    },
    Failed(FetchFailure),
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub attempted: u64,
    pub saved: u64,
    pub failures: Vec<FetchFailure>,
}

impl ScrapeReport {
    fn record(&mut self, outcome: FetchOutcome) {
        self.attempted += 1;
        match outcome {
            FetchOutcome::Saved { .. } => self.saved += 1,
            FetchOutcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

/// Opens the output file for appending, earlier runs are never truncated
pub fn open_sink(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

fn serialize_report(report: &Value, pretty: bool) -> serde_json::Result<Vec<u8>> {
    // Map keys come out sorted
    if pretty {
        serde_json::to_vec_pretty(report)
    } else {
        serde_json::to_vec(report)
    }
}

/// Fetches a single iteration's report and appends it to the sink
pub fn fetch_one<S, W>(
    source: &S,
    sink: &mut W,
    settings: &Settings,
    iteration: u64,
) -> Result<FetchOutcome, ScrapeError>
where
    S: ReportSource + ?Sized,
    W: Write,
{
    let match_id = settings
        .step
        .identifier(settings.base_match_id, iteration)
        .ok_or(ScrapeError::IdentifierOverflow { iteration })?;
    info!("Attempt #{}, match {}", iteration + 1, match_id);

    let report = match source.fetch_report(match_id) {
        Ok(report) => report,
        Err(cause) => {
            warn!(
                "Something went wrong on match {} (iteration {}): {}",
                match_id, iteration, cause
            );
            return Ok(FetchOutcome::Failed(FetchFailure {
                iteration,
                match_id,
                failed_at: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                cause,
            }));
        }
    };

    let bytes = serialize_report(&report, settings.pretty)?;
    sink.write_all(&bytes)?;
    sink.flush()?;

    Ok(FetchOutcome::Saved {
        iteration,
        match_id,
        bytes: bytes.len(),
    })
}

/// Runs `settings.count` iterations, pausing after each one
pub fn run<S, W>(source: &S, sink: &mut W, settings: &Settings) -> Result<ScrapeReport, ScrapeError>
where
    S: ReportSource + ?Sized,
    W: Write,
{
    if settings.step == StepPolicy::Cumulative {
        warn!("Cumulative stepping skips most match ids, use linear for a dense scan");
    }

    info!(
        "Scraping {} reports starting at match {}",
        settings.count, settings.base_match_id
    );

    let mut report = ScrapeReport::default();
    for iteration in 0..settings.count {
        let outcome = fetch_one(source, sink, settings, iteration)?;
        report.record(outcome);
        std::thread::sleep(settings.pause());
    }

    info!(
        "Saved {} of {} reports, {} failed",
        report.saved,
        report.attempted,
        report.failures.len()
    );

    Ok(report)
}
