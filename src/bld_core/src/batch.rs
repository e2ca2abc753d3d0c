//! Pulling candidate scrambles from a source until enough of them pass a
//! filter, or until the time budget runs out.

use std::{
    num::NonZeroUsize,
    thread::available_parallelism,
    time::{Duration, Instant},
};

use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::{error::BldError, filter::ScrambleFilter};

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(60);

/// Candidates fetched per custom scramble still missing, to make up for the
/// ones the filter rejects.
pub const OVERPROVISION_FACTOR: usize = 2;

/// Anything that can hand out scramble strings, such as a random-state
/// scramble generator.
pub trait ScrambleSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns up to `count` scrambles. An empty result means the source has
    /// nothing more to give.
    fn fetch(&mut self, count: usize) -> Result<Vec<String>, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Scrambles returned without filtering.
    pub random_count: usize,
    /// Scrambles that must pass the filter.
    pub custom_count: usize,
    pub filter: ScrambleFilter,
    /// Checked between batches, so a run can overshoot it by one batch.
    pub time_budget: Duration,
}

impl GenerateRequest {
    pub fn new(random_count: usize, custom_count: usize, filter: ScrambleFilter) -> Self {
        GenerateRequest {
            random_count,
            custom_count,
            filter,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub random: Vec<String>,
    pub custom: Vec<String>,
    /// Random scrambles plus every candidate that went through the filter.
    pub examined: usize,
    /// Candidates skipped because they could not be evaluated.
    pub invalid: usize,
    pub source_exhausted: bool,
    pub elapsed: Duration,
}

impl GenerateReport {
    /// How many custom scrambles are missing from what was requested.
    pub fn shortfall(&self, request: &GenerateRequest) -> usize {
        request.custom_count.saturating_sub(self.custom.len())
    }
}

#[derive(Error, Debug)]
pub enum GenerateError<E> {
    #[error("Failed to fetch scrambles: {0}")]
    Source(#[source] E),
    #[error("A scramble filter worker panicked")]
    WorkerPanicked,
}

/// Evaluates a batch across `workers` threads. The outcomes are in the same
/// order as `candidates`. `None` means a worker panicked.
fn evaluate_batch(
    filter: &ScrambleFilter,
    candidates: &[String],
    workers: usize,
) -> Option<Vec<Result<bool, BldError>>> {
    if candidates.is_empty() {
        return Some(Vec::new());
    }

    let chunk_size = candidates.len().div_ceil(workers.clamp(1, candidates.len()));

    let chunks = crossbeam::scope(|s| {
        let handles = candidates
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move |_| {
                    chunk
                        .iter()
                        .map(|candidate| filter.passes(candidate))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .ok()?
    .ok()?;

    Some(chunks.into_iter().flatten().collect())
}

/// Fetches `request.random_count` unfiltered scrambles, then keeps fetching
/// batches of candidates until `request.custom_count` of them pass the
/// filter, the time budget has elapsed, or the source runs dry.
///
/// Running out of time is not an error: the report simply holds fewer custom
/// scrambles than requested. Candidates that fail to evaluate are logged and
/// skipped.
pub fn generate_scrambles<S: ScrambleSource>(
    source: &mut S,
    request: &GenerateRequest,
) -> Result<GenerateReport, GenerateError<S::Error>> {
    let start = Instant::now();
    let workers = available_parallelism().map_or(1, NonZeroUsize::get);

    let mut report = GenerateReport::default();

    if request.random_count > 0 {
        report.random = source
            .fetch(request.random_count)
            .map_err(GenerateError::Source)?;
        report.examined = report.random.len();

        if report.random.len() < request.random_count {
            warn!(
                "Scramble source is exhausted after {} of {} random scramble(s)",
                report.random.len(),
                request.random_count
            );
            report.source_exhausted = true;
        }
    }

    while report.custom.len() < request.custom_count {
        let needed = request.custom_count - report.custom.len();
        let candidates = source
            .fetch(needed * OVERPROVISION_FACTOR)
            .map_err(GenerateError::Source)?;

        if candidates.is_empty() {
            warn!(
                "Scramble source is exhausted with {needed} custom scramble(s) still missing"
            );
            report.source_exhausted = true;
            break;
        }

        debug!(
            "Evaluating batch: candidates={} needed={needed} workers={workers}",
            candidates.len()
        );

        let outcomes = evaluate_batch(&request.filter, &candidates, workers)
            .ok_or(GenerateError::WorkerPanicked)?;

        for (candidate, outcome) in candidates.into_iter().zip(outcomes) {
            report.examined += 1;
            match outcome {
                Ok(true) => {
                    trace!("Accepted {candidate:?}");
                    report.custom.push(candidate);
                    if report.custom.len() >= request.custom_count {
                        break;
                    }
                }
                Ok(false) => trace!("Rejected {candidate:?}"),
                Err(e) => {
                    warn!("Skipping scramble {candidate:?}: {e}");
                    report.invalid += 1;
                }
            }
        }

        if start.elapsed() >= request.time_budget {
            info!(
                "Time budget of {:?} elapsed with {} of {} custom scramble(s) found",
                request.time_budget,
                report.custom.len(),
                request.custom_count
            );
            break;
        }
    }

    report.elapsed = start.elapsed();
    Ok(report)
}
