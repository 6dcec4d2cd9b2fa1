//! Concurrent stress harness.
//!
//! Runs many stateless handlers against one store on real threads, the way
//! independent request handlers would hit the shared document.

use crate::fixtures::attending;
use rsvp_core::{CoreError, RecordId, RsvpService};
use rsvp_store::VersionedStore;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Configuration for a stress run.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of concurrent handlers.
    pub threads: usize,
    /// Appends issued by each handler.
    pub appends_per_thread: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            appends_per_thread: 4,
        }
    }
}

impl StressConfig {
    /// Total number of appends issued.
    pub fn total(&self) -> usize {
        self.threads * self.appends_per_thread
    }
}

/// Result of a stress run.
#[derive(Debug, Default)]
pub struct StressResult {
    /// Ids whose append returned success.
    pub applied: Vec<RecordId>,
    /// Appends that ran out of attempts.
    pub busy: usize,
    /// Appends that failed for any other reason.
    pub failed: Vec<String>,
    /// Wall-clock duration.
    pub duration: Duration,
}

/// Issues concurrent appends with distinct ids.
///
/// `handler` is called once per thread to build that thread's service, so
/// no service instance is shared between threads. All threads start their
/// first append together.
pub fn concurrent_appends<S, F>(config: &StressConfig, handler: F) -> StressResult
where
    S: VersionedStore + 'static,
    F: Fn() -> RsvpService<S>,
{
    let barrier = Arc::new(Barrier::new(config.threads));
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let service = handler();
            let barrier = Arc::clone(&barrier);
            let per_thread = config.appends_per_thread;
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|i| {
                        let seed = (t * per_thread + i + 1) as u32;
                        service.append(attending(seed, 1 + seed % 3))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut result = StressResult::default();
    for handle in handles {
        match handle.join() {
            Ok(outcomes) => {
                for outcome in outcomes {
                    match outcome {
                        Ok(id) => result.applied.push(id),
                        Err(CoreError::Busy { .. }) => result.busy += 1,
                        Err(e) => result.failed.push(e.to_string()),
                    }
                }
            }
            Err(_) => result.failed.push("handler thread panicked".into()),
        }
    }
    result.duration = start.elapsed();
    result
}
