//! Same-process job re-entrancy guard.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

/// Prevents overlapping runs of the same job within one process.
///
/// This is a process-local boolean, not a distributed lock: multiple
/// process instances running the same timer can still race. Promote to a
/// lease row or distributed lock before running multi-instance.
#[derive(Debug)]
pub struct JobGuard {
    name: &'static str,
    running: AtomicBool,
}

impl JobGuard {
    /// Creates a guard for the named job.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            running: AtomicBool::new(false),
        }
    }

    /// Tries to claim the job. Returns `None` (and logs the skip) when a
    /// run is already in flight; the next scheduled tick proceeds
    /// normally.
    #[must_use]
    pub fn try_acquire(&self) -> Option<JobGuardPermit<'_>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(JobGuardPermit { guard: self })
        } else {
            warn!(job = self.name, "previous run still in flight, skipping tick");
            None
        }
    }
}

/// RAII permit; releases the guard when dropped.
#[derive(Debug)]
pub struct JobGuardPermit<'a> {
    guard: &'a JobGuard,
}

impl Drop for JobGuardPermit<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}
