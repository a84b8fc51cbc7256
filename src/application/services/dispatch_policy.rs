use std::time::Duration;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run inline and hold the caller's connection until the result is ready.
    Sync,
    /// Create a job, return its handle, run off the request path.
    Async,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sync => "sync",
            ExecutionMode::Async => "async",
        }
    }
}

/// Chooses the execution mode once, at admission, from a cheap size probe.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    async_threshold_bytes: u64,
    seconds_per_mb: f64,
    request_budget: Duration,
}

impl DispatchPolicy {
    pub fn new(async_threshold_bytes: u64, seconds_per_mb: f64, request_budget: Duration) -> Self {
        Self {
            async_threshold_bytes,
            seconds_per_mb,
            request_budget,
        }
    }

    pub fn async_threshold_bytes(&self) -> u64 {
        self.async_threshold_bytes
    }

    /// Linear cost model for a run of `size_bytes`.
    pub fn estimated_duration(&self, size_bytes: u64) -> Duration {
        let seconds = size_bytes as f64 / BYTES_PER_MB * self.seconds_per_mb;
        Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// `None` means the probe was unavailable, which always goes async.
    pub fn decide(&self, size_bytes: Option<u64>) -> ExecutionMode {
        let Some(size) = size_bytes else {
            tracing::info!("Size probe unavailable, dispatching as background job");
            return ExecutionMode::Async;
        };

        let estimate = self.estimated_duration(size);
        let mode = if size >= self.async_threshold_bytes || estimate > self.request_budget {
            ExecutionMode::Async
        } else {
            ExecutionMode::Sync
        };

        tracing::info!(
            size_bytes = size,
            threshold_bytes = self.async_threshold_bytes,
            estimate_secs = estimate.as_secs_f64(),
            budget_secs = self.request_budget.as_secs_f64(),
            mode = mode.as_str(),
            "Dispatch decision"
        );

        mode
    }
}
