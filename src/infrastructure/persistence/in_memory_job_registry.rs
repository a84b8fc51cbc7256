use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::time::Instant;

use crate::application::ports::{JobRegistry, RegistryError};
use crate::domain::{Job, JobId, JobPatch, TransferRequest};

/// Process-local job table with a deadline queue for delayed removal.
/// Deadlines follow the tokio clock, so paused-time tests can step through
/// sweep windows without sleeping.
pub struct InMemoryJobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
    deadlines: Mutex<BinaryHeap<Reverse<(Instant, JobId)>>>,
    wake: Notify,
}

impl InMemoryJobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            deadlines: Mutex::new(BinaryHeap::new()),
            wake: Notify::new(),
        }
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    pub async fn next_deadline(&self) -> Option<Instant> {
        self.deadlines
            .lock()
            .await
            .peek()
            .map(|Reverse((deadline, _))| *deadline)
    }

    /// Removes every record whose sweep deadline has passed. Records that are
    /// somehow still running keep living; their deadline is discarded.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let due: Vec<JobId> = {
            let mut deadlines = self.deadlines.lock().await;
            let mut due = Vec::new();
            while let Some(Reverse((deadline, id))) = deadlines.peek().copied() {
                if deadline > now {
                    break;
                }
                deadlines.pop();
                due.push(id);
            }
            due
        };

        if due.is_empty() {
            return 0;
        }

        let mut jobs = self.jobs.write().await;
        let mut removed = 0;
        for id in due {
            match jobs.get(&id) {
                Some(job) if job.status.is_terminal() => {
                    jobs.remove(&id);
                    removed += 1;
                }
                Some(job) => {
                    tracing::warn!(job_id = %id, status = %job.status, "Sweep skipped for running job")
                }
                None => {}
            }
        }

        if removed > 0 {
            tracing::debug!(removed, remaining = jobs.len(), "Swept expired jobs");
        }
        removed
    }

    /// Background sweeper: sleeps until the earliest deadline, or until a new
    /// sweep is scheduled, then purges.
    pub async fn run_sweeper(self: Arc<Self>) {
        tracing::info!("Job sweeper started");
        loop {
            match self.next_deadline().await {
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {}
                        _ = self.wake.notified() => continue,
                    }
                }
                None => {
                    self.wake.notified().await;
                    continue;
                }
            }
            self.purge_expired().await;
        }
    }
}

impl Default for InMemoryJobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobRegistry for InMemoryJobRegistry {
    async fn create(&self, params: TransferRequest) -> Result<JobId, RegistryError> {
        let mut jobs = self.jobs.write().await;
        let mut job = Job::new(params);
        while jobs.contains_key(&job.id) {
            job.id = JobId::new();
        }
        let id = job.id;
        jobs.insert(id, job);
        tracing::debug!(job_id = %id, "Job created");
        Ok(id)
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, RegistryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update(&self, id: JobId, patch: JobPatch) -> Result<bool, RegistryError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.get_mut(&id).is_some_and(|job| job.apply(patch)))
    }

    async fn sweep(&self, id: JobId, after: Duration) -> Result<(), RegistryError> {
        let deadline = Instant::now() + after;
        self.deadlines.lock().await.push(Reverse((deadline, id)));
        self.wake.notify_one();
        tracing::debug!(job_id = %id, after_secs = after.as_secs(), "Job sweep scheduled");
        Ok(())
    }
}
