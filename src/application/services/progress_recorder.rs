use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{JobRegistry, ProgressSink};
use crate::domain::progress::processing_progress;
use crate::domain::{JobId, JobPatch, JobStatus};

pub const PROGRESS_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub status: JobStatus,
    pub progress: u8,
    pub message: String,
}

impl From<ProgressEvent> for JobPatch {
    fn from(event: ProgressEvent) -> Self {
        JobPatch::Progress {
            status: event.status,
            progress: event.progress,
            message: event.message,
        }
    }
}

/// Emitting side of the progress channel. A disabled emitter (inline runs)
/// only traces.
#[derive(Clone)]
pub struct ProgressEmitter {
    sender: Option<mpsc::Sender<ProgressEvent>>,
}

impl ProgressEmitter {
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub async fn stage(&self, status: JobStatus, progress: u8, message: impl Into<String>) {
        let event = ProgressEvent {
            status,
            progress,
            message: message.into(),
        };
        tracing::debug!(status = %event.status, progress = event.progress, "Stage transition");

        if let Some(sender) = &self.sender {
            if sender.send(event).await.is_err() {
                tracing::warn!("Progress recorder gone, stage event dropped");
            }
        }
    }

    /// Sink handed to the transform engine. Page events never block the
    /// engine; when the channel is full the event is dropped and a later one
    /// carries the progress forward.
    pub fn page_sink(&self) -> Arc<dyn ProgressSink> {
        Arc::new(PageProgressSink {
            sender: self.sender.clone(),
        })
    }
}

struct PageProgressSink {
    sender: Option<mpsc::Sender<ProgressEvent>>,
}

impl ProgressSink for PageProgressSink {
    fn report(&self, current: u32, total: u32) {
        let progress = processing_progress(current, total);
        tracing::trace!(current, total, progress, "Page progress");

        let Some(sender) = &self.sender else {
            return;
        };
        let event = ProgressEvent {
            status: JobStatus::Processing,
            progress,
            message: format!("Processing page {current} of {total}"),
        };
        if let Err(mpsc::error::TrySendError::Full(_)) = sender.try_send(event) {
            tracing::debug!(current, total, "Progress channel full, page event dropped");
        }
    }
}

/// Consuming side: applies every event to the job's registry record.
pub struct ProgressRecorder {
    registry: Arc<dyn JobRegistry>,
    job_id: JobId,
}

impl ProgressRecorder {
    pub fn new(registry: Arc<dyn JobRegistry>, job_id: JobId) -> Self {
        Self { registry, job_id }
    }

    /// Runs until every emitter is dropped. Returns the number of events applied.
    pub async fn run(self, mut receiver: mpsc::Receiver<ProgressEvent>) -> usize {
        let mut applied = 0;
        while let Some(event) = receiver.recv().await {
            match self.registry.update(self.job_id, event.into()).await {
                Ok(true) => applied += 1,
                Ok(false) => {
                    tracing::debug!(job_id = %self.job_id, "Progress update ignored")
                }
                Err(e) => {
                    tracing::warn!(job_id = %self.job_id, error = %e, "Progress update failed")
                }
            }
        }
        applied
    }
}
