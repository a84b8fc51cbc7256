use chrono::{DateTime, Utc};

use super::progress::{PROGRESS_COMPLETED, PROGRESS_QUEUED};
use super::{JobId, JobKind, JobStatus, TransferRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub original_size: u64,
    pub transformed_size: u64,
    pub reduction_percent: f64,
    pub destination_handle: String,
    pub title: String,
}

impl JobResult {
    pub fn new(
        original_size: u64,
        transformed_size: u64,
        destination_handle: String,
        title: String,
    ) -> Self {
        Self {
            original_size,
            transformed_size,
            reduction_percent: reduction_percent(original_size, transformed_size),
            destination_handle,
            title,
        }
    }
}

/// Size reduction in percent, rounded to two decimals. Negative when the
/// output grew.
pub fn reduction_percent(original_size: u64, transformed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let ratio = 1.0 - transformed_size as f64 / original_size as f64;
    (ratio * 10_000.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub status: JobStatus,
    pub progress: u8,
    pub message: String,
    pub params: TransferRequest,
    pub result: Option<JobResult>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(params: TransferRequest) -> Self {
        Self {
            id: JobId::new(),
            kind: params.kind(),
            status: JobStatus::Queued,
            progress: PROGRESS_QUEUED,
            message: "Job queued".to_string(),
            params,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Merges `patch` into the record. Terminal records are frozen, progress
    /// never moves backwards, and the terminal transition stamps
    /// `completed_at`. Returns whether anything changed.
    pub fn apply(&mut self, patch: JobPatch) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match patch {
            JobPatch::Progress {
                status,
                progress,
                message,
            } => {
                if status.is_terminal() {
                    return false;
                }
                self.status = status;
                self.progress = self.progress.max(progress.min(PROGRESS_COMPLETED - 1));
                self.message = message;
            }
            JobPatch::Completed { result, message } => {
                self.status = JobStatus::Completed;
                self.progress = PROGRESS_COMPLETED;
                self.message = message;
                self.result = Some(result);
                self.error = None;
                self.completed_at = Some(Utc::now());
            }
            JobPatch::Failed { error } => {
                self.status = JobStatus::Failed;
                self.message = format!("Failed: {error}");
                self.error = Some(error);
                self.result = None;
                self.completed_at = Some(Utc::now());
            }
        }
        true
    }
}

/// A change to a job record.
#[derive(Debug, Clone, PartialEq)]
pub enum JobPatch {
    Progress {
        status: JobStatus,
        progress: u8,
        message: String,
    },
    Completed {
        result: JobResult,
        message: String,
    },
    Failed {
        error: String,
    },
}
