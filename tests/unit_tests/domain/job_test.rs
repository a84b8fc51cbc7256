use docrelay::domain::{
    DestinationHints, Job, JobPatch, JobResult, JobStatus, TransferRequest, reduction_percent,
};

fn job() -> Job {
    Job::new(TransferRequest::relay("068000000000001", DestinationHints::default()))
}

fn result() -> JobResult {
    JobResult::new(1000, 400, "doc-1".to_string(), "report".to_string())
}

#[test]
fn given_lower_progress_when_applying_then_progress_is_kept() {
    let mut job = job();
    job.apply(JobPatch::Progress {
        status: JobStatus::Processing,
        progress: 60,
        message: "page 3".to_string(),
    });
    job.apply(JobPatch::Progress {
        status: JobStatus::Processing,
        progress: 40,
        message: "page 2".to_string(),
    });

    assert_eq!(job.progress, 60);
    assert_eq!(job.message, "page 2");
}

#[test]
fn given_non_terminal_patch_when_applying_then_progress_stays_below_hundred() {
    let mut job = job();
    job.apply(JobPatch::Progress {
        status: JobStatus::Uploading,
        progress: 100,
        message: "uploading".to_string(),
    });

    assert_eq!(job.progress, 99);
    assert_eq!(job.status, JobStatus::Uploading);
}

#[test]
fn given_completed_job_when_failing_then_record_is_unchanged() {
    let mut job = job();
    assert!(job.apply(JobPatch::Completed {
        result: result(),
        message: "done".to_string(),
    }));

    let changed = job.apply(JobPatch::Failed {
        error: "late".to_string(),
    });

    assert!(!changed);
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100);
    assert!(job.error.is_none());
    assert!(job.completed_at.is_some());
}

#[test]
fn given_failure_when_applying_then_result_is_absent_and_progress_below_hundred() {
    let mut job = job();
    job.apply(JobPatch::Progress {
        status: JobStatus::Downloading,
        progress: 10,
        message: "downloading".to_string(),
    });
    job.apply(JobPatch::Failed {
        error: "source unavailable".to_string(),
    });

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("source unavailable"));
    assert!(job.result.is_none());
    assert_eq!(job.progress, 10);
}

#[test]
fn given_sizes_when_computing_reduction_then_rounds_to_two_decimals() {
    assert_eq!(reduction_percent(3, 1), 66.67);
    assert_eq!(reduction_percent(1000, 1000), 0.0);
    assert_eq!(reduction_percent(0, 10), 0.0);
    assert_eq!(reduction_percent(100, 150), -50.0);
}
