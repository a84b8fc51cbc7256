use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::application::ports::{JobRegistry, RegistryError};
use crate::domain::{JobId, JobPatch, JobResult, TransferRequest};

use super::dispatch_policy::{DispatchPolicy, ExecutionMode};
use super::progress_recorder::{PROGRESS_CHANNEL_CAPACITY, ProgressEmitter, ProgressRecorder};
use super::transfer_pipeline::{PipelineError, TransferPipeline};

/// How long terminal records stay visible to pollers.
#[derive(Debug, Clone, Copy)]
pub struct SweepDelays {
    pub completed: Duration,
    pub failed: Duration,
}

impl Default for SweepDelays {
    fn default() -> Self {
        Self {
            completed: Duration::from_secs(60 * 60),
            failed: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(JobResult),
    Accepted(JobId),
}

/// Admission point for transfers: validates, asks the dispatch policy, then
/// either runs the pipeline inline or hands it to a background job.
pub struct TransferService {
    pipeline: Arc<TransferPipeline>,
    registry: Arc<dyn JobRegistry>,
    policy: DispatchPolicy,
    sweep: SweepDelays,
}

impl TransferService {
    pub fn new(
        pipeline: Arc<TransferPipeline>,
        registry: Arc<dyn JobRegistry>,
        policy: DispatchPolicy,
        sweep: SweepDelays,
    ) -> Self {
        Self {
            pipeline,
            registry,
            policy,
            sweep,
        }
    }

    #[tracing::instrument(skip(self, request), fields(source_ref = %request.source_ref, kind = request.kind().as_str()))]
    pub async fn submit(&self, request: TransferRequest) -> Result<SubmitOutcome, TransferError> {
        validate(&request)?;

        let size = match self.pipeline.source().fetch_metadata(&request.source_ref).await {
            Ok(metadata) => metadata.size,
            Err(e) => {
                tracing::warn!(error = %e, "Size probe failed");
                None
            }
        };

        match self.policy.decide(size) {
            ExecutionMode::Sync => {
                let result = self
                    .pipeline
                    .run_inline(&request, self.policy.async_threshold_bytes())
                    .await?;
                Ok(SubmitOutcome::Completed(result))
            }
            ExecutionMode::Async => {
                let job_id = self.registry.create(request.clone()).await?;
                tokio::spawn(run_job(
                    Arc::clone(&self.pipeline),
                    Arc::clone(&self.registry),
                    self.sweep,
                    job_id,
                    request,
                ));
                tracing::info!(job_id = %job_id, "Transfer job enqueued");
                Ok(SubmitOutcome::Accepted(job_id))
            }
        }
    }
}

fn validate(request: &TransferRequest) -> Result<(), TransferError> {
    if request.source_ref.trim().is_empty() {
        return Err(TransferError::Validation(
            "sourceRef must not be empty".to_string(),
        ));
    }
    if request
        .source_ref
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    {
        return Err(TransferError::Validation(format!(
            "sourceRef contains invalid characters: {}",
            request.source_ref
        )));
    }
    Ok(())
}

/// Background execution of one job. Progress events are applied by a
/// recorder task; the terminal transition is written only after the
/// recorder has drained, so it is always the last write to the record.
pub async fn run_job(
    pipeline: Arc<TransferPipeline>,
    registry: Arc<dyn JobRegistry>,
    sweep: SweepDelays,
    job_id: JobId,
    request: TransferRequest,
) {
    let span = tracing::info_span!("transfer_job", job_id = %job_id, kind = request.kind().as_str());

    async move {
        let (emitter, receiver) = ProgressEmitter::channel(PROGRESS_CHANNEL_CAPACITY);
        let recorder = tokio::spawn(
            ProgressRecorder::new(Arc::clone(&registry), job_id)
                .run(receiver)
                .in_current_span(),
        );

        let outcome = pipeline.run(&request, &emitter).await;
        drop(emitter);

        match recorder.await {
            Ok(applied) => tracing::debug!(applied, "Progress recorder drained"),
            Err(e) => tracing::warn!(error = %e, "Progress recorder task failed"),
        }

        let (patch, delay) = match outcome {
            Ok(result) => {
                tracing::info!(
                    reduction_percent = result.reduction_percent,
                    handle = %result.destination_handle,
                    "Transfer job completed"
                );
                let message = format!("Stored as {}", result.title);
                (JobPatch::Completed { result, message }, sweep.completed)
            }
            Err(e) => {
                tracing::error!(error = %e, "Transfer job failed");
                (
                    JobPatch::Failed {
                        error: e.to_string(),
                    },
                    sweep.failed,
                )
            }
        };

        if let Err(e) = registry.update(job_id, patch).await {
            tracing::error!(error = %e, "Failed to record terminal job state");
        }
        if let Err(e) = registry.sweep(job_id, delay).await {
            tracing::error!(error = %e, "Failed to schedule job sweep");
        }
    }
    .instrument(span)
    .await
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("upstream store failed: {0}")]
    Upstream(String),
    #[error("{0}")]
    Engine(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("job registry: {0}")]
    Registry(#[from] RegistryError),
}

impl From<PipelineError> for TransferError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Source(inner) => TransferError::Upstream(inner.to_string()),
            PipelineError::Destination(inner) => TransferError::Upstream(inner.to_string()),
            PipelineError::Transform(inner) => TransferError::Engine(inner.to_string()),
            too_large @ PipelineError::TooLargeForInline { .. } => {
                TransferError::PayloadTooLarge(too_large.to_string())
            }
        }
    }
}
