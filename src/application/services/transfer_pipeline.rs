use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    DestinationStore, DestinationStoreError, SourceStore, SourceStoreError, StoreHints,
    TransformEngine, TransformError,
};
use crate::domain::progress::{
    PROGRESS_DOWNLOADING, PROGRESS_PROCESSING_END, PROGRESS_PROCESSING_START, PROGRESS_UPLOADING,
};
use crate::domain::{ContainerTarget, JobResult, JobStatus, TransferRequest};

use super::dispatch_policy::ExecutionMode;
use super::progress_recorder::ProgressEmitter;

/// Fetch, transform, store back. Stages run strictly in order and none is
/// retried; the first error ends the run.
pub struct TransferPipeline {
    source: Arc<dyn SourceStore>,
    destination: Arc<dyn DestinationStore>,
    engine: Arc<dyn TransformEngine>,
}

impl TransferPipeline {
    pub fn new(
        source: Arc<dyn SourceStore>,
        destination: Arc<dyn DestinationStore>,
        engine: Arc<dyn TransformEngine>,
    ) -> Self {
        Self {
            source,
            destination,
            engine,
        }
    }

    pub fn source(&self) -> &Arc<dyn SourceStore> {
        &self.source
    }

    /// Inline run. Nothing is recorded; the body is re-checked against
    /// `max_inline_bytes` once its real size is known.
    pub async fn run_inline(
        &self,
        request: &TransferRequest,
        max_inline_bytes: u64,
    ) -> Result<JobResult, PipelineError> {
        self.execute(
            request,
            ExecutionMode::Sync,
            &ProgressEmitter::disabled(),
            Some(max_inline_bytes),
        )
        .await
    }

    /// Background run reporting every stage through `emitter`.
    pub async fn run(
        &self,
        request: &TransferRequest,
        emitter: &ProgressEmitter,
    ) -> Result<JobResult, PipelineError> {
        self.execute(request, ExecutionMode::Async, emitter, None)
            .await
    }

    async fn execute(
        &self,
        request: &TransferRequest,
        mode: ExecutionMode,
        emitter: &ProgressEmitter,
        max_inline_bytes: Option<u64>,
    ) -> Result<JobResult, PipelineError> {
        emitter
            .stage(
                JobStatus::Downloading,
                PROGRESS_DOWNLOADING,
                "Downloading document from source",
            )
            .await;

        let (metadata, data) = tokio::try_join!(
            self.source.fetch_metadata(&request.source_ref),
            self.source.fetch_bytes(&request.source_ref),
        )
        .map_err(PipelineError::Source)?;

        let original_size = data.len() as u64;
        tracing::info!(
            title = %metadata.title,
            bytes = original_size,
            "Source document fetched"
        );

        if let Some(limit) = max_inline_bytes {
            if original_size >= limit {
                return Err(PipelineError::TooLargeForInline {
                    size: original_size,
                    limit,
                });
            }
        }

        let output = match request.fidelity {
            Some(fidelity) => {
                emitter
                    .stage(
                        JobStatus::Processing,
                        PROGRESS_PROCESSING_START,
                        format!("Transforming document ({fidelity})"),
                    )
                    .await;
                let transformed = self
                    .engine
                    .transform(Vec::from(data), fidelity, emitter.page_sink())
                    .await
                    .map_err(PipelineError::Transform)?;
                Bytes::from(transformed)
            }
            None => {
                emitter
                    .stage(
                        JobStatus::Processing,
                        PROGRESS_PROCESSING_END,
                        "Relaying document unchanged",
                    )
                    .await;
                data
            }
        };

        let transformed_size = output.len() as u64;
        let title = request.output_title(&metadata.title);
        let hints = StoreHints {
            container: ContainerTarget::resolve(
                request.hints.container_id.as_deref(),
                metadata.container_id.as_deref(),
            ),
            owner_id: request.hints.owner_id.clone(),
            async_run: mode == ExecutionMode::Async,
        };

        emitter
            .stage(
                JobStatus::Uploading,
                PROGRESS_UPLOADING,
                format!("Uploading {title} to destination"),
            )
            .await;

        let stored = self
            .destination
            .store(&title, output, &hints)
            .await
            .map_err(PipelineError::Destination)?;

        tracing::info!(
            handle = %stored.handle,
            original_size,
            transformed_size,
            "Document stored at destination"
        );

        Ok(JobResult::new(
            original_size,
            transformed_size,
            stored.handle,
            stored.name,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("source store: {0}")]
    Source(SourceStoreError),
    #[error("{0}")]
    Transform(TransformError),
    #[error("destination store: {0}")]
    Destination(DestinationStoreError),
    #[error("document is {size} bytes, at or above the {limit} byte limit for inline transfers")]
    TooLargeForInline { size: u64, limit: u64 },
}
