mod dispatch_policy;
mod progress_recorder;
mod transfer_pipeline;
mod transfer_service;

pub use dispatch_policy::{DispatchPolicy, ExecutionMode};
pub use progress_recorder::{
    PROGRESS_CHANNEL_CAPACITY, ProgressEmitter, ProgressEvent, ProgressRecorder,
};
pub use transfer_pipeline::{PipelineError, TransferPipeline};
pub use transfer_service::{SubmitOutcome, SweepDelays, TransferError, TransferService, run_job};
