mod fidelity;
mod job;
mod job_id;
mod job_status;
pub mod progress;
mod transfer_request;

pub use fidelity::{DEFAULT_QUALITY_PERCENT, DEFAULT_SCALE_PERCENT, Fidelity, FidelityError};
pub use job::{Job, JobPatch, JobResult, reduction_percent};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use transfer_request::{
    ContainerTarget, DestinationHints, JobKind, TRANSFORMED_TITLE_SUFFIX, TransferRequest,
};
