mod compress;
mod health;
mod job_status;
mod relay;
mod responses;

pub use compress::{CompressRequest, DestinationHintsBody, compress_handler, parse_fidelity};
pub use health::{health_handler, wakeup_handler};
pub use job_status::{JobStatusResponse, job_status_handler};
pub use relay::{RelayRequest, relay_handler};
pub use responses::{
    AcceptedResponse, CompletedResponse, ErrorResponse, JOBS_PATH, JobResultBody,
};
