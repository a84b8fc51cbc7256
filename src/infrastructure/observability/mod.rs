mod body_sanitizer;
mod init_tracing;
mod request_id;

pub use body_sanitizer::sanitize_upstream_body;
pub use init_tracing::init_tracing;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
