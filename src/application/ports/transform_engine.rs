use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Fidelity;

/// Receives per-unit progress from a running transform.
pub trait ProgressSink: Send + Sync {
    fn report(&self, current: u32, total: u32);
}

pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn report(&self, _current: u32, _total: u32) {}
}

/// Lossy, geometry-preserving re-render of a paginated document. Output page
/// count and page sizes equal the input's.
#[async_trait]
pub trait TransformEngine: Send + Sync {
    async fn transform(
        &self,
        data: Vec<u8>,
        fidelity: Fidelity,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Vec<u8>, TransformError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid input document: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    ToolFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
