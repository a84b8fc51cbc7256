use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ProgressSink, TransformEngine, TransformError};
use crate::domain::Fidelity;

/// Pretends the document has `pages` pages and shrinks it by `quality`.
pub struct MockTransformEngine {
    pages: u32,
}

impl MockTransformEngine {
    pub fn new(pages: u32) -> Self {
        Self {
            pages: pages.max(1),
        }
    }
}

impl Default for MockTransformEngine {
    fn default() -> Self {
        Self::new(4)
    }
}

#[async_trait]
impl TransformEngine for MockTransformEngine {
    async fn transform(
        &self,
        mut data: Vec<u8>,
        fidelity: Fidelity,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Vec<u8>, TransformError> {
        if data.is_empty() {
            return Err(TransformError::InvalidInput("document is empty".into()));
        }
        for page in 1..=self.pages {
            progress.report(page, self.pages);
        }
        let keep = ((data.len() as f32 * fidelity.quality()).ceil() as usize).clamp(1, data.len());
        data.truncate(keep);
        Ok(data)
    }
}
