use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ProgressSink, TransformEngine, TransformError};
use crate::domain::Fidelity;

use super::presets::{GhostscriptPreset, target_dpi};

const STDERR_EXCERPT_CHARS: usize = 500;
pub const WORKDIR_PREFIX: &str = "docrelay-gs-";

/// Re-distills the document through an external Ghostscript process. The
/// tool works on files, so every call gets its own temp directory which is
/// removed when the call returns, whatever the outcome.
pub struct GhostscriptEngine {
    binary: String,
    base_dpi: f32,
    temp_root: Option<PathBuf>,
}

impl GhostscriptEngine {
    pub fn new(binary: impl Into<String>, base_dpi: f32) -> Self {
        Self {
            binary: binary.into(),
            base_dpi,
            temp_root: None,
        }
    }

    /// Creates the per-call work directories under `root` instead of the
    /// system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    fn arguments(&self, fidelity: &Fidelity, input: &Path, output: &Path) -> Vec<String> {
        let preset = GhostscriptPreset::for_quality(fidelity.quality());
        let dpi = target_dpi(self.base_dpi, fidelity);
        vec![
            "-sDEVICE=pdfwrite".to_string(),
            "-dCompatibilityLevel=1.4".to_string(),
            format!("-dPDFSETTINGS={}", preset.as_setting()),
            "-dNOPAUSE".to_string(),
            "-dBATCH".to_string(),
            "-dQUIET".to_string(),
            "-dSAFER".to_string(),
            "-dDownsampleColorImages=true".to_string(),
            "-dDownsampleGrayImages=true".to_string(),
            "-dDownsampleMonoImages=true".to_string(),
            "-dColorImageDownsampleType=/Bicubic".to_string(),
            "-dGrayImageDownsampleType=/Bicubic".to_string(),
            format!("-dColorImageResolution={dpi}"),
            format!("-dGrayImageResolution={dpi}"),
            format!("-dMonoImageResolution={dpi}"),
            format!("-dJPEGQ={}", fidelity.jpeg_quality()),
            format!("-sOutputFile={}", output.display()),
            input.display().to_string(),
        ]
    }
}

#[async_trait]
impl TransformEngine for GhostscriptEngine {
    #[tracing::instrument(skip(self, data, fidelity, progress), fields(bytes = data.len(), %fidelity))]
    async fn transform(
        &self,
        data: Vec<u8>,
        fidelity: Fidelity,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Vec<u8>, TransformError> {
        if data.is_empty() {
            return Err(TransformError::InvalidInput("document is empty".into()));
        }
        progress.report(0, 1);

        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKDIR_PREFIX);
        let workdir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let stem = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        );
        let input = workdir.path().join(format!("{stem}-in.pdf"));
        let output = workdir.path().join(format!("{stem}-out.pdf"));

        tokio::fs::write(&input, &data).await?;
        drop(data);

        let result = Command::new(&self.binary)
            .args(self.arguments(&fidelity, &input, &output))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TransformError::ToolFailed(format!("cannot run {}: {e}", self.binary)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let excerpt: String = stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect();
            return Err(TransformError::ToolFailed(format!(
                "{} exited with {}: {excerpt}",
                self.binary, result.status
            )));
        }

        let transformed = tokio::fs::read(&output).await?;
        if transformed.is_empty() {
            return Err(TransformError::ToolFailed("tool produced an empty document".into()));
        }

        progress.report(1, 1);
        tracing::debug!(output_bytes = transformed.len(), "Ghostscript transform finished");
        Ok(transformed)
    }
}
