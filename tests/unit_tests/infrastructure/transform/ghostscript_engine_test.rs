#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use docrelay::application::ports::{NoopProgressSink, TransformEngine, TransformError};
use docrelay::domain::Fidelity;
use docrelay::infrastructure::transform::{DEFAULT_BASE_DPI, GhostscriptEngine, WORKDIR_PREFIX};

const INPUT: &[u8] = b"%PDF-1.4 stand-in document";

struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        Self { dir }
    }

    fn work_root(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    fn args_log(&self) -> PathBuf {
        self.dir.path().join("args.log")
    }

    /// Writes a stand-in for `gs` that logs its arguments and copies the
    /// input file to the `-sOutputFile` target.
    fn copying_tool(&self) -> String {
        let script = format!(
            "#!/bin/sh\n\
             out=\"\"\n\
             for arg in \"$@\"; do\n\
               case \"$arg\" in\n\
                 -sOutputFile=*) out=\"${{arg#-sOutputFile=}}\" ;;\n\
               esac\n\
               last=\"$arg\"\n\
             done\n\
             printf '%s\\n' \"$@\" > '{}'\n\
             cp \"$last\" \"$out\"\n",
            self.args_log().display()
        );
        let path = self.dir.path().join("fake-gs");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn logged_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.args_log())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn leftover_workdirs(&self) -> Vec<String> {
        leftovers(&self.work_root())
    }
}

fn leftovers(root: &Path) -> Vec<String> {
    std::fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(WORKDIR_PREFIX))
        .collect()
}

async fn run(engine: &GhostscriptEngine, fidelity: Fidelity) -> Result<Vec<u8>, TransformError> {
    engine
        .transform(INPUT.to_vec(), fidelity, Arc::new(NoopProgressSink))
        .await
}

#[tokio::test]
async fn given_fidelity_when_tool_runs_then_preset_dpi_and_jpeg_quality_passed() {
    let scratch = Scratch::new();
    let engine = GhostscriptEngine::new(scratch.copying_tool(), DEFAULT_BASE_DPI)
        .with_temp_root(scratch.work_root());

    run(&engine, Fidelity::new(0.5, 0.5).unwrap()).await.unwrap();

    let args = scratch.logged_args();
    assert!(args.contains(&"-sDEVICE=pdfwrite".to_string()));
    assert!(args.contains(&"-dPDFSETTINGS=/ebook".to_string()));
    assert!(args.contains(&"-dColorImageResolution=75".to_string()));
    assert!(args.contains(&"-dJPEGQ=50".to_string()));
    let output_arg = args
        .iter()
        .find(|a| a.starts_with("-sOutputFile="))
        .unwrap();
    assert!(output_arg.contains(&scratch.work_root().display().to_string()));
    assert!(args.last().is_some_and(|input| input.ends_with("-in.pdf")));
}

#[tokio::test]
async fn given_successful_run_when_finished_then_output_returned_and_workdir_removed() {
    let scratch = Scratch::new();
    let engine = GhostscriptEngine::new(scratch.copying_tool(), DEFAULT_BASE_DPI)
        .with_temp_root(scratch.work_root());

    let output = run(&engine, Fidelity::default()).await.unwrap();

    assert_eq!(output, INPUT);
    assert!(scratch.leftover_workdirs().is_empty());
}

#[tokio::test]
async fn given_missing_binary_when_transforming_then_tool_failed_and_workdir_removed() {
    let scratch = Scratch::new();
    let engine = GhostscriptEngine::new("/nonexistent/gs-binary", DEFAULT_BASE_DPI)
        .with_temp_root(scratch.work_root());

    let result = run(&engine, Fidelity::default()).await;

    assert!(matches!(result, Err(TransformError::ToolFailed(_))));
    assert!(scratch.leftover_workdirs().is_empty());
}

#[tokio::test]
async fn given_tool_exiting_non_zero_when_transforming_then_tool_failed_and_workdir_removed() {
    let scratch = Scratch::new();
    let engine =
        GhostscriptEngine::new("false", DEFAULT_BASE_DPI).with_temp_root(scratch.work_root());

    let result = run(&engine, Fidelity::default()).await;

    match result {
        Err(TransformError::ToolFailed(message)) => assert!(message.starts_with("false exited with")),
        other => panic!("expected tool failure, got {other:?}"),
    }
    assert!(scratch.leftover_workdirs().is_empty());
}

#[tokio::test]
async fn given_tool_writing_no_output_when_transforming_then_read_error_and_workdir_removed() {
    let scratch = Scratch::new();
    let engine =
        GhostscriptEngine::new("true", DEFAULT_BASE_DPI).with_temp_root(scratch.work_root());

    let result = run(&engine, Fidelity::default()).await;

    assert!(matches!(result, Err(TransformError::Io(_))));
    assert!(scratch.leftover_workdirs().is_empty());
}

#[tokio::test]
async fn given_empty_input_when_transforming_then_invalid_input_without_workdir() {
    let scratch = Scratch::new();
    let engine = GhostscriptEngine::new(scratch.copying_tool(), DEFAULT_BASE_DPI)
        .with_temp_root(scratch.work_root());

    let result = engine
        .transform(Vec::new(), Fidelity::default(), Arc::new(NoopProgressSink))
        .await;

    assert!(matches!(result, Err(TransformError::InvalidInput(_))));
    assert!(scratch.leftover_workdirs().is_empty());
}
