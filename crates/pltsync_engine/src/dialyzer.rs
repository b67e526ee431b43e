//! Subprocess driver for the `dialyzer` executable.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use pltsync_diagnostics::{DiagnosticRecord, RecordRenderer};
use tracing::{debug, info};

use crate::engine::AnalysisEngine;
use crate::error::EngineError;
use crate::output::{parse_plt_info, parse_warnings};
use crate::request::{EngineRequest, Operation};

/// Exit status meaning "finished, no warnings".
const EXIT_OK: i32 = 0;

/// Exit status meaning "finished, warnings were emitted".
const EXIT_WARNINGS: i32 = 2;

/// Drives `dialyzer` as a blocking subprocess, one process per request.
#[derive(Debug, Clone)]
pub struct DialyzerEngine {
    program: String,
    extra_args: Vec<String>,
}

impl DialyzerEngine {
    /// Creates an engine running `program` with `extra_args` added to every
    /// build, add, remove and check invocation.
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    /// Returns the command-line arguments for a request.
    pub fn request_args(&self, request: &EngineRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        match request {
            EngineRequest::Build { output_plt, .. } => {
                args.push("--build_plt".into());
                args.push("--output_plt".into());
                args.push(output_plt.into());
            }
            EngineRequest::Add { plt, .. } => {
                args.push("--add_to_plt".into());
                args.push("--plt".into());
                args.push(plt.into());
                args.push("--output_plt".into());
                args.push(plt.into());
            }
            EngineRequest::Remove { plt, .. } => {
                args.push("--remove_from_plt".into());
                args.push("--plt".into());
                args.push(plt.into());
                args.push("--output_plt".into());
                args.push(plt.into());
            }
            EngineRequest::Check { plt, .. } => {
                args.push("--no_check_plt".into());
                args.push("--fullpath".into());
                args.push("--plt".into());
                args.push(plt.into());
            }
        }

        args.extend(self.extra_args.iter().map(OsString::from));
        args.extend(request.files().iter().map(OsString::from));

        // `--plts` swallows every following argument, so it goes last.
        if let EngineRequest::Build { plts, .. } = request {
            if !plts.is_empty() {
                args.push("--plts".into());
                args.extend(plts.iter().map(OsString::from));
            }
        }
        args
    }

    /// Runs the executable and returns its standard output.
    ///
    /// Exit statuses 0 and 2 are success; anything else is a failure of
    /// `operation`.
    fn invoke(&self, operation: Operation, args: &[OsString]) -> Result<String, EngineError> {
        debug!(program = %self.program, %operation, argc = args.len(), "spawning analyzer");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| EngineError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        match output.status.code() {
            Some(EXIT_OK) | Some(EXIT_WARNINGS) => Ok(stdout),
            status => {
                let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                if stderr.is_empty() {
                    // The analyzer prints most errors to stdout.
                    stderr = stdout.trim().to_string();
                }
                Err(EngineError::Failed {
                    operation,
                    status,
                    stderr,
                })
            }
        }
    }
}

impl Default for DialyzerEngine {
    fn default() -> Self {
        Self::new("dialyzer", Vec::new())
    }
}

impl AnalysisEngine for DialyzerEngine {
    fn run(&self, request: &EngineRequest) -> Result<Vec<DiagnosticRecord>, EngineError> {
        let operation = request.operation();
        info!(
            %operation,
            files = request.files().len(),
            plt = %request.plt().display(),
            mutates = request.mutates_plt(),
            "invoking analyzer"
        );
        let stdout = self.invoke(operation, &self.request_args(request))?;
        match operation {
            Operation::Check => {
                let records = parse_warnings(&stdout);
                debug!(records = records.len(), "parsed check output");
                Ok(records)
            }
            Operation::Build | Operation::Add | Operation::Remove | Operation::Inspect => {
                Ok(Vec::new())
            }
        }
    }

    fn plt_files(&self, plt: &Path) -> Result<BTreeSet<PathBuf>, EngineError> {
        let args: Vec<OsString> = vec!["--plt_info".into(), "--plt".into(), plt.into()];
        let stdout = self.invoke(Operation::Inspect, &args)?;
        let files = parse_plt_info(&stdout).ok_or_else(|| EngineError::MalformedPltInfo {
            plt: plt.to_path_buf(),
            reason: "no file list in --plt_info output".to_string(),
        })?;
        // dialyzer stores absolute names; keep any relative entry comparable.
        Ok(files
            .into_iter()
            .map(|p| std::path::absolute(&p).unwrap_or(p))
            .collect())
    }
}

impl RecordRenderer for DialyzerEngine {
    fn render(&self, record: &DiagnosticRecord) -> String {
        match &record.payload {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
