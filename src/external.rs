//! External YAML converter and diff tools.

use std::{
    io::{self, ErrorKind, Write},
    process::{Command, Output, Stdio},
    thread,
};

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{Error, Result};

/// Install hint for the YAML converter.
const YQ_HINT: &str = "sudo apt install yq or brew install yq";
/// Install hint for the diff tools.
const DIFF_HINT: &str = "sudo apt install colordiff or brew install colordiff";

/// Turns YAML text into JSON bytes.
pub trait Converter {
    /// Convert a YAML document.
    fn convert(&self, yaml: &str) -> Result<Vec<u8>>;
}

/// Result of comparing two JSON documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The inputs are line-for-line identical.
    Identical,
    /// The inputs differ; holds the rendered diff.
    Changed(String),
}

/// Compares two documents line by line.
pub trait Differ {
    /// Diff `old` against `new`.
    fn diff(&self, old: &[u8], new: &[u8]) -> Result<DiffOutcome>;
}

/// `yq . -`, reading YAML on stdin and writing JSON on stdout.
#[derive(Debug, Clone)]
pub struct Yq {
    /// Program to run.
    program: String,
}

impl Yq {
    /// Use a specific converter program that accepts `. -`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Yq {
    fn default() -> Self {
        Self::with_program("yq")
    }
}

impl Converter for Yq {
    fn convert(&self, yaml: &str) -> Result<Vec<u8>> {
        debug!(program = %self.program, bytes = yaml.len(), "converting workflow YAML");
        let output = pipe_through(&self.program, &[".", "-"], yaml.as_bytes())?;
        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: self.program.clone(),
                message: failure_message(&output),
            });
        }
        Ok(output.stdout)
    }
}

/// Run `program` with `input` on stdin, collecting stdout and stderr.
///
/// Input is written from its own thread so a tool that emits output before
/// it finishes reading cannot stall on a full pipe.
fn pipe_through(program: &str, args: &[&str], input: &[u8]) -> Result<Output> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| spawn_error(program, YQ_HINT, error))?;
    let stdin = child.stdin.take();
    let spawn_failure = |error: io::Error| Error::ToolSpawn {
        tool: program.to_string(),
        source: error,
    };

    let (written, output) = thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(input),
            None => Ok(()),
        });
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
        (written, output)
    });

    let output = output.map_err(spawn_failure)?;
    // A tool that exits early closes the pipe; its stderr explains why.
    match written {
        Err(error) if error.kind() != ErrorKind::BrokenPipe => Err(spawn_failure(error)),
        _ => Ok(output),
    }
}

/// `diff -u` over two temp files, preferring `colordiff` when installed.
#[derive(Debug, Clone)]
pub struct UnifiedDiff {
    /// Program to run.
    program: String,
}

impl UnifiedDiff {
    /// Pick `colordiff` if it is on `PATH`, else `diff`.
    pub fn detect() -> Self {
        let program = if which::which("colordiff").is_ok() {
            "colordiff"
        } else {
            "diff"
        };
        Self::with_program(program)
    }

    /// Use a specific diff program that accepts `-u old new`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Differ for UnifiedDiff {
    fn diff(&self, old: &[u8], new: &[u8]) -> Result<DiffOutcome> {
        let old_file = temp_json("oldworkflow-", old)?;
        let new_file = temp_json("newworkflow-", new)?;
        debug!(program = %self.program, "diffing workflow JSON");

        let output = Command::new(&self.program)
            .arg("-u")
            .arg(old_file.path())
            .arg(new_file.path())
            .output()
            .map_err(|error| spawn_error(&self.program, DIFF_HINT, error))?;

        // diff exits 1 when the inputs differ.
        match output.status.code() {
            Some(0) => Ok(DiffOutcome::Identical),
            Some(1) => Ok(DiffOutcome::Changed(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            )),
            _ => Err(Error::ToolFailed {
                tool: self.program.clone(),
                message: failure_message(&output),
            }),
        }
    }
}

/// Write bytes to a named temp file that is removed on drop.
fn temp_json(prefix: &str, contents: &[u8]) -> Result<NamedTempFile> {
    let mut file = Builder::new()
        .prefix(prefix)
        .suffix(".json")
        .tempfile()
        .map_err(|error| Error::TempFile { source: error })?;
    file.write_all(contents)
        .and_then(|()| file.flush())
        .map_err(|error| Error::TempFile { source: error })?;
    Ok(file)
}

/// Classify a spawn failure, calling out missing programs.
fn spawn_error(program: &str, hint: &'static str, error: io::Error) -> Error {
    if error.kind() == ErrorKind::NotFound {
        return Error::ToolMissing {
            tool: program.to_string(),
            hint,
        };
    }
    Error::ToolSpawn {
        tool: program.to_string(),
        source: error,
    }
}

/// Prefer the tool's stderr; fall back to its exit status.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    }
}
