//! Child process execution with streamed output.
//!
//! Runs one SDK tool at a time: stdout and stderr are piped, drained
//! concurrently, and forwarded line-by-line to the parent's corresponding
//! stream as they arrive. The caller blocks until the child exits.

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::error::{Error, Result};

/// Result of one tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit status of the child
    pub status: ExitStatus,
    /// Lines the child wrote to stdout
    pub stdout_lines: Vec<String>,
    /// Lines the child wrote to stderr
    pub stderr_lines: Vec<String>,
}

/// Runs `program` with `args` in `working_dir` and waits for it to exit.
///
/// The child is spawned directly (no shell interpretation). Both output
/// streams are drained concurrently so the child never blocks on a full
/// pipe while the parent waits. No timeout is imposed; a hung tool hangs
/// the attempt until the operator intervenes.
pub async fn run_tool(program: &Path, args: &[String], working_dir: &Path) -> Result<ToolOutput> {
    log::debug!("running {} {}", program.display(), args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Spawn {
            command: program.display().to_string(),
            source: e,
        })?;

    // Both streams must complete before the exit status is checked.
    let (stdout_lines, stderr_lines) = tokio::join!(
        async {
            let mut captured = Vec::new();
            if let Some(stdout) = child.stdout.take() {
                let mut lines = BufReader::new(stdout).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => {
                            println!("{line}");
                            captured.push(line);
                        }
                        Ok(None) => break,
                        // Non-UTF-8 line (SDK tools emit OEM codepages);
                        // the bytes are already consumed, keep draining.
                        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                            log::warn!("skipping undecodable stdout line: {e}");
                        }
                        Err(e) => {
                            log::warn!("stopped draining stdout: {e}");
                            break;
                        }
                    }
                }
            }
            captured
        },
        async {
            let mut captured = Vec::new();
            if let Some(stderr) = child.stderr.take() {
                let mut lines = BufReader::new(stderr).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => {
                            eprintln!("{line}");
                            captured.push(line);
                        }
                        Ok(None) => break,
                        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                            log::warn!("skipping undecodable stderr line: {e}");
                        }
                        Err(e) => {
                            log::warn!("stopped draining stderr: {e}");
                            break;
                        }
                    }
                }
            }
            captured
        }
    );

    let status = child.wait().await.map_err(|e| Error::Spawn {
        command: program.display().to_string(),
        source: e,
    })?;

    Ok(ToolOutput {
        status,
        stdout_lines,
        stderr_lines,
    })
}
