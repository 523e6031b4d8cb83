//! Utilities for running external commands with bounded timeouts

use anyhow::{Context, Result};
use std::fs::File;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, error};

/// Runtime used for subprocess timeouts. The rest of the program is
/// synchronous, so a single shared current-thread runtime is enough.
fn runtime() -> &'static tokio::runtime::Runtime {
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build subprocess runtime")
    })
}

fn wait_with_timeout(cmd: Command, program: &str, timeout: Option<Duration>) -> Result<Output> {
    if let Some(timeout_duration) = timeout {
        runtime().block_on(async {
            let result =
                tokio::time::timeout(timeout_duration, tokio::process::Command::from(cmd).output())
                    .await;

            match result {
                Ok(output) => output.context(format!("Failed to execute {}", program)),
                Err(_) => Err(anyhow::anyhow!(
                    "Command timed out after {:?}: {}",
                    timeout_duration,
                    program
                )),
            }
        })
    } else {
        let mut cmd = cmd;
        cmd.output()
            .context(format!("Failed to execute {}", program))
    }
}

/// Run a command with optional timeout, capturing stdout and stderr.
///
/// Fails on nonzero exit, with stderr included in the error.
pub fn run_command(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(Stdio::null());

    debug!("Running command: {} {}", program, args.join(" "));

    let output = wait_with_timeout(cmd, program, timeout)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed: {}", program);
        error!("Stderr: {}", stderr);
        anyhow::bail!(
            "Command failed with exit code {:?}: {}",
            output.status.code(),
            stderr.trim()
        );
    }

    Ok(output)
}

/// Run a command and return stdout as string.
pub fn run_command_stdout(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<String> {
    let output = run_command(program, args, timeout)?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Run a command with stdout redirected into a file.
///
/// Used for dump tools that stream their output to stdout. Stderr is
/// captured; nonzero exit fails with the captured stderr.
pub fn run_command_to_file(
    program: &str,
    args: &[&str],
    stdout_file: File,
    timeout: Option<Duration>,
) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::from(stdout_file));
    cmd.stderr(Stdio::piped());
    cmd.stdin(Stdio::null());

    debug!("Running command (stdout to file): {}", program);

    let output = wait_with_timeout(cmd, program, timeout)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed: {}", program);
        error!("Stderr: {}", stderr);
        anyhow::bail!(
            "Command failed with exit code {:?}: {}",
            output.status.code(),
            stderr.trim()
        );
    }

    Ok(())
}
