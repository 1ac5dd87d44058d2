//! Child-process supervision for the conversion script.
//!
//! The script is spawned with its working directory set to the toolchain root,
//! stdin closed, and stdout/stderr piped. Both pipes are drained on helper
//! threads while this thread polls for exit, so a chatty script cannot stall
//! on a full pipe buffer.
//!
//! One deadline covers both the wait and the capture: a background process
//! that inherits the pipes and outlives the script cannot hold the caller past
//! the timeout.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use grabby_core::paths::{self, run_script_path};
use tracing::{debug, info, warn};

use crate::error::{io_err, RunnerError};

/// Tracing target for conversion process operations.
const RUNNER_TARGET: &str = "grabby_runner::process";

/// Wall-clock limit for one conversion.
pub const CONVERSION_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Supervision settings for [`run_conversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: CONVERSION_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl RunnerConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Captured result of a script that ran to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; a signal-terminated process reports the negated signal.
    pub returncode: i32,
}

impl ConversionOutput {
    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

type PipeReader = Receiver<io::Result<Vec<u8>>>;

/// Run the toolchain's `run.bat` under `root` and wait for it.
///
/// Blocks until the process exits or `config.timeout` elapses. A missing
/// script is reported without launching anything.
pub fn run_conversion(root: &Path, config: &RunnerConfig) -> Result<ConversionOutput, RunnerError> {
    let script = run_script_path(root);
    if !paths::path_exists(&script).map_err(|e| io_err(&script, e))? {
        debug!(target: RUNNER_TARGET, script = %script.display(), "conversion script missing");
        return Err(RunnerError::ScriptNotFound { path: script });
    }

    info!(
        target: RUNNER_TARGET,
        script = %script.display(),
        timeout_secs = config.timeout.as_secs(),
        "launching conversion"
    );

    let mut child = Command::new(&script)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            path: script.clone(),
            source,
        })?;

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let started = Instant::now();
    let deadline = started + config.timeout;
    let status = wait_with_timeout(&mut child, &script, config, deadline)?;
    let returncode = exit_code(status);

    let output = ConversionOutput {
        stdout: collect(stdout, "stdout", config, deadline)?,
        stderr: collect(stderr, "stderr", config, deadline)?,
        returncode,
    };

    info!(
        target: RUNNER_TARGET,
        returncode,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "conversion exited"
    );
    Ok(output)
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> PipeReader {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
        // The receiver is gone once the caller gave up on the deadline.
        let _ = tx.send(result);
    });
    rx
}

/// Polls the child until it exits; kills and reaps it once `deadline` passes.
fn wait_with_timeout(
    child: &mut Child,
    script: &Path,
    config: &RunnerConfig,
    deadline: Instant,
) -> Result<ExitStatus, RunnerError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(target: RUNNER_TARGET, ?status, "conversion process exited");
                return Ok(status);
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    warn!(
                        target: RUNNER_TARGET,
                        pid = child.id(),
                        timeout_secs = config.timeout.as_secs(),
                        "conversion timed out, killing process"
                    );
                    drop(child.kill());
                    drop(child.wait());
                    return Err(RunnerError::Timeout {
                        timeout: config.timeout,
                    });
                }
                thread::sleep(config.poll_interval);
            }
            Err(err) => {
                drop(child.kill());
                drop(child.wait());
                return Err(io_err(script, err));
            }
        }
    }
}

/// Waits for one pipe to reach EOF, but never past `deadline`.
///
/// On timeout the reader thread is left detached: whatever still holds the
/// pipe open is not waited on.
fn collect(
    reader: Option<PipeReader>,
    stream: &'static str,
    config: &RunnerConfig,
    deadline: Instant,
) -> Result<String, RunnerError> {
    let Some(reader) = reader else {
        return Ok(String::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    let bytes = match reader.recv_timeout(remaining) {
        Ok(result) => result.map_err(|e| io_err(PathBuf::from(stream), e))?,
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                target: RUNNER_TARGET,
                stream,
                timeout_secs = config.timeout.as_secs(),
                "conversion output still open at deadline"
            );
            return Err(RunnerError::Timeout {
                timeout: config.timeout,
            });
        }
        Err(RecvTimeoutError::Disconnected) => return Err(RunnerError::Capture { stream }),
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
