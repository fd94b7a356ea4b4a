//! The coverage tool capability and its process-backed implementation.

use crate::config::ToolConfig;
use crate::errors::{Error, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Produce raw report text for one coverage-notes artifact.
///
/// Implementations must not depend on other invocations; the runner may
/// call them from several threads at once for artifacts in different
/// directories.
pub trait CoverageTool: Sync {
    fn run(&self, artifact: &Path) -> Result<String>;
}

/// Runs an external gcov-compatible program.
///
/// The program is started inside the artifact's directory with the
/// artifact's file name as last argument, because gcov resolves the
/// matching `.gcda` and object files relative to its working directory.
#[derive(Debug, Clone)]
pub struct GcovTool {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl GcovTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
            .with_timeout(config.timeout_secs.map(Duration::from_secs))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, artifact: &Path) -> Result<Child> {
        let file_name = artifact
            .file_name()
            .ok_or_else(|| Error::tool(artifact, "artifact path has no file name"))?;
        let dir = artifact
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        Command::new(&self.program)
            .args(&self.args)
            .arg(file_name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::tool(artifact, format!("failed to start {}: {}", self.program, e)))
    }

    fn wait(&self, artifact: &Path, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child
                .wait()
                .map_err(|e| Error::tool(artifact, format!("wait failed: {}", e)));
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Timeout {
                        artifact: artifact.to_path_buf(),
                        timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(Error::tool(artifact, format!("wait failed: {}", e))),
            }
        }
    }
}

impl Default for GcovTool {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}

impl CoverageTool for GcovTool {
    fn run(&self, artifact: &Path) -> Result<String> {
        let mut child = self.spawn(artifact)?;

        // Drain both pipes while waiting so a chatty tool cannot block on a
        // full pipe buffer.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        // On timeout the drain threads are left to finish once the pipes
        // close; a grandchild may keep them open past the kill.
        let status = self.wait(artifact, &mut child)?;
        let stdout = stdout.map(join_drain).unwrap_or_default();
        let stderr = stderr.map(join_drain).unwrap_or_default();

        if !status.success() {
            let detail = stderr.lines().last().unwrap_or("").trim().to_string();
            return Err(Error::tool(artifact, format!("{} {}", status, detail).trim().to_string()));
        }

        let mut combined = stdout;
        if !stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }
        Ok(combined)
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drain(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
