//! Command runner - executes argument vectors as child processes

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::modules::error::RunnerError;

/// How long output readers may lag behind process exit. Daemons started by
/// init scripts can inherit the pipes and keep them open indefinitely.
const OUTPUT_GRACE: Duration = Duration::from_secs(2);

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ExitState {
    Exited(i32),
    Signaled(i32),
    TimedOut,
}

impl ExitState {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitState::Exited(0))
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitState::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitState::Exited(code) => write!(f, "exit status {code}"),
            ExitState::Signaled(signal) => write!(f, "killed by signal {signal}"),
            ExitState::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Raw result of one child process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub argv: Vec<String>,
    pub exit: ExitState,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    pub started_at: DateTime<Utc>,
    pub pid: Option<u32>,
}

impl ExecutionResult {
    /// Result of a process that exited on its own; also what fake runners hand back
    pub fn exited(
        argv: Vec<String>,
        code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            argv,
            exit: ExitState::Exited(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            started_at: Utc::now(),
            pid: None,
        }
    }
}

/// Seam between the engine and the host's process table
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `argv[0]` with `argv[1..]` as literal arguments. Never goes through a shell.
    async fn run(
        &self,
        argv: &[String],
        timeout: Option<Duration>,
    ) -> Result<ExecutionResult, RunnerError>;
}

/// Runs commands on the local host with tokio
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    locale: Option<String>,
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self {
            locale: Some("C".to_string()),
        }
    }

    /// Locale exported as `LC_ALL`/`LANG` to children; `None` inherits the caller's
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    fn build_command(&self, program: &str, args: &[String]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a timeout can take down everything the tool started
        #[cfg(unix)]
        cmd.process_group(0);

        if let Some(locale) = &self.locale {
            cmd.env("LC_ALL", locale).env("LANG", locale);
        }

        cmd
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        argv: &[String],
        timeout: Option<Duration>,
    ) -> Result<ExecutionResult, RunnerError> {
        let (program, args) = argv.split_first().ok_or(RunnerError::EmptyCommand)?;
        let mut cmd = self.build_command(program, args);

        tracing::debug!(command = %shell_words::join(argv), ?timeout, "Spawning child process");

        let started_at = Utc::now();
        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|error| RunnerError::SpawnFailed {
            program: program.clone(),
            error,
        })?;
        let pid = child.id();

        let stdout_reader = tokio::spawn(read_stream(child.stdout.take()));
        let stderr_reader = tokio::spawn(read_stream(child.stderr.take()));

        let waited = match timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
            None => Some(child.wait().await),
        };

        let exit = match waited {
            Some(status) => exit_state(status.map_err(|error| RunnerError::Io {
                program: program.clone(),
                error,
            })?),
            None => {
                tracing::warn!(
                    command = %shell_words::join(argv),
                    ?timeout,
                    "Command timed out, killing its process group"
                );
                #[cfg(unix)]
                kill_process_group(pid);
                // kill() also reaps, so no zombie is left behind
                if let Err(error) = child.kill().await {
                    if !matches!(child.try_wait(), Ok(Some(_))) {
                        return Err(RunnerError::Io {
                            program: program.clone(),
                            error,
                        });
                    }
                }
                ExitState::TimedOut
            }
        };

        // One grace window for both pipes
        let deadline = tokio::time::Instant::now() + OUTPUT_GRACE;
        let (stdout, stderr) = tokio::join!(
            collect_output(stdout_reader, deadline),
            collect_output(stderr_reader, deadline)
        );
        let duration = start.elapsed();

        tracing::debug!(%exit, ?duration, "Child process finished");

        Ok(ExecutionResult {
            argv: argv.to_vec(),
            exit,
            stdout,
            stderr,
            duration,
            started_at,
            pid,
        })
    }
}

async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        if let Err(e) = stream.read_to_end(&mut buf).await {
            tracing::debug!("Stopped reading child output: {}", e);
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

async fn collect_output(mut reader: JoinHandle<String>, deadline: tokio::time::Instant) -> String {
    match tokio::time::timeout_at(deadline, &mut reader).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::debug!("Output reader failed: {}", e);
            String::new()
        }
        Err(_) => {
            tracing::debug!("Output pipe still held open after exit, dropping it");
            reader.abort();
            String::new()
        }
    }
}

/// SIGKILL the group led by `pid`. Package tools fork helpers (apt runs
/// dpkg, dpkg runs maintainer scripts) that would otherwise outlive the
/// timeout and keep holding locks.
#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        tracing::debug!("Could not signal process group {}: {}", pid, e);
    }
}

#[cfg(unix)]
fn exit_state(status: ExitStatus) -> ExitState {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => ExitState::Exited(code),
        (None, Some(signal)) => ExitState::Signaled(signal),
        (None, None) => ExitState::Exited(-1),
    }
}

#[cfg(not(unix))]
fn exit_state(status: ExitStatus) -> ExitState {
    ExitState::Exited(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = SystemCommandRunner::new();
        let result = runner.run(&argv(&["echo", "hello"]), None).await.unwrap();

        assert_eq!(result.exit, ExitState::Exited(0));
        assert_eq!(result.stdout, "hello\n");
        assert!(result.pid.is_some());
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let runner = SystemCommandRunner::new();
        let result = runner
            .run(&argv(&["echo", "$(id); rm -rf /tmp/nothing"]), None)
            .await
            .unwrap();

        assert_eq!(result.stdout, "$(id); rm -rf /tmp/nothing\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let runner = SystemCommandRunner::new();
        let result = runner.run(&argv(&["false"]), None).await.unwrap();

        assert_eq!(result.exit, ExitState::Exited(1));
        assert!(!result.exit.is_success());
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_failure() {
        let runner = SystemCommandRunner::new();
        let err = runner
            .run(&argv(&["tum-definitely-not-installed"]), None)
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::SpawnFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_argv_is_rejected() {
        let runner = SystemCommandRunner::new();
        let err = runner.run(&[], None).await.unwrap_err();
        assert!(matches!(err, RunnerError::EmptyCommand));
    }

    #[test]
    fn test_exit_state_display() {
        assert_eq!(ExitState::Exited(100).to_string(), "exit status 100");
        assert_eq!(ExitState::TimedOut.to_string(), "timed out");
    }
}
