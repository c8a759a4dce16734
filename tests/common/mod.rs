//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tum::modules::core::{CommandRunner, ExecutionResult};
use tum::modules::error::RunnerError;
use tum::modules::system::detection::HostProbe;

/// What a [`ScriptedRunner`] hands back for one call
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    SpawnFailure,
}

impl Scripted {
    pub fn ok(stdout: &str) -> Self {
        Scripted::Exit {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn exit(code: i32, stderr: &str) -> Self {
        Scripted::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Records every argument vector and answers from a queue; an empty queue
/// answers with a clean exit
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: Scripted) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        argv: &[String],
        _timeout: Option<Duration>,
    ) -> Result<ExecutionResult, RunnerError> {
        self.calls.lock().unwrap().push(argv.to_vec());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::ok(""));

        match response {
            Scripted::Exit {
                code,
                stdout,
                stderr,
            } => Ok(ExecutionResult::exited(argv.to_vec(), code, stdout, stderr)),
            Scripted::SpawnFailure => Err(RunnerError::SpawnFailed {
                program: argv[0].clone(),
                error: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }
}

/// In-memory host
#[derive(Debug, Default, Clone)]
pub struct FakeProbe {
    executables: HashSet<String>,
    paths: HashSet<PathBuf>,
    files: HashMap<PathBuf, String>,
    pid1: Option<String>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables.insert(name.to_string());
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.paths.insert(PathBuf::from(path));
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.paths.insert(PathBuf::from(path));
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn with_pid1(mut self, comm: &str) -> Self {
        self.pid1 = Some(comm.to_string());
        self
    }

    /// Debian-like host running systemd
    pub fn debian_systemd() -> Self {
        Self::new()
            .with_file("/etc/os-release", "ID=debian\nPRETTY_NAME=\"Debian GNU/Linux 12\"\n")
            .with_executable("apt")
            .with_executable("apt-get")
            .with_executable("systemctl")
            .with_pid1("systemd")
            .with_path("/run/systemd/system")
    }
}

#[async_trait]
impl HostProbe for FakeProbe {
    async fn executable_exists(&self, name: &str) -> bool {
        self.executables.contains(name)
    }

    async fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    async fn read_file(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }

    async fn pid1_comm(&self) -> Option<String> {
        self.pid1.clone()
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
