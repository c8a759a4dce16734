use thiserror::Error;

use crate::modules::interface::{FailureDetail, Operation, ToolIdentity};

/// Structural failures of the detection-and-dispatch engine.
///
/// Tool-reported conditions are [`Outcome`](crate::modules::Outcome) values;
/// they only appear here when the caller opted into strict mode.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("No adapter registered for {tool}")]
    UnsupportedTool { tool: ToolIdentity },

    #[error("{tool} does not support the {operation} operation")]
    UnsupportedOperation {
        tool: ToolIdentity,
        operation: Operation,
    },

    #[error("No supported package manager detected on this host")]
    NoPackageManagerDetected,

    #[error("No supported init system detected on this host")]
    NoInitSystemDetected,

    #[error("The {operation} operation requires a target")]
    MissingTarget { operation: Operation },

    #[error("{tool} cannot apply {operation} to a single target ({target})")]
    UnexpectedTarget {
        tool: ToolIdentity,
        operation: Operation,
        target: String,
    },

    #[error("Invalid argument '{value}': {reason}")]
    InvalidTarget { value: String, reason: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Not found: {0}")]
    NotFound(Box<FailureDetail>),

    #[error("Permission denied: {0}")]
    PermissionDenied(Box<FailureDetail>),

    #[error("Tool error: {0}")]
    ToolError(Box<FailureDetail>),

    #[error("Runner failure: {0}")]
    RunnerFailure(Box<FailureDetail>),

    #[error("Runner timeout: {0}")]
    RunnerTimeout(Box<FailureDetail>),
}

/// Failures of the command runner itself, before any exit status exists
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Empty argument vector")]
    EmptyCommand,

    #[error("Failed to spawn {program}: {error}")]
    SpawnFailed {
        program: String,
        #[source]
        error: std::io::Error,
    },

    #[error("I/O error while waiting for {program}: {error}")]
    Io {
        program: String,
        #[source]
        error: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Read {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse {path}: {error}")]
    Parse {
        path: String,
        #[source]
        error: serde_yaml::Error,
    },
}
