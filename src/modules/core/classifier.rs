//! Outcome classification
//!
//! Tools disagree on exit codes, so every adapter ships a small table of
//! message fragments it is known to print. The classifier walks that table,
//! then a few patterns shared by all tools, and finally falls back to the
//! exit status alone.

use crate::modules::core::command::{ExecutionResult, ExitState};
use crate::modules::error::RunnerError;
use crate::modules::interface::{FailureDetail, Outcome, ToolIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    AlreadySatisfied,
    NotFound,
    PermissionDenied,
    ToolError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMatch {
    Any,
    NonZero,
    Code(i32),
}

/// One known message fragment and the outcome it signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomePattern {
    pub kind: PatternKind,
    pub exit: ExitMatch,
    /// Matched case-insensitively against stderr, then stdout
    pub needle: &'static str,
}

impl OutcomePattern {
    pub const fn already_satisfied(needle: &'static str) -> Self {
        Self {
            kind: PatternKind::AlreadySatisfied,
            exit: ExitMatch::Any,
            needle,
        }
    }

    pub const fn not_found(needle: &'static str) -> Self {
        Self {
            kind: PatternKind::NotFound,
            exit: ExitMatch::NonZero,
            needle,
        }
    }

    pub const fn permission_denied(needle: &'static str) -> Self {
        Self {
            kind: PatternKind::PermissionDenied,
            exit: ExitMatch::NonZero,
            needle,
        }
    }

    pub const fn tool_error(needle: &'static str) -> Self {
        Self {
            kind: PatternKind::ToolError,
            exit: ExitMatch::NonZero,
            needle,
        }
    }

    /// Restrict the pattern to one exit code
    pub const fn on_exit(self, code: i32) -> Self {
        Self {
            exit: ExitMatch::Code(code),
            ..self
        }
    }

    fn applies_to(&self, exit: ExitState) -> bool {
        match (self.exit, exit) {
            (_, ExitState::TimedOut) => false,
            (ExitMatch::Any, _) => true,
            (ExitMatch::NonZero, state) => !state.is_success(),
            (ExitMatch::Code(code), ExitState::Exited(actual)) => code == actual,
            (ExitMatch::Code(_), ExitState::Signaled(_)) => false,
        }
    }

    fn matches(&self, exit: ExitState, stderr: &str, stdout: &str) -> bool {
        if !self.applies_to(exit) {
            return false;
        }
        let needle = self.needle.to_lowercase();
        stderr.contains(&needle) || stdout.contains(&needle)
    }
}

/// Fragments every tool on every platform can print
pub const COMMON_PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::permission_denied("permission denied"),
    OutcomePattern::permission_denied("operation not permitted"),
    OutcomePattern::permission_denied("must be root"),
    OutcomePattern::permission_denied("must be run as root"),
    OutcomePattern::permission_denied("are you root"),
    OutcomePattern::permission_denied("requires root"),
    OutcomePattern::permission_denied("superuser privileges"),
];

/// Classify one execution of `tool` using the tool's own `patterns`
pub fn classify(tool: ToolIdentity, patterns: &[OutcomePattern], result: &ExecutionResult) -> Outcome {
    if result.exit == ExitState::TimedOut {
        return Outcome::RunnerTimeout(detail(tool, result, Some("timed out".to_string())));
    }

    let stderr = result.stderr.to_lowercase();
    let stdout = result.stdout.to_lowercase();

    let matched = patterns
        .iter()
        .chain(COMMON_PATTERNS)
        .find(|pattern| pattern.matches(result.exit, &stderr, &stdout));

    if let Some(pattern) = matched {
        let reason = Some(format!("matched \"{}\"", pattern.needle));
        return match pattern.kind {
            PatternKind::AlreadySatisfied => Outcome::AlreadySatisfied,
            PatternKind::NotFound => Outcome::NotFound(detail(tool, result, reason)),
            PatternKind::PermissionDenied => Outcome::PermissionDenied(detail(tool, result, reason)),
            PatternKind::ToolError => Outcome::ToolError(detail(tool, result, reason)),
        };
    }

    if result.exit.is_success() {
        Outcome::Success
    } else {
        Outcome::RunnerFailure(detail(tool, result, None))
    }
}

/// The process never produced an exit status
pub fn classify_runner_error(tool: ToolIdentity, argv: &[String], error: &RunnerError) -> Outcome {
    Outcome::RunnerFailure(FailureDetail {
        tool,
        argv: argv.to_vec(),
        exit: None,
        stdout: String::new(),
        stderr: String::new(),
        reason: Some(error.to_string()),
    })
}

fn detail(tool: ToolIdentity, result: &ExecutionResult, reason: Option<String>) -> FailureDetail {
    FailureDetail {
        tool,
        argv: result.argv.clone(),
        exit: Some(result.exit),
        stdout: result.stdout.clone(),
        stderr: result.stderr.clone(),
        reason,
    }
}
