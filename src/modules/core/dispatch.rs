//! Run a rendered argument vector and classify what came back

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::modules::core::classifier::{classify, classify_runner_error, OutcomePattern};
use crate::modules::core::command::{CommandRunner, ExecutionResult};
use crate::modules::interface::{Outcome, ToolIdentity};

/// Classified outcome plus the raw result it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandReport {
    pub outcome: Outcome,
    /// `None` when the process could not be started
    pub result: Option<ExecutionResult>,
}

impl CommandReport {
    /// Captured stdout, empty when nothing ran
    pub fn stdout(&self) -> &str {
        self.result.as_ref().map(|r| r.stdout.as_str()).unwrap_or_default()
    }
}

pub async fn run_classified(
    runner: &dyn CommandRunner,
    tool: ToolIdentity,
    patterns: &[OutcomePattern],
    argv: &[String],
    timeout: Option<Duration>,
) -> CommandReport {
    match runner.run(argv, timeout).await {
        Ok(result) => {
            let outcome = classify(tool, patterns, &result);
            tracing::debug!(
                tool = %tool,
                outcome = outcome.label(),
                duration = ?result.duration,
                "Classified command result"
            );
            CommandReport {
                outcome,
                result: Some(result),
            }
        }
        Err(e) => {
            tracing::warn!("Failed to run {}: {}", tool, e);
            CommandReport {
                outcome: classify_runner_error(tool, argv, &e),
                result: None,
            }
        }
    }
}
