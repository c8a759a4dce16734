//! Service manager adapters, one per init system

use async_trait::async_trait;
use std::time::Duration;

use crate::modules::core::{
    classify, run_classified, ArgvTemplate, CommandReport, CommandRunner, ExecutionResult,
    OutcomePattern,
};
use crate::modules::error::ManagerError;
use crate::modules::interface::{Flags, InitSystemKind, Outcome, ServiceOperation, ToolIdentity};

#[async_trait]
pub trait ServiceManager: Send + Sync {
    fn kind(&self) -> InitSystemKind;

    /// Template for `operation`, or `None` when the init system cannot do it
    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate>;

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        &[]
    }

    fn identity(&self) -> ToolIdentity {
        ToolIdentity::InitSystem(self.kind())
    }

    fn supports(&self, operation: ServiceOperation) -> bool {
        self.template(operation).is_some()
    }

    fn command_line(
        &self,
        operation: ServiceOperation,
        name: &str,
        flags: &Flags,
    ) -> Result<Vec<String>, ManagerError> {
        let template = self
            .template(operation)
            .ok_or_else(|| ManagerError::UnsupportedOperation {
                tool: self.identity(),
                operation: operation.into(),
            })?;
        template.render(self.identity(), operation.into(), Some(name), flags)
    }

    fn classify(&self, result: &ExecutionResult) -> Outcome {
        classify(self.identity(), self.outcome_patterns(), result)
    }

    async fn execute(
        &self,
        runner: &dyn CommandRunner,
        operation: ServiceOperation,
        name: &str,
        flags: &Flags,
        timeout: Option<Duration>,
    ) -> Result<CommandReport, ManagerError> {
        let argv = self.command_line(operation, name, flags)?;
        tracing::info!("Running {} {}: {}", self.kind(), operation, shell_words::join(&argv));
        Ok(run_classified(runner, self.identity(), self.outcome_patterns(), &argv, timeout).await)
    }
}

pub mod dinit;
pub mod launchd;
pub mod openrc;
pub mod runit;
pub mod s6;
pub mod systemd;
pub mod sysvinit;

pub use dinit::DinitServiceManager;
pub use launchd::LaunchdServiceManager;
pub use openrc::OpenRcServiceManager;
pub use runit::RunitServiceManager;
pub use s6::S6ServiceManager;
pub use systemd::SystemdServiceManager;
pub use sysvinit::SysvinitServiceManager;
