//! Package manager adapters

use async_trait::async_trait;
use std::time::Duration;

use crate::modules::core::{
    classify, run_classified, ArgvTemplate, CommandReport, CommandRunner, ExecutionResult,
    OutcomePattern,
};
use crate::modules::error::ManagerError;
use crate::modules::interface::{Flags, Outcome, PackageManagerKind, PackageOperation, ToolIdentity};

/// One package manager's syntax and vocabulary.
///
/// Implementations only describe the tool; rendering, running and
/// classification are shared default methods.
#[async_trait]
pub trait PackageManager: Send + Sync {
    fn kind(&self) -> PackageManagerKind;

    /// Template for `operation`, or `None` when the tool has no such operation
    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate>;

    /// Messages this tool is known to print, checked before the shared ones
    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        &[]
    }

    fn identity(&self) -> ToolIdentity {
        ToolIdentity::PackageManager(self.kind())
    }

    fn supports(&self, operation: PackageOperation) -> bool {
        self.template(operation).is_some()
    }

    fn command_line(
        &self,
        operation: PackageOperation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<Vec<String>, ManagerError> {
        let template = self
            .template(operation)
            .ok_or_else(|| ManagerError::UnsupportedOperation {
                tool: self.identity(),
                operation: operation.into(),
            })?;
        template.render(self.identity(), operation.into(), target, flags)
    }

    fn classify(&self, result: &ExecutionResult) -> Outcome {
        classify(self.identity(), self.outcome_patterns(), result)
    }

    async fn execute(
        &self,
        runner: &dyn CommandRunner,
        operation: PackageOperation,
        target: Option<&str>,
        flags: &Flags,
        timeout: Option<Duration>,
    ) -> Result<CommandReport, ManagerError> {
        let argv = self.command_line(operation, target, flags)?;
        tracing::info!("Running {} {}: {}", self.kind(), operation, shell_words::join(&argv));
        Ok(run_classified(runner, self.identity(), self.outcome_patterns(), &argv, timeout).await)
    }
}

pub mod apk;
pub mod apt;
pub mod aptitude;
pub mod aur;
pub mod brew;
pub mod dnf;
pub mod dpkg;
pub mod guix;
pub mod openbsd;
pub mod pacman;
pub mod pamac;
pub mod pkg;
pub mod pkgin;
pub mod qi;
pub mod slackpkg;
pub mod xbps;
pub mod yum;
pub mod zypper;

pub use apk::ApkPackageManager;
pub use apt::AptPackageManager;
pub use aptitude::AptitudePackageManager;
pub use aur::AurHelperPackageManager;
pub use brew::BrewPackageManager;
pub use dnf::DnfPackageManager;
pub use dpkg::DpkgPackageManager;
pub use guix::GuixPackageManager;
pub use openbsd::OpenBsdPackageManager;
pub use pacman::PacmanPackageManager;
pub use pamac::PamacPackageManager;
pub use pkg::PkgPackageManager;
pub use pkgin::PkginPackageManager;
pub use qi::QiPackageManager;
pub use slackpkg::SlackpkgPackageManager;
pub use xbps::XbpsPackageManager;
pub use yum::YumPackageManager;
pub use zypper::ZypperPackageManager;
