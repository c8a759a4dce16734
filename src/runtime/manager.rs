//! Unified facade over detection, adapters, the runner and the classifier

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::modules::core::{
    run_classified, validate_argument, CommandReport, CommandRunner, SystemCommandRunner,
};
use crate::modules::error::ManagerError;
use crate::modules::interface::{
    Flags, Operation, Outcome, PackageOperation, ServiceOperation, ToolIdentity,
};
use crate::modules::registry::AdapterRegistry;
use crate::modules::system::detection::{HostDetector, HostProbe, HostProfile, SystemProbe};
use crate::runtime::config::ManagerConfig;

/// One call surface for packages and services, whatever the host runs.
///
/// The host profile is detected on first use and cached; call
/// [`UnixManager::refresh_profile`] after the host changes.
pub struct UnixManager {
    registry: Arc<AdapterRegistry>,
    runner: Arc<dyn CommandRunner>,
    detector: HostDetector,
    profile: RwLock<Option<Arc<HostProfile>>>,
    config: ManagerConfig,
}

impl Default for UnixManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UnixManager {
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        let runner = SystemCommandRunner::new().with_locale(config.locale.clone());
        let detector = Self::detector_for(&config, Arc::new(SystemProbe::new()));

        Self {
            registry: Arc::new(AdapterRegistry::with_default_adapters()),
            runner: Arc::new(runner),
            detector,
            profile: RwLock::new(None),
            config,
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn HostProbe>) -> Self {
        self.detector = Self::detector_for(&self.config, probe);
        self
    }

    pub fn with_registry(mut self, registry: Arc<AdapterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Use a fixed profile instead of detecting one
    pub fn with_profile(mut self, profile: HostProfile) -> Self {
        self.profile = RwLock::new(Some(Arc::new(profile)));
        self
    }

    fn detector_for(config: &ManagerConfig, probe: Arc<dyn HostProbe>) -> HostDetector {
        HostDetector::new(probe)
            .with_package_manager(config.package_manager)
            .with_init_system(config.init_system)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Flags carrying the configured defaults
    pub fn default_flags(&self) -> Flags {
        Flags {
            assume_yes: self.config.assume_yes,
            extra_args: Vec::new(),
        }
    }

    /// Cached host profile, detected on first use
    pub async fn profile(&self) -> Arc<HostProfile> {
        if let Some(profile) = self.profile.read().await.as_ref() {
            return Arc::clone(profile);
        }

        let mut slot = self.profile.write().await;
        if let Some(profile) = slot.as_ref() {
            return Arc::clone(profile);
        }
        let detected = Arc::new(self.detector.detect().await);
        *slot = Some(Arc::clone(&detected));
        detected
    }

    /// Detect again and replace the cached profile
    pub async fn refresh_profile(&self) -> Arc<HostProfile> {
        let detected = Arc::new(self.detector.detect().await);
        *self.profile.write().await = Some(Arc::clone(&detected));
        detected
    }

    pub async fn package(
        &self,
        operation: PackageOperation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<Outcome, ManagerError> {
        self.package_report(operation, target, flags)
            .await
            .map(|report| report.outcome)
    }

    /// Like [`UnixManager::package`], keeping the raw execution result
    pub async fn package_report(
        &self,
        operation: PackageOperation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<CommandReport, ManagerError> {
        let kind = self.profile().await.require_package_manager()?;
        let adapter = self.registry.package_manager(kind)?;
        let report = adapter
            .execute(self.runner.as_ref(), operation, target, flags, self.config.timeout)
            .await?;
        self.finish(report)
    }

    pub async fn service(
        &self,
        operation: ServiceOperation,
        name: &str,
        flags: &Flags,
    ) -> Result<Outcome, ManagerError> {
        self.service_report(operation, name, flags)
            .await
            .map(|report| report.outcome)
    }

    /// Like [`UnixManager::service`], keeping the raw execution result
    pub async fn service_report(
        &self,
        operation: ServiceOperation,
        name: &str,
        flags: &Flags,
    ) -> Result<CommandReport, ManagerError> {
        let kind = self.profile().await.require_init_system()?;
        let adapter = self.registry.service_manager(kind)?;
        let report = adapter
            .execute(self.runner.as_ref(), operation, name, flags, self.config.timeout)
            .await?;
        self.finish(report)
    }

    /// Argument vector the operation would run on this host, without running it
    pub async fn command_line(
        &self,
        operation: Operation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<Vec<String>, ManagerError> {
        let profile = self.profile().await;
        let identity = match operation {
            Operation::Package(_) => ToolIdentity::PackageManager(profile.require_package_manager()?),
            Operation::Service(_) => ToolIdentity::InitSystem(profile.require_init_system()?),
        };
        self.registry.build(identity, operation, target, flags)
    }

    /// Run one of a tool's own subcommands, e.g. `native("apt-mark", ["hold", "curl"])`.
    /// `program` is an executable name or a canonical tool name.
    pub async fn native(&self, program: &str, args: &[String]) -> Result<Outcome, ManagerError> {
        self.native_report(program, args)
            .await
            .map(|report| report.outcome)
    }

    pub async fn native_report(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<CommandReport, ManagerError> {
        let (identity, argv) = self.native_command_line(program, args)?;
        let adapter = self.registry.get(identity)?;

        tracing::info!("Running native {} command: {}", identity, shell_words::join(&argv));
        let report = run_classified(
            self.runner.as_ref(),
            identity,
            adapter.outcome_patterns(),
            &argv,
            self.config.timeout,
        )
        .await;
        self.finish(report)
    }

    /// Tool and argument vector a native call would run
    pub fn native_command_line(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<(ToolIdentity, Vec<String>), ManagerError> {
        let (identity, executable) = match ToolIdentity::from_invocation_name(program) {
            Some(found) => found,
            None => {
                let identity: ToolIdentity = program.parse()?;
                (identity, identity.program())
            }
        };
        if !self.registry.is_registered(identity) {
            return Err(ManagerError::UnsupportedTool { tool: identity });
        }
        for arg in args {
            validate_argument(arg)?;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(executable.to_string());
        argv.extend(args.iter().cloned());
        Ok((identity, argv))
    }

    fn finish(&self, report: CommandReport) -> Result<CommandReport, ManagerError> {
        if !report.outcome.is_satisfied() {
            tracing::warn!("{}", report.outcome);
        }
        if self.config.strict {
            report.outcome.clone().into_strict()?;
        }
        Ok(report)
    }

    pub async fn install_package(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Install, Some(name), &self.default_flags())
            .await
    }

    pub async fn remove_package(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Remove, Some(name), &self.default_flags())
            .await
    }

    pub async fn purge_package(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Purge, Some(name), &self.default_flags())
            .await
    }

    pub async fn update_packages(&self) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Update, None, &self.default_flags())
            .await
    }

    /// Upgrade everything, or only `name` where the tool supports it
    pub async fn upgrade_packages(&self, name: Option<&str>) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Upgrade, name, &self.default_flags())
            .await
    }

    pub async fn query_package(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::Query, Some(name), &self.default_flags())
            .await
    }

    pub async fn list_packages(&self) -> Result<Outcome, ManagerError> {
        self.package(PackageOperation::List, None, &self.default_flags())
            .await
    }

    pub async fn service_status(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Status, name, &self.default_flags())
            .await
    }

    pub async fn service_start(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Start, name, &self.default_flags())
            .await
    }

    pub async fn service_stop(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Stop, name, &self.default_flags())
            .await
    }

    pub async fn service_restart(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Restart, name, &self.default_flags())
            .await
    }

    pub async fn service_reload(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Reload, name, &self.default_flags())
            .await
    }

    pub async fn service_enable(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Enable, name, &self.default_flags())
            .await
    }

    pub async fn service_disable(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::Disable, name, &self.default_flags())
            .await
    }

    pub async fn service_is_enabled(&self, name: &str) -> Result<Outcome, ManagerError> {
        self.service(ServiceOperation::IsEnabled, name, &self.default_flags())
            .await
    }
}
