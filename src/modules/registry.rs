//! Central registry for all tool adapters

use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::core::{ExecutionResult, OutcomePattern};
use crate::modules::error::ManagerError;
use crate::modules::interface::{
    Flags, InitSystemKind, Operation, Outcome, PackageManagerKind, ToolIdentity,
};
use crate::modules::system::package_managers::{
    ApkPackageManager, AptPackageManager, AptitudePackageManager, AurHelperPackageManager,
    BrewPackageManager, DnfPackageManager, DpkgPackageManager, GuixPackageManager,
    OpenBsdPackageManager, PackageManager, PacmanPackageManager, PamacPackageManager,
    PkgPackageManager, PkginPackageManager, QiPackageManager, SlackpkgPackageManager,
    XbpsPackageManager, YumPackageManager, ZypperPackageManager,
};
use crate::modules::system::service_managers::{
    DinitServiceManager, LaunchdServiceManager, OpenRcServiceManager, RunitServiceManager,
    S6ServiceManager, ServiceManager, SystemdServiceManager, SysvinitServiceManager,
};

/// A registered adapter of either kind
#[derive(Clone)]
pub enum Adapter {
    Package(Arc<dyn PackageManager>),
    Service(Arc<dyn ServiceManager>),
}

impl Adapter {
    pub fn identity(&self) -> ToolIdentity {
        match self {
            Adapter::Package(adapter) => adapter.identity(),
            Adapter::Service(adapter) => adapter.identity(),
        }
    }

    pub fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        match self {
            Adapter::Package(adapter) => adapter.outcome_patterns(),
            Adapter::Service(adapter) => adapter.outcome_patterns(),
        }
    }

    /// Whether the adapter declares a template for `operation`
    pub fn supports(&self, operation: Operation) -> bool {
        match (self, operation) {
            (Adapter::Package(adapter), Operation::Package(op)) => adapter.supports(op),
            (Adapter::Service(adapter), Operation::Service(op)) => adapter.supports(op),
            _ => false,
        }
    }
}

/// Adapters keyed by the tool they drive. Filled at construction, read-only
/// afterwards.
pub struct AdapterRegistry {
    package_managers: HashMap<PackageManagerKind, Arc<dyn PackageManager>>,
    service_managers: HashMap<InitSystemKind, Arc<dyn ServiceManager>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            package_managers: HashMap::new(),
            service_managers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in adapter registered
    pub fn with_default_adapters() -> Self {
        let mut registry = Self::new();

        registry.register_package_manager(Arc::new(AptPackageManager::new()));
        registry.register_package_manager(Arc::new(AptPackageManager::apt_get()));
        registry.register_package_manager(Arc::new(AptPackageManager::apt_cache()));
        registry.register_package_manager(Arc::new(AptPackageManager::apt_mark()));
        registry.register_package_manager(Arc::new(AptitudePackageManager::new()));
        registry.register_package_manager(Arc::new(DpkgPackageManager::new()));
        registry.register_package_manager(Arc::new(ApkPackageManager::new()));
        registry.register_package_manager(Arc::new(DnfPackageManager::new()));
        registry.register_package_manager(Arc::new(YumPackageManager::new()));
        registry.register_package_manager(Arc::new(ZypperPackageManager::new()));
        registry.register_package_manager(Arc::new(PacmanPackageManager::new()));
        registry.register_package_manager(Arc::new(AurHelperPackageManager::yay()));
        registry.register_package_manager(Arc::new(AurHelperPackageManager::trizen()));
        registry.register_package_manager(Arc::new(PamacPackageManager::new()));
        registry.register_package_manager(Arc::new(XbpsPackageManager::new()));
        registry.register_package_manager(Arc::new(PkgPackageManager::new()));
        registry.register_package_manager(Arc::new(OpenBsdPackageManager::pkg_add()));
        registry.register_package_manager(Arc::new(OpenBsdPackageManager::pkg_delete()));
        registry.register_package_manager(Arc::new(OpenBsdPackageManager::pkg_info()));
        registry.register_package_manager(Arc::new(PkginPackageManager::new()));
        registry.register_package_manager(Arc::new(SlackpkgPackageManager::new()));
        registry.register_package_manager(Arc::new(QiPackageManager::new()));
        registry.register_package_manager(Arc::new(GuixPackageManager::new()));
        registry.register_package_manager(Arc::new(BrewPackageManager::new()));

        registry.register_service_manager(Arc::new(SystemdServiceManager::new()));
        registry.register_service_manager(Arc::new(OpenRcServiceManager::new()));
        registry.register_service_manager(Arc::new(RunitServiceManager::new()));
        registry.register_service_manager(Arc::new(S6ServiceManager::new()));
        registry.register_service_manager(Arc::new(DinitServiceManager::new()));
        registry.register_service_manager(Arc::new(LaunchdServiceManager::new()));
        registry.register_service_manager(Arc::new(SysvinitServiceManager::new()));

        registry
    }

    pub fn register_package_manager(&mut self, adapter: Arc<dyn PackageManager>) {
        self.package_managers.insert(adapter.kind(), adapter);
    }

    pub fn register_service_manager(&mut self, adapter: Arc<dyn ServiceManager>) {
        self.service_managers.insert(adapter.kind(), adapter);
    }

    pub fn package_manager(
        &self,
        kind: PackageManagerKind,
    ) -> Result<Arc<dyn PackageManager>, ManagerError> {
        self.package_managers
            .get(&kind)
            .cloned()
            .ok_or(ManagerError::UnsupportedTool {
                tool: ToolIdentity::PackageManager(kind),
            })
    }

    pub fn service_manager(
        &self,
        kind: InitSystemKind,
    ) -> Result<Arc<dyn ServiceManager>, ManagerError> {
        self.service_managers
            .get(&kind)
            .cloned()
            .ok_or(ManagerError::UnsupportedTool {
                tool: ToolIdentity::InitSystem(kind),
            })
    }

    pub fn get(&self, identity: ToolIdentity) -> Result<Adapter, ManagerError> {
        match identity {
            ToolIdentity::PackageManager(kind) => self.package_manager(kind).map(Adapter::Package),
            ToolIdentity::InitSystem(kind) => self.service_manager(kind).map(Adapter::Service),
        }
    }

    pub fn is_registered(&self, identity: ToolIdentity) -> bool {
        match identity {
            ToolIdentity::PackageManager(kind) => self.package_managers.contains_key(&kind),
            ToolIdentity::InitSystem(kind) => self.service_managers.contains_key(&kind),
        }
    }

    /// Argument vector for `operation` on `identity`, without running anything
    pub fn build(
        &self,
        identity: ToolIdentity,
        operation: Operation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<Vec<String>, ManagerError> {
        match (self.get(identity)?, operation) {
            (Adapter::Package(adapter), Operation::Package(op)) => {
                adapter.command_line(op, target, flags)
            }
            (Adapter::Service(adapter), Operation::Service(op)) => {
                let name = target.ok_or(ManagerError::MissingTarget { operation })?;
                adapter.command_line(op, name, flags)
            }
            _ => Err(ManagerError::UnsupportedOperation {
                tool: identity,
                operation,
            }),
        }
    }

    pub fn classify(
        &self,
        identity: ToolIdentity,
        result: &ExecutionResult,
    ) -> Result<Outcome, ManagerError> {
        Ok(crate::modules::core::classify(
            identity,
            self.get(identity)?.outcome_patterns(),
            result,
        ))
    }

    /// Registered package managers, in declaration order
    pub fn package_manager_kinds(&self) -> Vec<PackageManagerKind> {
        PackageManagerKind::ALL
            .into_iter()
            .filter(|kind| self.package_managers.contains_key(kind))
            .collect()
    }

    /// Registered init systems, in declaration order
    pub fn init_system_kinds(&self) -> Vec<InitSystemKind> {
        InitSystemKind::ALL
            .into_iter()
            .filter(|kind| self.service_managers.contains_key(kind))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_default_adapters()
    }
}
