//! YUM package manager for RHEL/CentOS 7 and derivatives

use crate::modules::core::{ArgvTemplate, OutcomePattern};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::{
    dnf::{rpm_template, RPM_PATTERNS},
    PackageManager,
};

#[derive(Default)]
pub struct YumPackageManager;

impl YumPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for YumPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Yum
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        rpm_template(operation)
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        RPM_PATTERNS
    }
}
