//! AUR helpers that accept pacman's own syntax

use crate::modules::core::{ArgvTemplate, OutcomePattern};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::{
    pacman::{pacman_template, PACMAN_PATTERNS},
    PackageManager,
};

/// yay or trizen
pub struct AurHelperPackageManager {
    kind: PackageManagerKind,
}

impl AurHelperPackageManager {
    pub fn yay() -> Self {
        Self {
            kind: PackageManagerKind::Yay,
        }
    }

    pub fn trizen() -> Self {
        Self {
            kind: PackageManagerKind::Trizen,
        }
    }
}

impl PackageManager for AurHelperPackageManager {
    fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        Some(pacman_template(operation))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PACMAN_PATTERNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::interface::Flags;

    #[test]
    fn test_helpers_use_their_own_binary() {
        let flags = Flags::default();
        let yay = AurHelperPackageManager::yay()
            .command_line(PackageOperation::Remove, Some("paru"), &flags)
            .unwrap();
        let trizen = AurHelperPackageManager::trizen()
            .command_line(PackageOperation::Remove, Some("paru"), &flags)
            .unwrap();

        assert_eq!(yay, vec!["yay", "-R", "--noconfirm", "paru"]);
        assert_eq!(trizen, vec!["trizen", "-R", "--noconfirm", "paru"]);
    }
}
