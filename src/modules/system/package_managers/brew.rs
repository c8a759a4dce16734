//! Homebrew for macOS and Linux

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no available formula"),
    OutcomePattern::not_found("no formulae or casks found"),
    OutcomePattern::not_found("no such keg"),
    OutcomePattern::not_found("is not installed"),
    OutcomePattern::already_satisfied("is already installed"),
    OutcomePattern::already_satisfied("already installed and up-to-date"),
    OutcomePattern::tool_error("has already locked"),
    OutcomePattern::permission_denied("running homebrew as root is extremely dangerous"),
];

pub struct BrewPackageManager;

impl Default for BrewPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BrewPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for BrewPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Homebrew
    }

    // brew never prompts
    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), Target],
            PackageOperation::Remove => &[Word("uninstall"), Target],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[Word("update")],
            PackageOperation::Upgrade => &[Word("upgrade"), OptionalTarget],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => &[Word("list")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::interface::Flags;

    #[test]
    fn test_brew_remove_is_uninstall() {
        let argv = BrewPackageManager::new()
            .command_line(PackageOperation::Remove, Some("wget"), &Flags::default())
            .unwrap();
        assert_eq!(argv, vec!["brew", "uninstall", "wget"]);
    }
}
