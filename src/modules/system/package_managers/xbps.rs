//! XBPS for Void Linux. One tool family, three binaries.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("not found in repository pool"),
    OutcomePattern::not_found("package not found"),
    OutcomePattern::not_found("not currently installed"),
    OutcomePattern::already_satisfied("already installed"),
    OutcomePattern::already_satisfied("is already up to date"),
    OutcomePattern::tool_error("failed to lock the pkgdb"),
    OutcomePattern::tool_error("failed to fetch"),
];

#[derive(Default)]
pub struct XbpsPackageManager;

impl XbpsPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for XbpsPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Xbps
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let template = match operation {
            PackageOperation::Install => {
                ArgvTemplate::with_program("xbps-install", &[AssumeYes("-y"), Target])
            }
            PackageOperation::Remove => {
                ArgvTemplate::with_program("xbps-remove", &[AssumeYes("-y"), Target])
            }
            PackageOperation::Purge => return None,
            PackageOperation::Update => ArgvTemplate::with_program("xbps-install", &[Word("-S")]),
            PackageOperation::Upgrade => ArgvTemplate::with_program(
                "xbps-install",
                &[Word("-Su"), AssumeYes("-y"), OptionalTarget],
            ),
            PackageOperation::Query => ArgvTemplate::with_program("xbps-query", &[Word("-S"), Target]),
            PackageOperation::List => ArgvTemplate::with_program("xbps-query", &[Word("-l")]),
        };
        Some(template)
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
    fn test_each_operation_picks_its_binary() {
        let xbps = XbpsPackageManager::new();
        let flags = Flags::default();

        assert_eq!(
            xbps.command_line(PackageOperation::Install, Some("git"), &flags).unwrap(),
            vec!["xbps-install", "-y", "git"]
        );
        assert_eq!(
            xbps.command_line(PackageOperation::Remove, Some("git"), &flags).unwrap(),
            vec!["xbps-remove", "-y", "git"]
        );
        assert_eq!(
            xbps.command_line(PackageOperation::List, None, &flags).unwrap(),
            vec!["xbps-query", "-l"]
        );
    }
}
