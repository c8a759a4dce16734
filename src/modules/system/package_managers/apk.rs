//! apk-tools for Alpine Linux

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unable to select packages"),
    OutcomePattern::not_found("no such package"),
    OutcomePattern::tool_error("unable to lock database"),
    OutcomePattern::tool_error("temporary error (try again later)"),
    OutcomePattern::tool_error("untrusted signature"),
];

#[derive(Default)]
pub struct ApkPackageManager;

impl ApkPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for ApkPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Apk
    }

    // apk never prompts, so there is no assume-yes switch
    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("add"), Target],
            PackageOperation::Remove => &[Word("del"), Target],
            PackageOperation::Purge => &[Word("del"), Word("--purge"), Target],
            PackageOperation::Update => &[Word("update")],
            PackageOperation::Upgrade => &[Word("upgrade"), OptionalTarget],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => &[Word("list"), Word("--installed")],
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
    fn test_purge_keeps_subcommand_before_flag() {
        let argv = ApkPackageManager::new()
            .command_line(PackageOperation::Purge, Some("nginx"), &Flags::default())
            .unwrap();
        assert_eq!(argv, vec!["apk", "del", "--purge", "nginx"]);
    }
}
