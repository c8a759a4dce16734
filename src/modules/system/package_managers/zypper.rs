//! zypper for openSUSE and SLES

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no provider of"),
    OutcomePattern::not_found("not found in package names"),
    OutcomePattern::not_found("not found").on_exit(104),
    OutcomePattern::already_satisfied("is already installed"),
    OutcomePattern::already_satisfied("nothing to do").on_exit(0),
    OutcomePattern::tool_error("system management is locked"),
    OutcomePattern::tool_error("repository is invalid"),
    OutcomePattern::permission_denied("root privileges are required"),
];

#[derive(Default)]
pub struct ZypperPackageManager;

impl ZypperPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for ZypperPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Zypper
    }

    // --non-interactive is a global option and must precede the subcommand
    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[AssumeYes("--non-interactive"), Word("install"), Target],
            PackageOperation::Remove => &[AssumeYes("--non-interactive"), Word("remove"), Target],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[AssumeYes("--non-interactive"), Word("refresh")],
            PackageOperation::Upgrade => &[AssumeYes("--non-interactive"), Word("update"), OptionalTarget],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => &[Word("search"), Word("--installed-only")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
