//! pkg(8) for FreeBSD and DragonFly BSD

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no packages available to install matching"),
    OutcomePattern::not_found("no package(s) matching"),
    OutcomePattern::not_found("no packages matching"),
    OutcomePattern::already_satisfied("already installed"),
    OutcomePattern::already_satisfied("your packages are up to date"),
    OutcomePattern::tool_error("cannot get an exclusive lock"),
    OutcomePattern::tool_error("unable to update repository"),
    OutcomePattern::permission_denied("insufficient privileges"),
];

pub struct PkgPackageManager;

impl Default for PkgPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PkgPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for PkgPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pkg
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), AssumeYes("-y"), Target],
            PackageOperation::Remove => &[Word("delete"), AssumeYes("-y"), Target],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[Word("update")],
            PackageOperation::Upgrade => &[Word("upgrade"), AssumeYes("-y"), OptionalTarget],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => &[Word("info")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
