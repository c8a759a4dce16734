//! pkgin, the binary front-end for pkgsrc (NetBSD, illumos, macOS)

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no such package"),
    OutcomePattern::not_found("is not available"),
    OutcomePattern::already_satisfied("is already installed"),
    OutcomePattern::already_satisfied("nothing to do").on_exit(0),
    OutcomePattern::tool_error("database is locked"),
    OutcomePattern::permission_denied("you don't have enough rights"),
];

#[derive(Default)]
pub struct PkginPackageManager;

impl PkginPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for PkginPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pkgin
    }

    // -y is a global option and precedes the subcommand
    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[AssumeYes("-y"), Word("install"), Target],
            PackageOperation::Remove => &[AssumeYes("-y"), Word("remove"), Target],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[Word("update")],
            PackageOperation::Upgrade => &[AssumeYes("-y"), Word("full-upgrade")],
            PackageOperation::Query => &[Word("pkg-descr"), Target],
            PackageOperation::List => &[Word("list")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
