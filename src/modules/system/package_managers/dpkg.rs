//! dpkg, the low-level Debian package tool. Operates on local `.deb` files
//! and the installed-package database only.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("is not installed and no information is available"),
    OutcomePattern::not_found("cannot access archive"),
    OutcomePattern::already_satisfied("is not installed, so not removed"),
    OutcomePattern::already_satisfied("ignoring request to remove"),
    OutcomePattern::tool_error("dpkg frontend lock"),
    OutcomePattern::tool_error("dpkg was interrupted"),
];

#[derive(Default)]
pub struct DpkgPackageManager;

impl DpkgPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for DpkgPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Dpkg
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("--install"), Target],
            PackageOperation::Remove => &[Word("--remove"), Target],
            PackageOperation::Purge => &[Word("--purge"), Target],
            PackageOperation::Query => &[Word("--status"), Target],
            PackageOperation::List => &[Word("--list")],
            PackageOperation::Update | PackageOperation::Upgrade => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
