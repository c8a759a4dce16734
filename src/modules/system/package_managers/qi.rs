//! qi, Dragora's package manager. Works on package files only.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no such file or directory"),
    OutcomePattern::not_found("is not installed"),
    OutcomePattern::already_satisfied("already installed"),
];

#[derive(Default)]
pub struct QiPackageManager;

impl QiPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for QiPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Qi
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), Target],
            PackageOperation::Remove => &[Word("remove"), Target],
            // upgrades name the new package file, so a target is required
            PackageOperation::Upgrade => &[Word("upgrade"), Target],
            PackageOperation::Purge
            | PackageOperation::Update
            | PackageOperation::Query
            | PackageOperation::List => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
