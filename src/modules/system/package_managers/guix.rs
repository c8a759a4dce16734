//! GNU Guix, per-profile functional package management

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unknown package"),
    OutcomePattern::not_found("package not found"),
    OutcomePattern::not_found("not in profile"),
    OutcomePattern::already_satisfied("nothing to be done"),
    OutcomePattern::tool_error("failed to connect to"),
];

#[derive(Default)]
pub struct GuixPackageManager;

impl GuixPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for GuixPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Guix
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), Target],
            PackageOperation::Remove => &[Word("remove"), Target],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[Word("pull")],
            PackageOperation::Upgrade => &[Word("upgrade"), OptionalTarget],
            PackageOperation::Query => &[Word("show"), Target],
            PackageOperation::List => &[Word("package"), Word("--list-installed")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
