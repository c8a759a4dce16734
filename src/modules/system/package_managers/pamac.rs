//! pamac, Manjaro's package manager

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("target not found"),
    OutcomePattern::not_found("no package found"),
    OutcomePattern::already_satisfied("nothing to do").on_exit(0),
    OutcomePattern::tool_error("unable to lock database"),
];

#[derive(Default)]
pub struct PamacPackageManager;

impl PamacPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for PamacPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pamac
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), AssumeYes("--no-confirm"), Target],
            PackageOperation::Remove => &[Word("remove"), AssumeYes("--no-confirm"), Target],
            PackageOperation::Purge => &[
                Word("remove"),
                Word("--no-save"),
                AssumeYes("--no-confirm"),
                Target,
            ],
            // pamac refreshes databases as part of every transaction
            PackageOperation::Update => return None,
            PackageOperation::Upgrade => &[Word("upgrade"), AssumeYes("--no-confirm"), OptionalTarget],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => &[Word("list"), Word("--installed")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
