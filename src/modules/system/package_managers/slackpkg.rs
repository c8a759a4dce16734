//! slackpkg for Slackware

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::already_satisfied("no packages match the pattern for install"),
    OutcomePattern::already_satisfied("no packages match the pattern for upgrade"),
    OutcomePattern::already_satisfied("no new updates available"),
    OutcomePattern::not_found("no packages match the pattern"),
    OutcomePattern::not_found("no package available"),
    OutcomePattern::tool_error("another instance of slackpkg is running"),
    OutcomePattern::tool_error("no mirror selected"),
];

#[derive(Default)]
pub struct SlackpkgPackageManager;

impl SlackpkgPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for SlackpkgPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Slackpkg
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[
                AssumeYes("-batch=on"),
                AssumeYes("-default_answer=y"),
                Word("install"),
                Target,
            ],
            PackageOperation::Remove => &[
                AssumeYes("-batch=on"),
                AssumeYes("-default_answer=y"),
                Word("remove"),
                Target,
            ],
            PackageOperation::Purge => return None,
            PackageOperation::Update => &[AssumeYes("-batch=on"), Word("update")],
            PackageOperation::Upgrade => &[
                AssumeYes("-batch=on"),
                AssumeYes("-default_answer=y"),
                Word("upgrade-all"),
            ],
            PackageOperation::Query => &[Word("info"), Target],
            PackageOperation::List => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
