//! aptitude, the ncurses APT front-end

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("couldn't find any package"),
    OutcomePattern::not_found("unable to locate package"),
    OutcomePattern::already_satisfied("no packages will be installed, upgraded, or removed"),
    OutcomePattern::already_satisfied("is already installed at the requested version"),
    OutcomePattern::tool_error("could not get lock"),
    OutcomePattern::tool_error("dpkg was interrupted"),
];

#[derive(Default)]
pub struct AptitudePackageManager;

impl AptitudePackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for AptitudePackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Aptitude
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            PackageOperation::Install => &[Word("install"), AssumeYes("-y"), Target],
            PackageOperation::Remove => &[Word("remove"), AssumeYes("-y"), Target],
            PackageOperation::Purge => &[Word("purge"), AssumeYes("-y"), Target],
            PackageOperation::Update => &[Word("update")],
            PackageOperation::Upgrade => &[Word("safe-upgrade"), AssumeYes("-y"), OptionalTarget],
            PackageOperation::Query => &[Word("show"), Target],
            PackageOperation::List => &[Word("search"), Word("~i")],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
