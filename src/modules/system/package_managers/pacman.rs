//! pacman for Arch Linux and derivatives

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

/// Also printed by the AUR helpers, which wrap pacman
pub(crate) const PACMAN_PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("target not found"),
    OutcomePattern::not_found("was not found"),
    OutcomePattern::already_satisfied("there is nothing to do").on_exit(0),
    OutcomePattern::already_satisfied("is up to date -- skipping"),
    OutcomePattern::tool_error("unable to lock database"),
    OutcomePattern::tool_error("failed to synchronize"),
    OutcomePattern::tool_error("invalid or corrupted package"),
    OutcomePattern::permission_denied("you cannot perform this operation unless you are root"),
];

/// pacman syntax, shared with yay and trizen
pub(crate) fn pacman_template(operation: PackageOperation) -> ArgvTemplate {
    let tokens: &'static [_] = match operation {
        PackageOperation::Install => &[Word("-S"), AssumeYes("--noconfirm"), Word("--needed"), Target],
        PackageOperation::Remove => &[Word("-R"), AssumeYes("--noconfirm"), Target],
        PackageOperation::Purge => &[Word("-Rns"), AssumeYes("--noconfirm"), Target],
        PackageOperation::Update => &[Word("-Sy")],
        PackageOperation::Upgrade => &[Word("-Syu"), AssumeYes("--noconfirm"), OptionalTarget],
        PackageOperation::Query => &[Word("-Qi"), Target],
        PackageOperation::List => &[Word("-Q")],
    };
    ArgvTemplate::new(tokens)
}

#[derive(Default)]
pub struct PacmanPackageManager;

impl PacmanPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for PacmanPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pacman
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        Some(pacman_template(operation))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PACMAN_PATTERNS
    }
}
