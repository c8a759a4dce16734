//! APT front-ends for Debian/Ubuntu systems
//!
//! `apt`, `apt-get`, `apt-cache` and `apt-mark` share one adapter; they print
//! the same messages and differ only in which operations they carry.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

pub(crate) const APT_PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unable to locate package"),
    OutcomePattern::not_found("has no installation candidate"),
    OutcomePattern::not_found("no packages found"),
    OutcomePattern::already_satisfied("is already the newest version"),
    OutcomePattern::already_satisfied("is not installed, so not removed"),
    OutcomePattern::tool_error("could not get lock"),
    OutcomePattern::tool_error("dpkg was interrupted"),
    OutcomePattern::tool_error("temporary failure resolving"),
];

pub struct AptPackageManager {
    kind: PackageManagerKind,
}

impl Default for AptPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AptPackageManager {
    pub fn new() -> Self {
        Self {
            kind: PackageManagerKind::Apt,
        }
    }

    pub fn apt_get() -> Self {
        Self {
            kind: PackageManagerKind::AptGet,
        }
    }

    pub fn apt_cache() -> Self {
        Self {
            kind: PackageManagerKind::AptCache,
        }
    }

    pub fn apt_mark() -> Self {
        Self {
            kind: PackageManagerKind::AptMark,
        }
    }
}

impl PackageManager for AptPackageManager {
    fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        use PackageOperation::*;

        let tokens: &'static [_] = match (self.kind, operation) {
            (PackageManagerKind::Apt | PackageManagerKind::AptGet, Install) => {
                &[Word("install"), AssumeYes("-y"), Target]
            }
            (PackageManagerKind::Apt | PackageManagerKind::AptGet, Remove) => {
                &[Word("remove"), AssumeYes("-y"), Target]
            }
            (PackageManagerKind::Apt | PackageManagerKind::AptGet, Purge) => {
                &[Word("purge"), AssumeYes("-y"), Target]
            }
            (PackageManagerKind::Apt | PackageManagerKind::AptGet, Update) => &[Word("update")],
            (PackageManagerKind::Apt, Upgrade) => &[Word("upgrade"), AssumeYes("-y"), OptionalTarget],
            // apt-get upgrade ignores package arguments, so no target slot
            (PackageManagerKind::AptGet, Upgrade) => &[Word("upgrade"), AssumeYes("-y")],
            (PackageManagerKind::Apt, Query) => &[Word("show"), Target],
            (PackageManagerKind::Apt, List) => &[Word("list"), Word("--installed")],
            (PackageManagerKind::AptCache, Query) => &[Word("show"), Target],
            (PackageManagerKind::AptCache, List) => &[Word("pkgnames")],
            (PackageManagerKind::AptMark, List) => &[Word("showmanual")],
            _ => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        APT_PATTERNS
    }
}
