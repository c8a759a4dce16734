//! OpenBSD pkg_* tools
//!
//! `pkg_add` is registered as the family entry point and reaches
//! `pkg_delete`/`pkg_info` for removal and queries. The latter two are also
//! registered on their own with just the operations they perform.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("can't find"),
    OutcomePattern::not_found("not installed"),
    OutcomePattern::already_satisfied("is already installed"),
    OutcomePattern::tool_error("waiting for lock"),
    OutcomePattern::tool_error("signature check failed"),
];

const INSTALL: ArgvTemplate = ArgvTemplate::with_program("pkg_add", &[Target]);
const UPGRADE: ArgvTemplate = ArgvTemplate::with_program("pkg_add", &[Word("-u"), OptionalTarget]);
const REMOVE: ArgvTemplate = ArgvTemplate::with_program("pkg_delete", &[Target]);
const PURGE: ArgvTemplate = ArgvTemplate::with_program("pkg_delete", &[Word("-c"), Target]);
const QUERY: ArgvTemplate = ArgvTemplate::with_program("pkg_info", &[Target]);
const LIST: ArgvTemplate = ArgvTemplate::with_program("pkg_info", &[]);

pub struct OpenBsdPackageManager {
    kind: PackageManagerKind,
}

impl OpenBsdPackageManager {
    pub fn pkg_add() -> Self {
        Self {
            kind: PackageManagerKind::PkgAdd,
        }
    }

    pub fn pkg_delete() -> Self {
        Self {
            kind: PackageManagerKind::PkgDelete,
        }
    }

    pub fn pkg_info() -> Self {
        Self {
            kind: PackageManagerKind::PkgInfo,
        }
    }
}

impl PackageManager for OpenBsdPackageManager {
    fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        use PackageOperation::*;

        match (self.kind, operation) {
            (PackageManagerKind::PkgAdd, Install) => Some(INSTALL),
            (PackageManagerKind::PkgAdd, Upgrade) => Some(UPGRADE),
            (PackageManagerKind::PkgAdd | PackageManagerKind::PkgDelete, Remove) => Some(REMOVE),
            (PackageManagerKind::PkgAdd | PackageManagerKind::PkgDelete, Purge) => Some(PURGE),
            (PackageManagerKind::PkgAdd | PackageManagerKind::PkgInfo, Query) => Some(QUERY),
            (PackageManagerKind::PkgAdd | PackageManagerKind::PkgInfo, List) => Some(LIST),
            _ => None,
        }
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
