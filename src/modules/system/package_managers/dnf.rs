//! DNF package manager for Fedora and RHEL 8+

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{AssumeYes, OptionalTarget, Target, Word},
};
use crate::modules::interface::{PackageManagerKind, PackageOperation};
use crate::modules::system::package_managers::PackageManager;

/// Shared with yum, which on current systems is a dnf symlink. yum 3 ends a
/// failed lookup with "Error: Nothing to do" and exit 1, so the not-found
/// entries come first and "nothing to do" only counts on a clean exit.
pub(crate) const RPM_PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("no match for argument"),
    OutcomePattern::not_found("unable to find a match"),
    OutcomePattern::not_found("no matching packages"),
    OutcomePattern::not_found("no package").on_exit(1),
    OutcomePattern::already_satisfied("is already installed"),
    OutcomePattern::already_satisfied("nothing to do").on_exit(0),
    OutcomePattern::tool_error("waiting for process with pid"),
    OutcomePattern::tool_error("holding the yum lock"),
    OutcomePattern::tool_error("failed to download metadata"),
    OutcomePattern::tool_error("cannot retrieve repository metadata"),
    OutcomePattern::permission_denied("this command has to be run with superuser privileges"),
];

#[derive(Default)]
pub struct DnfPackageManager;

impl DnfPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for DnfPackageManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Dnf
    }

    fn template(&self, operation: PackageOperation) -> Option<ArgvTemplate> {
        rpm_template(operation)
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        RPM_PATTERNS
    }
}

/// dnf and yum accept the same syntax for every unified operation
pub(crate) fn rpm_template(operation: PackageOperation) -> Option<ArgvTemplate> {
    let tokens: &'static [_] = match operation {
        PackageOperation::Install => &[Word("install"), AssumeYes("-y"), Target],
        PackageOperation::Remove => &[Word("remove"), AssumeYes("-y"), Target],
        // no purge: rpm removes configuration that was not modified
        PackageOperation::Purge => return None,
        PackageOperation::Update => &[Word("makecache")],
        PackageOperation::Upgrade => &[Word("upgrade"), AssumeYes("-y"), OptionalTarget],
        PackageOperation::Query => &[Word("info"), Target],
        PackageOperation::List => &[Word("list"), Word("--installed")],
    };
    Some(ArgvTemplate::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::core::{classify, ExecutionResult};
    use crate::modules::interface::Outcome;

    fn yum_result(code: i32, stdout: &str, stderr: &str) -> ExecutionResult {
        let argv = ["yum", "install", "-y", "nosuchpkg"].map(String::from).to_vec();
        ExecutionResult::exited(argv, code, stdout, stderr)
    }

    #[test]
    fn test_yum_missing_package_is_not_already_satisfied() {
        let result = yum_result(1, "No package nosuchpkg available.\n", "Error: Nothing to do\n");
        let outcome = classify(PackageManagerKind::Yum.into(), RPM_PATTERNS, &result);
        assert!(matches!(outcome, Outcome::NotFound(_)), "{outcome:?}");
    }

    #[test]
    fn test_nothing_to_do_on_clean_exit_is_satisfied() {
        let result = yum_result(0, "Dependencies resolved.\nNothing to do.\nComplete!\n", "");
        let outcome = classify(PackageManagerKind::Dnf.into(), RPM_PATTERNS, &result);
        assert_eq!(outcome, Outcome::AlreadySatisfied);
    }
}
