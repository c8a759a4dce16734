use serde_json::json;

use crate::modules::core::CommandReport;
use crate::modules::error::ManagerError;
use crate::modules::interface::Outcome;
use crate::modules::system::detection::HostProfile;

pub const EXIT_OK: i32 = 0;
pub const EXIT_STRUCTURAL: i32 = 1;
pub const EXIT_NOT_FOUND: i32 = 2;
pub const EXIT_PERMISSION_DENIED: i32 = 3;
pub const EXIT_TOOL_ERROR: i32 = 4;
pub const EXIT_RUNNER_FAILURE: i32 = 5;
pub const EXIT_RUNNER_TIMEOUT: i32 = 6;

pub fn outcome_exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Success | Outcome::AlreadySatisfied => EXIT_OK,
        Outcome::NotFound(_) => EXIT_NOT_FOUND,
        Outcome::PermissionDenied(_) => EXIT_PERMISSION_DENIED,
        Outcome::ToolError(_) => EXIT_TOOL_ERROR,
        Outcome::RunnerFailure(_) => EXIT_RUNNER_FAILURE,
        Outcome::RunnerTimeout(_) => EXIT_RUNNER_TIMEOUT,
    }
}

/// Strict-mode errors keep the exit code of the outcome they came from
pub fn error_exit_code(error: &ManagerError) -> i32 {
    match error {
        ManagerError::NotFound(_) => EXIT_NOT_FOUND,
        ManagerError::PermissionDenied(_) => EXIT_PERMISSION_DENIED,
        ManagerError::ToolError(_) => EXIT_TOOL_ERROR,
        ManagerError::RunnerFailure(_) => EXIT_RUNNER_FAILURE,
        ManagerError::RunnerTimeout(_) => EXIT_RUNNER_TIMEOUT,
        _ => EXIT_STRUCTURAL,
    }
}

/// Print one operation's result. `show_stdout` is set for operations whose
/// answer is the tool's own output (query, list, native).
pub fn print_report(
    subject: Option<&str>,
    report: &CommandReport,
    show_stdout: bool,
    as_json: bool,
) {
    if as_json {
        let stdout = show_stdout.then(|| report.stdout());
        println!(
            "{}",
            json!({ "target": subject, "result": report.outcome, "stdout": stdout })
        );
        return;
    }

    let outcome = &report.outcome;
    if outcome.is_satisfied() {
        if show_stdout {
            print_listing(report.stdout());
        } else {
            match subject {
                Some(subject) => println!("{subject}: {}", outcome.label()),
                None => println!("{}", outcome.label()),
            }
        }
        return;
    }

    print_listing(report.stdout());
    match subject {
        Some(subject) => eprintln!("{subject}: {outcome}"),
        None => eprintln!("{outcome}"),
    }
}

/// Print the tool's own stdout unchanged apart from trailing whitespace
pub fn print_listing(stdout: &str) {
    let text = stdout.trim_end();
    if !text.is_empty() {
        println!("{text}");
    }
}

pub fn print_command_line(subject: Option<&str>, argv: &[String], as_json: bool) {
    if as_json {
        println!("{}", json!({ "target": subject, "argv": argv }));
    } else {
        println!("{}", shell_words::join(argv));
    }
}

pub fn print_profile(profile: &HostProfile, as_json: bool) {
    if as_json {
        println!("{}", json!(profile));
        return;
    }

    let or_none = |value: Option<&str>| value.unwrap_or("none").to_string();
    println!(
        "package manager: {}",
        or_none(profile.package_manager.map(|k| k.name()))
    );
    println!("init system:     {}", or_none(profile.init_system.map(|k| k.name())));
    println!("distribution:    {}", or_none(profile.distribution.as_deref()));
    println!("family:          {}", or_none(profile.family.map(|f| f.name())));
}

pub fn print_error(subject: Option<&str>, error: &ManagerError, as_json: bool) {
    if as_json {
        println!(
            "{}",
            json!({ "target": subject, "error": error.to_string(), "exit_code": error_exit_code(error) })
        );
        return;
    }
    match subject {
        Some(subject) => eprintln!("{subject}: error: {error}"),
        None => eprintln!("error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::core::ExitState;
    use crate::modules::interface::{FailureDetail, PackageManagerKind};

    #[test]
    fn test_satisfied_outcomes_exit_zero() {
        assert_eq!(outcome_exit_code(&Outcome::Success), 0);
        assert_eq!(outcome_exit_code(&Outcome::AlreadySatisfied), 0);
    }

    #[test]
    fn test_structural_errors_exit_one() {
        assert_eq!(error_exit_code(&ManagerError::NoPackageManagerDetected), 1);
        assert_eq!(
            error_exit_code(&ManagerError::UnknownTool {
                name: "nix".to_string()
            }),
            EXIT_STRUCTURAL
        );
    }

    #[test]
    fn test_strict_errors_keep_outcome_codes() {
        let detail = FailureDetail {
            tool: PackageManagerKind::Apt.into(),
            argv: vec!["apt".to_string(), "install".to_string()],
            exit: Some(ExitState::Exited(100)),
            stdout: String::new(),
            stderr: "E: Unable to locate package nope".to_string(),
            reason: Some("unable to locate package".to_string()),
        };
        let outcome = Outcome::NotFound(detail);
        let error = outcome.clone().into_strict().unwrap_err();
        assert_eq!(error_exit_code(&error), outcome_exit_code(&outcome));
        assert_eq!(error_exit_code(&error), EXIT_NOT_FOUND);
    }
}
