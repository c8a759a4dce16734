//! Argument validation for caller-supplied targets and extra arguments

use once_cell::sync::Lazy;
use regex::Regex;

use crate::modules::error::ManagerError;

static SAFE_ARGUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w@.+:/=~-]+$").expect("safe argument pattern is valid"));

/// Validate a package or service name. Names may not look like options.
pub fn validate_target(target: &str) -> Result<(), ManagerError> {
    validate_argument(target)?;
    if target.starts_with('-') {
        return Err(ManagerError::InvalidTarget {
            value: target.to_string(),
            reason: "targets must not start with '-'".to_string(),
        });
    }
    Ok(())
}

/// Validate a caller-supplied extra argument or native subcommand argument
pub fn validate_argument(arg: &str) -> Result<(), ManagerError> {
    if arg.is_empty() {
        return Err(ManagerError::InvalidTarget {
            value: String::new(),
            reason: "empty argument".to_string(),
        });
    }
    if !SAFE_ARGUMENT.is_match(arg) {
        return Err(ManagerError::InvalidTarget {
            value: arg.to_string(),
            reason: "only letters, digits and @ . + : / = ~ - _ are allowed".to_string(),
        });
    }
    Ok(())
}
