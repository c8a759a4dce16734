//! launchd via launchctl on macOS
//!
//! Services are addressed by label. Domain-scoped subcommands use the
//! `system/` domain, since the engine acts on system daemons.

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{PrefixedTarget, Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("could not find service"),
    OutcomePattern::not_found("no such process"),
    OutcomePattern::permission_denied("operation not permitted while system integrity protection"),
];

pub struct LaunchdServiceManager;

impl Default for LaunchdServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchdServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for LaunchdServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::Launchd
    }

    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            ServiceOperation::Status => &[Word("list"), Target],
            ServiceOperation::Start => &[Word("start"), Target],
            ServiceOperation::Stop => &[Word("stop"), Target],
            ServiceOperation::Restart => &[Word("kickstart"), Word("-k"), PrefixedTarget("system/")],
            ServiceOperation::Enable => &[Word("enable"), PrefixedTarget("system/")],
            ServiceOperation::Disable => &[Word("disable"), PrefixedTarget("system/")],
            ServiceOperation::Reload | ServiceOperation::IsEnabled => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::interface::Flags;

    #[test]
    fn test_domain_prefixed_operations() {
        let launchd = LaunchdServiceManager::new();
        let flags = Flags::default();
        assert_eq!(
            launchd.command_line(ServiceOperation::Enable, "com.example.api", &flags).unwrap(),
            vec!["launchctl", "enable", "system/com.example.api"]
        );
        assert_eq!(
            launchd.command_line(ServiceOperation::Status, "com.example.api", &flags).unwrap(),
            vec!["launchctl", "list", "com.example.api"]
        );
    }
}
