//! systemd via systemctl

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

// `status` copies journal lines to stdout, so the not-found wording is
// pinned to systemctl's own messages and exit codes
const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found(".service could not be found").on_exit(4),
    OutcomePattern::not_found(".service not found").on_exit(5),
    OutcomePattern::not_found(".service not loaded").on_exit(5),
    OutcomePattern::not_found("unit: unit file"),
    OutcomePattern::not_found("failed to get unit file state"),
    OutcomePattern::permission_denied("interactive authentication required"),
    OutcomePattern::tool_error("failed to connect to bus"),
    OutcomePattern::tool_error("job for"),
];

pub struct SystemdServiceManager;

impl Default for SystemdServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemdServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for SystemdServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::Systemd
    }

    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            ServiceOperation::Status => &[Word("status"), Target],
            ServiceOperation::Start => &[Word("start"), Target],
            ServiceOperation::Stop => &[Word("stop"), Target],
            ServiceOperation::Restart => &[Word("restart"), Target],
            ServiceOperation::Reload => &[Word("reload"), Target],
            ServiceOperation::Enable => &[Word("enable"), Target],
            ServiceOperation::Disable => &[Word("disable"), Target],
            ServiceOperation::IsEnabled => &[Word("is-enabled"), Target],
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
