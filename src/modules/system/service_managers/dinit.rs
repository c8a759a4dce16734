//! dinit via dinitctl

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("service description not found"),
    OutcomePattern::not_found("could not find service description"),
    OutcomePattern::not_found("failed to find service description"),
    OutcomePattern::already_satisfied("(already) started"),
    OutcomePattern::already_satisfied("(already) stopped"),
    OutcomePattern::already_satisfied("already started"),
    OutcomePattern::already_satisfied("already enabled"),
    OutcomePattern::tool_error("unable to connect to socket"),
];

#[derive(Default)]
pub struct DinitServiceManager;

impl DinitServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for DinitServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::Dinit
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
            ServiceOperation::IsEnabled => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
