//! OpenRC via rc-service and rc-update

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("does not exist"),
    OutcomePattern::already_satisfied("already started"),
    OutcomePattern::already_satisfied("has already been started"),
    OutcomePattern::already_satisfied("is already stopped"),
    OutcomePattern::already_satisfied("already installed in runlevel"),
    OutcomePattern::already_satisfied("is not in the runlevel"),
    OutcomePattern::tool_error("has started, but is inactive"),
];

#[derive(Default)]
pub struct OpenRcServiceManager;

impl OpenRcServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for OpenRcServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::OpenRc
    }

    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let template = match operation {
            ServiceOperation::Status => ArgvTemplate::new(&[Target, Word("status")]),
            ServiceOperation::Start => ArgvTemplate::new(&[Target, Word("start")]),
            ServiceOperation::Stop => ArgvTemplate::new(&[Target, Word("stop")]),
            ServiceOperation::Restart => ArgvTemplate::new(&[Target, Word("restart")]),
            ServiceOperation::Reload => ArgvTemplate::new(&[Target, Word("reload")]),
            ServiceOperation::Enable => ArgvTemplate::with_program("rc-update", &[Word("add"), Target]),
            ServiceOperation::Disable => ArgvTemplate::with_program("rc-update", &[Word("del"), Target]),
            ServiceOperation::IsEnabled => return None,
        };
        Some(template)
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
