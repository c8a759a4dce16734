//! runit via sv

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unable to change to service directory"),
    OutcomePattern::tool_error("supervise not running"),
    OutcomePattern::tool_error("timeout:"),
];

#[derive(Default)]
pub struct RunitServiceManager;

impl RunitServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for RunitServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::Runit
    }

    // enabling a runit service means linking its directory, which sv cannot do
    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            ServiceOperation::Status => &[Word("status"), Target],
            ServiceOperation::Start => &[Word("start"), Target],
            ServiceOperation::Stop => &[Word("stop"), Target],
            ServiceOperation::Restart => &[Word("restart"), Target],
            ServiceOperation::Reload => &[Word("reload"), Target],
            ServiceOperation::Enable | ServiceOperation::Disable | ServiceOperation::IsEnabled => {
                return None
            }
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
