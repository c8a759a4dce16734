//! s6 via s6-rc

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unknown service name"),
    OutcomePattern::tool_error("unable to take lock"),
];

#[derive(Default)]
pub struct S6ServiceManager;

impl S6ServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for S6ServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::S6
    }

    // s6-rc only changes the live state; everything else belongs to the
    // compiled service database
    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let tokens: &'static [_] = match operation {
            ServiceOperation::Start => &[Word("start"), Target],
            ServiceOperation::Stop => &[Word("stop"), Target],
            _ => return None,
        };
        Some(ArgvTemplate::new(tokens))
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
