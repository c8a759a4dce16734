//! SysV init scripts via service(8) and update-rc.d

use crate::modules::core::{
    ArgvTemplate,
    OutcomePattern,
    Token::{Target, Word},
};
use crate::modules::interface::{InitSystemKind, ServiceOperation};
use crate::modules::system::service_managers::ServiceManager;

const PATTERNS: &[OutcomePattern] = &[
    OutcomePattern::not_found("unrecognized service"),
    OutcomePattern::not_found("no such file or directory"),
    OutcomePattern::not_found("does not exist"),
];

pub struct SysvinitServiceManager;

impl Default for SysvinitServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SysvinitServiceManager {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceManager for SysvinitServiceManager {
    fn kind(&self) -> InitSystemKind {
        InitSystemKind::Sysvinit
    }

    fn template(&self, operation: ServiceOperation) -> Option<ArgvTemplate> {
        let template = match operation {
            ServiceOperation::Status => ArgvTemplate::new(&[Target, Word("status")]),
            ServiceOperation::Start => ArgvTemplate::new(&[Target, Word("start")]),
            ServiceOperation::Stop => ArgvTemplate::new(&[Target, Word("stop")]),
            ServiceOperation::Restart => ArgvTemplate::new(&[Target, Word("restart")]),
            ServiceOperation::Reload => ArgvTemplate::new(&[Target, Word("reload")]),
            ServiceOperation::Enable => {
                ArgvTemplate::with_program("update-rc.d", &[Target, Word("enable")])
            }
            ServiceOperation::Disable => {
                ArgvTemplate::with_program("update-rc.d", &[Target, Word("disable")])
            }
            // init scripts have no standard way to report this
            ServiceOperation::IsEnabled => return None,
        };
        Some(template)
    }

    fn outcome_patterns(&self) -> &'static [OutcomePattern] {
        PATTERNS
    }
}
