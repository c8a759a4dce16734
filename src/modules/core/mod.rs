//! Command execution, classification and argument validation

pub mod argv;
pub mod classifier;
pub mod command;
pub mod dispatch;
pub mod validation;

pub use argv::{ArgvTemplate, Token};
pub use classifier::{classify, ExitMatch, OutcomePattern, PatternKind, COMMON_PATTERNS};
pub use command::{CommandRunner, ExecutionResult, ExitState, SystemCommandRunner};
pub use dispatch::{run_classified, CommandReport};
pub use validation::{validate_argument, validate_target};
