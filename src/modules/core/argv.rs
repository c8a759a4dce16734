//! Declarative argument vector templates
//!
//! Adapters describe each supported operation as a fixed list of tokens.
//! Rendering a template is the only place a caller's target or extra
//! arguments enter an argument vector.

use crate::modules::core::validation::{validate_argument, validate_target};
use crate::modules::error::ManagerError;
use crate::modules::interface::{Flags, Operation, ToolIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Literal word, always emitted
    Word(&'static str),
    /// Non-interactive switch, emitted only when `Flags::assume_yes` is set
    AssumeYes(&'static str),
    /// Required target
    Target,
    /// Target the operation may be narrowed to
    OptionalTarget,
    /// Required target joined onto a fixed prefix, e.g. `system/nginx`
    PrefixedTarget(&'static str),
}

impl Token {
    fn is_target(&self) -> bool {
        matches!(
            self,
            Token::Target | Token::OptionalTarget | Token::PrefixedTarget(_)
        )
    }

    fn requires_target(&self) -> bool {
        matches!(self, Token::Target | Token::PrefixedTarget(_))
    }
}

/// Token list for one (tool, operation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgvTemplate {
    /// Executable, when it differs from the tool's primary invocation name
    pub program: Option<&'static str>,
    pub tokens: &'static [Token],
}

impl ArgvTemplate {
    pub const fn new(tokens: &'static [Token]) -> Self {
        Self {
            program: None,
            tokens,
        }
    }

    pub const fn with_program(program: &'static str, tokens: &'static [Token]) -> Self {
        Self {
            program: Some(program),
            tokens,
        }
    }

    pub fn takes_target(&self) -> bool {
        self.tokens.iter().any(Token::is_target)
    }

    pub fn requires_target(&self) -> bool {
        self.tokens.iter().any(Token::requires_target)
    }

    /// Render the argument vector. Extra arguments are placed right before the
    /// target slot, or at the end when the template has none.
    pub fn render(
        &self,
        tool: ToolIdentity,
        operation: Operation,
        target: Option<&str>,
        flags: &Flags,
    ) -> Result<Vec<String>, ManagerError> {
        if let Some(target) = target {
            validate_target(target)?;
            if !self.takes_target() {
                return Err(ManagerError::UnexpectedTarget {
                    tool,
                    operation,
                    target: target.to_string(),
                });
            }
        } else if self.requires_target() {
            return Err(ManagerError::MissingTarget { operation });
        }
        for arg in &flags.extra_args {
            validate_argument(arg)?;
        }

        let program = self.program.unwrap_or_else(|| tool.program());
        let mut argv = Vec::with_capacity(self.tokens.len() + flags.extra_args.len() + 2);
        argv.push(program.to_string());

        let mut extras_placed = false;
        for token in self.tokens {
            match token {
                Token::Word(word) => argv.push(word.to_string()),
                Token::AssumeYes(switch) => {
                    if flags.assume_yes {
                        argv.push(switch.to_string());
                    }
                }
                Token::Target | Token::OptionalTarget | Token::PrefixedTarget(_) => {
                    argv.extend(flags.extra_args.iter().cloned());
                    extras_placed = true;
                    if let Some(target) = target {
                        match token {
                            Token::PrefixedTarget(prefix) => argv.push(format!("{prefix}{target}")),
                            _ => argv.push(target.to_string()),
                        }
                    }
                }
            }
        }
        if !extras_placed {
            argv.extend(flags.extra_args.iter().cloned());
        }

        Ok(argv)
    }
}
