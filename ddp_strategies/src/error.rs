use std::fmt;

use crate::CommHookType;

/// The registry's result type.
pub type Result<T> = std::result::Result<T, StrategyError>;

/// Failures produced by the hook registry itself.
///
/// Errors raised by the engine's registration entry point or by a hook are
/// never wrapped here; they propagate to the caller untouched.
#[derive(Debug)]
pub enum StrategyError {
    /// A string selector did not match any member of the closed hook
    /// enumeration. Detected before any registration attempt.
    UnknownHookName { name: String },
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::UnknownHookName { name } => {
                write!(f, "unknown comm hook name {name:?}, supported names: ")?;
                for (i, kind) in CommHookType::MEMBERS.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind.name())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for StrategyError {}
