//! Error types for script evaluation.

/// Errors a [`ScriptEngine`](crate::ScriptEngine) can report for one evaluation.
///
/// These never escape the command channel: they are logged and folded into
/// the absent result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The script threw or failed to compile.
    Script(String),
    /// The engine is not attached or has been torn down.
    Unavailable,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script(msg) => write!(f, "script error: {msg}"),
            Self::Unavailable => write!(f, "script engine unavailable"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Result type for script evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;
