//! Script engine seam.
//!
//! The embedded web engine is an external collaborator. The bridge only
//! needs one capability from it: evaluate a script and report the result.

use crate::error::Result;
use crate::value::ScriptValue;

/// Continuation invoked with the outcome of a single evaluation.
pub type ScriptCallback = Box<dyn FnOnce(Result<ScriptValue>)>;

/// An embedded script environment.
///
/// Implementations must call `done` at most once, on the owner thread. It
/// may be called before `evaluate_script` returns or at any later point.
/// Completions of distinct evaluations may arrive in any order.
///
/// An engine torn down with evaluations in flight may never call `done`.
/// Continuations created by [`RichEditor`](crate::RichEditor) only hold weak
/// references, so a lost completion leaks nothing beyond its own closure.
pub trait ScriptEngine {
    /// Submit `script` for evaluation.
    fn evaluate_script(&self, script: &str, done: ScriptCallback);
}
