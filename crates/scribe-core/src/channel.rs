//! Command channel: one best-effort round trip into the embedded content.

use std::rc::Rc;

use crate::engine::ScriptEngine;
use crate::value::ScriptValue;

/// Sends command strings to a [`ScriptEngine`] and hands back canonical
/// string results.
///
/// Engine faults are logged and reported to the caller as the empty string.
/// There is no retry and no timeout.
#[derive(Clone)]
pub struct CommandChannel {
    engine: Rc<dyn ScriptEngine>,
}

impl CommandChannel {
    /// Create a channel over `engine`.
    pub fn new(engine: Rc<dyn ScriptEngine>) -> Self {
        Self { engine }
    }

    /// Evaluate `command` and pass its canonical result to `done`.
    pub fn evaluate<F>(&self, command: impl Into<String>, done: F)
    where
        F: FnOnce(String) + 'static,
    {
        let command = command.into();
        let label = operation_label(&command).to_owned();
        self.engine.evaluate_script(
            &command,
            Box::new(move |result| {
                let value = match result {
                    Ok(value) => value,
                    Err(e) => {
                        log::warn!("evaluation of {label} failed: {e}");
                        ScriptValue::Absent
                    }
                };
                done(value.into_canonical());
            }),
        );
    }

    /// Evaluate `command`, discarding the result.
    pub fn send(&self, command: impl Into<String>) {
        self.evaluate(command, |_| {});
    }
}

/// Leading part of a command up to its argument list, for log lines that
/// must not echo document content.
fn operation_label(command: &str) -> &str {
    command.split('(').next().unwrap_or(command)
}
