//! Command strings for the embedded editor script.
//!
//! Commands have the shape `<namespace>.<operation>(<args>)`. String
//! arguments are written as single-quoted literals with every character
//! that could terminate or corrupt the literal escaped.

use std::fmt::{self, Write};

/// A command addressed to the embedded editor's script namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    script: String,
    args: usize,
}

impl Command {
    /// Start a call to `namespace.operation(...)`.
    pub fn call(namespace: &str, operation: &str) -> Self {
        let mut script = String::with_capacity(namespace.len() + operation.len() + 8);
        script.push_str(namespace);
        script.push('.');
        script.push_str(operation);
        script.push('(');
        Self { script, args: 0 }
    }

    /// Append a string argument as an escaped single-quoted literal.
    pub fn arg(mut self, value: &str) -> Self {
        self.separator();
        self.script.push('\'');
        escape_into(&mut self.script, value);
        self.script.push('\'');
        self
    }

    /// Append an integer argument.
    pub fn int(mut self, value: i64) -> Self {
        self.separator();
        let _ = write!(self.script, "{value}");
        self
    }

    /// Append a boolean argument.
    pub fn bool(mut self, value: bool) -> Self {
        self.separator();
        self.script.push_str(if value { "true" } else { "false" });
        self
    }

    /// Append a pixel length as a string argument (`'16px'`).
    pub fn px(self, value: u32) -> Self {
        self.arg(&format!("{value}px"))
    }

    /// Finish the command and return the script text.
    pub fn into_script(mut self) -> String {
        self.script.push(')');
        self.script
    }

    fn separator(&mut self) {
        if self.args > 0 {
            self.script.push_str(", ");
        }
        self.args += 1;
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{})", self.script)
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.into_script()
    }
}

/// Escape `value` for use inside a single-quoted script string literal.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value);
    out
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Line terminators inside literals on older engines.
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}

/// One-shot formatting and editing commands.
///
/// Each variant is a single bridge call with no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    RemoveFormat,
    Undo,
    Redo,
    Bold,
    Italic,
    Subscript,
    Superscript,
    Strikethrough,
    Underline,
    /// Heading level, clamped to `1..=6`.
    Heading(u8),
    Indent,
    Outdent,
    OrderedList,
    UnorderedList,
    Blockquote,
    AlignLeft,
    AlignCenter,
    AlignRight,
    Checkbox,
    /// CSS color for the selected text.
    TextColor(String),
    /// CSS color for the selected text's background.
    TextBackgroundColor(String),
    /// CSS color for the whole editor surface.
    EditorBackgroundColor(String),
    InsertImage {
        url: String,
        alt: String,
    },
    InsertLink {
        href: String,
        text: String,
        title: String,
    },
}

impl FormatCommand {
    /// Build the command under `namespace`.
    pub fn to_command(&self, namespace: &str) -> Command {
        let call = |op| Command::call(namespace, op);
        match self {
            Self::RemoveFormat => call("removeFormat"),
            Self::Undo => call("undo"),
            Self::Redo => call("redo"),
            Self::Bold => call("setBold"),
            Self::Italic => call("setItalic"),
            Self::Subscript => call("setSubscript"),
            Self::Superscript => call("setSuperscript"),
            Self::Strikethrough => call("setStrikeThrough"),
            Self::Underline => call("setUnderline"),
            Self::Heading(level) => call("setHeading").arg(&(*level).clamp(1, 6).to_string()),
            Self::Indent => call("setIndent"),
            Self::Outdent => call("setOutdent"),
            Self::OrderedList => call("setOrderedList"),
            Self::UnorderedList => call("setUnorderedList"),
            Self::Blockquote => call("setBlockquote"),
            Self::AlignLeft => call("setJustifyLeft"),
            Self::AlignCenter => call("setJustifyCenter"),
            Self::AlignRight => call("setJustifyRight"),
            Self::Checkbox => call("setCheckbox"),
            Self::TextColor(color) => call("setTextColor").arg(color),
            Self::TextBackgroundColor(color) => call("setTextBackgroundColor").arg(color),
            Self::EditorBackgroundColor(color) => call("setEditorBackgroundColor").arg(color),
            Self::InsertImage { url, alt } => call("insertImage").arg(url).arg(alt),
            Self::InsertLink { href, text, title } => {
                call("insertLink").arg(href).arg(text).arg(title)
            }
        }
    }

    /// Whether the content must save its insertion point first.
    ///
    /// Inserts usually follow UI that steals the selection (a picker, a
    /// dialog), so the caret is restored from the saved point.
    pub fn needs_insertion_point(&self) -> bool {
        matches!(self, Self::InsertImage { .. } | Self::InsertLink { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_without_args() {
        assert_eq!(Command::call("RE", "getHtml").into_script(), "RE.getHtml()");
    }

    #[test]
    fn test_mixed_args() {
        let script = Command::call("RE", "focusAtPoint").int(10).int(-4).into_script();
        assert_eq!(script, "RE.focusAtPoint(10, -4)");

        let script = Command::call("RE", "setContentEditable").bool(false).into_script();
        assert_eq!(script, "RE.setContentEditable(false)");

        let script = Command::call("RE", "setLineHeight").px(28).into_script();
        assert_eq!(script, "RE.setLineHeight('28px')");
    }

    #[test]
    fn test_display_matches_script() {
        let command = Command::call("RE", "setHtml").arg("<p>a</p>");
        assert_eq!(command.to_string(), "RE.setHtml('<p>a</p>')");
        assert_eq!(command.into_script(), "RE.setHtml('<p>a</p>')");
    }

    #[test]
    fn test_escape_breakout_attempt() {
        let hostile = "');alert(1);//";
        let script = Command::call("RE", "setHtml").arg(hostile).into_script();
        assert_eq!(script, "RE.setHtml('\\');alert(1);//')");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("it's"), "it\\'s");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("l1\nl2\r\n"), "l1\\nl2\\r\\n");
        assert_eq!(escape("\t"), "\\t");
        assert_eq!(escape("\u{2028}\u{2029}"), "\\u2028\\u2029");
        assert_eq!(escape("\u{0}\u{1b}"), "\\u0000\\u001b");
        assert_eq!(escape("héllo <b>"), "héllo <b>");
    }

    #[test]
    fn test_format_commands() {
        assert_eq!(FormatCommand::Bold.to_command("RE").into_script(), "RE.setBold()");
        assert_eq!(
            FormatCommand::Heading(9).to_command("RE").into_script(),
            "RE.setHeading('6')"
        );
        assert_eq!(
            FormatCommand::TextColor("#ff0000".into()).to_command("RE").into_script(),
            "RE.setTextColor('#ff0000')"
        );

        let link = FormatCommand::InsertLink {
            href: "https://example.com/?q='x'".into(),
            text: "site".into(),
            title: "".into(),
        };
        assert_eq!(
            link.to_command("RE").into_script(),
            "RE.insertLink('https://example.com/?q=\\'x\\'', 'site', '')"
        );
        assert!(link.needs_insertion_point());
        assert!(!FormatCommand::Undo.needs_insertion_point());
    }
}
