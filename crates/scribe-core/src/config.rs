//! Editor configuration.
//!
//! Defaults that the bridge needs before the embedded content has reported
//! anything, plus the names used to address it.
//!
//! # Example
//!
//! ```ignore
//! use scribe_core::EditorConfig;
//!
//! pub static CONFIG: EditorConfig = EditorConfig::new()
//!     .with_font_size(15)
//!     .with_placeholder("Write something...");
//! ```

/// Line height (px) assumed until the embedded content reports its own.
pub const DEFAULT_LINE_HEIGHT: u32 = 28;

/// Pixels subtracted from the line height to estimate the caret height.
pub const DEFAULT_CARET_PADDING: u32 = 4;

/// URL prefix the embedded content navigates to when it has notifications.
pub const DEFAULT_CALLBACK_SCHEME: &str = "re-callback://";

/// Global object the embedded editor script exposes its API on.
pub const DEFAULT_NAMESPACE: &str = "RE";

/// Default font size (px) pushed when the editor finishes loading.
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Configuration for a [`RichEditor`](crate::RichEditor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Line height used before load and whenever the content cannot report one.
    pub default_line_height: u32,
    /// `cursor height = line height - caret_padding`.
    pub caret_padding: u32,
    /// Reserved navigation prefix that signals pending notifications.
    pub callback_scheme: &'static str,
    /// Script namespace commands are addressed to (`<namespace>.<op>(...)`).
    pub namespace: &'static str,
    /// Initial font size (px).
    pub font_size: u32,
    /// Initial placeholder text.
    pub placeholder: &'static str,
    /// Whether the content starts out editable.
    pub editable: bool,
}

impl EditorConfig {
    /// Create a configuration with the stock defaults.
    pub const fn new() -> Self {
        Self {
            default_line_height: DEFAULT_LINE_HEIGHT,
            caret_padding: DEFAULT_CARET_PADDING,
            callback_scheme: DEFAULT_CALLBACK_SCHEME,
            namespace: DEFAULT_NAMESPACE,
            font_size: DEFAULT_FONT_SIZE,
            placeholder: "",
            editable: true,
        }
    }

    /// Override the default line height.
    pub const fn with_default_line_height(mut self, line_height: u32) -> Self {
        self.default_line_height = line_height;
        self
    }

    /// Override the caret padding.
    pub const fn with_caret_padding(mut self, padding: u32) -> Self {
        self.caret_padding = padding;
        self
    }

    /// Override the callback scheme.
    pub const fn with_callback_scheme(mut self, scheme: &'static str) -> Self {
        self.callback_scheme = scheme;
        self
    }

    /// Override the script namespace.
    pub const fn with_namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the initial font size.
    pub const fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the initial placeholder text.
    pub const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set whether the content starts out editable.
    pub const fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
