//! Error types for WebView operations.

/// Errors that can occur while setting up an editor WebView.
#[derive(Debug)]
pub enum WebViewError {
    /// The current platform is not supported.
    PlatformNotSupported,
    /// WebView creation failed.
    CreationFailed(String),
    /// The configured base URL could not be parsed.
    InvalidBaseUrl(String),
}

impl std::fmt::Display for WebViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlatformNotSupported => write!(f, "platform not supported"),
            Self::CreationFailed(msg) => write!(f, "webview creation failed: {msg}"),
            Self::InvalidBaseUrl(url) => write!(f, "invalid base URL: {url}"),
        }
    }
}

impl std::error::Error for WebViewError {}

/// Result type for WebView operations.
pub type Result<T> = std::result::Result<T, WebViewError>;
