//! Platform-specific WebView implementations.

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
mod macos_navigation;

#[cfg(not(target_os = "macos"))]
pub mod unsupported;

#[cfg(target_os = "macos")]
pub use macos::MacosWebView as PlatformWebView;

#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedWebView as PlatformWebView;
