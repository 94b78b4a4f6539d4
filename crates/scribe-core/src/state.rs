//! Host-side editor state.
//!
//! The embedded content is authoritative; this is the cache the host reads
//! from. Configuration set before the content has loaded is parked in
//! [`LoadState::Unloaded`] and pushed once, when `ready` arrives.

use crate::config::EditorConfig;

/// Configuration waiting to be pushed into the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfig {
    pub html: String,
    pub editable: bool,
    pub placeholder: String,
    pub font_size: u32,
    pub line_height: u32,
}

impl PendingConfig {
    fn from_config(config: &EditorConfig) -> Self {
        Self {
            html: String::new(),
            editable: config.editable,
            placeholder: config.placeholder.to_owned(),
            font_size: config.font_size,
            line_height: config.default_line_height,
        }
    }
}

/// Whether the embedded content has finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not loaded yet; setters write here.
    Unloaded(PendingConfig),
    /// Loaded; setters go straight to the content.
    Loaded,
}

impl LoadState {
    /// Whether `ready` has been handled.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Parked configuration, or `None` once loaded.
    pub fn pending(&self) -> Option<&PendingConfig> {
        match self {
            Self::Unloaded(pending) => Some(pending),
            Self::Loaded => None,
        }
    }

    /// Mutable parked configuration, or `None` once loaded.
    pub fn pending_mut(&mut self) -> Option<&mut PendingConfig> {
        match self {
            Self::Unloaded(pending) => Some(pending),
            Self::Loaded => None,
        }
    }

    /// Transition to [`LoadState::Loaded`].
    ///
    /// Returns the parked configuration on the first call and `None` on
    /// every later one.
    pub fn finish_loading(&mut self) -> Option<PendingConfig> {
        match std::mem::replace(self, Self::Loaded) {
            Self::Unloaded(pending) => Some(pending),
            Self::Loaded => None,
        }
    }
}

/// Cached editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub load: LoadState,
    /// Last HTML reported by the content. Never set optimistically.
    pub content_html: String,
    /// Last measured content height (px).
    pub height: i64,
    /// Line height (px): the last value set by the host or reported by the
    /// content.
    pub line_height: u32,
    pub editable: bool,
    pub placeholder: String,
    pub font_size: u32,
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            load: LoadState::Unloaded(PendingConfig::from_config(config)),
            content_html: String::new(),
            height: 0,
            line_height: config.default_line_height,
            editable: config.editable,
            placeholder: config.placeholder.to_owned(),
            font_size: config.font_size,
        }
    }

    /// HTML as the host currently sees it: the pending value before load,
    /// the last reported value after.
    pub fn html(&self) -> &str {
        match &self.load {
            LoadState::Unloaded(pending) => &pending.html,
            LoadState::Loaded => &self.content_html,
        }
    }

    /// Store a newly measured height. Returns whether it changed.
    pub fn record_height(&mut self, height: i64) -> bool {
        if self.height == height {
            return false;
        }
        self.height = height;
        true
    }
}
