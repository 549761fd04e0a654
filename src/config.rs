//! Runtime configuration: UiConfig and the unknown-element policy.

use crate::geometry::Extent;

/// Default re-layout threshold in pixels.
pub const DEFAULT_LAYOUT_EPSILON: f32 = 0.5;

/// What the translator does with an element whose tag it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownElementPolicy {
    /// Report it, skip it and its subtree, continue with the siblings.
    #[default]
    Skip,
    /// Fail the whole document.
    Abort,
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Configuration shared by the translator and the panels it builds.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// A panel re-solves only when its content area moved by more than this
    /// many pixels on either axis.
    pub layout_epsilon: f32,
    pub unknown_elements: UnknownElementPolicy,
    /// Logical size of a panel element without `width`/`height`.
    pub default_panel_size: Extent,
    /// Title of a panel element without `title`.
    pub default_title: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            layout_epsilon: DEFAULT_LAYOUT_EPSILON,
            unknown_elements: UnknownElementPolicy::Skip,
            default_panel_size: Extent::new(400.0, 300.0),
            default_title: "Panel".to_string(),
        }
    }
}

impl UiConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the re-layout threshold (builder). Negative values are clamped to zero.
    pub fn with_layout_epsilon(mut self, epsilon: f32) -> Self {
        self.layout_epsilon = epsilon.max(0.0);
        self
    }

    /// Set the unknown-element policy (builder).
    pub fn with_unknown_elements(mut self, policy: UnknownElementPolicy) -> Self {
        self.unknown_elements = policy;
        self
    }

    /// Set the default panel size (builder).
    pub fn with_default_panel_size(mut self, width: f32, height: f32) -> Self {
        self.default_panel_size = Extent::new(width, height);
        self
    }

    /// Set the default panel title (builder).
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
