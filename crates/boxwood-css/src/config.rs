//! Layout tuning knobs.

use serde::{Deserialize, Serialize};

/// Font size of the root box when nothing sets `font-size`.
pub const DEFAULT_FONT_SIZE_PX: f32 = 8.0;

/// Gap between adjacent table cells, horizontally and vertically.
pub const DEFAULT_CELL_SPACING_PX: i32 = 4;

/// Most words a single text node may hold.
pub const DEFAULT_WRAP_ITERATION_CAP: usize = 100_000;

/// Settings for one layout pass.
///
/// Every field has a default, so a partial JSON object deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font size of the root, inherited by anything that does not set
    /// `font-size` itself.
    pub default_font_size_px: f32,
    /// Table cell spacing.
    pub cell_spacing_px: i32,
    /// Most words wrapped for one text node. Wrapping measures the growing
    /// line once per word, so this bounds the work per node; a longer text
    /// aborts layout with `IterationCapExceeded`. Raise it for documents
    /// with very long unbroken text nodes.
    pub wrap_iteration_cap: usize,
    /// Properties a child inherits from its parent's resolved style.
    pub inherited_properties: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_font_size_px: DEFAULT_FONT_SIZE_PX,
            cell_spacing_px: DEFAULT_CELL_SPACING_PX,
            wrap_iteration_cap: DEFAULT_WRAP_ITERATION_CAP,
            inherited_properties: vec!["color".to_string()],
        }
    }
}
