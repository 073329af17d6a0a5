//! The box tree produced by layout.

use boxwood_dom::NodeId;
use serde::Serialize;
use strum_macros::Display;

use crate::style::ResolvedStyle;

use super::box_model::{CachedDimensions, Dimensions};

/// How a box takes part in its parent's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum DisplayKind {
    /// No usable `display`; replaced by a node-kind default before layout.
    Undefined,
    /// Starts on a fresh line and fills the available width.
    Block,
    /// Flows left to right and wraps as a unit.
    InlineBlock,
    /// A grid of rows and cells.
    Table,
    /// Produces no box at all, and neither do its descendants.
    None,
}

impl DisplayKind {
    /// Map a `display` keyword. `inline` and `inline-block` both flow as
    /// inline blocks; anything unrecognised is [`Self::Undefined`].
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "block" => Self::Block,
            "inline" | "inline-block" => Self::InlineBlock,
            "table" => Self::Table,
            "none" => Self::None,
            _ => Self::Undefined,
        }
    }

    /// Block-level boxes force a line break before and after themselves.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(self, Self::Block | Self::Table)
    }
}

/// What a box was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxContent {
    /// An element or the document.
    Node(NodeId),
    /// One wrapped line of a text node.
    TextFragment {
        /// The text node the fragment was cut from.
        source: NodeId,
        /// Words on this fragment, joined by single spaces.
        text: String,
    },
    /// An empty cell padding out a short table row.
    AnonymousCell,
}

/// Row and column of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPosition {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub column: usize,
}

/// Resolved track sizes of a table box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableMetrics {
    /// Final width of each column.
    pub column_widths: Vec<i32>,
    /// Final height of each row.
    pub row_heights: Vec<i32>,
}

/// A laid-out box.
///
/// Owned by its parent. Every layout pass builds a new tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// What generated the box.
    pub content: BoxContent,
    /// Flow behaviour.
    pub display: DisplayKind,
    /// Geometry.
    pub dimensions: Dimensions,
    /// The style the box was laid out with.
    pub style: ResolvedStyle,
    /// Used font size, for text measurement and `em` units.
    pub font_size_px: f32,
    /// Set on table cells.
    pub grid_position: Option<GridPosition>,
    /// Set on tables.
    pub table: Option<TableMetrics>,
    /// Child boxes in flow order.
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// A box that has not been laid out yet.
    #[must_use]
    pub fn new(content: BoxContent, display: DisplayKind, style: ResolvedStyle, font_size_px: f32) -> Self {
        Self {
            content,
            display,
            dimensions: Dimensions::default(),
            style,
            font_size_px,
            grid_position: None,
            table: None,
            children: Vec::new(),
        }
    }

    /// The document node behind this box, if any. Text fragments report
    /// their source text node.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        match &self.content {
            BoxContent::Node(id) | BoxContent::TextFragment { source: id, .. } => Some(*id),
            BoxContent::AnonymousCell => None,
        }
    }

    /// The fragment text for text boxes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BoxContent::TextFragment { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Snapshot of the derived rectangles.
    #[must_use]
    pub const fn cached(&self) -> CachedDimensions {
        self.dimensions.cached()
    }

    /// This box and all its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        fn walk<'a>(b: &'a LayoutBox, out: &mut Vec<&'a LayoutBox>) {
            out.push(b);
            for child in &b.children {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}
