//! Box layout.
//!
//! Layout turns a document tree plus stylesheets into a tree of
//! [`LayoutBox`]es with pixel geometry. It is synchronous and keeps no
//! state between passes: the same inputs always give the same tree.
//!
//! # Module Structure
//!
//! - [`box_model`] - rectangles and per-box dimensions
//! - [`layout_box`] - the box tree types
//! - [`measure`] - text and image measurement callbacks
//! - [`values`] - `auto`-aware lengths
//! - `builder` - style resolution and display classification per child
//! - `block` - block width, position and height
//! - `inline` - text wrapping and the shared child flow
//! - `table` - two-pass table sizing

pub mod box_model;
pub mod layout_box;
pub mod measure;
pub mod values;

mod block;
mod builder;
mod inline;
mod table;

pub use box_model::{CachedDimensions, Dimensions, Rect, Size};
pub use inline::break_text;
pub use layout_box::{BoxContent, DisplayKind, GridPosition, LayoutBox, TableMetrics};
pub use measure::{ImageSizer, MonospaceMeasurer, NoImages, TextMeasurer};
pub use values::AutoOr;

use boxwood_common::{DiagnosticSink, LogSink};
use boxwood_dom::{DomTree, NodeId};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::stylesheet::Stylesheet;
use crate::values::{Unit, clamp_len, round_px};

/// Most characters a `size` attribute is measured for.
pub const MAX_SIZE_ATTR_CHARS: usize = 1_000;

/// Bring both axes of an externally supplied size into the length range.
const fn clamp_size(size: Size) -> Size {
    Size::new(clamp_len(size.width), clamp_len(size.height))
}

/// The result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    /// Box for the node layout started from.
    pub root: LayoutBox,
    /// The viewport the pass ran against.
    pub viewport: Rect,
}

impl LayoutTree {
    /// Size of the laid-out page: the root's margin rect.
    #[must_use]
    pub const fn page_size(&self) -> Size {
        self.root.dimensions.margin_rect().size()
    }

    /// How far the page extends past the viewport on each axis. Negative
    /// when the page is smaller.
    #[must_use]
    pub const fn overflow(&self) -> Size {
        let page = self.page_size();
        Size::new(
            page.width.saturating_sub(self.viewport.width),
            page.height.saturating_sub(self.viewport.height),
        )
    }
}

/// Everything a layout pass reads.
///
/// ```ignore
/// let tree = LayoutContext::new(&dom, &sheets, &MonospaceMeasurer::default())
///     .with_sink(&StderrSink::new())
///     .layout(Rect::new(0, 0, 800, 600))?;
/// ```
pub struct LayoutContext<'a> {
    tree: &'a DomTree,
    stylesheets: &'a [Stylesheet],
    measurer: &'a dyn TextMeasurer,
    images: &'a dyn ImageSizer,
    sink: &'a dyn DiagnosticSink,
    config: LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    /// A context without images, logging diagnostics through `log`, with the
    /// default configuration.
    #[must_use]
    pub fn new(
        tree: &'a DomTree,
        stylesheets: &'a [Stylesheet],
        measurer: &'a dyn TextMeasurer,
    ) -> Self {
        Self {
            tree,
            stylesheets,
            measurer,
            images: &NoImages,
            sink: &LogSink,
            config: LayoutConfig::default(),
        }
    }

    /// Use `images` for `<img>` sources.
    #[must_use]
    pub fn with_images(mut self, images: &'a dyn ImageSizer) -> Self {
        self.images = images;
        self
    }

    /// Report diagnostics to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Lay out the whole document.
    ///
    /// # Errors
    ///
    /// See [`Self::layout_node`].
    pub fn layout(&self, viewport: Rect) -> Result<LayoutTree, LayoutError> {
        self.layout_node(self.tree.root(), viewport)
    }

    /// Lay out the subtree rooted at `root`.
    ///
    /// Only the viewport's width constrains layout; the page grows down as
    /// far as its content needs. The root is always laid out as a block.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MissingNode`] if `root` is not in the tree, and
    /// [`LayoutError::IterationCapExceeded`] if text wrapping runs away.
    pub fn layout_node(&self, root: NodeId, viewport: Rect) -> Result<LayoutTree, LayoutError> {
        if self.tree.get(root).is_none() {
            return Err(LayoutError::MissingNode(root));
        }

        let initial = Dimensions {
            content: Rect::new(viewport.x, viewport.y, viewport.width, 0),
            max_width: viewport.width,
            ..Dimensions::default()
        };

        let mut root_box = builder::root_box(self, root);
        if root_box.display == DisplayKind::None {
            self.sink.warn("layout", "the root node is display: none; nothing to lay out");
        } else {
            root_box.display = DisplayKind::Block;
            block::layout_block(self, &mut root_box, &initial)?;
        }

        Ok(LayoutTree {
            root: root_box,
            viewport,
        })
    }

    /// Lay out `b` inside `parent`, dispatching on display kind.
    fn layout_box(&self, b: &mut LayoutBox, parent: &Dimensions) -> Result<(), LayoutError> {
        match b.display {
            DisplayKind::Block | DisplayKind::Undefined => block::layout_block(self, b, parent)?,
            DisplayKind::InlineBlock => inline::layout_inline_block(self, b, parent)?,
            DisplayKind::Table => table::layout_table(self, b, parent)?,
            DisplayKind::None => {}
        }

        #[cfg(feature = "layout-trace")]
        log::trace!(
            target: "boxwood::layout",
            "{} {:?} -> {:?}",
            b.display,
            b.content,
            b.dimensions.margin_rect()
        );

        Ok(())
    }

    /// Measure text, treating a failed measurement as zero size.
    fn measure_text(&self, text: &str, font_size_px: f32) -> Size {
        self.measurer
            .measure(text, font_size_px)
            .map_or_else(Size::default, clamp_size)
    }

    /// Size of replaced or text content, if the box has any.
    ///
    /// In order of preference: the box's own text (text fragments and
    /// submit buttons), an image, a `size` attribute counted in spaces
    /// (at most [`MAX_SIZE_ATTR_CHARS`] of them).
    fn intrinsic_size(&self, b: &LayoutBox) -> Option<Size> {
        let element = match &b.content {
            BoxContent::TextFragment { text, .. } => {
                return Some(self.measure_text(text, b.font_size_px));
            }
            BoxContent::AnonymousCell => return None,
            BoxContent::Node(id) => self.tree.as_element(*id)?,
        };

        if element.tag_name == "input"
            && element
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("submit"))
        {
            let label = element.attr("value").unwrap_or("Submit").trim();
            if !label.is_empty() {
                return Some(self.measure_text(label, b.font_size_px));
            }
        }

        if element.tag_name == "img" {
            match (element.int_attr("width"), element.int_attr("height")) {
                (Some(w), Some(h)) if w >= 0 && h >= 0 => {
                    return Some(clamp_size(Size::new(w, h)));
                }
                _ => {}
            }
            if let Some(src) = element.attr("src") {
                return Some(
                    self.images
                        .image_size(src)
                        .map_or_else(Size::default, clamp_size),
                );
            }
        }

        let chars = element.int_attr("size").filter(|n| *n >= 0)?;
        let mut chars = usize::try_from(chars).unwrap_or_default();
        if chars > MAX_SIZE_ATTR_CHARS {
            self.sink.warn(
                "layout",
                &format!("size=\"{chars}\" is capped at {MAX_SIZE_ATTR_CHARS} characters"),
            );
            chars = MAX_SIZE_ATTR_CHARS;
        }
        Some(self.measure_text(&" ".repeat(chars), b.font_size_px))
    }

    /// Final content height: flow height, replaced by intrinsic height, and
    /// then by an explicit `height` in `px` or `em`.
    ///
    /// Percentage heights are accepted but have no effect.
    fn resolve_height(&self, b: &LayoutBox, flow_height: i32, intrinsic: Option<Size>) -> i32 {
        let height = intrinsic.map_or(flow_height, |s| s.height);
        let Some(explicit) = b.style.number("height") else {
            return height;
        };
        match explicit.unit {
            Unit::Pixels => round_px(explicit.value),
            Unit::Em => round_px(explicit.value * b.font_size_px),
            Unit::Percentage => height,
            Unit::None => {
                self.sink.info(
                    "layout",
                    &format!("height '{}' has no unit and is ignored", explicit.value),
                );
                height
            }
            Unit::Unknown => {
                self.sink.warn(
                    "layout",
                    &format!("height '{explicit}' has an unsupported unit and is ignored"),
                );
                height
            }
        }
    }
}

/// Lay out a document in one call.
///
/// `stylesheets` are applied in order, later declarations winning.
///
/// # Errors
///
/// See [`LayoutContext::layout_node`].
pub fn layout_document(
    tree: &DomTree,
    stylesheets: &[Stylesheet],
    viewport: Rect,
    measurer: &dyn TextMeasurer,
    images: &dyn ImageSizer,
    sink: &dyn DiagnosticSink,
) -> Result<LayoutTree, LayoutError> {
    LayoutContext::new(tree, stylesheets, measurer)
        .with_images(images)
        .with_sink(sink)
        .layout(viewport)
}
