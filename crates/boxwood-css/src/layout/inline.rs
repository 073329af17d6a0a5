//! Inline flow and text wrapping.
//!
//! Every box lays its children out through [`layout_children`]. Inline
//! children fill a line left to right until the next one no longer fits;
//! block-level children sit on a line of their own.

use crate::error::LayoutError;

use super::LayoutContext;
use super::box_model::{Dimensions, Rect};
use super::builder::{build_children, explicit_width, margin_px};
use super::layout_box::LayoutBox;
use super::measure::TextMeasurer;

/// Split `text` into lines no wider than `max_width`.
///
/// Words are whitespace separated and packed greedily: a word joins the
/// current line if the line plus a space plus the word still measures within
/// `max_width`. A word that is too wide on its own becomes a line by itself
/// rather than being split. Runs of whitespace collapse to one space, and
/// text with no words yields no lines.
///
/// Each word costs one measurement of a growing line, so `iteration_cap`
/// bounds the work done for one text node. It is a size limit on the input,
/// not a guard against non-termination.
///
/// # Errors
///
/// [`LayoutError::IterationCapExceeded`] if the text holds more than
/// `iteration_cap` words.
pub fn break_text(
    text: &str,
    max_width: i32,
    font_size_px: f32,
    measurer: &dyn TextMeasurer,
    iteration_cap: usize,
) -> Result<Vec<String>, LayoutError> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for (iteration, word) in text.split_whitespace().enumerate() {
        if iteration >= iteration_cap {
            return Err(LayoutError::IterationCapExceeded {
                stage: "text wrapping",
                cap: iteration_cap,
            });
        }

        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        let width = measurer
            .measure(&candidate, font_size_px)
            .map_or(0, |size| size.width);
        if width > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

/// What a finished child flow tells its owner.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FlowSummary {
    /// Sum of all line heights.
    pub height: i32,
    /// Widest line, for shrink-to-fit widths.
    pub widest_line: i32,
}

/// Cursor threaded through one child flow.
///
/// `dims` is the owner's geometry as its children see it: `content.height`
/// is the height of the finished lines and `current_x` the fill of the open
/// one.
struct FlowCursor {
    dims: Dimensions,
    line_height: i32,
    widest_line: i32,
}

impl FlowCursor {
    fn new(mut dims: Dimensions) -> Self {
        dims.content.height = 0;
        dims.current_x = 0;
        Self {
            dims,
            line_height: 0,
            widest_line: 0,
        }
    }

    const fn line_is_open(&self) -> bool {
        self.dims.current_x > 0 || self.line_height > 0
    }

    fn fits(&self, child: &LayoutBox) -> bool {
        self.dims.current_x == 0
            || self
                .dims
                .current_x
                .saturating_add(child.dimensions.margin_rect().width)
                <= self.dims.max_width
    }

    /// Close the open line, even if it is empty.
    const fn break_line(&mut self) {
        self.dims.content.height = self.dims.content.height.saturating_add(self.line_height);
        self.dims.current_x = 0;
        self.line_height = 0;
    }

    fn place(&mut self, child: &LayoutBox) {
        let margin_rect = child.dimensions.margin_rect();
        self.dims.current_x = self.dims.current_x.saturating_add(margin_rect.width);
        self.widest_line = self.widest_line.max(self.dims.current_x);
        self.line_height = self.line_height.max(margin_rect.height);
    }

    fn finish(mut self) -> (Dimensions, FlowSummary) {
        if self.line_is_open() {
            self.break_line();
        }
        let summary = FlowSummary {
            height: self.dims.content.height,
            widest_line: self.widest_line,
        };
        (self.dims, summary)
    }
}

/// Build and lay out the children of `owner`, whose geometry so far is
/// `dims`.
///
/// Returns `dims` with the flow height as content height, the laid-out
/// children, and a summary of the flow.
pub(crate) fn layout_children(
    ctx: &LayoutContext<'_>,
    owner: &LayoutBox,
    dims: Dimensions,
) -> Result<(Dimensions, Vec<LayoutBox>, FlowSummary), LayoutError> {
    let mut children = build_children(ctx, owner, &dims)?;
    let mut cursor = FlowCursor::new(dims);

    for child in &mut children {
        if child.display.is_block_level() {
            if cursor.line_is_open() {
                cursor.break_line();
            }
            ctx.layout_box(child, &cursor.dims)?;
            cursor.place(child);
            cursor.break_line();
            continue;
        }

        ctx.layout_box(child, &cursor.dims)?;
        if !cursor.fits(child) {
            // Layout is a pure function of the slot, so the second pass
            // replaces everything the first one produced.
            cursor.break_line();
            ctx.layout_box(child, &cursor.dims)?;
        }
        cursor.place(child);
    }

    let (dims, summary) = cursor.finish();
    Ok((dims, children, summary))
}

/// Lay out an inline-level box at the current fill position of `parent`.
///
/// An explicit `width` wins over the content's intrinsic width. With
/// neither, the box shrinks to its widest line, wrapping against whatever
/// is left of the parent's line.
pub(crate) fn layout_inline_block(
    ctx: &LayoutContext<'_>,
    b: &mut LayoutBox,
    parent: &Dimensions,
) -> Result<(), LayoutError> {
    let intrinsic = ctx.intrinsic_size(b);
    let containing_width = parent.max_width;

    let padding = b.style.sides_px("padding");
    let border = b.style.border_widths_px();
    let margin = b
        .style
        .sides("margin")
        .map(|side| margin_px(ctx, b, side.as_ref(), containing_width));

    let width = explicit_width(ctx, b, containing_width).or(intrinsic.map(|s| s.width));

    let mut dims = Dimensions {
        content: Rect::new(0, 0, width.unwrap_or(0), 0),
        padding,
        border,
        margin,
        current_x: 0,
        max_width: 0,
    };
    let budget = parent.max_width.saturating_sub(parent.current_x).max(0);
    dims.max_width =
        width.unwrap_or_else(|| budget.saturating_sub(dims.horizontal_extras()).max(0));

    dims.content.x = parent
        .content
        .x
        .saturating_add(parent.current_x)
        .saturating_add(margin.left + border.left + padding.left);
    dims.content.y = parent
        .content
        .bottom()
        .saturating_add(margin.top + border.top + padding.top);

    let (mut dims, children, flow) = layout_children(ctx, b, dims)?;

    if width.is_none() {
        dims.content.width = flow.widest_line;
    }
    dims.content.height = ctx.resolve_height(b, flow.height, intrinsic);

    b.dimensions = dims;
    b.children = children;
    Ok(())
}
