//! Block layout.
//!
//! A block box goes through four steps in order: width, position, children,
//! height. Each step reads what the previous ones produced and nothing
//! loops back.

use crate::error::LayoutError;
use crate::sides::Sides;

use super::LayoutContext;
use super::box_model::{Dimensions, Rect};
use super::builder::{explicit_width, margin_px};
use super::inline::layout_children;
use super::layout_box::LayoutBox;
use super::values::{AutoOr, margin_sides};

/// Lay out a block-level box inside `parent`.
pub(crate) fn layout_block(
    ctx: &LayoutContext<'_>,
    b: &mut LayoutBox,
    parent: &Dimensions,
) -> Result<(), LayoutError> {
    let intrinsic = ctx.intrinsic_size(b);

    // STEP 1: Width and horizontal edges.
    let mut dims = block_width(ctx, b, parent.max_width, intrinsic.map(|s| s.width));

    // STEP 2: Vertical edges and position.
    block_position(ctx, b, parent, &mut dims);

    // STEP 3: Children.
    let (mut dims, children, flow) = layout_children(ctx, b, dims)?;

    // STEP 4: Height.
    dims.content.height = ctx.resolve_height(b, flow.height, intrinsic);

    b.dimensions = dims;
    b.children = children;
    Ok(())
}

/// Resolve content width and horizontal padding, border and margin.
///
/// `content width + padding + border + margins` must come out equal to
/// `containing_width`. Which of width or the margins gives way depends on
/// which of them are `auto`.
///
/// `intrinsic_width` is the content's own width (text, an image, a sized
/// input); an explicit `width` overrides it and without either the width is
/// `auto`.
pub(crate) fn block_width(
    ctx: &LayoutContext<'_>,
    b: &LayoutBox,
    containing_width: i32,
    intrinsic_width: Option<i32>,
) -> Dimensions {
    let padding = b.style.sides_px("padding");
    let border = b.style.border_widths_px();
    let margin = margin_sides(&b.style, containing_width, b.font_size_px, ctx.sink);

    let width = explicit_width(ctx, b, containing_width)
        .or(intrinsic_width)
        .map_or(AutoOr::Auto, AutoOr::Px);
    let mut margin_left = margin.left;
    let mut margin_right = margin.right;

    let edges = padding.width().saturating_add(border.width());
    let total = width
        .px_or(0)
        .saturating_add(edges)
        .saturating_add(margin_left.px_or(0))
        .saturating_add(margin_right.px_or(0));

    // Over-constrained: auto margins cannot soak up a negative remainder.
    if total > containing_width {
        if margin_left.is_auto() {
            margin_left = AutoOr::Px(0);
        }
        if margin_right.is_auto() {
            margin_right = AutoOr::Px(0);
        }
    }

    let underflow = containing_width.saturating_sub(total);

    let (used_width, used_left, used_right) = match (width, margin_left, margin_right) {
        // RULE 1: auto width takes the remainder. Auto margins become 0, and
        // when there is nothing left the right margin goes negative instead
        // of the width.
        (AutoOr::Auto, left, right) => {
            let left = left.px_or(0);
            let right = right.px_or(0);
            if underflow >= 0 {
                (underflow, left, right)
            } else {
                (0, left, right.saturating_add(underflow))
            }
        }
        // RULE 2: nothing is auto, so the right margin absorbs the difference.
        (AutoOr::Px(w), AutoOr::Px(left), AutoOr::Px(right)) => {
            (w, left, right.saturating_add(underflow))
        }
        // RULE 3: only the right margin is auto.
        (AutoOr::Px(w), AutoOr::Px(left), AutoOr::Auto) => (w, left, underflow),
        // RULE 4: only the left margin is auto.
        (AutoOr::Px(w), AutoOr::Auto, AutoOr::Px(right)) => (w, underflow, right),
        // RULE 5: both margins auto split the remainder, the odd pixel going
        // left.
        (AutoOr::Px(w), AutoOr::Auto, AutoOr::Auto) => {
            let left = underflow.saturating_add(1).div_euclid(2);
            (w, left, underflow - left)
        }
    };

    Dimensions {
        content: Rect::new(0, 0, used_width, 0),
        padding,
        border,
        margin: Sides {
            left: used_left,
            right: used_right,
            ..Sides::default()
        },
        current_x: 0,
        max_width: used_width,
    }
}

/// Fill in vertical edges and place the content box below whatever `parent`
/// has already laid out.
pub(crate) fn block_position(
    ctx: &LayoutContext<'_>,
    b: &LayoutBox,
    parent: &Dimensions,
    dims: &mut Dimensions,
) {
    let margin = b.style.sides("margin");
    dims.margin.top = margin_px(ctx, b, margin.top.as_ref(), parent.max_width);
    dims.margin.bottom = margin_px(ctx, b, margin.bottom.as_ref(), parent.max_width);

    dims.content.x = parent
        .content
        .x
        .saturating_add(dims.margin.left)
        .saturating_add(dims.border.left + dims.padding.left);
    dims.content.y = parent
        .content
        .bottom()
        .saturating_add(dims.margin.top)
        .saturating_add(dims.border.top + dims.padding.top);
}
