//! Box tree construction.
//!
//! Children are built lazily, one level at a time, by whichever layout
//! function owns the parent. That keeps text wrapping tied to the width the
//! parent actually has when its children are laid out.

use boxwood_dom::{NodeId, NodeType};

use crate::cascade::resolve;
use crate::error::LayoutError;
use crate::selector::StyleSubject;
use crate::style::ResolvedStyle;
use crate::values::{StyleValue, Unit};

use super::LayoutContext;
use super::box_model::Dimensions;
use super::inline::break_text;
use super::layout_box::{BoxContent, DisplayKind, LayoutBox};

/// Decide how a node flows.
///
/// An explicit `display` keyword wins. Otherwise the document is a block,
/// text is inline, `<table>` is a table, and every other element is a block.
/// The last case is reported since it usually means a missing UA rule.
pub(crate) fn classify(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: &ResolvedStyle,
) -> DisplayKind {
    let explicit = style
        .keyword("display")
        .map_or(DisplayKind::Undefined, DisplayKind::from_keyword);
    if explicit != DisplayKind::Undefined {
        return explicit;
    }

    match ctx.tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Document) | None => DisplayKind::Block,
        Some(NodeType::Text(_) | NodeType::Comment(_)) => DisplayKind::InlineBlock,
        Some(NodeType::Element(element)) if element.tag_name == "table" => DisplayKind::Table,
        Some(NodeType::Element(element)) => {
            ctx.sink.warn(
                "layout",
                &format!("no display specified for <{}>, using block", element.tag_name),
            );
            DisplayKind::Block
        }
    }
}

/// Used font size of a box whose parent uses `parent_font_px`.
///
/// `px` sets it outright; `em` and `%` scale the parent's size. Anything
/// else keeps the parent's size.
pub(crate) fn font_size_for(
    ctx: &LayoutContext<'_>,
    style: &ResolvedStyle,
    parent_font_px: f32,
) -> f32 {
    let Some(size) = style.number("font-size") else {
        return parent_font_px;
    };
    match size.unit {
        Unit::Pixels => size.value,
        Unit::Em => size.value * parent_font_px,
        Unit::Percentage => size.value / 100.0 * parent_font_px,
        Unit::None | Unit::Unknown => {
            ctx.sink.warn(
                "layout",
                &format!("font-size '{size}' needs a unit; keeping {parent_font_px}px"),
            );
            parent_font_px
        }
    }
}

/// The unlaid box for the node layout starts from.
pub(crate) fn root_box(ctx: &LayoutContext<'_>, root: NodeId) -> LayoutBox {
    let subject = StyleSubject::from_node(ctx.tree, root);
    let style = resolve(&subject, ctx.stylesheets, &[]);
    let font = font_size_for(ctx, &style, ctx.config.default_font_size_px);
    let display = classify(ctx, root, &style);

    #[cfg(feature = "layout-trace")]
    log::trace!(target: "boxwood::layout", "root {} is {display}", subject.name);

    LayoutBox::new(BoxContent::Node(root), display, style, font)
}

/// Style `node` as a child of a box styled `parent_style`.
pub(crate) fn style_child(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    parent_style: &ResolvedStyle,
) -> ResolvedStyle {
    let subject = if ctx.tree.as_text(node).is_some() {
        StyleSubject::named("#text")
    } else {
        StyleSubject::from_node(ctx.tree, node)
    };
    style_subject(ctx, &subject, parent_style)
}

/// Style a synthesized box that matches rules by `subject` alone.
pub(crate) fn style_subject(
    ctx: &LayoutContext<'_>,
    subject: &StyleSubject<'_>,
    parent_style: &ResolvedStyle,
) -> ResolvedStyle {
    let inherited = parent_style.inherited_subset(&ctx.config.inherited_properties);
    resolve(subject, ctx.stylesheets, &inherited)
}

/// Build the unlaid child boxes of `parent`.
///
/// Comments and `display: none` subtrees produce nothing. Each text node is
/// wrapped against `dims.max_width` and yields one box per fragment.
pub(crate) fn build_children(
    ctx: &LayoutContext<'_>,
    parent: &LayoutBox,
    dims: &Dimensions,
) -> Result<Vec<LayoutBox>, LayoutError> {
    let BoxContent::Node(parent_node) = parent.content else {
        return Ok(Vec::new());
    };

    let mut boxes = Vec::new();
    for &child in ctx.tree.children(parent_node) {
        if ctx.tree.is_comment(child) {
            continue;
        }

        let style = style_child(ctx, child, &parent.style);
        let font = font_size_for(ctx, &style, parent.font_size_px);
        let display = classify(ctx, child, &style);
        if display == DisplayKind::None {
            ctx.sink.info(
                "layout",
                &format!("skipping {} with display: none", ctx.tree.node_name(child)),
            );
            continue;
        }

        if let Some(text) = ctx.tree.as_text(child) {
            let fragments = break_text(
                text,
                dims.max_width,
                font,
                ctx.measurer,
                ctx.config.wrap_iteration_cap,
            )?;
            boxes.extend(fragments.into_iter().map(|text| {
                LayoutBox::new(
                    BoxContent::TextFragment {
                        source: child,
                        text,
                    },
                    display,
                    style.clone(),
                    font,
                )
            }));
            continue;
        }

        boxes.push(LayoutBox::new(BoxContent::Node(child), display, style, font));
    }
    Ok(boxes)
}

/// Explicit `width`, resolved against `containing_width`.
pub(crate) fn explicit_width(
    ctx: &LayoutContext<'_>,
    b: &LayoutBox,
    containing_width: i32,
) -> Option<i32> {
    b.style
        .length_px("width", containing_width, b.font_size_px, ctx.sink)
}

/// One margin in pixels. `auto` and non-lengths count as 0.
pub(crate) fn margin_px(
    ctx: &LayoutContext<'_>,
    b: &LayoutBox,
    side: Option<&StyleValue>,
    containing_width: i32,
) -> i32 {
    side.and_then(StyleValue::as_number)
        .map_or(0, |n| n.to_pixels(containing_width, b.font_size_px, ctx.sink))
}
