//! Table layout.
//!
//! Rows come from `<tr>` children of the table, directly or inside
//! `<thead>`, `<tbody>` and `<tfoot>`. Cells are their `<td>` and `<th>`
//! children. Short rows are padded with anonymous cells so the grid is
//! rectangular.
//!
//! Sizing takes two passes. Every column starts at an even share of the
//! table. The first pass lays each cell out in a slot as wide as its column
//! so far and grows the column to the cell's width, so only content that
//! cannot wrap (a long word, an image, an explicit width) widens a column.
//! The second lays every cell out again in a slot exactly as wide as its
//! column and stacks the rows.

use boxwood_dom::NodeId;

use crate::error::LayoutError;
use crate::selector::StyleSubject;
use crate::style::ResolvedStyle;

use super::LayoutContext;
use super::block::{block_position, block_width};
use super::box_model::{Dimensions, Rect};
use super::builder::{font_size_for, style_child, style_subject};
use super::inline::layout_inline_block;
use super::layout_box::{BoxContent, DisplayKind, GridPosition, LayoutBox, TableMetrics};

const ROW_GROUPS: &[&str] = &["thead", "tbody", "tfoot"];

/// Lay out a table box inside `parent`.
pub(crate) fn layout_table(
    ctx: &LayoutContext<'_>,
    b: &mut LayoutBox,
    parent: &Dimensions,
) -> Result<(), LayoutError> {
    let mut dims = block_width(ctx, b, parent.max_width, None);
    block_position(ctx, b, parent, &mut dims);

    let mut rows = collect_rows(ctx, b);
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    pad_rows(ctx, b, &mut rows, columns);

    let spacing = ctx.config.cell_spacing_px;
    let gaps = |n: usize| {
        spacing.saturating_mul(i32::try_from(n.saturating_sub(1)).unwrap_or(i32::MAX))
    };

    // Pass 1: natural column widths.
    let even_share = if columns == 0 {
        0
    } else {
        (dims.content.width.saturating_sub(gaps(columns))
            / i32::try_from(columns).unwrap_or(i32::MAX))
        .max(0)
    };
    let mut column_widths = vec![even_share; columns];
    for row in &mut rows {
        for (column, cell) in row.iter_mut().enumerate() {
            let seed = Dimensions {
                content: Rect::new(dims.content.x, dims.content.y, 0, 0),
                max_width: column_widths[column],
                ..Dimensions::default()
            };
            layout_inline_block(ctx, cell, &seed)?;
            column_widths[column] =
                column_widths[column].max(cell.dimensions.margin_rect().width);
        }
    }

    // Pass 2: final placement.
    let mut row_heights = Vec::with_capacity(rows.len());
    let mut children = Vec::with_capacity(rows.len() * columns);
    let mut y: i32 = 0;
    for (row_index, row) in rows.into_iter().enumerate() {
        if row_index > 0 {
            y = y.saturating_add(spacing);
        }
        let mut x = 0;
        let mut row_height = 0;
        for (column, mut cell) in row.into_iter().enumerate() {
            let slot = Dimensions {
                content: Rect::new(
                    dims.content.x.saturating_add(x),
                    dims.content.y.saturating_add(y),
                    0,
                    0,
                ),
                max_width: column_widths[column],
                ..Dimensions::default()
            };
            layout_inline_block(ctx, &mut cell, &slot)?;
            row_height = row_height.max(cell.dimensions.margin_rect().height);
            cell.grid_position = Some(GridPosition {
                row: row_index,
                column,
            });
            children.push(cell);
            x = x.saturating_add(column_widths[column]).saturating_add(spacing);
        }
        row_heights.push(row_height);
        y = y.saturating_add(row_height);
    }

    let grid_width = column_widths
        .iter()
        .fold(gaps(columns), |total, w| total.saturating_add(*w));
    dims.content.width = dims.content.width.max(grid_width);
    dims.max_width = dims.content.width;
    dims.content.height = y.max(ctx.resolve_height(b, y, None));

    #[cfg(feature = "layout-trace")]
    log::trace!(
        target: "boxwood::layout",
        "table {columns} columns {column_widths:?}, rows {row_heights:?}"
    );

    b.dimensions = dims;
    b.children = children;
    b.table = Some(TableMetrics {
        column_widths,
        row_heights,
    });
    Ok(())
}

/// Unlaid cell boxes, row by row, in document order.
fn collect_rows(ctx: &LayoutContext<'_>, table: &LayoutBox) -> Vec<Vec<LayoutBox>> {
    let Some(table_node) = table.node() else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for &child in ctx.tree.children(table_node) {
        if is_ignorable(ctx, child) {
            continue;
        }
        match element_name(ctx, child) {
            Some("tr") => rows.push(collect_cells(ctx, child, &table.style, table.font_size_px)),
            Some(group) if ROW_GROUPS.contains(&group) => {
                let group_style = style_child(ctx, child, &table.style);
                let group_font = font_size_for(ctx, &group_style, table.font_size_px);
                for &row in ctx.tree.children(child) {
                    if is_ignorable(ctx, row) {
                        continue;
                    }
                    if element_name(ctx, row) == Some("tr") {
                        rows.push(collect_cells(ctx, row, &group_style, group_font));
                    } else {
                        unexpected(ctx, row, "row");
                    }
                }
            }
            _ => unexpected(ctx, child, "row"),
        }
    }
    rows
}

fn collect_cells(
    ctx: &LayoutContext<'_>,
    row: NodeId,
    parent_style: &ResolvedStyle,
    parent_font: f32,
) -> Vec<LayoutBox> {
    let row_style = style_child(ctx, row, parent_style);
    let row_font = font_size_for(ctx, &row_style, parent_font);

    let mut cells = Vec::new();
    for &cell in ctx.tree.children(row) {
        if is_ignorable(ctx, cell) {
            continue;
        }
        if !matches!(element_name(ctx, cell), Some("td" | "th")) {
            unexpected(ctx, cell, "cell");
            continue;
        }
        let style = style_child(ctx, cell, &row_style);
        let font = font_size_for(ctx, &style, row_font);
        cells.push(LayoutBox::new(
            BoxContent::Node(cell),
            DisplayKind::InlineBlock,
            style,
            font,
        ));
    }
    cells
}

/// Pad every row to `columns` cells.
fn pad_rows(ctx: &LayoutContext<'_>, table: &LayoutBox, rows: &mut [Vec<LayoutBox>], columns: usize) {
    let subject = StyleSubject::named("td");
    for (index, row) in rows.iter_mut().enumerate() {
        let missing = columns - row.len();
        if missing == 0 {
            continue;
        }
        ctx.sink.info(
            "layout",
            &format!("table row {index} has {} of {columns} cells, padding", row.len()),
        );
        let style = style_subject(ctx, &subject, &table.style);
        let font = font_size_for(ctx, &style, table.font_size_px);
        row.extend((0..missing).map(|_| {
            LayoutBox::new(
                BoxContent::AnonymousCell,
                DisplayKind::InlineBlock,
                style.clone(),
                font,
            )
        }));
    }
}

fn element_name<'t>(ctx: &LayoutContext<'t>, node: NodeId) -> Option<&'t str> {
    ctx.tree.as_element(node).map(|e| e.tag_name.as_str())
}

/// Comments and whitespace between rows and cells.
fn is_ignorable(ctx: &LayoutContext<'_>, node: NodeId) -> bool {
    ctx.tree.is_comment(node)
        || ctx
            .tree
            .as_text(node)
            .is_some_and(|text| text.trim().is_empty())
}

fn unexpected(ctx: &LayoutContext<'_>, node: NodeId, role: &str) {
    ctx.sink.warn(
        "layout",
        &format!(
            "unexpected <{}> as a table {role}, skipping",
            ctx.tree.node_name(node)
        ),
    );
}
