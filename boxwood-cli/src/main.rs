//! Boxwood CLI - lay out a JSON document fixture and print the box tree.
//!
//! Run with: cargo run --bin boxwood -- fixtures/sample.json

mod fixture;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use boxwood_common::{DiagnosticSink, LogSink, StderrSink};
use boxwood_css::{
    BoxContent, CachedDimensions, DisplayKind, GridPosition, LayoutBox, LayoutContext, LayoutTree,
    MonospaceMeasurer, Rect, Sides, Size, TableMetrics,
};
use boxwood_dom::DomTree;
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;

use fixture::Fixture;

/// Boxwood - block, inline and table layout for styled document trees
#[derive(Parser, Debug)]
#[command(name = "boxwood")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the layout tree
    boxwood fixtures/sample.json

    # Narrow viewport, bigger default font
    boxwood --width 320 --font-size 12 fixtures/sample.json

    # Machine-readable output
    boxwood --json fixtures/sample.json

    # Route diagnostics through RUST_LOG instead of stderr
    RUST_LOG=boxwood=debug boxwood --log fixtures/sample.json
"#)]
struct Cli {
    /// Path to a JSON document fixture
    #[arg(value_name = "FILE")]
    fixture: PathBuf,

    /// Viewport width
    #[arg(long, default_value = "800")]
    width: i32,

    /// Viewport height
    #[arg(long, default_value = "600")]
    height: i32,

    /// Override the root font size from the fixture's config
    #[arg(long, value_name = "PX")]
    font_size: Option<f32>,

    /// Print the layout tree as JSON
    #[arg(long)]
    json: bool,

    /// Also print informational diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Send diagnostics to the log instead of stderr
    #[arg(long)]
    log: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let json = fs::read_to_string(&cli.fixture)
        .with_context(|| format!("cannot read {}", cli.fixture.display()))?;
    let fixture = Fixture::from_json(&json)?;

    let sink: Box<dyn DiagnosticSink> = if cli.log {
        Box::new(LogSink)
    } else if cli.verbose {
        Box::new(StderrSink::verbose())
    } else {
        Box::new(StderrSink::new())
    };

    let tree = fixture.build_tree();
    let sheets = fixture.build_stylesheets(sink.as_ref())?;
    let mut config = fixture.config.clone().unwrap_or_default();
    if let Some(font_size) = cli.font_size {
        config.default_font_size_px = font_size;
    }

    let measurer = MonospaceMeasurer::default();
    let images = |src: &str| fixture.image_size(src);
    let viewport = Rect::new(0, 0, cli.width, cli.height);
    log::debug!(
        "laying out {} nodes against {}x{}",
        tree.len(),
        viewport.width,
        viewport.height
    );

    let layout = LayoutContext::new(&tree, &sheets, &measurer)
        .with_images(&images)
        .with_sink(sink.as_ref())
        .with_config(config)
        .layout(viewport)
        .context("layout failed")?;

    if cli.json {
        let report = JsonReport {
            page_size: layout.page_size(),
            overflow: layout.overflow(),
            root: JsonBox::new(&layout.root, &tree),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_layout(&layout, &tree);
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport {
    page_size: Size,
    overflow: Size,
    root: JsonBox,
}

#[derive(Serialize)]
struct JsonBox {
    name: String,
    display: DisplayKind,
    dimensions: CachedDimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid_position: Option<GridPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<TableMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonBox>,
}

impl JsonBox {
    fn new(layout_box: &LayoutBox, tree: &DomTree) -> Self {
        Self {
            name: box_name(layout_box, tree),
            display: layout_box.display,
            dimensions: layout_box.cached(),
            grid_position: layout_box.grid_position,
            table: layout_box.table.clone(),
            children: layout_box
                .children
                .iter()
                .map(|child| Self::new(child, tree))
                .collect(),
        }
    }
}

fn print_layout(layout: &LayoutTree, tree: &DomTree) {
    print_layout_box(&layout.root, 0, tree);

    let page = layout.page_size();
    println!("{} {}x{}", "page:".bold(), page.width, page.height);
    let overflow = layout.overflow();
    if overflow.width > 0 || overflow.height > 0 {
        println!(
            "{} {}x{}",
            "overflow:".yellow().bold(),
            overflow.width.max(0),
            overflow.height.max(0)
        );
    }
}

/// Recursively print a layout box with its dimensions
fn print_layout_box(layout_box: &LayoutBox, depth: usize, tree: &DomTree) {
    let indent = "  ".repeat(depth);
    let dims = &layout_box.dimensions;

    let mut header = format!(
        "{}[{}] {}",
        indent,
        box_name(layout_box, tree).cyan(),
        layout_box.display.dimmed()
    );
    if let Some(position) = layout_box.grid_position {
        header.push_str(&format!(" row={} col={}", position.row, position.column));
    }
    println!("{header}");
    println!(
        "{}  content: x={} y={} w={} h={}",
        indent, dims.content.x, dims.content.y, dims.content.width, dims.content.height
    );
    print_sides(&indent, "margin", &dims.margin);
    print_sides(&indent, "padding", &dims.padding);
    print_sides(&indent, "border", &dims.border);
    if let Some(table) = &layout_box.table {
        println!(
            "{}  columns: {:?} rows: {:?}",
            indent, table.column_widths, table.row_heights
        );
    }

    for child in &layout_box.children {
        print_layout_box(child, depth + 1, tree);
    }
}

fn print_sides(indent: &str, label: &str, sides: &Sides<i32>) {
    if sides.top == 0 && sides.right == 0 && sides.bottom == 0 && sides.left == 0 {
        return;
    }
    println!(
        "{}  {}: t={} r={} b={} l={}",
        indent, label, sides.top, sides.right, sides.bottom, sides.left
    );
}

fn box_name(layout_box: &LayoutBox, tree: &DomTree) -> String {
    match &layout_box.content {
        BoxContent::Node(id) => tree.as_element(*id).map_or_else(
            || format!("{} ({})", tree.node_name(*id), id.0),
            |element| format!("<{}> ({})", element.tag_name, id.0),
        ),
        BoxContent::TextFragment { text, .. } => {
            let preview: String = text.chars().take(30).collect();
            let suffix = if text.chars().count() > 30 { "..." } else { "" };
            format!("Text(\"{preview}{suffix}\")")
        }
        BoxContent::AnonymousCell => "AnonymousCell".to_string(),
    }
}
