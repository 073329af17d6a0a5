//! Integration tests for block and inline layout.

use boxwood_common::{NullSink, RecordingSink};
use boxwood_css::{
    BoxContent, DisplayKind, LayoutBox, LayoutContext, LayoutError, LayoutTree, MAX_LENGTH_PX,
    MAX_SIZE_ATTR_CHARS, Rect, Rule, Size, Stylesheet,
};
use boxwood_dom::{DomTree, ElementData, NodeId};

/// Every character is 10px wide, every line 10px tall.
fn chars(text: &str, _font_size_px: f32) -> Option<Size> {
    Some(Size::new(text.chars().count() as i32 * 10, 10))
}

fn rule(selector: &str, declarations: &[(&str, &str)]) -> Rule {
    Rule::parse(selector, declarations.iter().copied(), &NullSink).unwrap()
}

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag))
}

fn layout(tree: &DomTree, rules: Vec<Rule>, width: i32) -> LayoutTree {
    let sheets = [Stylesheet { rules }];
    LayoutContext::new(tree, &sheets, &chars)
        .with_sink(&NullSink)
        .layout(Rect::new(0, 0, width, 600))
        .unwrap()
}

fn find(tree: &LayoutTree, node: NodeId) -> &LayoutBox {
    tree.root
        .descendants()
        .into_iter()
        .find(|b| b.content == BoxContent::Node(node))
        .unwrap()
}

/// A document holding a single `<div>` styled by `declarations`.
fn single_div(declarations: &[(&str, &str)], width: i32) -> (LayoutTree, NodeId) {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let mut all = vec![("display", "block")];
    all.extend_from_slice(declarations);
    let laid_out = layout(&tree, vec![rule("div", &all)], width);
    (laid_out, div)
}

// ========== block width ==========

#[test]
fn test_auto_width_and_auto_margins_fill_container() {
    let (tree, div) = single_div(&[("margin", "auto")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, 100);
    assert_eq!(d.margin.left, 0);
    assert_eq!(d.margin.right, 0);
}

#[test]
fn test_auto_width_absorbs_padding_and_border() {
    let (tree, div) = single_div(&[("padding", "5px"), ("border-width", "1px")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, 88);
    assert_eq!(d.content.x, 6);
    assert_eq!(d.margin_rect().width, 100);
}

#[test]
fn test_auto_width_with_negative_underflow() {
    let (tree, div) = single_div(&[("margin-left", "80px"), ("margin-right", "40px")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, 0);
    assert_eq!(d.margin.left, 80);
    assert_eq!(d.margin.right, 20);
}

#[test]
fn test_numeric_margins_right_absorbs_underflow() {
    let (tree, div) = single_div(&[("width", "40px"), ("margin", "0 10px")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, 40);
    assert_eq!(d.margin.left, 10);
    assert_eq!(d.margin.right, 50);
}

#[test]
fn test_auto_right_margin_takes_underflow() {
    let (tree, div) = single_div(
        &[("width", "40px"), ("margin-left", "10px"), ("margin-right", "auto")],
        100,
    );
    let d = find(&tree, div).dimensions;
    assert_eq!((d.margin.left, d.margin.right), (10, 50));
}

#[test]
fn test_auto_left_margin_takes_underflow() {
    let (tree, div) = single_div(
        &[("width", "40px"), ("margin-left", "auto"), ("margin-right", "10px")],
        100,
    );
    let d = find(&tree, div).dimensions;
    assert_eq!((d.margin.left, d.margin.right), (50, 10));
    assert_eq!(d.content.x, 50);
}

#[test]
fn test_both_auto_margins_center() {
    let (tree, div) = single_div(&[("width", "40px"), ("margin", "0 auto")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!((d.margin.left, d.margin.right), (30, 30));

    let (tree, div) = single_div(&[("width", "41px"), ("margin", "0 auto")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!((d.margin.left, d.margin.right), (30, 29));
}

#[test]
fn test_over_constrained_auto_margins_become_zero() {
    let (tree, div) = single_div(&[("width", "150px"), ("margin", "auto")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, 150);
    assert_eq!(d.margin.left, 0);
    assert_eq!(d.margin.right, -50);
}

#[test]
fn test_percent_and_em_widths() {
    let (tree, div) = single_div(&[("width", "50%")], 200);
    assert_eq!(find(&tree, div).dimensions.content.width, 100);

    let (tree, div) = single_div(&[("font-size", "10px"), ("width", "3em")], 200);
    assert_eq!(find(&tree, div).dimensions.content.width, 30);
}

#[test]
fn test_percent_margin_uses_containing_width() {
    let (tree, div) = single_div(&[("width", "50px"), ("margin-left", "10%")], 200);
    assert_eq!(find(&tree, div).dimensions.margin.left, 20);
}

#[test]
fn test_padding_is_pixels_only() {
    let (tree, div) = single_div(&[("padding", "2em")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.padding.left, 0);
    assert_eq!(d.content.width, 100);
}

// ========== vertical flow and height ==========

#[test]
fn test_blocks_stack_vertically() {
    let mut tree = DomTree::new();
    let first = element(&mut tree, NodeId::ROOT, "div");
    let second = element(&mut tree, NodeId::ROOT, "div");
    let laid_out = layout(
        &tree,
        vec![rule("div", &[("display", "block"), ("height", "20px"), ("margin", "5px 0")])],
        100,
    );

    let a = find(&laid_out, first).dimensions;
    let b = find(&laid_out, second).dimensions;
    assert_eq!(a.content.y, 5);
    assert_eq!(a.margin_rect().height, 30);
    assert_eq!(b.content.y, 35);
    assert_eq!(laid_out.root.dimensions.content.height, 60);
    assert_eq!(laid_out.page_size(), Size::new(100, 60));
}

#[test]
fn test_em_height() {
    let (tree, div) = single_div(&[("font-size", "10px"), ("height", "2em")], 100);
    assert_eq!(find(&tree, div).dimensions.content.height, 20);
}

#[test]
fn test_percent_height_is_ignored() {
    let (tree, div) = single_div(&[("height", "50%")], 100);
    assert_eq!(find(&tree, div).dimensions.content.height, 0);
}

#[test]
fn test_unitless_height_is_reported_and_ignored() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let sheets = [Stylesheet {
        rules: vec![rule("div", &[("display", "block"), ("height", "30")])],
    }];
    let sink = RecordingSink::new();
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&sink)
        .layout(Rect::new(0, 0, 100, 100))
        .unwrap();

    assert_eq!(find(&laid_out, div).dimensions.content.height, 0);
    assert!(sink.contains("height '30'"));
}

#[test]
fn test_height_follows_content() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(div, "one two");
    let laid_out = layout(&tree, vec![rule("div", &[("display", "block")])], 100);
    assert_eq!(find(&laid_out, div).dimensions.content.height, 10);
}

#[test]
fn test_overflow_against_viewport() {
    let mut tree = DomTree::new();
    let _div = element(&mut tree, NodeId::ROOT, "div");
    let sheets = [Stylesheet {
        rules: vec![rule("div", &[("display", "block"), ("height", "80px")])],
    }];
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&NullSink)
        .layout(Rect::new(0, 0, 100, 50))
        .unwrap();
    assert_eq!(laid_out.overflow(), Size::new(0, 30));
}

#[test]
fn test_huge_width_saturates_instead_of_overflowing() {
    let (tree, div) = single_div(&[("width", "3000000000px"), ("padding", "1px")], 100);
    let d = find(&tree, div).dimensions;
    assert_eq!(d.content.width, MAX_LENGTH_PX);
    assert_eq!(d.content.x, 1);
    assert_eq!(d.margin_rect().width, 100);
}

#[test]
fn test_extreme_viewport_does_not_overflow() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let sheets = [Stylesheet {
        rules: vec![rule(
            "div",
            &[("display", "block"), ("margin-left", "-10px"), ("height", "20px")],
        )],
    }];
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&NullSink)
        .layout(Rect::new(0, 0, i32::MAX, 100))
        .unwrap();

    let d = find(&laid_out, div).dimensions;
    assert_eq!(d.content.x, -10);
    assert!(d.content.width > 0);
    assert_eq!(d.content.height, 20);
}

// ========== display classification ==========

#[test]
fn test_display_none_removes_subtree() {
    let mut tree = DomTree::new();
    let hidden = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(hidden, "never laid out");
    let shown = element(&mut tree, NodeId::ROOT, "p");

    let sheets = [Stylesheet {
        rules: vec![
            rule("div", &[("display", "none")]),
            rule("p", &[("display", "block"), ("height", "10px")]),
        ],
    }];
    let sink = RecordingSink::new();
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&sink)
        .layout(Rect::new(0, 0, 100, 100))
        .unwrap();

    assert_eq!(laid_out.root.children.len(), 1);
    assert_eq!(laid_out.root.children[0].content, BoxContent::Node(shown));
    assert_eq!(find(&laid_out, shown).dimensions.content.y, 0);
    assert!(sink.contains("display: none"));
}

#[test]
fn test_missing_display_defaults_to_block_with_warning() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p");
    let table = element(&mut tree, NodeId::ROOT, "table");
    let sink = RecordingSink::new();
    let laid_out = LayoutContext::new(&tree, &[], &chars)
        .with_sink(&sink)
        .layout(Rect::new(0, 0, 100, 100))
        .unwrap();

    assert_eq!(find(&laid_out, p).display, DisplayKind::Block);
    assert_eq!(find(&laid_out, table).display, DisplayKind::Table);
    assert!(sink.contains("<p>"));
    assert!(!sink.contains("<table>"));
}

#[test]
fn test_comments_produce_no_boxes() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_comment(div, "note");
    let laid_out = layout(&tree, vec![rule("div", &[("display", "block")])], 100);
    assert!(find(&laid_out, div).children.is_empty());
}

// ========== inline flow ==========

#[test]
fn test_inline_boxes_share_a_line() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let spans: Vec<NodeId> = (0..3).map(|_| element(&mut tree, div, "span")).collect();
    let laid_out = layout(
        &tree,
        vec![
            rule("div", &[("display", "block")]),
            rule("span", &[("display", "inline"), ("width", "30px"), ("height", "10px")]),
        ],
        100,
    );

    let xs: Vec<i32> = spans
        .iter()
        .map(|s| find(&laid_out, *s).dimensions.content.x)
        .collect();
    assert_eq!(xs, vec![0, 30, 60]);
    assert_eq!(find(&laid_out, div).dimensions.content.height, 10);
}

#[test]
fn test_inline_box_wraps_when_line_is_full() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let first = element(&mut tree, div, "span");
    let second = element(&mut tree, div, "span");
    let laid_out = layout(
        &tree,
        vec![
            rule("div", &[("display", "block")]),
            rule("span", &[("display", "inline"), ("width", "60px"), ("height", "10px")]),
        ],
        100,
    );

    let a = find(&laid_out, first).dimensions;
    let b = find(&laid_out, second).dimensions;
    assert_eq!((a.content.x, a.content.y), (0, 0));
    assert_eq!((b.content.x, b.content.y), (0, 10));
    assert_eq!(find(&laid_out, div).dimensions.content.height, 20);
    assert_eq!(find(&laid_out, div).children.len(), 2);
}

#[test]
fn test_block_child_breaks_the_line() {
    let mut tree = DomTree::new();
    let span = element(&mut tree, NodeId::ROOT, "span");
    let div = element(&mut tree, NodeId::ROOT, "div");
    let laid_out = layout(
        &tree,
        vec![
            rule("span", &[("display", "inline"), ("width", "30px"), ("height", "10px")]),
            rule("div", &[("display", "block"), ("height", "5px")]),
        ],
        100,
    );

    assert_eq!(find(&laid_out, span).dimensions.content.y, 0);
    assert_eq!(find(&laid_out, div).dimensions.content.y, 10);
    assert_eq!(find(&laid_out, div).dimensions.content.x, 0);
    assert_eq!(laid_out.root.dimensions.content.height, 15);
}

#[test]
fn test_inline_block_shrinks_to_widest_line() {
    let mut tree = DomTree::new();
    let span = element(&mut tree, NodeId::ROOT, "span");
    tree.append_text(span, "abc");
    let laid_out = layout(&tree, vec![rule("span", &[("display", "inline")])], 100);

    let b = find(&laid_out, span);
    assert_eq!(b.dimensions.content.width, 30);
    assert_eq!(b.dimensions.content.height, 10);
    assert_eq!(b.children.len(), 1);
    assert_eq!(b.children[0].text(), Some("abc"));
    assert_eq!(b.children[0].node(), tree.children(span).first().copied());
}

#[test]
fn test_text_wraps_inside_narrow_block() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(div, "aaa bbb ccc");
    let laid_out = layout(&tree, vec![rule("div", &[("display", "block")])], 75);

    let b = find(&laid_out, div);
    let fragments: Vec<&str> = b.children.iter().filter_map(LayoutBox::text).collect();
    assert_eq!(fragments, vec!["aaa bbb", "ccc"]);
    assert_eq!(b.children[1].dimensions.content.y, 10);
    assert_eq!(b.dimensions.content.height, 20);
}

// ========== intrinsic sizes ==========

fn inline_element(tag: &str, attrs: &[(&str, &str)], extra: &[(&str, &str)]) -> LayoutBox {
    let mut tree = DomTree::new();
    let data = attrs
        .iter()
        .fold(ElementData::new(tag), |data, (name, value)| data.with_attr(name, value));
    let node = tree.append_element(NodeId::ROOT, data);
    let mut declarations = vec![("display", "inline")];
    declarations.extend_from_slice(extra);
    let laid_out = layout(&tree, vec![rule(tag, &declarations)], 200);
    find(&laid_out, node).clone()
}

#[test]
fn test_submit_input_measures_its_label() {
    let b = inline_element("input", &[("type", "submit"), ("value", "Go")], &[]);
    assert_eq!(b.dimensions.content.size(), Size::new(20, 10));

    let b = inline_element("input", &[("type", "SUBMIT")], &[]);
    assert_eq!(b.dimensions.content.width, 60);
}

#[test]
fn test_explicit_width_beats_intrinsic() {
    let b = inline_element(
        "input",
        &[("type", "submit"), ("value", "Go")],
        &[("width", "100px")],
    );
    assert_eq!(b.dimensions.content.width, 100);
}

#[test]
fn test_size_attribute_counts_characters() {
    let b = inline_element("input", &[("size", "5")], &[]);
    assert_eq!(b.dimensions.content.size(), Size::new(50, 10));
}

#[test]
fn test_size_attribute_is_capped() {
    let mut tree = DomTree::new();
    let input = tree.append_element(
        NodeId::ROOT,
        ElementData::new("input").with_attr("size", "2147483647"),
    );
    let sheets = [Stylesheet {
        rules: vec![rule("input", &[("display", "inline")])],
    }];
    let sink = RecordingSink::new();
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&sink)
        .layout(Rect::new(0, 0, 200, 100))
        .unwrap();

    let width = MAX_SIZE_ATTR_CHARS as i32 * 10;
    assert_eq!(find(&laid_out, input).dimensions.content.size(), Size::new(width, 10));
    assert!(sink.contains("capped"));
}

#[test]
fn test_image_size_from_attributes() {
    let b = inline_element("img", &[("width", "20"), ("height", "30")], &[]);
    assert_eq!(b.dimensions.content.size(), Size::new(20, 30));

    let b = inline_element("img", &[("width", "20"), ("height", "30")], &[("height", "5px")]);
    assert_eq!(b.dimensions.content.height, 5);
}

#[test]
fn test_image_size_from_callback() {
    fn images(src: &str) -> Option<Size> {
        (src == "cat.png").then_some(Size::new(64, 48))
    }

    let mut tree = DomTree::new();
    let known = tree.append_element(NodeId::ROOT, ElementData::new("img").with_attr("src", "cat.png"));
    let unknown = tree.append_element(NodeId::ROOT, ElementData::new("img").with_attr("src", "dog.png"));
    let sheets = [Stylesheet {
        rules: vec![rule("img", &[("display", "inline")])],
    }];
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_images(&images)
        .with_sink(&NullSink)
        .layout(Rect::new(0, 0, 200, 100))
        .unwrap();

    assert_eq!(find(&laid_out, known).dimensions.content.size(), Size::new(64, 48));
    assert_eq!(find(&laid_out, unknown).dimensions.content.size(), Size::new(0, 0));
}

#[test]
fn test_block_uses_intrinsic_width() {
    let mut tree = DomTree::new();
    let img = tree.append_element(
        NodeId::ROOT,
        ElementData::new("img")
            .with_attr("width", "20")
            .with_attr("height", "30"),
    );
    let laid_out = layout(&tree, vec![rule("img", &[("display", "block")])], 100);
    let d = find(&laid_out, img).dimensions;
    assert_eq!(d.content.width, 20);
    assert_eq!(d.content.height, 30);
    assert_eq!(d.margin.right, 80);
}

// ========== fonts and inheritance ==========

#[test]
fn test_font_size_resolution() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let big = element(&mut tree, div, "span");
    let small = element(&mut tree, div, "em");
    let text = tree.append_text(big, "x");
    let laid_out = layout(
        &tree,
        vec![
            rule("div", &[("display", "block"), ("font-size", "10px")]),
            rule("span", &[("display", "inline"), ("font-size", "2em")]),
            rule("em", &[("display", "inline"), ("font-size", "50%")]),
        ],
        100,
    );

    assert!((find(&laid_out, div).font_size_px - 10.0).abs() < f32::EPSILON);
    assert!((find(&laid_out, big).font_size_px - 20.0).abs() < f32::EPSILON);
    assert!((find(&laid_out, small).font_size_px - 5.0).abs() < f32::EPSILON);

    let fragment = find(&laid_out, big).children.first().unwrap();
    assert_eq!(fragment.node(), Some(text));
    assert!((fragment.font_size_px - 20.0).abs() < f32::EPSILON);
    assert!((laid_out.root.font_size_px - 8.0).abs() < f32::EPSILON);
}

#[test]
fn test_color_is_inherited_by_text() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(div, "hello");
    let laid_out = layout(
        &tree,
        vec![rule("div", &[("display", "block"), ("color", "red"), ("padding", "3px")])],
        100,
    );

    let text = &find(&laid_out, div).children[0];
    assert_eq!(text.style.keyword("color"), Some("red"));
    assert!(!text.style.has("padding"));
}

// ========== passes ==========

#[test]
fn test_layout_is_repeatable() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(div, "some words to wrap around");
    let rules = || {
        vec![rule(
            "div",
            &[("display", "block"), ("width", "60px"), ("margin", "auto"), ("padding", "2px")],
        )]
    };

    let first = layout(&tree, rules(), 100);
    let second = layout(&tree, rules(), 100);
    assert_eq!(first, second);
}

#[test]
fn test_layout_node_rejects_unknown_node() {
    let tree = DomTree::new();
    let result = LayoutContext::new(&tree, &[], &chars)
        .with_sink(&NullSink)
        .layout_node(NodeId(99), Rect::new(0, 0, 100, 100));
    assert_eq!(result, Err(LayoutError::MissingNode(NodeId(99))));
}

#[test]
fn test_layout_node_lays_out_subtree() {
    let mut tree = DomTree::new();
    let outer = element(&mut tree, NodeId::ROOT, "section");
    let inner = element(&mut tree, outer, "div");
    let sheets = [Stylesheet {
        rules: vec![rule("div", &[("display", "block"), ("height", "7px")])],
    }];
    let laid_out = LayoutContext::new(&tree, &sheets, &chars)
        .with_sink(&NullSink)
        .layout_node(outer, Rect::new(10, 20, 50, 50))
        .unwrap();

    assert_eq!(laid_out.root.content, BoxContent::Node(outer));
    let d = find(&laid_out, inner).dimensions;
    assert_eq!((d.content.x, d.content.y, d.content.width), (10, 20, 50));
}

#[test]
fn test_cached_dimensions_snapshot() {
    let (tree, div) = single_div(&[("width", "40px"), ("padding", "1px"), ("margin", "2px")], 100);
    let b = find(&tree, div);
    let cached = b.cached();
    assert_eq!(cached.margin_rect, b.dimensions.margin_rect());
    assert_eq!(cached.padding_rect.width, 42);

    let moved = cached.translate(0, -10);
    assert_eq!(moved.content.y, cached.content.y - 10);
    assert_eq!(moved.border_rect.width, cached.border_rect.width);
}
