//! Per-node resolved style and its typed accessors.

use boxwood_common::DiagnosticSink;

use crate::sides::Sides;
use crate::stylesheet::{Declaration, add_or_override};
use crate::values::{Color, Number, StyleValue, Unit, round_px};

/// Ordered property map for one node.
///
/// Built by [`crate::cascade::resolve`]. Each property appears once; its
/// value list is whatever the last applicable declaration said.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    declarations: Vec<Declaration>,
}

impl ResolvedStyle {
    /// A style with no declarations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build directly from declarations, applying later-wins.
    #[must_use]
    pub fn from_declarations(declarations: impl IntoIterator<Item = Declaration>) -> Self {
        let mut style = Self::new();
        style.apply(declarations);
        style
    }

    /// Merge more declarations in; later ones replace earlier ones.
    pub fn apply(&mut self, declarations: impl IntoIterator<Item = Declaration>) {
        add_or_override(&mut self.declarations, declarations);
    }

    /// All declarations in order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// True when nothing applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Every value token of `property`, empty if unset.
    #[must_use]
    pub fn values(&self, property: &str) -> &[StyleValue] {
        self.declarations
            .iter()
            .find(|d| d.property.eq_ignore_ascii_case(property))
            .map_or(&[], |d| d.values.as_slice())
    }

    /// Whether `property` has at least one value.
    #[must_use]
    pub fn has(&self, property: &str) -> bool {
        !self.values(property).is_empty()
    }

    /// First value of `property`.
    #[must_use]
    pub fn value(&self, property: &str) -> Option<&StyleValue> {
        self.values(property).first()
    }

    /// First keyword among the values of `property`.
    #[must_use]
    pub fn keyword(&self, property: &str) -> Option<&str> {
        self.values(property).iter().find_map(StyleValue::as_keyword)
    }

    /// First number among the values of `property`.
    #[must_use]
    pub fn number(&self, property: &str) -> Option<Number> {
        self.values(property).iter().find_map(StyleValue::as_number)
    }

    /// First value of `property` that reads as a color, named colors
    /// included.
    #[must_use]
    pub fn color(&self, property: &str) -> Option<Color> {
        self.values(property).iter().find_map(StyleValue::as_color)
    }

    /// Per-side values of a box property such as `margin`.
    ///
    /// Each side takes its longhand (`margin-left`) when present, otherwise
    /// the matching entry of the shorthand's 1/2/3/4 value list.
    #[must_use]
    pub fn sides(&self, property: &str) -> Sides<Option<StyleValue>> {
        self.sides_with(property, |side| format!("{property}-{side}"))
    }

    /// Per-side pixel values of a box property.
    ///
    /// Only `px` values count; anything else on a side reads as 0. Padding
    /// and border are pixel-only for that reason, while margins go through
    /// [`Self::sides`] so `auto`, `%` and `em` work.
    #[must_use]
    pub fn sides_px(&self, property: &str) -> Sides<i32> {
        self.sides(property).map(|v| pixels_only(v.as_ref()))
    }

    /// Border widths in pixels.
    ///
    /// `border-width` and `border-{side}-width` take precedence; without
    /// them the first pixel value of the `border` shorthand applies to all
    /// four sides.
    #[must_use]
    pub fn border_widths_px(&self) -> Sides<i32> {
        let explicit = self.sides_with("border-width", |side| format!("border-{side}-width"));
        let any_explicit = [&explicit.top, &explicit.left, &explicit.bottom, &explicit.right]
            .iter()
            .any(|side| side.is_some());
        if any_explicit {
            return explicit.map(|v| pixels_only(v.as_ref()));
        }
        let width = self
            .values("border")
            .iter()
            .filter_map(StyleValue::as_number)
            .find(|n| n.unit == Unit::Pixels)
            .map_or(0, |n| round_px(n.value));
        Sides::all(width)
    }

    /// Resolve `property`'s first number to pixels if it has one.
    pub fn length_px(
        &self,
        property: &str,
        containing_width: i32,
        font_size_px: f32,
        sink: &dyn DiagnosticSink,
    ) -> Option<i32> {
        self.number(property)
            .map(|n| n.to_pixels(containing_width, font_size_px, sink))
    }

    /// Declarations whose property is in `allow`, for handing to children.
    #[must_use]
    pub fn inherited_subset(&self, allow: &[String]) -> Vec<Declaration> {
        self.declarations
            .iter()
            .filter(|d| allow.iter().any(|p| p.eq_ignore_ascii_case(&d.property)))
            .cloned()
            .collect()
    }

    fn sides_with(&self, shorthand: &str, longhand: impl Fn(&str) -> String) -> Sides<Option<StyleValue>> {
        let base: Sides<Option<StyleValue>> = {
            let values: Vec<Option<StyleValue>> =
                self.values(shorthand).iter().cloned().map(Some).collect();
            Sides::from_values(&values).unwrap_or_default()
        };
        let side = |name: &str, fallback: &Option<StyleValue>| {
            self.value(&longhand(name)).cloned().or_else(|| fallback.clone())
        };
        Sides {
            top: side("top", &base.top),
            left: side("left", &base.left),
            bottom: side("bottom", &base.bottom),
            right: side("right", &base.right),
        }
    }
}

fn pixels_only(value: Option<&StyleValue>) -> i32 {
    match value.and_then(StyleValue::as_number) {
        Some(n) if n.unit == Unit::Pixels => round_px(n.value),
        _ => 0,
    }
}
