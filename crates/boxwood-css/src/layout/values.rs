//! Values that stay unresolved until layout.

use boxwood_common::DiagnosticSink;

use crate::sides::Sides;
use crate::style::ResolvedStyle;
use crate::values::StyleValue;

/// A pixel length or `auto`, which only the width algorithm can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoOr {
    /// Resolved by the constraint rules.
    #[default]
    Auto,
    /// A used length in pixels.
    Px(i32),
}

impl AutoOr {
    /// Check if the value is `auto`.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The length, or `default` for `auto`.
    #[must_use]
    pub const fn px_or(self, default: i32) -> i32 {
        match self {
            Self::Px(v) => v,
            Self::Auto => default,
        }
    }

    /// Interpret one margin token.
    ///
    /// `auto` stays auto, numbers go through unit resolution, anything else
    /// (including an absent value) is 0.
    #[must_use]
    pub fn from_margin(
        value: Option<&StyleValue>,
        containing_width: i32,
        font_size_px: f32,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        match value {
            Some(v) if v.is_keyword("auto") => Self::Auto,
            Some(StyleValue::Number(n)) => Self::Px(n.to_pixels(containing_width, font_size_px, sink)),
            _ => Self::Px(0),
        }
    }
}

/// Margins of a box as `auto`-or-pixels.
pub(crate) fn margin_sides(
    style: &ResolvedStyle,
    containing_width: i32,
    font_size_px: f32,
    sink: &dyn DiagnosticSink,
) -> Sides<AutoOr> {
    style
        .sides("margin")
        .map(|v| AutoOr::from_margin(v.as_ref(), containing_width, font_size_px, sink))
}
