//! Box model geometry in whole pixels.
//!
//! ```text
//! margin rect
//! └─ border rect  = padding rect extended by border
//!    └─ padding rect = content extended by padding
//!       └─ content
//! ```
//!
//! Only `content` and the three side sets are stored. The outer rectangles
//! are derived on every call so they can never disagree with the sides.

use serde::Serialize;

use crate::sides::Sides;

/// An axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

/// A width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// Construct a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// `x + width`
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// `y + height`
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Grow outward by `sides`, saturating at the `i32` range.
    #[must_use]
    pub const fn extend(&self, sides: &Sides<i32>) -> Self {
        Self {
            x: self.x.saturating_sub(sides.left),
            y: self.y.saturating_sub(sides.top),
            width: self.width.saturating_add(sides.left).saturating_add(sides.right),
            height: self.height.saturating_add(sides.top).saturating_add(sides.bottom),
        }
    }

    /// Move by an offset.
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }
}

/// Geometry of one box, plus the cursor state its children flow against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    /// Content area.
    pub content: Rect,
    /// Padding widths.
    pub padding: Sides<i32>,
    /// Border widths.
    pub border: Sides<i32>,
    /// Margin widths (may be negative after over-constrained resolution).
    pub margin: Sides<i32>,
    /// Horizontal fill position on the line currently open inside this box.
    pub(crate) current_x: i32,
    /// Width budget handed down by the parent. Not the `max-width` property.
    pub(crate) max_width: i32,
}

impl Dimensions {
    /// Content extended by padding.
    #[must_use]
    pub const fn padding_rect(&self) -> Rect {
        self.content.extend(&self.padding)
    }

    /// Padding rect extended by border.
    #[must_use]
    pub const fn border_rect(&self) -> Rect {
        self.padding_rect().extend(&self.border)
    }

    /// Border rect extended by margin.
    #[must_use]
    pub const fn margin_rect(&self) -> Rect {
        self.border_rect().extend(&self.margin)
    }

    /// Horizontal space taken by padding, border and margin together.
    #[must_use]
    pub fn horizontal_extras(&self) -> i32 {
        self.padding
            .width()
            .saturating_add(self.border.width())
            .saturating_add(self.margin.left)
            .saturating_add(self.margin.right)
    }

    /// Where the next line inside this box starts horizontally, relative to
    /// the content's left edge.
    #[must_use]
    pub const fn current_x(&self) -> i32 {
        self.current_x
    }

    /// The width budget this box was laid out against.
    #[must_use]
    pub const fn max_width(&self) -> i32 {
        self.max_width
    }

    /// Freeze the derived rectangles for consumers outside layout.
    #[must_use]
    pub const fn cached(&self) -> CachedDimensions {
        CachedDimensions {
            content: self.content,
            padding_rect: self.padding_rect(),
            border_rect: self.border_rect(),
            margin_rect: self.margin_rect(),
        }
    }
}

/// A snapshot of a finished box's rectangles.
///
/// Unlike [`Dimensions`] nothing here is derived, so a renderer can read it
/// cheaply and shift it (for scrolling) without touching the layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CachedDimensions {
    /// Content area.
    pub content: Rect,
    /// Content plus padding.
    pub padding_rect: Rect,
    /// Padding rect plus border.
    pub border_rect: Rect,
    /// Border rect plus margin.
    pub margin_rect: Rect,
}

impl CachedDimensions {
    /// Shift every rectangle by the same offset.
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            content: self.content.translate(dx, dy),
            padding_rect: self.padding_rect.translate(dx, dy),
            border_rect: self.border_rect.translate(dx, dy),
            margin_rect: self.margin_rect.translate(dx, dy),
        }
    }
}
