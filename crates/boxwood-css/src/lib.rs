//! Style resolution and box layout for boxwood.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style values**: lengths with units, colors (hex, named, `rgb()`),
//!   keywords, and unit conversion to pixels
//! - **Selectors**: type, id and class selectors, ANDed; `*`; anything
//!   else is parsed but never matches
//! - **Cascade**: inherited properties first, then every matching
//!   declaration in stylesheet and rule order, last write wins
//! - **Layout**: block width and margin resolution, inline flow with greedy
//!   text wrapping, and two-pass table sizing
//!
//! Markup parsing, font rasterisation and image decoding are left to the
//! caller. Text and image sizes come in through [`TextMeasurer`] and
//! [`ImageSizer`].
//!
//! # Not Implemented
//!
//! - Selector specificity and cascade origins
//! - Floats, positioning, flexbox and grid
//! - Percentage heights (parsed, then ignored)

/// Style resolution for one node.
pub mod cascade;
/// Layout tuning knobs.
pub mod config;
/// Error types.
pub mod error;
/// Box layout.
pub mod layout;
/// Selector parsing and matching.
pub mod selector;
/// Four-sided values.
pub mod sides;
/// Resolved per-node style.
pub mod style;
/// Declarations, rules and stylesheets.
pub mod stylesheet;
/// Built-in display defaults for HTML elements.
pub mod ua_stylesheet;
/// Style value parsing and unit conversion.
pub mod values;

pub use cascade::resolve;
pub use config::LayoutConfig;
pub use error::{LayoutError, ParseError};
pub use layout::{
    AutoOr, BoxContent, CachedDimensions, Dimensions, DisplayKind, GridPosition, ImageSizer,
    LayoutBox, LayoutContext, LayoutTree, MAX_SIZE_ATTR_CHARS, MonospaceMeasurer, NoImages, Rect,
    Size, TableMetrics, TextMeasurer, break_text, layout_document,
};
pub use selector::{Selector, StyleSubject};
pub use sides::Sides;
pub use style::ResolvedStyle;
pub use stylesheet::{Declaration, Rule, Stylesheet};
pub use ua_stylesheet::ua_stylesheet;
pub use values::{Color, MAX_LENGTH_PX, Number, StyleValue, Unit, parse_values};
