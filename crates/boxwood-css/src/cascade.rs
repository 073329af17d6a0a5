//! Style resolution.
//!
//! There is no specificity. A node's style is the inherited subset of its
//! parent's style followed by the declarations of every matching rule, in
//! stylesheet order and then rule order. When two declarations name the same
//! property the later one wins outright, values and all.

use crate::selector::StyleSubject;
use crate::style::ResolvedStyle;
use crate::stylesheet::{Declaration, Stylesheet};

/// Resolve the style of one node.
///
/// `inherited` is normally [`ResolvedStyle::inherited_subset`] of the
/// parent. It goes in first, so any matching declaration overrides it.
#[must_use]
pub fn resolve(
    subject: &StyleSubject<'_>,
    stylesheets: &[Stylesheet],
    inherited: &[Declaration],
) -> ResolvedStyle {
    let mut style = ResolvedStyle::from_declarations(inherited.iter().cloned());
    for sheet in stylesheets {
        style.apply(sheet.matching_declarations(subject));
    }
    style
}
