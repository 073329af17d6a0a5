//! Default `display` values for HTML elements.
//!
//! Layout falls back to block (with a warning) for any element without a
//! `display`. Callers that lay out ordinary HTML can put this stylesheet
//! first in their list to get the usual defaults instead. Being first, any
//! author rule overrides it.
//!
//! Selector lists AND their components here, so each element gets its own
//! rule.

use crate::selector::Selector;
use crate::stylesheet::{Declaration, Rule, Stylesheet};
use crate::values::StyleValue;

/// Elements that never render.
const HIDDEN: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "base", "template", "noscript",
];

/// Elements in normal block flow.
const BLOCK: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl",
    "dt", "dd", "form", "header", "footer", "main", "nav", "section", "article", "aside",
    "blockquote", "pre", "hr", "address", "figure", "figcaption", "fieldset", "legend",
    "center",
];

/// Elements that flow within a line.
const INLINE: &[&str] = &[
    "span", "a", "b", "i", "u", "s", "em", "strong", "code", "small", "sub", "sup", "abbr",
    "q", "label", "img", "input", "button", "select", "textarea",
];

/// Elements laid out as tables.
const TABLE: &[&str] = &["table"];

/// Build the default stylesheet.
#[must_use]
pub fn ua_stylesheet() -> Stylesheet {
    let groups: [(&[&str], &str); 4] = [
        (HIDDEN, "none"),
        (BLOCK, "block"),
        (INLINE, "inline"),
        (TABLE, "table"),
    ];

    groups
        .iter()
        .flat_map(|(tags, display)| tags.iter().map(move |tag| (*tag, *display)))
        .fold(Stylesheet::new(), |sheet, (tag, display)| {
            sheet.with_rule(Rule::new(
                Selector::tag(tag),
                vec![Declaration::new("display", vec![StyleValue::keyword(display)])],
            ))
        })
}
