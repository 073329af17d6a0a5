//! Declarations, rules and stylesheets.
//!
//! Stylesheet text is tokenized elsewhere; this module holds the result in
//! the shape style resolution consumes and offers [`Rule::parse`] for
//! callers that have `(property, value)` string pairs.

use boxwood_common::DiagnosticSink;

use crate::error::ParseError;
use crate::selector::{Selector, StyleSubject};
use crate::values::{StyleValue, parse_values};

/// `property: values`. Property names are stored lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    /// Value tokens in source order.
    pub values: Vec<StyleValue>,
}

impl Declaration {
    /// Build a declaration from already parsed values.
    #[must_use]
    pub fn new(property: &str, values: Vec<StyleValue>) -> Self {
        Self {
            property: property.trim().to_ascii_lowercase(),
            values,
        }
    }

    /// Parse the value text of a declaration.
    pub fn parse(property: &str, value: &str, sink: &dyn DiagnosticSink) -> Self {
        Self::new(property, parse_values(value, sink))
    }
}

/// A selector and the declarations it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Which nodes the rule applies to.
    pub selector: Selector,
    /// Declarations in source order, duplicates already collapsed.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Build a rule. Later declarations of a property replace earlier ones.
    #[must_use]
    pub fn new(selector: Selector, declarations: Vec<Declaration>) -> Self {
        let mut collapsed = Vec::with_capacity(declarations.len());
        add_or_override(&mut collapsed, declarations);
        Self {
            selector,
            declarations: collapsed,
        }
    }

    /// Parse a selector and `(property, value)` pairs.
    ///
    /// # Errors
    ///
    /// Fails only when the selector is rejected outright. Bad values are
    /// reported to `sink` and dropped.
    pub fn parse<'a>(
        selector: &str,
        declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ParseError> {
        let selector = Selector::parse(selector)?;
        if !selector.is_supported() {
            sink.warn(
                "selector",
                &format!("selector '{selector}' uses an unsupported form and will never match"),
            );
        }
        let declarations = declarations
            .into_iter()
            .map(|(property, value)| Declaration::parse(property, value, sink))
            .collect();
        Ok(Self::new(selector, declarations))
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// An empty stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule append.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declarations of every rule matching `subject`, in rule order, with
    /// later declarations of a property replacing earlier ones.
    #[must_use]
    pub fn matching_declarations(&self, subject: &StyleSubject<'_>) -> Vec<Declaration> {
        let mut result = Vec::new();
        for rule in self.rules.iter().filter(|r| r.selector.matches(subject)) {
            add_or_override(&mut result, rule.declarations.iter().cloned());
        }
        result
    }
}

/// Merge `incoming` into `target`.
///
/// A declaration whose property already exists replaces the old values in
/// place, keeping the original position. New properties are appended.
pub fn add_or_override(target: &mut Vec<Declaration>, incoming: impl IntoIterator<Item = Declaration>) {
    for declaration in incoming {
        match target
            .iter_mut()
            .find(|d| d.property.eq_ignore_ascii_case(&declaration.property))
        {
            Some(existing) => existing.values = declaration.values,
            None => target.push(declaration),
        }
    }
}
