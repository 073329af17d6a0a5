//! Selector parsing and matching.
//!
//! The supported language is deliberately small: a comma-separated list of
//! simple selectors (`div`, `#main`, `.note`, each optionally followed by a
//! `:state`) plus the universal selector `*`.
//!
//! The components of a list are ANDed, not ORed. `div, .note` matches only
//! a `div` that also has class `note`. Stylesheets written against this
//! engine depend on that, so it is preserved.
//!
//! Compound and complex forms (`div.note`, `ul li`, `a > b`) are recorded
//! as unsupported and the selector never matches. They are not guessed at.

use std::fmt;

use boxwood_dom::{DomTree, NodeId};

use crate::error::ParseError;

/// What a simple selector compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleSelectorKind {
    /// Node name equality (`div`).
    Tag,
    /// `id` attribute equality (`#main`).
    Id,
    /// Class list containment (`.note`).
    Class,
}

/// `tag`, `#id` or `.class`, with an optional element state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleSelector {
    /// Comparison kind.
    pub kind: SimpleSelectorKind,
    /// Name, id or class to compare with. Tag names are lowercased.
    pub value: String,
    /// Text after `:`, e.g. `hover`. Layout never has element state, so a
    /// selector carrying one never matches.
    pub state: Option<String>,
}

/// Anything in a selector list that is not a simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `*`: matches every node.
    Universal,
    /// A compound or complex component that cannot be matched.
    Unsupported(String),
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Simple selectors, all of which must match.
    pub simple: Vec<SimpleSelector>,
    /// Universal and unsupported components.
    pub combinators: Vec<Combinator>,
}

/// The parts of a node that selectors look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSubject<'a> {
    /// Tag name for elements, `#text`/`#document` otherwise.
    pub name: &'a str,
    /// Value of the `id` attribute.
    pub id: Option<&'a str>,
    /// Class names.
    pub classes: Vec<&'a str>,
}

impl<'a> StyleSubject<'a> {
    /// Describe a node of `tree`.
    #[must_use]
    pub fn from_node(tree: &'a DomTree, node: NodeId) -> Self {
        tree.as_element(node).map_or_else(
            || Self::named(tree.node_name(node)),
            |element| Self {
                name: &element.tag_name,
                id: element.id(),
                classes: element.classes(),
            },
        )
    }

    /// A subject with only a name, used for synthesized boxes.
    #[must_use]
    pub const fn named(name: &'a str) -> Self {
        Self {
            name,
            id: None,
            classes: Vec::new(),
        }
    }
}

impl SimpleSelector {
    /// A type selector.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            kind: SimpleSelectorKind::Tag,
            value: name.to_ascii_lowercase(),
            state: None,
        }
    }

    /// Whether this component matches `subject`.
    #[must_use]
    pub fn matches(&self, subject: &StyleSubject<'_>) -> bool {
        if self.state.is_some() {
            return false;
        }
        match self.kind {
            SimpleSelectorKind::Tag => subject.name.eq_ignore_ascii_case(&self.value),
            SimpleSelectorKind::Id => subject.id == Some(self.value.as_str()),
            SimpleSelectorKind::Class => subject.classes.contains(&self.value.as_str()),
        }
    }

    fn parse(component: &str) -> Option<Self> {
        let (kind, rest) = if let Some(rest) = component.strip_prefix('#') {
            (SimpleSelectorKind::Id, rest)
        } else if let Some(rest) = component.strip_prefix('.') {
            (SimpleSelectorKind::Class, rest)
        } else {
            (SimpleSelectorKind::Tag, component)
        };

        let (name, state) = match rest.split_once(':') {
            Some((name, state)) => (name, Some(state.to_string())),
            None => (rest, None),
        };

        let simple_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if !simple_name {
            return None;
        }

        let value = if kind == SimpleSelectorKind::Tag {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        };
        Some(Self { kind, value, state })
    }
}

impl Selector {
    /// The selector `*`.
    #[must_use]
    pub fn universal() -> Self {
        Self {
            simple: Vec::new(),
            combinators: vec![Combinator::Universal],
        }
    }

    /// A single type selector.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            simple: vec![SimpleSelector::tag(name)],
            combinators: Vec::new(),
        }
    }

    /// Parse a comma-separated selector list.
    ///
    /// # Errors
    ///
    /// At-rule preludes (`@media ...`) and empty input are rejected outright.
    /// Compound and complex components parse successfully but are recorded
    /// as [`Combinator::Unsupported`].
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut selector = Self::default();
        for component in text.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if component.starts_with('@') {
                return Err(ParseError::UnsupportedSelector(text.trim().to_string()));
            }
            if component == "*" {
                selector.combinators.push(Combinator::Universal);
                continue;
            }
            match SimpleSelector::parse(component) {
                Some(simple) => selector.simple.push(simple),
                None => selector
                    .combinators
                    .push(Combinator::Unsupported(component.to_string())),
            }
        }
        if selector.simple.is_empty() && selector.combinators.is_empty() {
            return Err(ParseError::UnsupportedSelector(text.trim().to_string()));
        }
        Ok(selector)
    }

    /// True unless a component could not be understood.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !self
            .combinators
            .iter()
            .any(|c| matches!(c, Combinator::Unsupported(_)))
    }

    /// Whether the selector applies to `subject`.
    ///
    /// Unsupported components reject, `*` accepts, and otherwise every
    /// simple selector must match. An empty selector matches nothing.
    #[must_use]
    pub fn matches(&self, subject: &StyleSubject<'_>) -> bool {
        if !self.is_supported() {
            return false;
        }
        if self.combinators.contains(&Combinator::Universal) {
            return true;
        }
        !self.simple.is_empty() && self.simple.iter().all(|s| s.matches(subject))
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SimpleSelectorKind::Tag => {}
            SimpleSelectorKind::Id => f.write_str("#")?,
            SimpleSelectorKind::Class => f.write_str(".")?,
        }
        f.write_str(&self.value)?;
        if let Some(state) = &self.state {
            write!(f, ":{state}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.simple.iter().map(ToString::to_string).collect();
        parts.extend(self.combinators.iter().map(|c| match c {
            Combinator::Universal => "*".to_string(),
            Combinator::Unsupported(raw) => raw.clone(),
        }));
        f.write_str(&parts.join(", "))
    }
}
