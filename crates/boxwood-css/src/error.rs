//! Error types.
//!
//! Almost nothing in style resolution or layout is fatal: bad input is
//! reported to a diagnostic sink and replaced by a default. The types here
//! cover the few cases that cannot be recovered from, plus the parse errors
//! surfaced to callers that build stylesheets from text.

use boxwood_dom::NodeId;
use thiserror::Error;

/// Fatal layout failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A loop ran past its safety cap. This is an internal invariant
    /// violation, not a property of the input.
    #[error("{stage} exceeded its iteration cap of {cap}")]
    IterationCapExceeded {
        /// Which loop tripped.
        stage: &'static str,
        /// The configured cap.
        cap: usize,
    },

    /// The node handed to layout does not exist in the tree.
    #[error("node {0:?} is not part of the document tree")]
    MissingNode(NodeId),
}

/// Failures while turning text into style values or selectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("empty value")]
    Empty,

    /// `#` followed by something other than 3, 4, 6 or 8 hex digits.
    #[error("invalid hex color '{0}'")]
    InvalidHexColor(String),

    /// A functional notation other than `rgb()`/`rgba()`.
    #[error("unsupported function '{0}()'")]
    UnsupportedFunction(String),

    /// `rgb()`/`rgba()` with the wrong number or kind of arguments.
    #[error("invalid color function '{0}'")]
    InvalidColorFunction(String),

    /// A selector form that cannot be matched at all.
    #[error("unsupported selector '{0}'")]
    UnsupportedSelector(String),
}
