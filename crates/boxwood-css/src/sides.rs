//! Four-sided values for padding, border and margin.

use std::ops::Add;

use serde::Serialize;

/// One value per box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Sides<T> {
    /// Top edge.
    pub top: T,
    /// Left edge.
    pub left: T,
    /// Bottom edge.
    pub bottom: T,
    /// Right edge.
    pub right: T,
}

impl<T: Clone> Sides<T> {
    /// The same value on every side.
    pub fn all(value: T) -> Self {
        Self {
            top: value.clone(),
            left: value.clone(),
            bottom: value.clone(),
            right: value,
        }
    }

    /// Expand a shorthand value list.
    ///
    /// - 1 value: all sides
    /// - 2 values: vertical, horizontal
    /// - 3 values: top, horizontal, bottom
    /// - 4 values: top, right, bottom, left
    ///
    /// Any other count yields `None`.
    #[must_use]
    pub fn from_values(values: &[T]) -> Option<Self> {
        match values {
            [all] => Some(Self::all(all.clone())),
            [vertical, horizontal] => Some(Self {
                top: vertical.clone(),
                left: horizontal.clone(),
                bottom: vertical.clone(),
                right: horizontal.clone(),
            }),
            [top, horizontal, bottom] => Some(Self {
                top: top.clone(),
                left: horizontal.clone(),
                bottom: bottom.clone(),
                right: horizontal.clone(),
            }),
            [top, right, bottom, left] => Some(Self {
                top: top.clone(),
                left: left.clone(),
                bottom: bottom.clone(),
                right: right.clone(),
            }),
            _ => None,
        }
    }

    /// Apply `f` to every side.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Sides<U> {
        Sides {
            top: f(&self.top),
            left: f(&self.left),
            bottom: f(&self.bottom),
            right: f(&self.right),
        }
    }
}

impl<T: Copy + Add<Output = T>> Sides<T> {
    /// `left + right`
    pub fn width(&self) -> T {
        self.left + self.right
    }

    /// `top + bottom`
    pub fn height(&self) -> T {
        self.top + self.bottom
    }
}
