//! Size measurements for text and item sequences.
//!
//! Text is measured in words, sequences in items. The two are separate
//! operations; [`measure`] covers callers holding either shape and returns a
//! tagged [`Measurement`] instead of a type that depends on the input.

use std::fmt;

use serde::Serialize;

use crate::types::Value;

/// Number of space-separated segments in `text`.
///
/// Splits on single spaces, so `""` counts as one segment and consecutive
/// spaces produce empty segments.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Number of items in `items`.
#[must_use]
pub fn item_count<T>(items: &[T]) -> usize {
    items.len()
}

/// Input to [`measure`].
#[derive(Debug, Clone, Copy)]
pub enum Measurable<'a> {
    Text(&'a str),
    Items(&'a [Value]),
}

/// Tagged result of [`measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "count", rename_all = "lowercase")]
pub enum Measurement {
    Words(usize),
    Items(usize),
}

impl Measurement {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Measurement::Words(n) | Measurement::Items(n) => n,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Words(n) => write!(f, "{n} words"),
            Measurement::Items(n) => write!(f, "{n} items"),
        }
    }
}

/// Measures text in words or a sequence in items.
#[must_use]
pub fn measure(input: Measurable<'_>) -> Measurement {
    match input {
        Measurable::Text(text) => Measurement::Words(word_count(text)),
        Measurable::Items(items) => Measurement::Items(item_count(items)),
    }
}
