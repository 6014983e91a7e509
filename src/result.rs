//! Match results.

use crate::coerce::{self, Culture};
use crate::ir::Term;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::slice;

/// One term's capture from a matched input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub index: usize,
    /// Raw captured text; may be empty.
    pub value: String,
    pub anchor: String,
    pub span: i32,
    pub format: Option<String>,
}

impl Placeholder {
    pub fn new(index: usize, value: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
            anchor: anchor.into(),
            span: 0,
            format: None,
        }
    }

    pub fn with_span(mut self, span: i32) -> Self {
        self.span = span;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub(crate) fn from_term(term: &Term, value: &str) -> Self {
        Self {
            index: term.index,
            value: value.to_string(),
            anchor: term.anchor.clone(),
            span: term.span,
            format: term.format.clone(),
        }
    }

    pub fn try_as_decimal(&self, culture: &Culture) -> Option<Decimal> {
        coerce::try_parse_decimal(&self.value, culture)
    }

    pub fn try_as_f64(&self, culture: &Culture) -> Option<f64> {
        coerce::try_parse_f64(&self.value, culture)
    }

    pub fn try_as_i64(&self, culture: &Culture) -> Option<i64> {
        coerce::try_parse_i64(&self.value, culture)
    }

    /// Parse the value as a date-time, using this placeholder's format
    /// directive as an exact-match hint when it has one.
    pub fn try_as_date_time(&self, culture: &Culture) -> Option<NaiveDateTime> {
        coerce::try_parse_date_time(&self.value, self.format.as_deref(), culture)
    }
}

/// Captures of one successful match, grouped by placeholder index.
///
/// Bucket `i` holds the occurrences of index `i` in template discovery order.
/// There is one bucket per index from `0` to the largest index used by the
/// template; indices the template skips have empty buckets.
///
/// # Examples
///
/// ```rust
/// let template = unformat_engine::compile("{0} + {2} = {3}")?;
/// let result = template.unformat("1 + 2 = 3").unwrap();
///
/// assert_eq!(result.len(), 4);
/// assert_eq!(result.get(1), Some(&[][..]));
/// assert_eq!(result.get(4), None);
/// assert_eq!(result.first(3).unwrap().value, "3");
/// # Ok::<(), unformat_engine::UnformatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceHolders {
    template: String,
    input: String,
    buckets: Vec<Vec<Placeholder>>,
}

impl PlaceHolders {
    pub fn new(template: impl Into<String>, input: impl Into<String>, buckets: Vec<Vec<Placeholder>>) -> Self {
        Self {
            template: template.into(),
            input: input.into(),
            buckets,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Number of buckets (largest index + 1, or 0 for a template without
    /// placeholders).
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Occurrences for `index`, or `None` when `index` is past the last bucket.
    pub fn get(&self, index: usize) -> Option<&[Placeholder]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// First occurrence for `index`, if any.
    pub fn first(&self, index: usize) -> Option<&Placeholder> {
        self.get(index).and_then(<[Placeholder]>::first)
    }

    pub fn iter(&self) -> Buckets<'_> {
        Buckets {
            inner: self.buckets.iter(),
        }
    }

    /// Every occurrence, bucket by bucket.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.buckets.iter().flatten()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Iterator over the buckets of a [`PlaceHolders`] in index order.
#[derive(Debug, Clone)]
pub struct Buckets<'a> {
    inner: slice::Iter<'a, Vec<Placeholder>>,
}

impl<'a> Iterator for Buckets<'a> {
    type Item = &'a [Placeholder];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Vec::as_slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Buckets<'_> {}

impl<'a> IntoIterator for &'a PlaceHolders {
    type Item = &'a [Placeholder];
    type IntoIter = Buckets<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
