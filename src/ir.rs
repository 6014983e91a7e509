//! Intermediate representation shared by the compiler and the matchers.
//!
//! A template compiles into a list of [`Term`]s and a [`SlotLayout`]. The
//! layout alternates literal text and slots: `literals[0] slots[0] literals[1]
//! ... slots[n-1] literals[n]`. Literals hold decoded text (`{{` already turned
//! into `{`), so the matchers never see template escapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a [`Term`], assigned in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub u32);

impl TermId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id{}", self.0)
    }
}

/// A distinct placeholder shape found in a template, keyed by its anchor text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    /// Verbatim placeholder text, e.g. `{0,20:#00.00}`.
    pub anchor: String,
    pub index: usize,
    /// Alignment width. `0` when the placeholder has no `,span` section.
    pub span: i32,
    pub format: Option<String>,
}

impl Term {
    pub fn new(
        id: TermId,
        anchor: impl Into<String>,
        index: usize,
        span: i32,
        format: Option<String>,
    ) -> Self {
        Self {
            id,
            anchor: anchor.into(),
            index,
            span,
            format,
        }
    }
}

/// Literal/slot skeleton of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    literals: Vec<String>,
    slots: Vec<TermId>,
}

impl SlotLayout {
    pub fn new() -> Self {
        Self {
            literals: vec![String::new()],
            slots: Vec::new(),
        }
    }

    /// Append decoded literal text to the current trailing literal.
    pub fn push_literal(&mut self, text: &str) {
        if let Some(last) = self.literals.last_mut() {
            last.push_str(text);
        }
    }

    /// Close the current literal and open a slot bound to `term`.
    pub fn push_slot(&mut self, term: TermId) {
        self.slots.push(term);
        self.literals.push(String::new());
    }

    /// Literal runs; always `slots().len() + 1` entries.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    pub fn slots(&self) -> &[TermId] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of adjacent slot pairs with no literal text between them.
    ///
    /// Within such a run only one slot ever receives text, so a non-zero value
    /// signals a template that cannot be reversed unambiguously.
    pub fn adjacent_slot_pairs(&self) -> usize {
        if self.slots.len() < 2 {
            return 0;
        }
        self.literals[1..self.slots.len()]
            .iter()
            .filter(|literal| literal.is_empty())
            .count()
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::new()
    }
}
