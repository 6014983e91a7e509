//! Term discovery and anchor deduplication.

use super::lexer::PlaceholderToken;
use crate::ir::{Term, TermId};
use std::collections::HashMap;

/// Interns placeholder tokens into [`Term`]s keyed by their anchor text.
///
/// Identical anchors share one term; ids follow first-discovery order.
#[derive(Debug, Default)]
pub(crate) struct TermRegistry {
    terms: Vec<Term>,
    by_anchor: HashMap<String, TermId>,
}

impl TermRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, token: &PlaceholderToken<'_>) -> TermId {
        if let Some(&id) = self.by_anchor.get(token.anchor) {
            return id;
        }

        let id = TermId(self.terms.len() as u32);
        self.terms.push(Term::new(
            id,
            token.anchor,
            token.index,
            token.span,
            token.format.map(str::to_string),
        ));
        self.by_anchor.insert(token.anchor.to_string(), id);
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.terms.len()
    }

    pub(crate) fn into_terms(self) -> Vec<Term> {
        self.terms
    }
}
