//! Compiled template for repeated unformatting.

use super::SlotMatcher;
use crate::config::{CaptureMode, DuplicatePolicy, MatchStrategy, UnformatConfig};
use crate::ir::{SlotLayout, Term};
use crate::result::{PlaceHolders, Placeholder};
use log::{debug, trace};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;

/// A template compiled once and matched against any number of inputs.
///
/// `CompiledTemplate` is immutable. Cloning shares the term list and matcher
/// through `Arc`, and the type is `Send + Sync`, so one instance can serve
/// concurrent callers without locking.
///
/// # Examples
///
/// ```rust
/// use unformat_engine::compile;
///
/// let template = compile("Esc {{0}}, real {0}")?;
/// let result = template.unformat("Esc {0}, real X").unwrap();
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.get(0).unwrap()[0].value, "X");
/// assert!(template.unformat("unrelated text").is_none());
///
/// let absent: Option<&str> = None;
/// assert!(template.unformat(absent).is_none());
/// # Ok::<(), unformat_engine::UnformatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: Arc<str>,
    terms: Arc<[Term]>,
    layout: Arc<SlotLayout>,
    matcher: Arc<dyn SlotMatcher>,
    config: Arc<UnformatConfig>,
    max_index: Option<usize>,
}

impl CompiledTemplate {
    pub(crate) fn new(
        template: &str,
        terms: Vec<Term>,
        layout: SlotLayout,
        matcher: Arc<dyn SlotMatcher>,
        config: UnformatConfig,
    ) -> Self {
        let max_index = terms.iter().map(|term| term.index).max();
        Self {
            template: template.into(),
            terms: terms.into(),
            layout: Arc::new(layout),
            matcher,
            config: Arc::new(config),
            max_index,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Distinct placeholder shapes in discovery order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Term whose anchor is exactly `anchor`.
    pub fn term(&self, anchor: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.anchor == anchor)
    }

    /// Number of placeholder placements, counting repeated anchors each time.
    pub fn slot_count(&self) -> usize {
        self.layout.slot_count()
    }

    /// Largest placeholder index, or `None` for a template without placeholders.
    pub fn max_index(&self) -> Option<usize> {
        self.max_index
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.matcher.strategy()
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.matcher.capture_mode()
    }

    pub fn config(&self) -> &UnformatConfig {
        &self.config
    }

    /// Pattern source when the template runs on the regex strategy.
    pub fn pattern(&self) -> Option<&str> {
        self.matcher.pattern()
    }

    /// Recover placeholder values from `input`.
    ///
    /// Returns `None` when `input` is absent, when it does not have the
    /// template's shape, or when repeated anchors capture conflicting text
    /// under [`DuplicatePolicy::RequireEqual`].
    pub fn unformat<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<PlaceHolders> {
        let input = input.into()?;

        let Some(ranges) = self.matcher.match_slots(input) else {
            trace!("Input {:?} does not match template {:?}", input, &*self.template);
            return None;
        };
        let values = self.resolve_terms(input, &ranges)?;

        let bucket_count = self.max_index.map_or(0, |max| max + 1);
        let mut buckets: Vec<Vec<Placeholder>> = (0..bucket_count).map(|_| Vec::new()).collect();
        for (term, value) in self.terms.iter().zip(values) {
            buckets[term.index].push(Placeholder::from_term(term, value));
        }

        Some(PlaceHolders::new(&*self.template, input, buckets))
    }

    /// True when [`unformat`](Self::unformat) would return a result.
    pub fn is_match(&self, input: &str) -> bool {
        if self.layout.slot_count() == self.terms.len()
            || self.config.duplicates != DuplicatePolicy::RequireEqual
        {
            return self.matcher.is_match(input);
        }
        self.matcher
            .match_slots(input)
            .is_some_and(|ranges| self.resolve_terms(input, &ranges).is_some())
    }

    /// Unformat many inputs; results keep the order of `inputs`.
    ///
    /// Large batches are spread over the rayon thread pool when
    /// `parallel.enabled` is set.
    pub fn unformat_batch(&self, inputs: &[&str]) -> Vec<Option<PlaceHolders>> {
        let parallel = &self.config.parallel;
        if parallel.enabled && inputs.len() >= parallel.min_batch_size {
            inputs.par_iter().map(|&input| self.unformat(input)).collect()
        } else {
            inputs.iter().map(|&input| self.unformat(input)).collect()
        }
    }

    /// Merge slot captures into one value per term, in term order.
    fn resolve_terms<'i>(&self, input: &'i str, ranges: &[Range<usize>]) -> Option<Vec<&'i str>> {
        let mut values: Vec<Option<&'i str>> = vec![None; self.terms.len()];

        for (term, range) in self.layout.slots().iter().zip(ranges) {
            let captured = &input[range.clone()];
            let entry = &mut values[term.as_usize()];
            match (*entry, self.config.duplicates) {
                (None, _) | (Some(_), DuplicatePolicy::LastWins) => *entry = Some(captured),
                (Some(_), DuplicatePolicy::FirstWins) => {}
                (Some(previous), DuplicatePolicy::RequireEqual) => {
                    if previous != captured {
                        debug!(
                            "Anchor {:?} captured {:?} and {:?}, rejecting match",
                            self.terms[term.as_usize()].anchor,
                            previous,
                            captured
                        );
                        return None;
                    }
                }
            }
        }

        // Every term owns at least one slot.
        values.into_iter().collect()
    }
}
