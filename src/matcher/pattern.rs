//! Regex-backed slot matching.
//!
//! The layout `L0 S0 L1 ... Sn-1 Ln` becomes
//! `\A L0 (?s:(.*)) L1 ... (?s:(.*)) Ln \z` with every literal escaped.
//! The regex crate resolves captures with leftmost-first priorities, which
//! gives the same slot boundaries as a backtracking engine would, but runs on
//! finite automata, so adjacent slots cannot trigger exponential matching.

use super::SlotMatcher;
use crate::config::{CaptureMode, MatchStrategy};
use crate::error::{Result, UnformatError};
use crate::ir::SlotLayout;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    slot_count: usize,
    capture: CaptureMode,
}

impl RegexMatcher {
    /// Build the anchored pattern for `layout` and compile it.
    ///
    /// # Errors
    ///
    /// [`UnformatError::PatternTooLarge`] when the compiled program exceeds
    /// `size_limit` bytes.
    pub fn build(layout: &SlotLayout, capture: CaptureMode, size_limit: usize) -> Result<Self> {
        let source = Self::pattern_source(layout, capture);
        let regex = RegexBuilder::new(&source)
            .size_limit(size_limit)
            .build()
            .map_err(|e| UnformatError::PatternTooLarge(e.to_string()))?;

        Ok(Self {
            regex,
            slot_count: layout.slot_count(),
            capture,
        })
    }

    /// Pattern text for a layout, without compiling it.
    pub fn pattern_source(layout: &SlotLayout, capture: CaptureMode) -> String {
        let boundary = match capture {
            CaptureMode::Greedy => "(?s:(.*))",
            CaptureMode::Lazy => "(?s:(.*?))",
        };

        let literals = layout.literals();
        let mut source = String::from(r"\A");
        source.push_str(&regex::escape(&literals[0]));
        for literal in &literals[1..] {
            source.push_str(boundary);
            source.push_str(&regex::escape(literal));
        }
        source.push_str(r"\z");
        source
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl SlotMatcher for RegexMatcher {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Regex
    }

    fn capture_mode(&self) -> CaptureMode {
        self.capture
    }

    fn match_slots(&self, input: &str) -> Option<Vec<Range<usize>>> {
        let captures = self.regex.captures(input)?;
        // No alternation in the pattern: every group participates in a match.
        (1..=self.slot_count)
            .map(|group| captures.get(group).map(|m| m.range()))
            .collect()
    }

    fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    fn pattern(&self) -> Option<&str> {
        Some(self.as_str())
    }
}
