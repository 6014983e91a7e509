//! Linear-time slot matching by literal search.
//!
//! The input must start with the first literal and end with the last one.
//! Interior literals act as delimiters:
//! - greedy mode places each delimiter at its latest feasible position,
//!   scanning right to left;
//! - lazy mode places each at its earliest position, scanning left to right.
//!
//! A placement is feasible exactly when the remaining delimiters still fit,
//! and feasibility only improves as a delimiter moves towards its own side of
//! the scan, so these placements equal what a leftmost-first regex with
//! greedy (resp. lazy) `.*` slots would capture.

use super::SlotMatcher;
use crate::config::{CaptureMode, MatchStrategy};
use crate::ir::SlotLayout;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct DelimitedMatcher {
    literals: Vec<String>,
    capture: CaptureMode,
}

impl DelimitedMatcher {
    pub fn new(layout: &SlotLayout, capture: CaptureMode) -> Self {
        Self {
            literals: layout.literals().to_vec(),
            capture,
        }
    }

    fn latest_placements(input: &str, delimiters: &[String], lo: usize, hi: usize) -> Option<Vec<usize>> {
        let mut starts = vec![0; delimiters.len()];
        let mut limit = hi;
        for (k, delimiter) in delimiters.iter().enumerate().rev() {
            let start = lo + input[lo..limit].rfind(delimiter.as_str())?;
            starts[k] = start;
            limit = start;
        }
        Some(starts)
    }

    fn earliest_placements(input: &str, delimiters: &[String], lo: usize, hi: usize) -> Option<Vec<usize>> {
        let mut starts = Vec::with_capacity(delimiters.len());
        let mut cursor = lo;
        for delimiter in delimiters {
            let start = cursor + input[cursor..hi].find(delimiter.as_str())?;
            starts.push(start);
            cursor = start + delimiter.len();
        }
        Some(starts)
    }
}

impl SlotMatcher for DelimitedMatcher {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Delimited
    }

    fn capture_mode(&self) -> CaptureMode {
        self.capture
    }

    fn match_slots(&self, input: &str) -> Option<Vec<Range<usize>>> {
        let slot_count = self.literals.len() - 1;
        let head = &self.literals[0];
        if slot_count == 0 {
            return (input == head.as_str()).then(Vec::new);
        }

        let tail = &self.literals[slot_count];
        if input.len() < head.len() + tail.len()
            || !input.starts_with(head.as_str())
            || !input.ends_with(tail.as_str())
        {
            return None;
        }

        let lo = head.len();
        let hi = input.len() - tail.len();
        let delimiters = &self.literals[1..slot_count];
        let starts = match self.capture {
            CaptureMode::Greedy => Self::latest_placements(input, delimiters, lo, hi)?,
            CaptureMode::Lazy => Self::earliest_placements(input, delimiters, lo, hi)?,
        };

        let mut ranges = Vec::with_capacity(slot_count);
        let mut cursor = lo;
        for (delimiter, &start) in delimiters.iter().zip(&starts) {
            ranges.push(cursor..start);
            cursor = start + delimiter.len();
        }
        ranges.push(cursor..hi);
        Some(ranges)
    }
}
