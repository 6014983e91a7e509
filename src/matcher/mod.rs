//! Matching compiled templates against candidate strings.
//!
//! ## Architecture
//!
//! The matcher system separates structure from bookkeeping:
//! - **Slot matching**: a [`SlotMatcher`] finds one byte range per slot
//!   (placeholder placement) for an input, or reports that the input does not
//!   have the template's shape
//! - **Term resolution**: [`CompiledTemplate`] merges the slots of repeated
//!   anchors per [`DuplicatePolicy`](crate::DuplicatePolicy) and groups the
//!   resulting occurrences by placeholder index
//!
//! ## Strategies
//!
//! - [`RegexMatcher`] - anchored regular expression, one group per slot
//! - [`DelimitedMatcher`] - literal search between slots, no pattern engine
//!
//! Both honor [`CaptureMode`] identically, so switching strategy never changes
//! a result.
//!
//! ## Example Usage
//!
//! ```rust
//! use unformat_engine::compile;
//!
//! let template = compile("{0}, {0:000.00}")?;
//! let result = template.unformat("5, 005.00").unwrap();
//!
//! let bucket = result.get(0).unwrap();
//! assert_eq!(bucket[0].value, "5");
//! assert_eq!(bucket[1].value, "005.00");
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```

pub mod compiled;
pub mod delimited;
pub mod pattern;

pub use compiled::CompiledTemplate;
pub use delimited::DelimitedMatcher;
pub use pattern::RegexMatcher;

use crate::config::{CaptureMode, MatchStrategy};
use std::fmt;
use std::ops::Range;

/// Structural matching of a template's slot layout against an input.
///
/// Implementations must be immutable after construction so one instance can
/// serve concurrent callers.
pub trait SlotMatcher: fmt::Debug + Send + Sync {
    fn strategy(&self) -> MatchStrategy;

    fn capture_mode(&self) -> CaptureMode;

    /// Byte ranges of `input` captured by each slot, in template order.
    ///
    /// Returns `None` when the whole input does not match the template.
    fn match_slots(&self, input: &str) -> Option<Vec<Range<usize>>>;

    fn is_match(&self, input: &str) -> bool {
        self.match_slots(input).is_some()
    }

    /// Source of the underlying pattern, for strategies that have one.
    fn pattern(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_slot_matchers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SlotMatcher>();
        assert_send_sync::<Arc<dyn SlotMatcher>>();
        assert_send_sync::<CompiledTemplate>();
    }
}
