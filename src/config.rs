//! Configuration for template compilation and matching.
//!
//! Defaults: regex strategy, greedy captures, and repeated anchors must
//! capture identical text unless [`DuplicatePolicy::LastWins`] or
//! [`DuplicatePolicy::FirstWins`] is selected.

use crate::error::{Result, UnformatError};
use serde::{Deserialize, Serialize};

/// Matching strategy used by a compiled template.
///
/// Both strategies produce the same captures for the same [`CaptureMode`].
///
/// | Strategy | Engine | Cost | Use Case |
/// |----------|--------|------|----------|
/// | `Regex` | regex crate automaton | linear in input, pattern size factor | General use (default) |
/// | `Delimited` | literal search only | linear in input | Large inputs, many placeholders |
///
/// # Examples
///
/// ```rust
/// use unformat_engine::{MatchStrategy, UnformatConfig};
///
/// let config = UnformatConfig::new().with_strategy(MatchStrategy::Delimited);
/// assert_eq!(config.strategy, MatchStrategy::Delimited);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Compile the template to an anchored regular expression with one
    /// capture group per slot.
    #[default]
    Regex,

    /// Split the template on its literal runs and assign the text between
    /// them to slots without a pattern engine.
    Delimited,
}

/// How much text a slot takes when several splits of the input would match.
///
/// Given the template `"{0}-{1}"` and the input `"a-b-c"`:
/// - `Greedy` captures `"a-b"` and `"c"`;
/// - `Lazy` captures `"a"` and `"b-c"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Left to right, each slot takes the longest text that still lets the
    /// rest of the template match.
    #[default]
    Greedy,

    /// Left to right, each slot takes the shortest such text.
    Lazy,
}

/// Which capture wins when one anchor appears at several places in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Every placement must capture the same text, otherwise the input does
    /// not match.
    #[default]
    RequireEqual,

    /// The last placement in the template is authoritative.
    LastWins,

    /// The first placement in the template is authoritative.
    FirstWins,
}

/// Compile-time limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted placeholder index.
    ///
    /// Result containers allocate one bucket per index up to the largest one,
    /// so this bounds their size.
    ///
    /// **Default**: 999_999
    pub max_placeholder_index: usize,

    /// Largest accepted template length in bytes.
    ///
    /// **Default**: 1MB
    pub max_template_length: usize,

    /// Size limit handed to the regex builder for the compiled program.
    ///
    /// **Default**: 10MB
    pub regex_size_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_placeholder_index: 999_999,
            max_template_length: 1024 * 1024,
            regex_size_limit: 10 * 1024 * 1024,
        }
    }
}

/// Parallel batch matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Use rayon for [`crate::CompiledTemplate::unformat_batch`].
    pub enabled: bool,
    /// Smallest batch handed to the thread pool; smaller batches run inline.
    pub min_batch_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_batch_size: 256,
        }
    }
}

/// Complete engine configuration.
///
/// # Example
/// ```rust
/// use unformat_engine::{CaptureMode, DuplicatePolicy, UnformatConfig};
///
/// let config = UnformatConfig::new()
///     .with_capture_mode(CaptureMode::Lazy)
///     .with_duplicate_policy(DuplicatePolicy::LastWins);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnformatConfig {
    pub strategy: MatchStrategy,
    pub capture: CaptureMode,
    pub duplicates: DuplicatePolicy,
    pub limits: LimitsConfig,
    pub parallel: ParallelConfig,
}

impl UnformatConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings; named for call sites that want to spell out that
    /// repeated anchors must agree.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::RequireEqual,
            ..Default::default()
        }
    }

    /// Regex-free matching with guaranteed linear cost.
    pub fn linear_time() -> Self {
        Self {
            strategy: MatchStrategy::Delimited,
            ..Default::default()
        }
    }

    /// Greedy regex captures where the last placement of a repeated anchor
    /// wins.
    pub fn legacy() -> Self {
        Self {
            strategy: MatchStrategy::Regex,
            capture: CaptureMode::Greedy,
            duplicates: DuplicatePolicy::LastWins,
            ..Default::default()
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_capture_mode(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel.enabled = enabled;
        self
    }

    /// Reject limits that would make every template fail to compile.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_template_length == 0 {
            return Err(UnformatError::InvalidConfig(
                "max_template_length must be greater than 0".to_string(),
            ));
        }
        if self.limits.regex_size_limit == 0 {
            return Err(UnformatError::InvalidConfig(
                "regex_size_limit must be greater than 0".to_string(),
            ));
        }
        if self.parallel.min_batch_size == 0 {
            return Err(UnformatError::InvalidConfig(
                "min_batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from YAML. Missing keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from JSON. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
