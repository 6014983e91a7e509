//! Template compiler.
//!
//! Turns a composite format template into a [`CompiledTemplate`]: the
//! ordered [`Term`](crate::Term) list plus a matcher with one capture boundary
//! per placeholder placement.
//!
//! The compiler is organized into two sub-modules:
//! - [`lexer`] - Tokenization of the template grammar and brace escapes
//! - [`registry`] - Term discovery and anchor deduplication
//!
//! # Examples
//!
//! Basic usage:
//! ```rust
//! use unformat_engine::Compiler;
//!
//! let compiler = Compiler::new();
//! let template = compiler.compile("Name: {0}, Age: {1}")?;
//!
//! assert_eq!(template.terms().len(), 2);
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```
//!
//! With a custom configuration:
//! ```rust
//! use unformat_engine::{Compiler, MatchStrategy, UnformatConfig};
//!
//! let compiler = Compiler::with_config(UnformatConfig::linear_time());
//! let template = compiler.compile("{0}-{1}")?;
//! assert_eq!(template.strategy(), MatchStrategy::Delimited);
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```

pub(crate) mod lexer;
pub(crate) mod registry;

use crate::config::{MatchStrategy, UnformatConfig};
use crate::error::{Result, UnformatError};
use crate::ir::SlotLayout;
use crate::matcher::{CompiledTemplate, DelimitedMatcher, RegexMatcher, SlotMatcher};
use lexer::{Lexer, Token};
use log::debug;
use registry::TermRegistry;
use std::sync::Arc;

/// The template compiler.
///
/// Holds only configuration; every [`compile`](Compiler::compile) call is
/// independent, so one compiler can be shared freely.
///
/// # Examples
///
/// ```rust
/// use unformat_engine::Compiler;
///
/// let compiler = Compiler::new();
/// assert!(compiler.compile("{a}").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: UnformatConfig,
}

impl Compiler {
    /// Create a compiler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unformat_engine::{CaptureMode, Compiler, UnformatConfig};
    ///
    /// let config = UnformatConfig::new().with_capture_mode(CaptureMode::Lazy);
    /// let compiler = Compiler::with_config(config);
    /// assert_eq!(compiler.config().capture, CaptureMode::Lazy);
    /// ```
    pub fn with_config(config: UnformatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnformatConfig {
        &self.config
    }

    /// Compile a template.
    ///
    /// # Errors
    ///
    /// Any grammar violation (non-numeric index, unterminated placeholder,
    /// lone `}`, disallowed format character, ...) rejects the whole
    /// template. Nothing partial is returned.
    pub fn compile(&self, template: &str) -> Result<CompiledTemplate> {
        self.config.validate()?;

        let limits = &self.config.limits;
        if template.len() > limits.max_template_length {
            return Err(UnformatError::TemplateTooLong {
                length: template.len(),
                limit: limits.max_template_length,
            });
        }

        let tokens = Lexer::new(template, limits.max_placeholder_index).tokenize()?;

        let mut registry = TermRegistry::new();
        let mut layout = SlotLayout::new();
        for token in &tokens {
            match token {
                Token::Literal(text) => layout.push_literal(text),
                Token::Placeholder(placeholder) => {
                    let id = registry.intern(placeholder);
                    layout.push_slot(id);
                }
            }
        }

        let matcher: Arc<dyn SlotMatcher> = match self.config.strategy {
            MatchStrategy::Regex => Arc::new(RegexMatcher::build(
                &layout,
                self.config.capture,
                limits.regex_size_limit,
            )?),
            MatchStrategy::Delimited => {
                Arc::new(DelimitedMatcher::new(&layout, self.config.capture))
            }
        };

        debug!(
            "Compiled template {:?}: {} terms, {} slots, strategy {:?}",
            template,
            registry.len(),
            layout.slot_count(),
            self.config.strategy
        );
        if layout.adjacent_slot_pairs() > 0 {
            debug!(
                "Template {:?} has {} adjacent placeholder pairs without separating text",
                template,
                layout.adjacent_slot_pairs()
            );
        }

        Ok(CompiledTemplate::new(
            template,
            registry.into_terms(),
            layout,
            matcher,
            self.config.clone(),
        ))
    }
}

/// Compile a template with the default configuration.
///
/// # Examples
///
/// ```rust
/// let template = unformat_engine::compile("Text: {0}")?;
/// let result = template.unformat("Text: ABC").unwrap();
/// assert_eq!(result.get(0).unwrap()[0].value, "ABC");
/// # Ok::<(), unformat_engine::UnformatError>(())
/// ```
pub fn compile(template: &str) -> Result<CompiledTemplate> {
    Compiler::new().compile(template)
}
