//! # Unformat Engine
//!
//! Reverses composite string formatting. Given a template such as
//! `"Name: {0}, Age: {1,3}"` and a string produced from it, the engine
//! recovers the raw text substituted for each placeholder, grouped by
//! placeholder index.
//!
//! Templates compile once into an immutable [`CompiledTemplate`] that can be
//! shared across threads and matched against any number of inputs.
//!
//! ## Quick Start
//!
//! ### Basic Usage
//!
//! ```rust
//! use unformat_engine::compile;
//!
//! let template = compile("Texto: {0}, Idade: {1}")?;
//! let result = template.unformat("Texto: ABC, Idade: 12").unwrap();
//!
//! assert_eq!(result.first(0).unwrap().value, "ABC");
//! assert_eq!(result.first(1).unwrap().value, "12");
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```
//!
//! ### Same Index, Different Formats
//!
//! Placeholders that share an index but differ in alignment or format are
//! reported separately, in template order:
//!
//! ```rust
//! use unformat_engine::compile;
//!
//! let template = compile("{0}, {0:000.00}")?;
//! let result = template.unformat("5, 005.00").unwrap();
//!
//! let values: Vec<_> = result.get(0).unwrap().iter().map(|p| p.value.as_str()).collect();
//! assert_eq!(values, ["5", "005.00"]);
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```
//!
//! ### Typed Values
//!
//! ```rust
//! use unformat_engine::{compile, Culture};
//!
//! let template = compile("Total: {0:0.00}")?;
//! let result = template.unformat("Total: 12,50").unwrap();
//!
//! let total = result.first(0).unwrap().try_as_f64(&Culture::pt_br());
//! assert_eq!(total, Some(12.5));
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```
//!
//! ### Configuration
//!
//! ```rust
//! use unformat_engine::{Compiler, DuplicatePolicy, UnformatConfig};
//!
//! let compiler = Compiler::with_config(
//!     UnformatConfig::linear_time().with_duplicate_policy(DuplicatePolicy::LastWins),
//! );
//! let template = compiler.compile("{0} then {0}")?;
//! assert_eq!(template.unformat("a then b").unwrap().first(0).unwrap().value, "b");
//! # Ok::<(), unformat_engine::UnformatError>(())
//! ```

pub mod coerce;
pub mod compiler;
pub mod config;
pub mod error;
pub mod ir;
pub mod matcher;
pub mod result;

// Compiler
pub use compiler::{compile, Compiler};

// Configuration
pub use config::{
    CaptureMode, DuplicatePolicy, LimitsConfig, MatchStrategy, ParallelConfig, UnformatConfig,
};

// Core types and errors
pub use error::{Result, UnformatError};
pub use ir::{Term, TermId};

// Matching
pub use matcher::{CompiledTemplate, DelimitedMatcher, RegexMatcher, SlotMatcher};
pub use result::{Buckets, PlaceHolders, Placeholder};

// Value coercion
pub use coerce::{Culture, DateOrder};
