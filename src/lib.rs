//! Build regular expressions from readable clauses.
//!
//! Clauses are appended one at a time and compiled into a minimal pattern
//! source plus a flag set. Overlapping input never produces duplicate or
//! redundant pattern fragments.
//!
//! # Example
//!
//! ```rust
//! use reggaexp::{Expression, MatchablePattern, raw, sym};
//!
//! let expr = Expression::new()
//!     .start_of_string()
//!     .capture_as("user", raw![sym("word"), "."])
//!     .one_or_more(raw!['a'..='z', 'A'..='Z', 'b'..='d'])
//!     .then("@");
//!
//! assert_eq!(expr.source(), r"\A(?<user>[.\w])[A-Za-z]+@");
//!
//! let pattern = expr.to_pattern().unwrap();
//! let found = pattern.find("jo@example").unwrap();
//! assert_eq!(found.name("user"), Some("j"));
//! assert_eq!(found.as_str(), "jo@");
//! ```

pub mod engine;
pub mod expression;
pub mod flags;
pub mod matcher;
pub mod pattern;

pub use engine::{Compiled, Engine, Procedure};
pub use expression::Expression;
pub use flags::{FlagBit, FlagSet};
pub use matcher::{Match, MatchablePattern, RegexPattern, compile};
pub use pattern::ast::{Atom, Clause, ClauseBody, ClauseOptions, Quantifier, RawValue, sym};
pub use pattern::presets::PresetCatalog;
