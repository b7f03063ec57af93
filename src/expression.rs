//! Fluent vocabulary over an [`Engine`].
//!
//! Every method consumes the expression and returns it, so patterns read as
//! one chain. Methods ending in `_with` build their content on a fresh child
//! expression and splice it in as a single clause.

use std::fmt;

use anyhow::Result;

use crate::engine::{Compiled, Engine};
use crate::flags::{FlagBit, FlagSet};
use crate::matcher::RegexPattern;
use crate::pattern::ast::{ClauseOptions, Quantifier, RawValue};

#[derive(Debug, Clone, Default)]
pub struct Expression {
    engine: Engine,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.engine.compile())
    }
}

impl From<Engine> for Expression {
    fn from(engine: Engine) -> Self {
        Self { engine }
    }
}

impl From<Expression> for Engine {
    fn from(expression: Expression) -> Self {
        expression.engine
    }
}

// Constructors and results
impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn source(&self) -> &str {
        self.engine.source()
    }

    pub fn flags(&self) -> FlagSet {
        self.engine.flags()
    }

    pub fn compiled(&self) -> &Compiled {
        self.engine.compile()
    }

    pub fn to_pattern(&self) -> Result<RegexPattern> {
        self.engine.to_pattern()
    }
}

// Primitives
impl Expression {
    /// Append `value` with explicit clause options.
    pub fn append(mut self, value: impl Into<RawValue>, options: ClauseOptions) -> Self {
        self.engine.append(value, options);
        self
    }

    /// Build a sub-expression and append it with explicit clause options.
    pub fn append_with(
        mut self,
        options: ClauseOptions,
        build: impl FnOnce(Expression) -> Expression,
    ) -> Self {
        let inner = build(Expression::new());
        self.engine.append_engine(inner.engine, options);
        self
    }

    /// Repeat whatever precedes, typically a group.
    pub fn quantify(self, quantifier: Quantifier) -> Self {
        self.append(RawValue::empty(), ClauseOptions::new().quantifier(quantifier))
    }
}

// Content
impl Expression {
    pub fn find(self, value: impl Into<RawValue>) -> Self {
        self.append(value, ClauseOptions::new())
    }

    pub fn find_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.append_with(ClauseOptions::new(), build)
    }

    pub fn then(self, value: impl Into<RawValue>) -> Self {
        self.find(value)
    }

    pub fn then_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.find_with(build)
    }

    pub fn one_of(self, value: impl Into<RawValue>) -> Self {
        self.find(value)
    }

    pub fn any_of(self, value: impl Into<RawValue>) -> Self {
        self.find(value)
    }

    /// Start a new alternative.
    pub fn or(mut self) -> Self {
        self.engine.append_or();
        self
    }

    pub fn or_find(self, value: impl Into<RawValue>) -> Self {
        self.or().find(value)
    }

    pub fn or_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.or().find_with(build)
    }
}

// Groups
impl Expression {
    pub fn group(self, value: impl Into<RawValue>) -> Self {
        self.append(value, ClauseOptions::new().non_capture(true))
    }

    pub fn group_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.append_with(ClauseOptions::new().non_capture(true), build)
    }

    pub fn capture(self, value: impl Into<RawValue>) -> Self {
        self.append(value, ClauseOptions::new().capture(true))
    }

    pub fn capture_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.append_with(ClauseOptions::new().capture(true), build)
    }

    pub fn capture_as(self, name: &str, value: impl Into<RawValue>) -> Self {
        self.append(value, ClauseOptions::new().named(name))
    }

    pub fn capture_as_with(
        self,
        name: &str,
        build: impl FnOnce(Expression) -> Expression,
    ) -> Self {
        self.append_with(ClauseOptions::new().named(name), build)
    }
}

// Quantifiers
impl Expression {
    fn quantified(self, quantifier: Quantifier, value: impl Into<RawValue>) -> Self {
        self.append(value, ClauseOptions::new().quantifier(quantifier))
    }

    fn quantified_with(
        self,
        quantifier: Quantifier,
        build: impl FnOnce(Expression) -> Expression,
    ) -> Self {
        self.append_with(ClauseOptions::new().quantifier(quantifier), build)
    }

    pub fn one_or_more(self, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::OneOrMore, value)
    }

    pub fn one_or_more_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::OneOrMore, build)
    }

    pub fn zero_or_more(self, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::ZeroOrMore, value)
    }

    pub fn zero_or_more_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::ZeroOrMore, build)
    }

    pub fn zero_or_one(self, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::ZeroOrOne, value)
    }

    pub fn zero_or_one_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::ZeroOrOne, build)
    }

    pub fn maybe(self, value: impl Into<RawValue>) -> Self {
        self.zero_or_one(value)
    }

    pub fn repeat(self, count: usize, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::Exactly(count), value)
    }

    pub fn repeat_with(self, count: usize, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::Exactly(count), build)
    }

    pub fn between(self, min: usize, max: usize, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::between(min, max), value)
    }

    pub fn between_with(
        self,
        min: usize,
        max: usize,
        build: impl FnOnce(Expression) -> Expression,
    ) -> Self {
        self.quantified_with(Quantifier::between(min, max), build)
    }

    pub fn at_least(self, min: usize, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::at_least(min), value)
    }

    pub fn at_least_with(self, min: usize, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::at_least(min), build)
    }

    pub fn at_most(self, max: usize, value: impl Into<RawValue>) -> Self {
        self.quantified(Quantifier::at_most(max), value)
    }

    pub fn at_most_with(self, max: usize, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.quantified_with(Quantifier::at_most(max), build)
    }
}

// Anchors
impl Expression {
    fn anchor(self, prepend: Option<&str>, append: Option<&str>, value: RawValue) -> Self {
        let mut options = ClauseOptions::new();
        if let Some(text) = prepend {
            options = options.prepend(text);
        }
        if let Some(text) = append {
            options = options.append(text);
        }
        self.append(value, options)
    }

    pub fn start_of_line(self) -> Self {
        self.anchor(Some("^"), None, RawValue::empty())
    }

    pub fn start_of_string(self) -> Self {
        self.anchor(Some(r"\A"), None, RawValue::empty())
    }

    pub fn end_of_line(self) -> Self {
        self.anchor(None, Some("$"), RawValue::empty())
    }

    pub fn end_of_string(self) -> Self {
        self.anchor(None, Some(r"\z"), RawValue::empty())
    }

    pub fn line_starts_with(self, value: impl Into<RawValue>) -> Self {
        self.anchor(Some("^"), None, value.into())
    }

    pub fn string_starts_with(self, value: impl Into<RawValue>) -> Self {
        self.anchor(Some(r"\A"), None, value.into())
    }

    pub fn line_ends_with(self, value: impl Into<RawValue>) -> Self {
        self.anchor(None, Some("$"), value.into())
    }

    pub fn string_ends_with(self, value: impl Into<RawValue>) -> Self {
        self.anchor(None, Some(r"\z"), value.into())
    }

    /// `value` is the whole line.
    pub fn start_to_end_of_line(self, value: impl Into<RawValue>) -> Self {
        self.anchor(Some("^"), Some("$"), value.into())
    }

    /// `value` is the whole string.
    pub fn start_to_end_of_string(self, value: impl Into<RawValue>) -> Self {
        self.anchor(Some(r"\A"), Some(r"\z"), value.into())
    }
}

// Lookaround
impl Expression {
    fn lookaround(self, open: &str, value: RawValue) -> Self {
        let options = ClauseOptions::new().without_groups().prepend(open).append(")");
        self.append(value, options)
    }

    fn lookaround_with(self, open: &str, build: impl FnOnce(Expression) -> Expression) -> Self {
        let options = ClauseOptions::new().without_groups().prepend(open).append(")");
        self.append_with(options, build)
    }

    /// Followed by `value`, without consuming it.
    pub fn is(self, value: impl Into<RawValue>) -> Self {
        self.lookaround("(?=", value.into())
    }

    pub fn is_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.lookaround_with("(?=", build)
    }

    /// Not followed by `value`.
    pub fn not(self, value: impl Into<RawValue>) -> Self {
        self.lookaround("(?!", value.into())
    }

    pub fn not_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.lookaround_with("(?!", build)
    }

    pub fn preceded_by(self, value: impl Into<RawValue>) -> Self {
        self.lookaround("(?<=", value.into())
    }

    pub fn preceded_by_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.lookaround_with("(?<=", build)
    }

    pub fn not_preceded_by(self, value: impl Into<RawValue>) -> Self {
        self.lookaround("(?<!", value.into())
    }

    pub fn not_preceded_by_with(self, build: impl FnOnce(Expression) -> Expression) -> Self {
        self.lookaround_with("(?<!", build)
    }
}

// Flags
impl Expression {
    fn flag(mut self, flag: FlagBit, on: bool) -> Self {
        if on {
            self.engine.add_flag(flag);
        } else {
            self.engine.remove_flag(flag);
        }
        self
    }

    pub fn case_insensitive(self) -> Self {
        self.flag(FlagBit::CaseInsensitive, true)
    }

    pub fn case_sensitive(self) -> Self {
        self.flag(FlagBit::CaseInsensitive, false)
    }

    pub fn multi_line(self) -> Self {
        self.flag(FlagBit::MultiLine, true)
    }

    pub fn single_line(self) -> Self {
        self.flag(FlagBit::MultiLine, false)
    }

    pub fn whitespace_insensitive(self) -> Self {
        self.flag(FlagBit::ExtendedWhitespace, true)
    }

    pub fn whitespace_sensitive(self) -> Self {
        self.flag(FlagBit::ExtendedWhitespace, false)
    }
}
