//! Data types shared by the pattern compiler stages.

use std::fmt;
use std::ops::RangeInclusive;

use crate::engine::Engine;

/// Heterogeneous clause input, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A preset name such as `digits`. Unknown names degrade to literal text.
    Symbol(String),
    /// Inclusive range with stringified bounds.
    Range(String, String),
    List(Vec<RawValue>),
}

impl RawValue {
    /// An empty input list; appends a clause with no atoms.
    pub fn empty() -> Self {
        RawValue::List(Vec::new())
    }

    pub fn range(low: impl fmt::Display, high: impl fmt::Display) -> Self {
        RawValue::Range(low.to_string(), high.to_string())
    }
}

/// Build a preset [`RawValue::Symbol`].
pub fn sym(name: &str) -> RawValue {
    RawValue::Symbol(name.to_string())
}

/// Build a [`RawValue::List`] from values of mixed types.
///
/// ```
/// use reggaexp::{raw, sym};
/// let v = raw!["$", 'a'..='f', sym("digits"), 3];
/// ```
#[macro_export]
macro_rules! raw {
    ($($value:expr),* $(,)?) => {
        $crate::RawValue::List(vec![$($crate::RawValue::from($value)),*])
    };
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(s)
    }
}

impl From<char> for RawValue {
    fn from(c: char) -> Self {
        RawValue::Str(c.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<RangeInclusive<char>> for RawValue {
    fn from(r: RangeInclusive<char>) -> Self {
        RawValue::range(r.start(), r.end())
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>, const N: usize> From<[T; N]> for RawValue {
    fn from(values: [T; N]) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! raw_value_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for RawValue {
            fn from(n: $t) -> Self {
                RawValue::Int(n as i64)
            }
        }

        impl From<RangeInclusive<$t>> for RawValue {
            fn from(r: RangeInclusive<$t>) -> Self {
                RawValue::range(r.start(), r.end())
            }
        }
    )*};
}

raw_value_from_int!(i32, i64, u8, u32, usize);

/// A normalized unit of pattern content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// `low-high` inside a character class.
    CharRange(char, char),
    /// One literal character. Escaped when rendered, for whichever context
    /// (class or bare) it ends up in.
    Char(char),
    /// Literal text, already escaped.
    Literal(String),
    /// Control sequence emitted verbatim, e.g. `\w`.
    RawToken(String),
}

impl Atom {
    /// True when the atom renders as a single character-class member.
    pub fn is_class_eligible(&self) -> bool {
        match self {
            Atom::CharRange(..) | Atom::Char(_) => true,
            Atom::Literal(text) | Atom::RawToken(text) => {
                text.chars().filter(|c| *c != '\\').count() <= 1
            }
        }
    }
}

/// Repetition applied to a rendered clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
    Exactly(usize),
    /// `{min,max}`; either side may be open.
    Range {
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl Quantifier {
    pub fn between(min: usize, max: usize) -> Self {
        Quantifier::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Quantifier::Range {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: usize) -> Self {
        Quantifier::Range {
            min: None,
            max: Some(max),
        }
    }
}

/// Per-clause rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseOptions {
    pub quantifier: Option<Quantifier>,
    pub capture: Option<bool>,
    /// Named capture; implies `capture`.
    pub name: Option<String>,
    pub non_capture: bool,
    /// Placed before the clause, e.g. `^` or `(?=`.
    pub prepend: Option<String>,
    /// Placed after the clause, e.g. `$` or `)`.
    pub append: Option<String>,
    pub is_or_marker: bool,
    /// Render a lone `.` as the wildcard rather than an escaped dot.
    pub unescape_dot: bool,
    /// More than one multi-character literal; forces grouping.
    pub long_strings_present: bool,
}

impl ClauseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantifier(mut self, q: Quantifier) -> Self {
        self.quantifier = Some(q);
        self
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn non_capture(mut self, non_capture: bool) -> Self {
        self.non_capture = non_capture;
        self
    }

    pub fn prepend(mut self, text: &str) -> Self {
        self.prepend = Some(text.to_string());
        self
    }

    pub fn append(mut self, text: &str) -> Self {
        self.append = Some(text.to_string());
        self
    }

    /// Drop every grouping request; used for lookaround clauses.
    pub fn without_groups(mut self) -> Self {
        self.capture = Some(false);
        self.name = None;
        self.non_capture = false;
        self
    }

    /// Whether the clause asks for any grouping syntax of its own.
    pub fn wants_group(&self) -> bool {
        self.wrapping() != Wrapping::None
    }

    /// Resolve the grouping request: `name` implies capture, and capture
    /// wins over `non_capture`.
    pub fn wrapping(&self) -> Wrapping<'_> {
        if let Some(name) = &self.name {
            Wrapping::Named(name)
        } else if self.capture == Some(true) {
            Wrapping::Capture
        } else if self.non_capture {
            Wrapping::NonCapture
        } else {
            Wrapping::None
        }
    }
}

/// The grouping syntax a clause is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapping<'a> {
    None,
    Capture,
    NonCapture,
    Named(&'a str),
}

impl Wrapping<'_> {
    pub fn apply(&self, body: &str) -> String {
        match self {
            Wrapping::None => body.to_string(),
            Wrapping::Capture => format!("({body})"),
            Wrapping::NonCapture => format!("(?:{body})"),
            Wrapping::Named(name) => format!("(?<{name}>{body})"),
        }
    }
}

/// What a clause matches.
#[derive(Debug, Clone)]
pub enum ClauseBody {
    Atoms(Vec<Atom>),
    /// A nested engine, compiled with the outer flags on render.
    Engine(Box<Engine>),
}

/// One appended clause. `index` is its position in the clause store at
/// append time and never changes.
#[derive(Debug, Clone)]
pub struct Clause {
    pub body: ClauseBody,
    pub options: ClauseOptions,
    pub index: usize,
}

impl Clause {
    pub fn is_or_marker(&self) -> bool {
        self.options.is_or_marker
    }

    pub fn atoms(&self) -> &[Atom] {
        match &self.body {
            ClauseBody::Atoms(atoms) => atoms,
            ClauseBody::Engine(_) => &[],
        }
    }

    /// Atoms or a nested engine, as opposed to anchors and markers that
    /// only carry decorations.
    pub fn has_content(&self) -> bool {
        match &self.body {
            ClauseBody::Atoms(atoms) => !atoms.is_empty(),
            ClauseBody::Engine(_) => true,
        }
    }

    /// A bare quantifier with no atoms of its own; it repeats the clause
    /// before it.
    pub fn is_postfix(&self) -> bool {
        !self.is_or_marker()
            && !self.has_content()
            && self.options.quantifier.is_some()
            && self.options.prepend.is_none()
            && self.options.append.is_none()
    }
}
