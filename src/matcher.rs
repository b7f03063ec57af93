//! Matcher: hand a compiled pattern to a regular-expression engine.
//!
//! Backed by `fancy_regex`, which runs lookaround itself and delegates the
//! rest of the pattern to the `regex` crate.
//!
//! All positions are **byte** offsets into the haystack.

use std::borrow::Cow;

use anyhow::{Context, Result};
use fancy_regex::{Captures, Regex};

use crate::flags::FlagSet;

/// Anything that can search text with a compiled pattern.
pub trait MatchablePattern {
    fn source(&self) -> &str;
    fn flags(&self) -> FlagSet;

    /// Leftmost match at or after the start of `haystack`.
    fn find<'t>(&self, haystack: &'t str) -> Option<Match<'t>>;

    /// All non-overlapping matches, left to right.
    fn find_all<'t>(&self, haystack: &'t str) -> Vec<Match<'t>>;

    fn is_match(&self, haystack: &str) -> bool {
        self.find(haystack).is_some()
    }
}

/// One successful match and its capture groups.
#[derive(Debug)]
pub struct Match<'t> {
    captures: Captures<'t>,
}

impl<'t> Match<'t> {
    /// The whole matched text.
    pub fn as_str(&self) -> &'t str {
        self.captures.get(0).map_or("", |m| m.as_str())
    }

    pub fn start(&self) -> usize {
        self.captures.get(0).map_or(0, |m| m.start())
    }

    pub fn end(&self) -> usize {
        self.captures.get(0).map_or(0, |m| m.end())
    }

    /// Text of numbered group `index`, if it took part in the match.
    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Text of the named group `name`, if it took part in the match.
    pub fn name(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Number of groups, including the implicit whole-match group 0.
    pub fn group_count(&self) -> usize {
        self.captures.len()
    }
}

/// A pattern backed by `fancy_regex`.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    flags: FlagSet,
    regex: Regex,
}

/// Rewrite `{,n}` as `{0,n}`, the only bounded form the backend accepts
/// without a lower bound. Escapes and bracket expressions are left alone.
fn explicit_lower_bounds(source: &str) -> Cow<'_, str> {
    if !source.contains("{,") {
        return Cow::Borrowed(source);
    }
    let mut out = String::with_capacity(source.len() + 4);
    let mut chars = source.chars().peekable();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '{' if !in_class && chars.peek() == Some(&',') => out.push('0'),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Build a matcher for `source` with `flags`.
///
/// Flags travel as an inline group in front of the pattern; the reported
/// source stays as given.
pub fn compile(source: &str, flags: FlagSet) -> Result<RegexPattern> {
    let body = explicit_lower_bounds(source);
    let text = if flags.is_empty() {
        body.into_owned()
    } else {
        format!("(?{flags}){body}")
    };
    let regex = Regex::new(&text).with_context(|| format!("cannot compile pattern /{source}/{flags}"))?;
    log::debug!("built matcher for /{source}/{flags}");
    Ok(RegexPattern {
        source: source.to_string(),
        flags,
        regex,
    })
}

impl MatchablePattern for RegexPattern {
    fn source(&self) -> &str {
        &self.source
    }

    fn flags(&self) -> FlagSet {
        self.flags
    }

    /// A search that exceeds the backtracking limit counts as no match.
    fn find<'t>(&self, haystack: &'t str) -> Option<Match<'t>> {
        match self.regex.captures(haystack) {
            Ok(captures) => captures.map(|captures| Match { captures }),
            Err(err) => {
                log::warn!("search with /{}/{} failed: {err}", self.source, self.flags);
                None
            }
        }
    }

    fn find_all<'t>(&self, haystack: &'t str) -> Vec<Match<'t>> {
        self.regex
            .captures_iter(haystack)
            .map_while(|found| match found {
                Ok(captures) => Some(Match { captures }),
                Err(err) => {
                    log::warn!("search with /{}/{} failed: {err}", self.source, self.flags);
                    None
                }
            })
            .collect()
    }
}

impl RegexPattern {
    /// Leftmost match as its matched text; shorthand used by tests and
    /// callers that do not need groups.
    pub fn find_str<'t>(&self, haystack: &'t str) -> Option<&'t str> {
        self.find(haystack).map(|m| m.as_str())
    }
}
