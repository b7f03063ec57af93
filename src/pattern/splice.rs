//! Embedding one compiled engine inside a clause of another.
//!
//! Also home to the small structural scanner used to decide whether a
//! fragment of pattern text is already a single unit.

use std::str::CharIndices;

use crate::engine::Engine;
use crate::flags::FlagSet;

use super::ast::ClauseOptions;
use super::render::finish;

/// A structural token of pattern text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Alternation,
    /// A whole `[...]` bracket expression.
    Class,
    /// A literal character, escape sequence, or quantifier symbol.
    Other,
}

struct Scanner<'a> {
    chars: CharIndices<'a>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
        }
    }

    fn skip_class(&mut self) {
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => {
                    self.chars.next();
                }
                ']' => return,
                _ => {}
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (_, c) = self.chars.next()?;
        Some(match c {
            '\\' => {
                self.chars.next();
                Token::Other
            }
            '[' => {
                self.skip_class();
                Token::Class
            }
            '(' => Token::Open,
            ')' => Token::Close,
            '|' => Token::Alternation,
            _ => Token::Other,
        })
    }
}

/// True when `text` is one parenthesized group from first to last
/// character: the nesting depth stays above zero at every interior position.
pub fn is_enclosed(text: &str) -> bool {
    let mut tokens = Scanner::new(text).peekable();
    if tokens.next() != Some(Token::Open) {
        return false;
    }
    let mut depth = 1usize;
    while let Some(token) = tokens.next() {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth == 0 {
                    return tokens.peek().is_none();
                }
            }
            _ => {}
        }
    }
    false
}

/// True when `text` contains a `|` outside any group or class.
pub fn has_top_level_alternation(text: &str) -> bool {
    let mut depth = 0usize;
    for token in Scanner::new(text) {
        match token {
            Token::Open => depth += 1,
            Token::Close => depth = depth.saturating_sub(1),
            Token::Alternation if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// True when a quantifier placed after `text` would repeat all of it.
pub fn is_single_unit(text: &str) -> bool {
    let mut tokens = Scanner::new(text);
    match (tokens.next(), tokens.next()) {
        (None, _) => true,
        (Some(Token::Class | Token::Other), None) => true,
        _ => is_enclosed(text),
    }
}

/// Remove one enclosing `(?:...)` pair, if the whole text is one.
/// Capturing and lookaround groups are kept, since dropping them would
/// change what the pattern matches or captures.
fn strip_non_capturing(text: &str) -> &str {
    if text.starts_with("(?:") && is_enclosed(text) {
        &text[3..text.len() - 1]
    } else {
        text
    }
}

/// Render `inner` as the body of a clause with `options`.
///
/// The inner engine is compiled with the outer `flags`. When the clause asks
/// for a group of its own, an enclosing non-capturing group of the inner
/// text is dropped before re-wrapping so groups are not doubled. Without a
/// group request, a top-level alternation stays bare only where
/// `bare_alternation` says it cannot leak into neighbouring clauses.
pub fn splice(
    inner: &Engine,
    options: &ClauseOptions,
    flags: FlagSet,
    bare_alternation: bool,
) -> String {
    let text = inner.render_with(flags);
    if options.wants_group() {
        // Only `(?:...)` is stripped: an inner capture or lookaround stays,
        // so `(?<n>(ab))` keeps both groups.
        let text = strip_non_capturing(&text);
        return finish(text, has_top_level_alternation(text), options);
    }

    let bare_ok = bare_alternation && options.prepend.is_none() && options.append.is_none();
    finish(&text, has_top_level_alternation(&text) && !bare_ok, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::ast::Quantifier;

    fn alternating() -> Engine {
        let mut inner = Engine::new();
        inner.append("aa", ClauseOptions::new());
        inner.append_or();
        inner.append("bb", ClauseOptions::new());
        inner
    }

    #[test]
    fn enclosed_detection() {
        assert!(is_enclosed("(abc)"));
        assert!(is_enclosed("(?:a|(b))"));
        assert!(!is_enclosed("(a)(b)"));
        assert!(!is_enclosed("(a)b"));
        assert!(!is_enclosed("abc"));
        assert!(is_enclosed(r"(a\))"));
        assert!(!is_enclosed(r"(a\)"));
        assert!(is_enclosed("([)])"));
    }

    #[test]
    fn top_level_alternation() {
        assert!(has_top_level_alternation("a|b"));
        assert!(!has_top_level_alternation("(?:a|b)c"));
        assert!(!has_top_level_alternation(r"a\|b"));
        assert!(!has_top_level_alternation("[|]"));
    }

    #[test]
    fn single_units() {
        assert!(is_single_unit(""));
        assert!(is_single_unit("a"));
        assert!(is_single_unit(r"\w"));
        assert!(is_single_unit("[a-z]"));
        assert!(is_single_unit("(?:ab)"));
        assert!(!is_single_unit("ab"));
        assert!(!is_single_unit("a+"));
        assert!(!is_single_unit("[a][b]"));
    }

    #[test]
    fn capture_wraps_bare_alternation_once() {
        let out = splice(
            &alternating(),
            &ClauseOptions::new().capture(true),
            FlagSet::new(),
            false,
        );
        assert_eq!(out, "(aa|bb)");
    }

    #[test]
    fn capture_replaces_enclosing_non_capturing_group() {
        let mut inner = Engine::new();
        inner.append("ab", ClauseOptions::new().non_capture(true));
        let out = splice(&inner, &ClauseOptions::new().capture(true), FlagSet::new(), false);
        assert_eq!(out, "(ab)");
    }

    #[test]
    fn inner_capture_is_kept() {
        let mut inner = Engine::new();
        inner.append("ab", ClauseOptions::new().capture(true));
        let out = splice(&inner, &ClauseOptions::new().named("n"), FlagSet::new(), false);
        assert_eq!(out, "(?<n>(ab))");
    }

    #[test]
    fn plain_splice_keeps_inner_text() {
        let mut inner = Engine::new();
        inner.append('a'..='z', ClauseOptions::new().prepend("^"));
        let out = splice(&inner, &ClauseOptions::new(), FlagSet::new(), false);
        assert_eq!(out, "^[a-z]");
    }

    #[test]
    fn alternation_is_grouped_unless_bare_is_safe() {
        let opts = ClauseOptions::new();
        assert_eq!(splice(&alternating(), &opts, FlagSet::new(), false), "(?:aa|bb)");
        assert_eq!(splice(&alternating(), &opts, FlagSet::new(), true), "aa|bb");

        let anchored = ClauseOptions::new().append("$");
        assert_eq!(splice(&alternating(), &anchored, FlagSet::new(), true), "(?:aa|bb)$");
    }

    #[test]
    fn quantified_splice_groups_before_repeating() {
        let opts = ClauseOptions::new().quantifier(Quantifier::OneOrMore);
        assert_eq!(splice(&alternating(), &opts, FlagSet::new(), true), "(?:aa|bb)+");
    }
}
