//! Rendering a single clause to pattern text.

use itertools::Itertools;

use crate::flags::{FlagBit, FlagSet};

use super::ast::{Atom, Clause, ClauseBody, ClauseOptions, Quantifier, Wrapping};
use super::char_class::{class_escape, escape};
use super::grouper::Boundary;
use super::normalize::fold_case;
use super::splice::{is_single_unit, splice};

/// Quantifier text with redundant forms simplified:
/// `{1,1}` is dropped, `{1,}` is `+`, `{0,}` is `*` and `{0,1}` is `?`.
pub fn quantifier_text(quantifier: Option<Quantifier>) -> String {
    match quantifier {
        None | Some(Quantifier::Exactly(1)) => String::new(),
        Some(Quantifier::ZeroOrMore) => "*".to_string(),
        Some(Quantifier::OneOrMore) => "+".to_string(),
        Some(Quantifier::ZeroOrOne) => "?".to_string(),
        Some(Quantifier::Exactly(n)) => format!("{{{n}}}"),
        Some(Quantifier::Range { min, max }) => match (min.unwrap_or(0), max) {
            (1, Some(1)) => String::new(),
            (1, None) => "+".to_string(),
            (0, None) => "*".to_string(),
            (0, Some(1)) => "?".to_string(),
            _ => {
                let min = min.map(|n| n.to_string()).unwrap_or_default();
                let max = max.map(|n| n.to_string()).unwrap_or_default();
                format!("{{{min},{max}}}")
            }
        },
    }
}

fn class_member(atom: &Atom) -> String {
    match atom {
        Atom::CharRange(lo, hi) => format!(
            "{}-{}",
            class_escape(&lo.to_string()),
            class_escape(&hi.to_string())
        ),
        Atom::Char(c) => class_escape(&c.to_string()),
        Atom::Literal(text) | Atom::RawToken(text) => text.clone(),
    }
}

fn bare_char(c: char, unescape_dot: bool) -> String {
    if c == '.' && unescape_dot {
        ".".to_string()
    } else {
        escape(&c.to_string())
    }
}

/// Render atoms as alternatives: at most one class expression (or a lone
/// bare character) first, then each multi-character literal.
fn fragments(atoms: &[Atom], unescape_dot: bool) -> Vec<String> {
    let (members, literals): (Vec<&Atom>, Vec<&Atom>) =
        atoms.iter().partition(|a| a.is_class_eligible());

    let mut out = Vec::with_capacity(literals.len() + 1);
    match members.as_slice() {
        [] => {}
        [Atom::Char(c)] => out.push(bare_char(*c, unescape_dot)),
        [Atom::Literal(text) | Atom::RawToken(text)] => out.push(text.clone()),
        members => out.push(format!("[{}]", members.iter().map(|a| class_member(a)).join(""))),
    }
    out.extend(literals.into_iter().map(class_member));
    out
}

/// Apply grouping, quantifier, capture and prepend/append to a rendered
/// body. `alternation` says the body holds top-level alternatives that must
/// be scoped by a group.
pub fn finish(body: &str, alternation: bool, options: &ClauseOptions) -> String {
    let quantifier = quantifier_text(options.quantifier);
    let wrapping = options.wrapping();

    let mut body = body.to_string();
    if alternation || (!quantifier.is_empty() && !is_single_unit(&body)) {
        if quantifier.is_empty() && wrapping != Wrapping::None {
            return decorate(wrapping.apply(&body), options);
        }
        body = Wrapping::NonCapture.apply(&body);
    }
    body.push_str(&quantifier);
    decorate(wrapping.apply(&body), options)
}

fn decorate(body: String, options: &ClauseOptions) -> String {
    match (&options.prepend, &options.append) {
        (None, None) => body,
        (prepend, append) => format!(
            "{}{body}{}",
            prepend.as_deref().unwrap_or_default(),
            append.as_deref().unwrap_or_default()
        ),
    }
}

fn render_atoms(atoms: &[Atom], options: &ClauseOptions, flags: FlagSet, alternative: bool) -> String {
    let folded;
    let atoms = if flags.contains(FlagBit::CaseInsensitive) {
        folded = fold_case(atoms);
        &folded
    } else {
        atoms
    };
    let fragments = fragments(atoms, options.unescape_dot);
    let alternation = fragments.len() > 1 || options.long_strings_present;
    let bare_ok = alternative && options.prepend.is_none() && options.append.is_none();
    finish(&fragments.join("|"), alternation && !bare_ok, options)
}

/// Render one clause. An or-marker renders as `|`. Inside a run of
/// alternatives, several fragments of one clause join the run directly
/// instead of getting a group of their own.
pub fn render_clause(clause: &Clause, flags: FlagSet, boundary: Boundary) -> String {
    if clause.is_or_marker() {
        return "|".to_string();
    }
    match &clause.body {
        ClauseBody::Atoms(atoms) => {
            render_atoms(atoms, &clause.options, flags, boundary.alternative)
        }
        ClauseBody::Engine(inner) => {
            splice(inner, &clause.options, flags, boundary.bare_alternation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::ast::{RawValue, sym};
    use crate::pattern::normalize::Normalizer;
    use crate::raw;

    fn clause(value: RawValue, options: ClauseOptions) -> Clause {
        let normalized = Normalizer::default().normalize(&[value]);
        let long_strings = normalized
            .atoms
            .iter()
            .filter(|a| !a.is_class_eligible())
            .count()
            > 1;
        Clause {
            body: ClauseBody::Atoms(normalized.atoms),
            options: ClauseOptions {
                unescape_dot: normalized.unescape_dot,
                long_strings_present: long_strings,
                ..options
            },
            index: 0,
        }
    }

    fn render(value: RawValue) -> String {
        render_clause(&clause(value, ClauseOptions::new()), FlagSet::new(), Boundary::default())
    }

    fn render_with(value: RawValue, options: ClauseOptions) -> String {
        render_clause(&clause(value, options), FlagSet::new(), Boundary::default())
    }

    #[test]
    fn quantifier_simplification_table() {
        let cases = [
            (Quantifier::between(1, 1), ""),
            (Quantifier::at_least(1), "+"),
            (Quantifier::at_least(0), "*"),
            (Quantifier::between(0, 1), "?"),
            (Quantifier::between(2, 4), "{2,4}"),
            (Quantifier::at_least(3), "{3,}"),
            (Quantifier::at_most(3), "{,3}"),
            (Quantifier::at_most(1), "?"),
            (Quantifier::Exactly(1), ""),
            (Quantifier::Exactly(3), "{3}"),
            (Quantifier::ZeroOrMore, "*"),
            (Quantifier::OneOrMore, "+"),
            (Quantifier::ZeroOrOne, "?"),
        ];
        for (q, expected) in cases {
            assert_eq!(quantifier_text(Some(q)), expected, "quantifier {q:?}");
        }
        assert_eq!(quantifier_text(None), "");
    }

    #[test]
    fn class_with_single_chars_and_ranges() {
        assert_eq!(render(raw!["q", 'a'..='f']), "[qa-f]");
    }

    #[test]
    fn lone_char_is_bare() {
        assert_eq!(render("q".into()), "q");
        assert_eq!(render(".".into()), r"\.");
        assert_eq!(render("(".into()), r"\(");
    }

    #[test]
    fn wildcard_preset_renders_unescaped() {
        assert_eq!(render(sym("any")), ".");
        assert_eq!(render(sym("dot")), ".");
    }

    #[test]
    fn raw_token_alone_is_bare() {
        assert_eq!(render(sym("word")), r"\w");
        assert_eq!(render(raw![sym("word"), "\""]), r#"["\w]"#);
    }

    #[test]
    fn escapes_inside_class() {
        assert_eq!(render(raw!["$", "]", "-", 'a'..='f']), r"[$\]\-a-f]");
        assert_eq!(render(raw!["^", "a"]), r"[\^a]");
    }

    #[test]
    fn literal_metacharacters_are_escaped() {
        assert_eq!(render("$|^*+.[({})]".into()), r"\$\|\^\*\+\.\[\(\{\}\)\]");
    }

    #[test]
    fn class_and_literal_alternate_in_group() {
        assert_eq!(render(raw!["a", "abc"]), "(?:a|abc)");
        assert_eq!(render(raw!["hello", "goodbye"]), "(?:hello|goodbye)");
        assert_eq!(render(raw!["x", "y", "abc"]), "(?:[xy]|abc)");
    }

    #[test]
    fn capture_options() {
        let capture = ClauseOptions::new().capture(true);
        assert_eq!(render_with("hello".into(), capture.clone()), "(hello)");
        assert_eq!(render_with("hello".into(), ClauseOptions::new().capture(false)), "hello");
        assert_eq!(render_with("hello".into(), ClauseOptions::new().named("name")), "(?<name>hello)");
        assert_eq!(render_with(raw!["ab", "cd"], capture), "(ab|cd)");
        assert_eq!(
            render_with(raw!["ab", "cd"], ClauseOptions::new().non_capture(true)),
            "(?:ab|cd)"
        );
    }

    #[test]
    fn quantifier_inside_capture() {
        let opts = ClauseOptions::new()
            .quantifier(Quantifier::between(1, 4))
            .capture(true);
        assert_eq!(render_with("a".into(), opts), "(a{1,4})");
        let opts = ClauseOptions::new().quantifier(Quantifier::ZeroOrOne).named("named");
        assert_eq!(render_with(('a'..='z').into(), opts), "(?<named>[a-z]?)");
    }

    #[test]
    fn quantified_multi_char_literal_is_grouped() {
        let opts = ClauseOptions::new().quantifier(Quantifier::OneOrMore);
        assert_eq!(render_with("abc".into(), opts.clone()), "(?:abc)+");
        assert_eq!(render_with(raw!["a", "bc"], opts.clone().capture(true)), "((?:a|bc)+)");
        assert_eq!(render_with("a".into(), opts), "a+");
    }

    #[test]
    fn prepend_and_append_sit_outside_capture() {
        let opts = ClauseOptions::new().capture(true).prepend("^").append("$");
        assert_eq!(render_with(('a'..='z').into(), opts), "^([a-z])$");
    }

    #[test]
    fn empty_clause_renders_decorations_only() {
        assert_eq!(render_with(RawValue::empty(), ClauseOptions::new().prepend(r"\A")), r"\A");
        let opts = ClauseOptions::new().quantifier(Quantifier::ZeroOrMore);
        assert_eq!(render_with(RawValue::empty(), opts), "*");
        assert_eq!(render(RawValue::empty()), "");
    }

    #[test]
    fn case_insensitive_folds_before_rendering() {
        let flags = FlagSet::new().with(FlagBit::CaseInsensitive);
        let c = clause(raw!['a'..='z', 'A'..='Z'], ClauseOptions::new());
        assert_eq!(render_clause(&c, flags, Boundary::default()), "[a-z]");
        let c = clause(raw!['a'..='d', 'X'..='Z'], ClauseOptions::new());
        assert_eq!(render_clause(&c, flags, Boundary::default()), "[a-dx-z]");
        let c = clause("HeLLo".into(), ClauseOptions::new());
        assert_eq!(render_clause(&c, flags, Boundary::default()), "hello");
    }

    #[test]
    fn or_marker_renders_separator() {
        let marker = Clause {
            body: ClauseBody::Atoms(Vec::new()),
            options: ClauseOptions {
                is_or_marker: true,
                ..ClauseOptions::new()
            },
            index: 1,
        };
        assert_eq!(render_clause(&marker, FlagSet::new(), Boundary::default()), "|");
    }
}
