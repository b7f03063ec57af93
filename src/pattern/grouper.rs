//! Scoping of `or` markers across a clause sequence.
//!
//! A run `A | B | C` inside a longer sequence is wrapped in an implicit
//! `(?:...)` so the alternation does not swallow its neighbours. When every
//! clause of the sequence is an alternative, the expression is left as one
//! flat top-level alternation.

use crate::flags::FlagSet;

use super::ast::Clause;
use super::render::{quantifier_text, render_clause};
use super::splice::is_single_unit;

/// Implicit group boundaries around one clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundary {
    /// `(?:` opens immediately before the clause.
    pub open: bool,
    /// `)` closes immediately after the clause.
    pub close: bool,
    /// An or-marker sits directly before or after the clause.
    pub alternative: bool,
    /// The clause is the whole sequence.
    pub solo: bool,
}

impl Boundary {
    /// A top-level alternation inside the clause cannot leak into
    /// neighbours: the clause is itself an alternative, or the only clause.
    pub fn bare_alternation(&self) -> bool {
        self.alternative || self.solo
    }
}

/// One rendering step of the sequence.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    Clause {
        clause: &'a Clause,
        /// A quantifier-only clause repeating this one.
        postfix: Option<&'a Clause>,
        boundary: Boundary,
    },
    Or(&'a Clause),
}

/// Drop or-markers that have no alternative on one side (leading,
/// trailing, repeated) and quantifier-only clauses with no content clause
/// directly before them.
fn effective(clauses: &[Clause]) -> Vec<&Clause> {
    let mut out: Vec<&Clause> = Vec::with_capacity(clauses.len());
    for clause in clauses {
        if clause.is_or_marker() && out.last().is_none_or(|prev| prev.is_or_marker()) {
            log::debug!("ignoring stray or-marker at clause {}", clause.index);
            continue;
        }
        if clause.is_postfix() && !out.last().is_some_and(|prev| prev.has_content()) {
            log::debug!("ignoring quantifier with nothing to repeat at clause {}", clause.index);
            continue;
        }
        out.push(clause);
    }
    if let Some(last) = out.last()
        && last.is_or_marker()
    {
        log::debug!("ignoring trailing or-marker at clause {}", last.index);
        out.pop();
    }
    out
}

/// A clause and the quantifier-only clause folded into it.
struct Unit<'a> {
    clause: &'a Clause,
    postfix: Option<&'a Clause>,
}

fn fold_postfix<'a>(clauses: &[&'a Clause]) -> Vec<Unit<'a>> {
    let mut out: Vec<Unit<'a>> = Vec::with_capacity(clauses.len());
    for &clause in clauses {
        match out.last_mut() {
            Some(unit) if clause.is_postfix() => unit.postfix = Some(clause),
            _ => out.push(Unit {
                clause,
                postfix: None,
            }),
        }
    }
    out
}

/// Or-markers sit at exactly the odd positions.
fn fully_alternating(units: &[Unit<'_>]) -> bool {
    units
        .iter()
        .enumerate()
        .all(|(i, unit)| unit.clause.is_or_marker() == (i % 2 == 1))
}

/// Decide the implicit group boundaries for every clause.
pub fn plan(clauses: &[Clause]) -> Vec<Step<'_>> {
    let units = fold_postfix(&effective(clauses));
    let flat = fully_alternating(&units);
    let solo = units.len() == 1;

    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            if unit.clause.is_or_marker() {
                return Step::Or(unit.clause);
            }
            let before = i > 0 && units[i - 1].clause.is_or_marker();
            let after = units.get(i + 1).is_some_and(|next| next.clause.is_or_marker());
            Step::Clause {
                clause: unit.clause,
                postfix: unit.postfix,
                boundary: Boundary {
                    open: !flat && !before && after,
                    close: !flat && before && !after,
                    alternative: before || after,
                    solo,
                },
            }
        })
        .collect()
}

/// Render a clause and the quantifier folded into it. The quantifier
/// repeats the whole clause text, grouped first when it is not one unit,
/// and is dropped when the clause rendered nothing.
fn render_unit(
    clause: &Clause,
    postfix: Option<&Clause>,
    flags: FlagSet,
    boundary: Boundary,
) -> String {
    let text = render_clause(clause, flags, boundary);
    let Some(postfix) = postfix else {
        return text;
    };
    if text.is_empty() {
        log::debug!("ignoring quantifier at clause {}: nothing to repeat", postfix.index);
        return text;
    }
    let quantifier = quantifier_text(postfix.options.quantifier);
    if quantifier.is_empty() || is_single_unit(&text) {
        text + &quantifier
    } else {
        format!("(?:{text}){quantifier}")
    }
}

/// Render a whole clause sequence.
pub fn render_sequence(clauses: &[Clause], flags: FlagSet) -> String {
    let mut out = String::new();
    for step in plan(clauses) {
        match step {
            Step::Or(marker) => out.push_str(&render_clause(marker, flags, Boundary::default())),
            Step::Clause {
                clause,
                postfix,
                boundary,
            } => {
                if boundary.open {
                    out.push_str("(?:");
                }
                out.push_str(&render_unit(clause, postfix, flags, boundary));
                if boundary.close {
                    out.push(')');
                }
            }
        }
    }
    out
}
