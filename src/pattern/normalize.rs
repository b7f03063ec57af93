//! Turns raw clause input into a canonical, deduplicated atom list.
//!
//! Loose atoms keep their input order, with preset expansions after the
//! values given directly. Ranges follow, numeric before alphabetic, each
//! sorted and merged. Single characters already covered by a range are
//! dropped.

use itertools::Itertools;

use super::ast::{Atom, RawValue};
use super::char_class::{
    CharRange, class_escape, escape, fold_range, normalize_ranges, range_contains,
    split_mixed_case,
};
use super::presets::{PresetCatalog, PresetId, PresetItem, PresetValue};

/// Result of normalizing one clause's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub atoms: Vec<Atom>,
    /// A wildcard preset contributed the `.` atom.
    pub unescape_dot: bool,
}

#[derive(Default)]
struct Collector {
    direct: Vec<Atom>,
    from_presets: Vec<Atom>,
    ranges: Vec<CharRange>,
    unescape_dot: bool,
}

impl Collector {
    fn push_range(&mut self, low: char, high: char) {
        self.ranges.extend(split_mixed_case((low, high)));
    }
}

/// Resolves presets and normalizes clause input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    catalog: PresetCatalog,
}

impl Normalizer {
    pub fn new(catalog: PresetCatalog) -> Self {
        Self { catalog }
    }

    pub fn normalize(&self, inputs: &[RawValue]) -> Normalized {
        let mut collector = Collector::default();
        let mut presets = Vec::new();
        for value in inputs {
            self.collect(value, &mut collector, &mut presets);
        }
        for id in presets.into_iter().unique() {
            expand_preset(id, &mut collector);
        }

        let mut loose = collector.direct;
        loose.extend(collector.from_presets);
        Normalized {
            atoms: assemble(loose, normalize_ranges(&collector.ranges)),
            unescape_dot: collector.unescape_dot,
        }
    }

    fn collect(&self, value: &RawValue, out: &mut Collector, presets: &mut Vec<PresetId>) {
        match value {
            RawValue::List(values) => {
                for v in values {
                    self.collect(v, out, presets);
                }
            }
            RawValue::Symbol(name) => match self.catalog.canonical_name(name) {
                Some(id) => presets.push(id),
                None => {
                    log::debug!("unknown preset {name:?}, using it as literal text");
                    out.direct.extend(string_atom(name));
                }
            },
            RawValue::Str(s) => out.direct.extend(string_atom(s)),
            RawValue::Int(n) => out.direct.push(numeric_atom(&n.to_string())),
            RawValue::Float(f) => out.direct.push(numeric_atom(&f.to_string())),
            RawValue::Bool(b) => out.direct.push(Atom::Literal(b.to_string())),
            RawValue::Range(low, high) => match (single_char(low), single_char(high)) {
                (Some(lo), Some(hi)) => out.push_range(lo, hi),
                _ => log::debug!("dropping range {low:?}..{high:?}: bounds are not single characters"),
            },
        }
    }
}

fn expand_preset(id: PresetId, out: &mut Collector) {
    match id.value() {
        PresetValue::Token(token) => out.from_presets.push(Atom::RawToken(token.to_string())),
        PresetValue::Char(c) => out.from_presets.push(Atom::Char(c)),
        PresetValue::Range(lo, hi) => out.push_range(lo, hi),
        PresetValue::Wildcard => {
            out.from_presets.push(Atom::Char('.'));
            out.unescape_dot = true;
        }
        PresetValue::List(items) => {
            for item in items {
                match *item {
                    PresetItem::Preset(nested) => expand_preset(nested, out),
                    PresetItem::Range(lo, hi) => out.push_range(lo, hi),
                }
            }
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Strings under two characters (ignoring backslashes) are destined for a
/// character class; longer ones are escaped for use outside of one.
fn string_atom(s: &str) -> Option<Atom> {
    if s.is_empty() {
        return None;
    }
    if let Some(c) = single_char(s) {
        return Some(Atom::Char(c));
    }
    if s.chars().filter(|c| *c != '\\').count() < 2 {
        Some(Atom::Literal(class_escape(s)))
    } else {
        Some(Atom::Literal(escape(s)))
    }
}

fn numeric_atom(text: &str) -> Atom {
    match single_char(text) {
        Some(c) => Atom::Char(c),
        None => Atom::Literal(escape(text)),
    }
}

/// Deduplicate loose atoms, drop single characters covered by a range,
/// and append the ranges.
fn assemble(loose: Vec<Atom>, ranges: Vec<CharRange>) -> Vec<Atom> {
    loose
        .into_iter()
        .filter(|atom| match atom {
            Atom::Char(c) => !ranges.iter().any(|r| range_contains(*r, *c)),
            _ => true,
        })
        .unique()
        .chain(ranges.iter().map(|&(lo, hi)| Atom::CharRange(lo, hi)))
        .collect()
}

/// Lowercase literal and range atoms for case-insensitive matching, then
/// re-run range merging and deduplication so case duplicates collapse.
/// Raw tokens such as `\W` keep their case.
pub fn fold_case(atoms: &[Atom]) -> Vec<Atom> {
    let mut loose = Vec::new();
    let mut ranges = Vec::new();
    for atom in atoms {
        match atom {
            Atom::CharRange(lo, hi) => ranges.push(fold_range((*lo, *hi))),
            Atom::Char(c) => loose.push(Atom::Char(c.to_lowercase().next().unwrap_or(*c))),
            Atom::Literal(text) => loose.push(Atom::Literal(text.to_lowercase())),
            Atom::RawToken(_) => loose.push(atom.clone()),
        }
    }
    assemble(loose, normalize_ranges(&ranges))
}
