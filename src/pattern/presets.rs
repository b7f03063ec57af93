//! Symbolic presets such as `digits` or `letter`.
//!
//! Names, aliases and plural spellings all live in one static table, so
//! resolving a token is a single lookup.

use phf::{Map, phf_map};

/// A canonical preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetId {
    Word,
    NonWord,
    Number,
    NonNumeric,
    Letter,
    Upper,
    Lower,
    Whitespace,
    NonWhitespace,
    Space,
    Tab,
    Dot,
    Blank,
    Hex,
    Alphanum,
}

/// What a preset expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetValue {
    Token(&'static str),
    Char(char),
    Range(char, char),
    /// The match-anything `.`.
    Wildcard,
    List(&'static [PresetItem]),
}

/// One member of a [`PresetValue::List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetItem {
    Preset(PresetId),
    Range(char, char),
}

impl PresetId {
    pub fn value(self) -> PresetValue {
        match self {
            PresetId::Word => PresetValue::Token(r"\w"),
            PresetId::NonWord => PresetValue::Token(r"\W"),
            PresetId::Number => PresetValue::Range('0', '9'),
            PresetId::NonNumeric => PresetValue::Token(r"\D"),
            // mixed-case bounds; the normalizer splits this into a-z and A-Z
            PresetId::Letter => PresetValue::Range('a', 'Z'),
            PresetId::Upper => PresetValue::Range('A', 'Z'),
            PresetId::Lower => PresetValue::Range('a', 'z'),
            PresetId::Whitespace => PresetValue::Token(r"\s"),
            PresetId::NonWhitespace => PresetValue::Token(r"\S"),
            PresetId::Space => PresetValue::Char(' '),
            PresetId::Tab => PresetValue::Token(r"\t"),
            PresetId::Dot => PresetValue::Wildcard,
            PresetId::Blank => PresetValue::List(&[
                PresetItem::Preset(PresetId::Space),
                PresetItem::Preset(PresetId::Tab),
            ]),
            PresetId::Hex => PresetValue::List(&[
                PresetItem::Preset(PresetId::Number),
                PresetItem::Range('a', 'F'),
            ]),
            PresetId::Alphanum => PresetValue::List(&[
                PresetItem::Preset(PresetId::Letter),
                PresetItem::Preset(PresetId::Number),
            ]),
        }
    }
}

/// Every accepted spelling, lowercase, with its plural.
/// Please keep entries grouped by canonical preset.
static NAMES: Map<&'static str, PresetId> = phf_map! {
    "word" => PresetId::Word,
    "words" => PresetId::Word,
    "word_character" => PresetId::Word,
    "word_characters" => PresetId::Word,
    "non_word" => PresetId::NonWord,
    "non_words" => PresetId::NonWord,
    "non_word_character" => PresetId::NonWord,
    "non_word_characters" => PresetId::NonWord,
    "number" => PresetId::Number,
    "numbers" => PresetId::Number,
    "digit" => PresetId::Number,
    "digits" => PresetId::Number,
    "non_numeric" => PresetId::NonNumeric,
    "non_numerics" => PresetId::NonNumeric,
    "non_digit" => PresetId::NonNumeric,
    "non_digits" => PresetId::NonNumeric,
    "letter" => PresetId::Letter,
    "letters" => PresetId::Letter,
    "char" => PresetId::Letter,
    "chars" => PresetId::Letter,
    "character" => PresetId::Letter,
    "characters" => PresetId::Letter,
    "upper" => PresetId::Upper,
    "uppers" => PresetId::Upper,
    "uppercase_letter" => PresetId::Upper,
    "uppercase_letters" => PresetId::Upper,
    "lower" => PresetId::Lower,
    "lowers" => PresetId::Lower,
    "lowercase_letter" => PresetId::Lower,
    "lowercase_letters" => PresetId::Lower,
    "whitespace" => PresetId::Whitespace,
    "whitespaces" => PresetId::Whitespace,
    "non_whitespace" => PresetId::NonWhitespace,
    "non_whitespaces" => PresetId::NonWhitespace,
    "space" => PresetId::Space,
    "spaces" => PresetId::Space,
    "tab" => PresetId::Tab,
    "tabs" => PresetId::Tab,
    "dot" => PresetId::Dot,
    "dots" => PresetId::Dot,
    "any" => PresetId::Dot,
    "anys" => PresetId::Dot,
    "blank" => PresetId::Blank,
    "blanks" => PresetId::Blank,
    "hex" => PresetId::Hex,
    "hexs" => PresetId::Hex,
    "alphanum" => PresetId::Alphanum,
    "alphanums" => PresetId::Alphanum,
    "alphanumeric" => PresetId::Alphanum,
    "alphanumerics" => PresetId::Alphanum,
};

/// Handle to a preset table, borrowed by the normalizer.
#[derive(Debug, Clone, Copy)]
pub struct PresetCatalog {
    names: &'static Map<&'static str, PresetId>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    pub fn builtin() -> Self {
        Self { names: &NAMES }
    }

    /// A catalog over a caller-supplied table. Keys must be lowercase and
    /// spell out every alias and plural that should resolve.
    pub fn new(names: &'static Map<&'static str, PresetId>) -> Self {
        Self { names }
    }

    /// Resolve a token to its canonical preset, ignoring ASCII case.
    pub fn canonical_name(&self, token: &str) -> Option<PresetId> {
        self.names.get(token.to_ascii_lowercase().as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plural_and_alias() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.canonical_name("digits"), Some(PresetId::Number));
        assert_eq!(catalog.canonical_name("numbers"), Some(PresetId::Number));
        assert_eq!(catalog.canonical_name("characters"), Some(PresetId::Letter));
        assert_eq!(catalog.canonical_name("any"), Some(PresetId::Dot));
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.canonical_name("Word"), Some(PresetId::Word));
        assert_eq!(catalog.canonical_name("HEX"), Some(PresetId::Hex));
    }

    #[test]
    fn unknown_names_are_unresolved() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.canonical_name("wordz"), None);
        assert_eq!(catalog.canonical_name(""), None);
    }

    static SHORT_NAMES: Map<&'static str, PresetId> = phf_map! {
        "num" => PresetId::Number,
        "ws" => PresetId::Whitespace,
    };

    #[test]
    fn custom_table_replaces_builtin_names() {
        let catalog = PresetCatalog::new(&SHORT_NAMES);
        assert_eq!(catalog.canonical_name("NUM"), Some(PresetId::Number));
        assert_eq!(catalog.canonical_name("ws"), Some(PresetId::Whitespace));
        assert_eq!(catalog.canonical_name("digit"), None);
    }

    #[test]
    fn compound_presets_reference_other_presets() {
        match PresetId::Alphanum.value() {
            PresetValue::List(items) => {
                assert!(items.contains(&PresetItem::Preset(PresetId::Letter)));
                assert!(items.contains(&PresetItem::Preset(PresetId::Number)));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
