//! Matching flags carried alongside a compiled pattern.

use std::fmt;

/// One matching flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagBit {
    /// `^` and `$` match at line boundaries.
    MultiLine,
    CaseInsensitive,
    /// Unescaped whitespace in the pattern is ignored.
    ExtendedWhitespace,
}

impl FlagBit {
    pub const ALL: [FlagBit; 3] = [
        FlagBit::MultiLine,
        FlagBit::CaseInsensitive,
        FlagBit::ExtendedWhitespace,
    ];

    fn mask(self) -> u8 {
        1u8 << (self as u8)
    }

    /// The conventional single-letter spelling (`m`, `i`, `x`).
    pub fn letter(self) -> char {
        match self {
            FlagBit::MultiLine => 'm',
            FlagBit::CaseInsensitive => 'i',
            FlagBit::ExtendedWhitespace => 'x',
        }
    }
}

/// A set of [`FlagBit`]s. Adding a present flag or removing an absent one
/// is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(u8);

impl FlagSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn with(mut self, flag: FlagBit) -> Self {
        self.insert(flag);
        self
    }

    pub fn insert(&mut self, flag: FlagBit) {
        self.0 |= flag.mask();
    }

    pub fn remove(&mut self, flag: FlagBit) {
        self.0 &= !flag.mask();
    }

    pub fn contains(&self, flag: FlagBit) -> bool {
        (self.0 & flag.mask()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = FlagBit> + '_ {
        FlagBit::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<FlagBit> for FlagSet {
    fn from_iter<I: IntoIterator<Item = FlagBit>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

/// Renders as the flag letters in `mix` order, e.g. `"mi"`.
impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in self.iter() {
            write!(f, "{}", flag.letter())?;
        }
        Ok(())
    }
}
