//! Clause compilation: from raw values to pattern source text.
//!
//! Stages run in this order for every clause:
//! [`normalize`] (presets, stringification, range algebra),
//! [`render`] (class vs. alternation, quantifier, capture),
//! then [`grouper`] scopes `or` runs across the whole sequence and
//! [`splice`] embeds nested engines.
//!
//! # Output syntax
//!
//! | Construct         | Emitted as                                     |
//! |-------------------|------------------------------------------------|
//! | Single character  | bare, escaped: `q`, `\.`                       |
//! | Character set     | `[qa-f]`, class members escaped: `[\-\]a]`     |
//! | Several literals  | `(?:abc\|def)`                                  |
//! | Class + literals  | `(?:[xy]\|abc)`                                 |
//! | Quantifiers       | `*` `+` `?` `{n}` `{m,n}` `{m,}` `{,n}`        |
//! | Capture           | `(...)`                                        |
//! | Named capture     | `(?<name>...)`                                 |
//! | Group             | `(?:...)`                                      |
//! | Or run            | `(?:a\|b)c`, or `a\|b` when nothing else       |
//! | Anchors           | `^` `$` `\A` `\z`                              |
//! | Lookaround        | `(?=...)` `(?!...)` `(?<=...)` `(?<!...)`      |

pub mod ast;
pub mod char_class;
pub mod grouper;
pub mod normalize;
pub mod presets;
pub mod render;
pub mod splice;

pub use ast::{Atom, Clause, ClauseBody, ClauseOptions, Quantifier, RawValue, sym};
pub use normalize::{Normalized, Normalizer};
pub use presets::{PresetCatalog, PresetId};
