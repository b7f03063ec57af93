//! The clause store and its compiled pattern.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::flags::{FlagBit, FlagSet};
use crate::matcher::{self, RegexPattern};
use crate::pattern::ast::{Clause, ClauseBody, ClauseOptions, RawValue};
use crate::pattern::grouper::render_sequence;
use crate::pattern::normalize::Normalizer;
use crate::pattern::presets::PresetCatalog;

/// A builder procedure replayed by [`Engine::reset`].
pub type Procedure = Arc<dyn Fn(&mut Engine) + Send + Sync>;

/// Pattern source plus the flags it should be matched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub source: String,
    pub flags: FlagSet,
}

/// Renders as `/source/flags`.
impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// An ordered list of clauses and a flag set. Clauses are only ever
/// appended; the compiled pattern is derived from them on demand and
/// cached until the next mutation.
#[derive(Clone, Default)]
pub struct Engine {
    clauses: Vec<Clause>,
    flags: FlagSet,
    normalizer: Normalizer,
    procedure: Option<Procedure>,
    compiled: OnceCell<Compiled>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("clauses", &self.clauses)
            .field("flags", &self.flags)
            .field("procedure", &self.procedure.is_some())
            .finish()
    }
}

// Constructors
impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine resolving presets through `catalog`.
    pub fn with_catalog(catalog: PresetCatalog) -> Self {
        Self {
            normalizer: Normalizer::new(catalog),
            ..Self::default()
        }
    }

    /// An engine primed by `procedure`, which is replayed on every reset.
    pub fn with_procedure(procedure: impl Fn(&mut Engine) + Send + Sync + 'static) -> Self {
        let mut engine = Self {
            procedure: Some(Arc::new(procedure)),
            ..Self::default()
        };
        engine.reset();
        engine
    }
}

// Mutation
impl Engine {
    fn invalidate(&mut self) {
        self.compiled.take();
    }

    fn push(&mut self, body: ClauseBody, options: ClauseOptions) -> usize {
        let index = self.clauses.len();
        self.clauses.push(Clause {
            body,
            options,
            index,
        });
        self.invalidate();
        index
    }

    /// Normalize `value` into a new clause. Returns the clause index.
    pub fn append(&mut self, value: impl Into<RawValue>, options: ClauseOptions) -> usize {
        let normalized = self.normalizer.normalize(&[value.into()]);
        let long_strings = normalized
            .atoms
            .iter()
            .filter(|a| !a.is_class_eligible())
            .count()
            > 1;
        let options = ClauseOptions {
            unescape_dot: normalized.unescape_dot,
            long_strings_present: long_strings,
            is_or_marker: false,
            ..options
        };
        self.push(ClauseBody::Atoms(normalized.atoms), options)
    }

    /// Append a clause whose body is another engine.
    pub fn append_engine(&mut self, inner: Engine, options: ClauseOptions) -> usize {
        let options = ClauseOptions {
            is_or_marker: false,
            ..options
        };
        self.push(ClauseBody::Engine(Box::new(inner)), options)
    }

    /// Append an `or` boundary.
    pub fn append_or(&mut self) -> usize {
        let options = ClauseOptions {
            is_or_marker: true,
            ..ClauseOptions::new()
        };
        self.push(ClauseBody::Atoms(Vec::new()), options)
    }

    pub fn add_flag(&mut self, flag: FlagBit) {
        self.flags.insert(flag);
        self.invalidate();
    }

    pub fn remove_flag(&mut self, flag: FlagBit) {
        self.flags.remove(flag);
        self.invalidate();
    }

    /// Clear all clauses and flags, then replay the stored procedure.
    pub fn reset(&mut self) {
        self.clauses.clear();
        self.flags = FlagSet::new();
        self.invalidate();
        if let Some(procedure) = self.procedure.clone() {
            procedure(self);
        }
    }
}

// Queries
impl Engine {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The compiled pattern, computed once per mutation.
    pub fn compile(&self) -> &Compiled {
        self.compiled.get_or_init(|| {
            let source = self.render_with(self.flags);
            log::trace!("compiled /{}/{}", source, self.flags);
            Compiled {
                source,
                flags: self.flags,
            }
        })
    }

    pub fn source(&self) -> &str {
        &self.compile().source
    }

    /// Render the clauses as if `flags` were set, without caching. Nested
    /// engines are rendered this way with their parent's flags.
    pub fn render_with(&self, flags: FlagSet) -> String {
        render_sequence(&self.clauses, flags)
    }

    /// Hand the compiled pattern to the matching engine.
    pub fn to_pattern(&self) -> Result<RegexPattern> {
        let compiled = self.compile();
        matcher::compile(&compiled.source, compiled.flags)
    }
}
