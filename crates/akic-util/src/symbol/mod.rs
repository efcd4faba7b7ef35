//! Identifier interning.
//!
//! A [`Symbol`] is a compact, `Copy` handle to an interned identifier string.
//! Every AST `Name`, every symbol-table key, and every mangled-name
//! component is a `Symbol` rather than an owned `String`, so comparing two
//! identifiers for equality is an integer comparison.
//!
//! The compiler is single-threaded within one `compile()` call, so the
//! interner is an ordinary (non-atomic) table owned by whichever driver
//! state lives for the call — there is no global/static interner to keep
//! concurrent `compile()` invocations from colliding.

use rustc_hash::FxHashMap;

/// A handle to an interned identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

/// Owns the interned strings for one compilation.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the same `Symbol` for equal strings.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(sym) = self.lookup.get(s) {
            return *sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }
}
