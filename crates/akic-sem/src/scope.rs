//! Symbol tables: a scoped stack of ribs for per-function locals
//! (`func_symtab`), and a flat module-wide table for globals and emitted
//! functions (`module_symtab`).
//!
//! `FuncScope` is generic over the slot payload so this crate doesn't need
//! to know about `inkwell` value types — `akic-gen` instantiates it with
//! its own slot struct carrying the actual `PointerValue`.

use std::collections::HashMap;

use akic_util::Symbol;

/// One nested scope: a function body, a block, a `with`-expression, or a
/// loop body. Bindings added here shadow (but do not clobber) the parent's.
struct Rib<T> {
    bindings: HashMap<Symbol, T>,
    parent: Option<usize>,
}

/// Per-function symbol table. Lets `with` and nested blocks push and pop
/// their own bindings without disturbing bindings from an outer scope —
/// unlike a single flat table reset per function, which cannot express
/// that nesting at all.
pub struct FuncScope<T> {
    ribs: Vec<Rib<T>>,
    current: usize,
}

impl<T> FuncScope<T> {
    pub fn new() -> Self {
        Self {
            ribs: vec![Rib { bindings: HashMap::new(), parent: None }],
            current: 0,
        }
    }

    pub fn enter_scope(&mut self) {
        self.ribs.push(Rib { bindings: HashMap::new(), parent: Some(self.current) });
        self.current = self.ribs.len() - 1;
    }

    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Declares `name` in the *current* rib. Returns `Err` (without
    /// mutating anything) if `name` is already bound in the current rib —
    /// the source language does not allow shadowing within one scope.
    pub fn declare(&mut self, name: Symbol, slot: T) -> Result<(), NoShadowError> {
        if self.ribs[self.current].bindings.contains_key(&name) {
            return Err(NoShadowError);
        }
        self.ribs[self.current].bindings.insert(name, slot);
        Ok(())
    }

    /// Looks up `name`, walking outward through enclosing scopes.
    pub fn resolve(&self, name: Symbol) -> Option<&T> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(slot) = rib.bindings.get(&name) {
                return Some(slot);
            }
            match rib.parent {
                Some(parent) => rib_id = parent,
                None => return None,
            }
        }
    }

    /// Bindings declared directly in the current rib, in insertion order is
    /// not preserved (a `HashMap`) — callers that need dispose-in-reverse
    /// order must track declaration order themselves alongside `declare`.
    pub fn current_bindings(&self) -> impl Iterator<Item = (&Symbol, &T)> {
        self.ribs[self.current].bindings.iter()
    }
}

impl<T> Default for FuncScope<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoShadowError;

impl std::fmt::Display for NoShadowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a binding with this name already exists in the current scope")
    }
}

impl std::error::Error for NoShadowError {}

/// Module-wide table: global constants/uniforms and all emitted functions,
/// keyed by mangled name. Flat — there is exactly one module scope, so no
/// rib stack is needed.
pub struct ModuleScope<T> {
    entries: HashMap<String, T>,
}

impl<T> ModuleScope<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, mangled_name: impl Into<String>, entry: T) {
        self.entries.insert(mangled_name.into(), entry);
    }

    pub fn get(&self, mangled_name: &str) -> Option<&T> {
        self.entries.get(mangled_name)
    }

    pub fn contains(&self, mangled_name: &str) -> bool {
        self.entries.contains_key(mangled_name)
    }
}

impl<T> Default for ModuleScope<T> {
    fn default() -> Self {
        Self::new()
    }
}
