use crate::index_vec::Idx;

/// Identifier for a module-level definition (a function keyed into
/// `module_symtab`). The compiler is single-threaded within one `compile()`
/// call, so generation is a plain counter, not an atomic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId(pub u32);

impl Idx for DefId {
    fn from_usize(idx: usize) -> Self {
        DefId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Default)]
pub struct DefIdGenerator {
    next: u32,
}

impl DefIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> DefId {
        let id = DefId(self.next);
        self.next += 1;
        id
    }
}
