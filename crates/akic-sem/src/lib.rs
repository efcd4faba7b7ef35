//! Semantic-analysis support shared by the code generator: the canonical
//! type registry, per-function/module symbol tables, name mangling, and
//! numeric-promotion rules.
//!
//! This crate holds no LLIR-emitting logic itself — `akic-gen` drives these
//! pieces while walking the AST and talking to `inkwell` directly.

pub mod infer;
pub mod mangle;
pub mod scope;
pub mod types;

pub use infer::{common_numeric_type, Operand, PromotionError};
pub use mangle::{mangle, resolve_call, OverloadSignature};
pub use scope::{FuncScope, ModuleScope, NoShadowError};
pub use types::{PrimKind, Type, TypeRegistry};

#[cfg(test)]
mod edge_cases;
