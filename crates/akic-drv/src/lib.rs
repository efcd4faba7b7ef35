//! Compiler driver: the pure front-to-back pipeline wiring.
//!
//! `compile` is the only entry point this crate exposes. It owns no
//! files, no CLI flags, and no cache — it lexes, parses, and lowers one
//! source buffer into an LLIR module and hands the result back to
//! whatever collaborator (a REPL, a CLI, a test) called it. No I/O
//! happens here; a caller that wants verbose phase tracing or file
//! handling builds it on top of this function, not inside it.

use akic_gen::{CodeGen, CodegenError};
use akic_lex::{Lexer, Token};
use akic_sem::TypeRegistry;
use akic_util::SyntaxError;
use inkwell::context::Context;
use thiserror::Error;

/// Lex/parse failure. Terminal for the whole input, per the lexer and
/// parser's own contract: there is no recovery, so the first error found
/// is the only one reported.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Everything `compile` produces for a source buffer that made it past
/// lexing and parsing. `codegen` owns the LLIR module; `errors` are the
/// per-top-level codegen failures that left the module intact for the
/// items that succeeded (§4.7's "terminal for the current top-level, not
/// the module" rule) — an empty `errors` does not by itself mean every
/// top-level item emitted cleanly if `codegen.warnings` is non-empty.
pub struct CompileOutput<'ctx> {
    pub codegen: CodeGen<'ctx>,
    pub errors: Vec<CodegenError>,
}

impl<'ctx> CompileOutput<'ctx> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lexes, parses, and lowers `source` into an LLIR module named
/// `module_name`, targeting `target_triple`. `context` is supplied by the
/// caller because `inkwell::Module`/`CodeGen` borrow it for their whole
/// lifetime — this mirrors the type registry being a shared, per-triple
/// singleton the caller is expected to own across independent `compile`
/// calls (§5).
pub fn compile<'ctx>(
    context: &'ctx Context,
    source: &str,
    module_name: &str,
    target_triple: &str,
) -> CompileResult<CompileOutput<'ctx>> {
    let tokens: Vec<Token> = Lexer::new(source).tokens().collect::<Result<Vec<_>, _>>()?;
    let ast = akic_par::parse(tokens)?;

    let registry = TypeRegistry::for_triple(target_triple);
    let mut codegen = CodeGen::new(context, module_name, target_triple, registry);
    let errors = codegen.eval(&ast);

    Ok(CompileOutput { codegen, errors })
}
