//! Name mangling: deterministic encoding of a function's argument-type
//! signature into its emitted symbol name, so overloads with the same
//! source name can coexist in one module.

use crate::types::Type;

/// Separates the base name from its type signature, and the required
/// signature from the optional-argument suffix: `NAME$$REQUIRED$opt$OPTIONAL`.
const NAME_SEP: &str = "$$";
const OPTIONAL_SEP: &str = "$opt$";

/// Joins each type's signature fragment with no separator between them —
/// fragments are self-delimiting (`i32`, `ptr_f64`, …) so concatenation
/// alone stays unambiguous in practice for this type set.
fn type_signature(types: &[Type]) -> String {
    types.iter().map(Type::signature_fragment).collect::<Vec<_>>().join("_")
}

/// Mangles a non-extern, non-`main`, non-anonymous function's name.
/// `optional` is the tail of parameters that carry defaults; functions with
/// none produce `NAME$$REQUIRED` with no optional suffix.
pub fn mangle(name: &str, required: &[Type], optional: &[Type]) -> String {
    let required_sig = type_signature(required);
    if optional.is_empty() {
        format!("{name}{NAME_SEP}{required_sig}")
    } else {
        let optional_sig = type_signature(optional);
        format!("{name}{NAME_SEP}{required_sig}{OPTIONAL_SEP}{optional_sig}")
    }
}

/// A module-level function whose call sites resolve by argument-type
/// signature: its full parameter list, split at the first parameter that
/// carries a default.
#[derive(Debug, Clone)]
pub struct OverloadSignature {
    pub mangled_name: String,
    pub required: Vec<Type>,
    pub optional: Vec<Type>,
}

/// Resolves a call's argument types against the registered overloads of
/// `name`. Tries the exact signature first; if that fails and some
/// registered overload declares optional (defaulted) parameters, tries
/// shorter prefixes of `arg_types` against that overload's `required`
/// types, filling the rest from its defaults.
pub fn resolve_call<'a>(
    name: &str,
    arg_types: &[Type],
    candidates: &'a [OverloadSignature],
) -> Option<&'a OverloadSignature> {
    let _ = name; // candidates are already pre-filtered to this call's base name
    let exact = type_signature(arg_types);
    let full_match = candidates
        .iter()
        .find(|c| type_signature(&[c.required.clone(), c.optional.clone()].concat()) == exact);
    if full_match.is_some() {
        return full_match;
    }

    candidates.iter().find(|c| {
        arg_types.len() >= c.required.len()
            && arg_types.len() <= c.required.len() + c.optional.len()
            && type_signature(&arg_types[..c.required.len()]) == type_signature(&c.required)
    })
}
