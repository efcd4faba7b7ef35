//! Boundary tests spanning more than one module of this crate.

use akic_util::Interner;

use crate::{mangle, resolve_call, FuncScope, OverloadSignature, PrimKind, Type, TypeRegistry};

fn registry() -> TypeRegistry {
    TypeRegistry::for_triple("x86_64-unknown-linux-gnu")
}

#[test]
fn array_initializer_shorter_than_declared_length_is_a_registry_client_concern() {
    // The registry just records the declared length; codegen owns the
    // warn-and-zero-fill decision described for shorter initializers.
    let mut reg = registry();
    let arr = reg.array(reg.i32(), 5);
    match arr {
        Type::Array { length, .. } => assert_eq!(length, 5),
        other => panic!("expected Array, got {other:?}"),
    }
}

#[test]
fn zero_length_array_type_means_infer_from_initializer() {
    let reg = registry();
    let arr = reg.array(reg.i32(), 0);
    assert_eq!(arr, Type::Array { element: Box::new(reg.i32()), length: 0 });
}

#[test]
fn mangling_two_overloads_of_the_same_name_never_collide() {
    let one_arg = mangle("point", &[Type::Primitive { kind: PrimKind::SignedInt, bits: 32 }], &[]);
    let two_args = mangle(
        "point",
        &[
            Type::Primitive { kind: PrimKind::SignedInt, bits: 32 },
            Type::Primitive { kind: PrimKind::SignedInt, bits: 32 },
        ],
        &[],
    );
    assert_ne!(one_arg, two_args);
}

#[test]
fn resolve_call_prefers_an_exact_match_over_a_defaulted_prefix() {
    let i32_ = Type::Primitive { kind: PrimKind::SignedInt, bits: 32 };
    let candidates = vec![OverloadSignature {
        mangled_name: mangle("f", &[i32_.clone()], &[i32_.clone()]),
        required: vec![i32_.clone()],
        optional: vec![i32_.clone()],
    }];
    let found = resolve_call("f", &[i32_.clone(), i32_.clone()], &candidates).unwrap();
    assert_eq!(found.optional.len(), 1);
}

#[test]
fn func_scope_declarations_in_sibling_scopes_do_not_see_each_other() {
    let mut interner = Interner::new();
    let x = interner.intern("x");

    let mut scope: FuncScope<i32> = FuncScope::new();
    scope.enter_scope();
    scope.declare(x, 1).unwrap();
    scope.exit_scope();

    scope.enter_scope();
    // A fresh sibling scope should not see `x` from the scope that already
    // exited — only ancestors on the current path are visible.
    assert_eq!(scope.resolve(x), None);
}

#[test]
fn pointer_canonicalization_is_independent_of_construction_order() {
    let mut reg = registry();
    let via_i32_first = reg.pointer(reg.i32());
    let via_i64_first = reg.pointer(reg.i64());
    let via_i32_again = reg.pointer(reg.i32());
    assert_eq!(via_i32_first, via_i32_again);
    assert_ne!(via_i32_first, via_i64_first);
}
