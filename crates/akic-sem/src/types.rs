//! Canonical type registry: primitives, pointer/array/function/object
//! constructors, and platform word width.

use std::collections::HashMap;

use akic_par::ast::VarType;
use inkwell::targets::{CodeModel, RelocMode, Target, TargetMachine, TargetTriple};
use inkwell::OptimizationLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimKind {
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
}

/// A canonical type. `Eq`/`Hash` so `pointer(t)` can cache on the pointee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive { kind: PrimKind, bits: u32 },
    Pointer { pointee: Box<Type>, addrspace: u32 },
    /// `length == 0` means the size is fixed from the initializer at the
    /// declaration site rather than declared up front.
    Array { element: Box<Type>, length: u64 },
    Function { params: Vec<Type>, ret: Box<Type>, varargs: bool },
    /// Always manipulated via pointer; `fields[0]` is implicitly the
    /// canonical object header, which callers reading `fields` must account
    /// for themselves — the registry does not splice it in automatically.
    Object { name: String, fields: Vec<Type> },
    /// Placeholder used when the parser supplied no type; resolved during
    /// codegen once the initializer (or declared annotation) is known.
    Unset,
}

/// The fixed prefix every `Object` carries ahead of its own fields:
/// `{size: uword, data_ptr: *ubyte, refcount: uword, data_is_dyn: bool,
/// obj_is_dyn: bool}`, packed. Required for ABI compatibility with `str`
/// and `array` payloads.
pub fn object_header_fields(word: &Type, byte_ptr: &Type) -> Vec<Type> {
    vec![
        word.clone(),
        byte_ptr.clone(),
        word.clone(),
        Type::Primitive { kind: PrimKind::Bool, bits: 1 },
        Type::Primitive { kind: PrimKind::Bool, bits: 1 },
    ]
}

impl Type {
    pub fn is_float(&self) -> bool {
        matches!(self, Type::Primitive { kind: PrimKind::Float, .. })
    }

    pub fn is_signed_int(&self) -> bool {
        matches!(self, Type::Primitive { kind: PrimKind::SignedInt, .. })
    }

    pub fn is_unsigned_int(&self) -> bool {
        matches!(self, Type::Primitive { kind: PrimKind::UnsignedInt, .. })
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    pub fn bits(&self) -> Option<u32> {
        match self {
            Type::Primitive { bits, .. } => Some(*bits),
            _ => None,
        }
    }

    /// A short type-signature fragment used by mangling, e.g. `i32`, `u64`,
    /// `ptr_f64`.
    pub fn signature_fragment(&self) -> String {
        match self {
            Type::Primitive { kind: PrimKind::Bool, .. } => "bool".to_string(),
            Type::Primitive { kind: PrimKind::SignedInt, bits } => format!("i{bits}"),
            Type::Primitive { kind: PrimKind::UnsignedInt, bits } => format!("u{bits}"),
            Type::Primitive { kind: PrimKind::Float, bits } => format!("f{bits}"),
            Type::Pointer { pointee, .. } => format!("ptr_{}", pointee.signature_fragment()),
            Type::Array { element, length } => format!("arr{length}_{}", element.signature_fragment()),
            Type::Function { .. } => "fn".to_string(),
            Type::Object { name, .. } => name.clone(),
            Type::Unset => "unset".to_string(),
        }
    }
}

/// Canonical set of primitive and derived types, plus the platform pointer
/// width read once from the backend's target machine. Cheap to build fresh
/// per `compile()` call; the pointer cache keeps `pointer(t)` returning the
/// same canonical type for the same `t` within one registry.
pub struct TypeRegistry {
    word_bits: u32,
    pointer_cache: HashMap<Type, Type>,
    classes: HashMap<String, Type>,
}

impl TypeRegistry {
    /// Builds a registry for the host target triple. `inkwell` must already
    /// have its native target initialized by the caller (the driver, once,
    /// at process start).
    pub fn for_triple(triple: &str) -> Self {
        let target_triple = TargetTriple::create(triple);
        let word_bits = Target::from_triple(&target_triple)
            .ok()
            .and_then(|target| {
                target.create_target_machine(
                    &target_triple,
                    "generic",
                    "",
                    OptimizationLevel::None,
                    RelocMode::Default,
                    CodeModel::Default,
                )
            })
            .map(|machine: TargetMachine| machine.get_target_data().get_pointer_byte_size(None) * 8)
            .unwrap_or(64);

        Self {
            word_bits,
            pointer_cache: HashMap::new(),
            classes: HashMap::new(),
        }
    }

    pub fn bool_(&self) -> Type {
        Type::Primitive { kind: PrimKind::Bool, bits: 1 }
    }
    pub fn i8(&self) -> Type {
        Type::Primitive { kind: PrimKind::SignedInt, bits: 8 }
    }
    pub fn i16(&self) -> Type {
        Type::Primitive { kind: PrimKind::SignedInt, bits: 16 }
    }
    pub fn i32(&self) -> Type {
        Type::Primitive { kind: PrimKind::SignedInt, bits: 32 }
    }
    pub fn i64(&self) -> Type {
        Type::Primitive { kind: PrimKind::SignedInt, bits: 64 }
    }
    pub fn u8(&self) -> Type {
        Type::Primitive { kind: PrimKind::UnsignedInt, bits: 8 }
    }
    pub fn u16(&self) -> Type {
        Type::Primitive { kind: PrimKind::UnsignedInt, bits: 16 }
    }
    pub fn u32(&self) -> Type {
        Type::Primitive { kind: PrimKind::UnsignedInt, bits: 32 }
    }
    pub fn u64(&self) -> Type {
        Type::Primitive { kind: PrimKind::UnsignedInt, bits: 64 }
    }
    pub fn f32(&self) -> Type {
        Type::Primitive { kind: PrimKind::Float, bits: 32 }
    }
    pub fn f64(&self) -> Type {
        Type::Primitive { kind: PrimKind::Float, bits: 64 }
    }
    pub fn byte(&self) -> Type {
        self.u8()
    }
    /// The platform word: used for pointer-sized integers (`object_header`'s
    /// `size`/`refcount` fields).
    pub fn u_size(&self) -> Type {
        Type::Primitive { kind: PrimKind::UnsignedInt, bits: self.word_bits }
    }
    /// Alias kept distinct from `u_size` in source vocabulary even though
    /// both presently resolve to the platform word width.
    pub fn u_mem(&self) -> Type {
        self.u_size()
    }

    pub fn word_bits(&self) -> u32 {
        self.word_bits
    }

    /// Canonical pointer to `t`: the same `t` always yields the same
    /// `Type::Pointer`.
    pub fn pointer(&mut self, t: Type) -> Type {
        if let Some(cached) = self.pointer_cache.get(&t) {
            return cached.clone();
        }
        let ptr = Type::Pointer { pointee: Box::new(t.clone()), addrspace: 0 };
        self.pointer_cache.insert(t, ptr.clone());
        ptr
    }

    pub fn array(&self, element: Type, length: u64) -> Type {
        Type::Array { element: Box::new(element), length }
    }

    pub fn function(&self, params: Vec<Type>, ret: Type, varargs: bool) -> Type {
        Type::Function { params, ret: Box::new(ret), varargs }
    }

    /// Registers (and returns) a named object type with `fields` appended
    /// after the implicit object header.
    pub fn class(&mut self, name: impl Into<String>, fields: Vec<Type>) -> Type {
        let name = name.into();
        let header = object_header_fields(&self.u_size(), &self.pointer(self.byte()));
        let mut all_fields = header;
        all_fields.extend(fields);
        let ty = Type::Object { name: name.clone(), fields: all_fields };
        self.classes.insert(name, ty.clone());
        ty
    }

    pub fn lookup_class(&self, name: &str) -> Option<&Type> {
        self.classes.get(name)
    }

    /// Resolves a source-level `VarType` AST node to a canonical `Type`.
    pub fn resolve_vartype(&mut self, vartype: &VarType) -> Option<Type> {
        match vartype {
            VarType::Name(None) => Some(Type::Unset),
            VarType::Name(Some(name)) => self.resolve_name(name),
            VarType::Ptr(inner) => {
                let inner_ty = self.resolve_vartype(inner)?;
                Some(self.pointer(inner_ty))
            }
            VarType::Func(params, ret) => {
                let params = params
                    .iter()
                    .map(|p| self.resolve_vartype(p))
                    .collect::<Option<Vec<_>>>()?;
                let ret = self.resolve_vartype(ret)?;
                Some(self.function(params, ret, false))
            }
            VarType::Array(element, length) => {
                let element_ty = self.resolve_vartype(element)?;
                Some(self.array(element_ty, *length))
            }
        }
    }

    fn resolve_name(&mut self, name: &str) -> Option<Type> {
        match name {
            "bool" => Some(self.bool_()),
            "i8" => Some(self.i8()),
            "i16" => Some(self.i16()),
            "i32" => Some(self.i32()),
            "i64" => Some(self.i64()),
            "u8" => Some(self.u8()),
            "u16" => Some(self.u16()),
            "u32" => Some(self.u32()),
            "u64" => Some(self.u64()),
            "f32" => Some(self.f32()),
            "f64" => Some(self.f64()),
            "byte" => Some(self.byte()),
            "u_size" => Some(self.u_size()),
            "u_mem" => Some(self.u_mem()),
            "string" => self.lookup_class("string").cloned().or_else(|| {
                let byte_ptr = self.pointer(self.byte());
                Some(self.class("string", vec![byte_ptr]))
            }),
            other => self.lookup_class(other).cloned(),
        }
    }
}
