//! Maps canonical [`akic_sem::Type`]s onto `inkwell` LLVM types.

use inkwell::context::Context;
use inkwell::types::{BasicType, BasicTypeEnum};
use inkwell::AddressSpace;

use akic_sem::{PrimKind, Type};

use crate::error::{CodegenError, Result};

pub struct TypeMapper<'ctx> {
    context: &'ctx Context,
}

impl<'ctx> TypeMapper<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self { context }
    }

    pub fn map(&self, ty: &Type) -> Result<BasicTypeEnum<'ctx>> {
        match ty {
            Type::Primitive { kind: PrimKind::Bool, .. } => Ok(self.context.bool_type().into()),
            Type::Primitive { kind: PrimKind::SignedInt | PrimKind::UnsignedInt, bits } => {
                Ok(self.int_type(*bits).into())
            }
            Type::Primitive { kind: PrimKind::Float, bits: 32 } => Ok(self.context.f32_type().into()),
            Type::Primitive { kind: PrimKind::Float, bits: 64 } => Ok(self.context.f64_type().into()),
            Type::Primitive { kind: PrimKind::Float, bits } => {
                Err(CodegenError::TypeMappingError(format!("unsupported float width {bits}")))
            }
            Type::Pointer { .. } => Ok(self.context.ptr_type(AddressSpace::default()).into()),
            Type::Array { element, length } => {
                let elem_ty = self.map(element)?;
                Ok(elem_ty.array_type(*length as u32).into())
            }
            Type::Object { fields, .. } => {
                let field_tys = fields
                    .iter()
                    .map(|f| self.map(f))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.context.struct_type(&field_tys, true).into())
            }
            Type::Function { .. } => {
                // Functions are never held as a first-class basic value in this
                // language; callers go through `map_function` below.
                Err(CodegenError::TypeMappingError("function type has no basic-value representation".into()))
            }
            Type::Unset => Err(CodegenError::TypeMappingError("type was never resolved".into())),
        }
    }

    fn int_type(&self, bits: u32) -> inkwell::types::IntType<'ctx> {
        match bits {
            1 => self.context.bool_type(),
            8 => self.context.i8_type(),
            16 => self.context.i16_type(),
            32 => self.context.i32_type(),
            64 => self.context.i64_type(),
            other => self.context.custom_width_int_type(other),
        }
    }

    /// Builds an LLVM function type from a registry `Type::Function`.
    pub fn map_function(&self, ty: &Type) -> Result<inkwell::types::FunctionType<'ctx>> {
        match ty {
            Type::Function { params, ret, varargs } => {
                let param_tys = params
                    .iter()
                    .map(|p| self.map(p).map(Into::into))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.map(ret)?.fn_type(&param_tys, *varargs))
            }
            other => Err(CodegenError::TypeMappingError(format!("{other:?} is not a function type"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akic_sem::TypeRegistry;

    fn mapper(context: &Context) -> TypeMapper<'_> {
        TypeMapper::new(context)
    }

    #[test]
    fn primitive_ints_map_to_matching_bit_width() {
        let context = Context::create();
        let m = mapper(&context);
        let reg = TypeRegistry::for_triple("x86_64-unknown-linux-gnu");
        let mapped = m.map(&reg.i32()).unwrap();
        assert_eq!(mapped.into_int_type().get_bit_width(), 32);
    }

    #[test]
    fn pointer_maps_to_opaque_ptr() {
        let context = Context::create();
        let m = mapper(&context);
        let mut reg = TypeRegistry::for_triple("x86_64-unknown-linux-gnu");
        let ptr_ty = reg.pointer(reg.i32());
        assert!(m.map(&ptr_ty).is_ok());
    }

    #[test]
    fn array_type_carries_declared_length() {
        let context = Context::create();
        let m = mapper(&context);
        let reg = TypeRegistry::for_triple("x86_64-unknown-linux-gnu");
        let arr_ty = reg.array(reg.i32(), 4);
        let mapped = m.map(&arr_ty).unwrap();
        assert_eq!(mapped.into_array_type().len(), 4);
    }

    #[test]
    fn object_type_maps_to_packed_struct() {
        let context = Context::create();
        let m = mapper(&context);
        let mut reg = TypeRegistry::for_triple("x86_64-unknown-linux-gnu");
        let obj_ty = reg.class("point", vec![reg.f64(), reg.f64()]);
        let mapped = m.map(&obj_ty).unwrap();
        assert!(mapped.into_struct_type().is_packed());
    }
}
