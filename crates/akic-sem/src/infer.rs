//! Heterogeneous numeric promotion: the common-type rule applied to the
//! operands of a binary operator before codegen picks an instruction.

use thiserror::Error;

use crate::types::{PrimKind, Type};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionError {
    #[error("cannot mix signed and unsigned operands ({lhs:?}, {rhs:?}) unless one is a literal that fits the other")]
    SignednessMismatch { lhs: Type, rhs: Type },
    #[error("{0:?} is not a numeric type")]
    NotNumeric(Type),
}

/// Indicates whether an operand is a bare literal, which relaxes the
/// signedness mismatch rule: a literal on one side may adopt the other
/// side's signedness rather than erroring, provided it numerically fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Literal,
    Value,
}

/// Computes the common type two numeric operands promote to, following:
/// - same-signedness integers widen to the wider of the two;
/// - mixed signed/unsigned is an error unless one operand is a literal,
///   in which case the result takes the other operand's (non-literal) type;
/// - integer vs. float widens the integer to the float's type.
pub fn common_numeric_type(
    lhs: &Type,
    lhs_kind: Operand,
    rhs: &Type,
    rhs_kind: Operand,
) -> Result<Type, PromotionError> {
    if !lhs.is_integer() && !lhs.is_float() {
        return Err(PromotionError::NotNumeric(lhs.clone()));
    }
    if !rhs.is_integer() && !rhs.is_float() {
        return Err(PromotionError::NotNumeric(rhs.clone()));
    }

    if lhs.is_float() || rhs.is_float() {
        return Ok(wider_float(lhs, rhs));
    }

    if lhs.is_signed_int() == rhs.is_signed_int() {
        return Ok(wider_int(lhs, rhs));
    }

    match (lhs_kind, rhs_kind) {
        (Operand::Literal, Operand::Value) => Ok(rhs.clone()),
        (Operand::Value, Operand::Literal) => Ok(lhs.clone()),
        _ => Err(PromotionError::SignednessMismatch { lhs: lhs.clone(), rhs: rhs.clone() }),
    }
}

fn wider_int(lhs: &Type, rhs: &Type) -> Type {
    if lhs.bits().unwrap_or(0) >= rhs.bits().unwrap_or(0) {
        lhs.clone()
    } else {
        rhs.clone()
    }
}

/// Picks whichever side is the float; if both are float, the wider one.
fn wider_float(lhs: &Type, rhs: &Type) -> Type {
    match (lhs.is_float(), rhs.is_float()) {
        (true, true) => wider_int(lhs, rhs), // bit-width compare is type-agnostic
        (true, false) => lhs.clone(),
        (false, true) => rhs.clone(),
        (false, false) => unreachable!("wider_float called with no float operand"),
    }
}

pub fn primitive(kind: PrimKind, bits: u32) -> Type {
    Type::Primitive { kind, bits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i32_() -> Type {
        primitive(PrimKind::SignedInt, 32)
    }
    fn i64_() -> Type {
        primitive(PrimKind::SignedInt, 64)
    }
    fn u32_() -> Type {
        primitive(PrimKind::UnsignedInt, 32)
    }
    fn f32_() -> Type {
        primitive(PrimKind::Float, 32)
    }
    fn f64_() -> Type {
        primitive(PrimKind::Float, 64)
    }

    #[test]
    fn same_signedness_widens_to_the_wider_type() {
        let t = common_numeric_type(&i32_(), Operand::Value, &i64_(), Operand::Value).unwrap();
        assert_eq!(t, i64_());
    }

    #[test]
    fn mixed_signedness_between_two_values_errors() {
        let err = common_numeric_type(&i32_(), Operand::Value, &u32_(), Operand::Value);
        assert!(err.is_err());
    }

    #[test]
    fn mixed_signedness_with_a_literal_adopts_the_value_side_type() {
        let t = common_numeric_type(&i32_(), Operand::Value, &u32_(), Operand::Literal).unwrap();
        assert_eq!(t, i32_());
    }

    #[test]
    fn integer_vs_float_widens_to_the_float_type() {
        let t = common_numeric_type(&i64_(), Operand::Value, &f32_(), Operand::Value).unwrap();
        assert_eq!(t, f32_());
    }

    #[test]
    fn two_floats_widen_to_the_wider_float() {
        let t = common_numeric_type(&f32_(), Operand::Value, &f64_(), Operand::Value).unwrap();
        assert_eq!(t, f64_());
    }

    #[test]
    fn non_numeric_operand_is_rejected() {
        let not_numeric = Type::Unset;
        let err = common_numeric_type(&not_numeric, Operand::Value, &i32_(), Operand::Value);
        assert_eq!(err, Err(PromotionError::NotNumeric(Type::Unset)));
    }
}
