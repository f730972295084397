//! The assignability relation.
//!
//! The relation is conservative: it answers `false` only when the two
//! types are definitely incompatible. Anything the checker does not model
//! is `any` and relates in both directions.

use tsz_common::limits::{STACK_GROWTH, STACK_RED_ZONE};

use crate::types::{EnumKind, ObjectShape, Type};

/// Whether a value of type `source` may be assigned to a location of type
/// `target`. With `strict` off, `null` and `undefined` are in every type.
pub fn is_assignable(source: &Type, target: &Type, strict: bool) -> bool {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
        is_assignable_worker(source, target, strict)
    })
}

fn is_assignable_worker(source: &Type, target: &Type, strict: bool) -> bool {
    use Type::*;
    match (source, target) {
        (_, Any | Unknown) | (Any | Never, _) => true,
        (Null | Undefined, _) if !strict => true,
        (Union(members), _) => members.iter().all(|m| is_assignable(m, target, strict)),
        (_, Union(members)) => members.iter().any(|m| is_assignable(source, m, strict)),
        (Undefined, Void | Undefined) | (Null, Null) | (Void, Void) => true,
        (Unknown | Null | Undefined | Void, _) | (_, Never) => false,

        // Primitives.
        (Number | NumberLiteral(_), Number) => true,
        (NumberLiteral(a), NumberLiteral(b)) => a == b,
        (String | StringLiteral(_), String) => true,
        (StringLiteral(a), StringLiteral(b)) => a == b,
        (Boolean | BooleanLiteral(_), Boolean) => true,
        (BooleanLiteral(a), BooleanLiteral(b)) => a == b,
        (BigInt, BigInt) | (Symbol, Symbol) => true,

        // Enums.
        (Enum(a), Enum(b)) => a.name == b.name,
        (Enum(e), Number | NumberLiteral(_)) => e.kind != EnumKind::String,
        (Enum(e), String | StringLiteral(_)) => e.kind != EnumKind::Numeric,
        (Number | NumberLiteral(_), Enum(e)) => e.kind != EnumKind::String,
        (String | StringLiteral(_), Enum(e)) => e.kind == EnumKind::Mixed,

        // `object`.
        (_, NonPrimitive) => !is_primitive(source),
        (NonPrimitive, Object(shape)) => !has_required_properties(shape),

        // Arrays and tuples.
        (Array(s), Array(t)) => is_assignable(s, t, strict),
        (Tuple(s), Array(t)) => s.iter().all(|e| is_assignable(e, t, strict)),
        (Tuple(s), Tuple(t)) => {
            s.len() == t.len() && s.iter().zip(t).all(|(a, b)| is_assignable(a, b, strict))
        }

        // Callable types are not compared structurally.
        (Function(_), Function(_)) => true,

        (Object(s), Object(t)) => is_shape_assignable(s, t, strict),
        // Primitives, arrays and functions have apparent members the shape
        // may describe.
        (_, Object(_)) => true,

        _ => false,
    }
}

fn is_primitive(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Number
            | Type::String
            | Type::Boolean
            | Type::BigInt
            | Type::Symbol
            | Type::NumberLiteral(_)
            | Type::StringLiteral(_)
            | Type::BooleanLiteral(_)
            | Type::Enum(_)
            | Type::Null
            | Type::Undefined
            | Type::Void
    )
}

fn has_required_properties(shape: &ObjectShape) -> bool {
    shape.properties.iter().any(|p| !p.optional)
}

fn is_shape_assignable(source: &ObjectShape, target: &ObjectShape, strict: bool) -> bool {
    target.properties.iter().all(|expected| {
        match source.property(&expected.name) {
            Some(actual) => {
                if actual.optional && !expected.optional {
                    return false;
                }
                let target_ty = if expected.optional && strict {
                    Type::union(vec![expected.ty.clone(), Type::Undefined])
                } else {
                    expected.ty.clone()
                };
                is_assignable(&actual.ty, &target_ty, strict)
            }
            None => expected.optional,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnumInfo, PropertyInfo};
    use std::rc::Rc;

    fn lit(n: &str) -> Type {
        Type::NumberLiteral(n.to_string())
    }

    fn shape(props: &[(&str, Type, bool)]) -> Type {
        Type::object(
            props
                .iter()
                .map(|(name, ty, optional)| PropertyInfo {
                    name: name.to_string(),
                    ty: ty.clone(),
                    optional: *optional,
                })
                .collect(),
        )
    }

    #[test]
    fn test_primitives() {
        assert!(is_assignable(&lit("1"), &Type::Number, true));
        assert!(!is_assignable(&Type::String, &Type::Number, true));
        assert!(!is_assignable(&Type::Number, &lit("1"), true));
        assert!(is_assignable(&lit("1"), &lit("1"), true));
        assert!(!is_assignable(&Type::Boolean, &Type::String, false));
    }

    #[test]
    fn test_null_depends_on_strictness() {
        assert!(is_assignable(&Type::Null, &Type::Number, false));
        assert!(!is_assignable(&Type::Null, &Type::Number, true));
        assert!(is_assignable(&Type::Undefined, &Type::Void, true));
        let optional = Type::union(vec![Type::Number, Type::Undefined]);
        assert!(is_assignable(&Type::Undefined, &optional, true));
    }

    #[test]
    fn test_unions() {
        let target = Type::union(vec![Type::Number, Type::String]);
        assert!(is_assignable(&Type::String, &target, true));
        assert!(!is_assignable(&Type::Boolean, &target, true));
        assert!(!is_assignable(&target, &Type::Number, true));
    }

    #[test]
    fn test_arrays_and_tuples() {
        let numbers = Type::Array(Box::new(Type::Number));
        let pair = Type::Tuple(vec![Type::Number, Type::Number]);
        assert!(is_assignable(&pair, &numbers, true));
        assert!(!is_assignable(&numbers, &pair, true));
        assert!(!is_assignable(
            &Type::Tuple(vec![Type::Number]),
            &pair,
            true
        ));
        assert!(!is_assignable(&Type::Array(Box::new(Type::String)), &numbers, true));
    }

    #[test]
    fn test_shapes() {
        let target = shape(&[("a", Type::Number, false), ("b", Type::String, true)]);
        assert!(is_assignable(&shape(&[("a", Type::Number, false)]), &target, true));
        assert!(!is_assignable(&shape(&[("b", Type::String, false)]), &target, true));
        assert!(!is_assignable(&shape(&[("a", Type::String, false)]), &target, true));
        assert!(!is_assignable(&target, &Type::Number, true));
        assert!(is_assignable(&Type::String, &target, true));
    }

    #[test]
    fn test_enums() {
        let numeric = Type::Enum(Rc::new(EnumInfo {
            name: "E".to_string(),
            kind: EnumKind::Numeric,
        }));
        let string = Type::Enum(Rc::new(EnumInfo {
            name: "S".to_string(),
            kind: EnumKind::String,
        }));
        assert!(is_assignable(&numeric, &Type::Number, true));
        assert!(is_assignable(&lit("3"), &numeric, true));
        assert!(is_assignable(&string, &Type::String, true));
        assert!(!is_assignable(&Type::String, &string, true));
        assert!(!is_assignable(&numeric, &string, true));
    }
}
