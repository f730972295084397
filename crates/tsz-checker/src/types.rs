//! The checker's type representation.
//!
//! Types are structural values. Anything the checker does not model
//! (generics, classes, conditional and mapped types, library objects) is
//! `Any`, which is assignable in both directions and never produces a
//! diagnostic.

use std::fmt;
use std::rc::Rc;

use tsz_common::limits::MAX_UNION_MEMBERS;

#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Number,
    String,
    Boolean,
    BigInt,
    Symbol,
    /// The `object` keyword type.
    NonPrimitive,
    /// Numeric literal, stored in canonical display form (`1`, `0.5`, `255`).
    NumberLiteral(String),
    StringLiteral(String),
    BooleanLiteral(bool),
    Union(Vec<Type>),
    Array(Box<Type>),
    Tuple(Vec<Type>),
    Function(Rc<FunctionSig>),
    Object(Rc<ObjectShape>),
    Enum(Rc<EnumInfo>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamInfo {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSig {
    pub params: Vec<ParamInfo>,
    pub return_type: Type,
}

impl FunctionSig {
    /// Number of arguments a call must supply.
    pub fn min_arguments(&self) -> usize {
        self.params
            .iter()
            .take_while(|p| !p.optional && !p.rest)
            .count()
    }

    /// Upper bound on arguments, `None` with a rest parameter.
    pub fn max_arguments(&self) -> Option<usize> {
        if self.params.iter().any(|p| p.rest) {
            None
        } else {
            Some(self.params.len())
        }
    }

    pub fn has_rest(&self) -> bool {
        self.params.iter().any(|p| p.rest)
    }

    /// Declared type for the argument at `index`, `Any` when unconstrained.
    pub fn param_type_at(&self, index: usize) -> Type {
        match self.params.get(index) {
            Some(param) if param.rest => rest_element_type(&param.ty),
            Some(param) => param.ty.clone(),
            None => match self.params.last() {
                Some(param) if param.rest => rest_element_type(&param.ty),
                _ => Type::Any,
            },
        }
    }
}

fn rest_element_type(ty: &Type) -> Type {
    match ty {
        Type::Array(element) => (**element).clone(),
        _ => Type::Any,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
}

impl ObjectShape {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumKind {
    Numeric,
    String,
    /// Heterogeneous or computed members.
    Mixed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumInfo {
    pub name: String,
    pub kind: EnumKind,
}

// =============================================================================
// Construction helpers
// =============================================================================

impl Type {
    /// Union of `types`, flattened and deduplicated. `true | false` collapses
    /// to `boolean`, a single member collapses to itself, and anything past
    /// `MAX_UNION_MEMBERS` collapses to `any`.
    pub fn union(types: Vec<Type>) -> Type {
        let mut members: Vec<Type> = Vec::new();
        for ty in types {
            match ty {
                Type::Union(inner) => {
                    for member in inner {
                        push_unique(&mut members, member);
                    }
                }
                Type::Any => return Type::Any,
                Type::Never => {}
                other => push_unique(&mut members, other),
            }
        }
        if members.contains(&Type::BooleanLiteral(true))
            && members.contains(&Type::BooleanLiteral(false))
        {
            members.retain(|m| !matches!(m, Type::BooleanLiteral(_)));
            push_unique(&mut members, Type::Boolean);
        }
        if members.contains(&Type::Boolean) {
            members.retain(|m| !matches!(m, Type::BooleanLiteral(_)));
        }
        if members.contains(&Type::String) {
            members.retain(|m| !matches!(m, Type::StringLiteral(_)));
        }
        if members.contains(&Type::Number) {
            members.retain(|m| !matches!(m, Type::NumberLiteral(_)));
        }
        match members.len() {
            0 => Type::Never,
            1 => members.pop().unwrap_or(Type::Never),
            n if n > MAX_UNION_MEMBERS => Type::Any,
            _ => Type::Union(members),
        }
    }

    pub fn function(params: Vec<ParamInfo>, return_type: Type) -> Type {
        Type::Function(Rc::new(FunctionSig {
            params,
            return_type,
        }))
    }

    pub fn object(properties: Vec<PropertyInfo>) -> Type {
        Type::Object(Rc::new(ObjectShape { properties }))
    }

    /// Literal types widened to their primitive, the way a mutable location
    /// infers from its initializer.
    pub fn widen(&self) -> Type {
        match self {
            Type::NumberLiteral(_) => Type::Number,
            Type::StringLiteral(_) => Type::String,
            Type::BooleanLiteral(_) => Type::Boolean,
            Type::Union(members) => Type::union(members.iter().map(Type::widen).collect()),
            other => other.clone(),
        }
    }

    /// Drop `null` and `undefined` members.
    pub fn non_nullable(&self) -> Type {
        match self {
            Type::Null | Type::Undefined => Type::Never,
            Type::Union(members) => Type::union(
                members
                    .iter()
                    .filter(|m| !matches!(m, Type::Null | Type::Undefined))
                    .cloned()
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Type::NumberLiteral(_) | Type::StringLiteral(_) | Type::BooleanLiteral(_)
        )
    }

    /// Whether this type or any union member is a literal type.
    pub fn contains_literal(&self) -> bool {
        match self {
            Type::Union(members) => members.iter().any(Type::contains_literal),
            Type::Enum(_) => true,
            other => other.is_literal(),
        }
    }

    pub fn is_string_like(&self) -> bool {
        match self {
            Type::String | Type::StringLiteral(_) => true,
            Type::Enum(info) => info.kind == EnumKind::String,
            Type::Union(members) => members.iter().all(Type::is_string_like),
            _ => false,
        }
    }

    pub fn is_number_like(&self) -> bool {
        match self {
            Type::Number | Type::NumberLiteral(_) => true,
            Type::Enum(info) => info.kind == EnumKind::Numeric,
            Type::Union(members) => members.iter().all(Type::is_number_like),
            _ => false,
        }
    }

    pub fn is_bigint_like(&self) -> bool {
        match self {
            Type::BigInt => true,
            Type::Union(members) => members.iter().all(Type::is_bigint_like),
            _ => false,
        }
    }

    /// Element type when iterated by `for...of` or indexed by a number.
    pub fn element_type(&self) -> Type {
        match self {
            Type::Array(element) => (**element).clone(),
            Type::Tuple(elements) => Type::union(elements.clone()),
            Type::String | Type::StringLiteral(_) => Type::String,
            _ => Type::Any,
        }
    }
}

fn push_unique(members: &mut Vec<Type>, ty: Type) {
    if !members.contains(&ty) {
        members.push(ty);
    }
}

// =============================================================================
// Literal helpers
// =============================================================================

/// Canonical display text for a numeric literal token (`0xFF` -> `255`,
/// `1_000` -> `1000`, `1.50` -> `1.5`). `None` when the text is not a number.
pub fn normalize_numeric_literal(text: &str) -> Option<String> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let value = if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()? as f64
    } else if let Some(octal) = lower.strip_prefix("0o") {
        u64::from_str_radix(octal, 8).ok()? as f64
    } else if let Some(binary) = lower.strip_prefix("0b") {
        u64::from_str_radix(binary, 2).ok()? as f64
    } else {
        lower.parse::<f64>().ok()?
    };
    Some(format_number(value))
}

fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return "Infinity".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i128)
    } else {
        format!("{value}")
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("any"),
            Type::Unknown => f.write_str("unknown"),
            Type::Never => f.write_str("never"),
            Type::Void => f.write_str("void"),
            Type::Undefined => f.write_str("undefined"),
            Type::Null => f.write_str("null"),
            Type::Number => f.write_str("number"),
            Type::String => f.write_str("string"),
            Type::Boolean => f.write_str("boolean"),
            Type::BigInt => f.write_str("bigint"),
            Type::Symbol => f.write_str("symbol"),
            Type::NonPrimitive => f.write_str("object"),
            Type::NumberLiteral(text) => f.write_str(text),
            Type::StringLiteral(value) => write!(f, "\"{}\"", value.escape_default()),
            Type::BooleanLiteral(value) => write!(f, "{value}"),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    if matches!(member, Type::Function(_)) {
                        write!(f, "({member})")?;
                    } else {
                        write!(f, "{member}")?;
                    }
                }
                Ok(())
            }
            Type::Array(element) => match **element {
                Type::Union(_) | Type::Function(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Type::Tuple(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Type::Function(sig) => {
                f.write_str("(")?;
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if param.rest {
                        f.write_str("...")?;
                    }
                    f.write_str(&param.name)?;
                    if param.optional {
                        f.write_str("?")?;
                    }
                    write!(f, ": {}", param.ty)?;
                }
                write!(f, ") => {}", sig.return_type)
            }
            Type::Object(shape) => {
                if shape.properties.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for property in &shape.properties {
                    f.write_str(&property.name)?;
                    if property.optional {
                        f.write_str("?")?;
                    }
                    write!(f, ": {}; ", property.ty)?;
                }
                f.write_str("}")
            }
            Type::Enum(info) => f.write_str(&info.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_collapses_booleans_and_duplicates() {
        let ty = Type::union(vec![
            Type::BooleanLiteral(true),
            Type::Number,
            Type::BooleanLiteral(false),
            Type::Number,
        ]);
        assert_eq!(ty, Type::Union(vec![Type::Number, Type::Boolean]));
        assert_eq!(ty.to_string(), "number | boolean");
    }

    #[test]
    fn test_union_with_any_is_any() {
        assert_eq!(Type::union(vec![Type::String, Type::Any]), Type::Any);
    }

    #[test]
    fn test_numeric_literal_normalization() {
        assert_eq!(normalize_numeric_literal("0xFF").as_deref(), Some("255"));
        assert_eq!(normalize_numeric_literal("1_000").as_deref(), Some("1000"));
        assert_eq!(normalize_numeric_literal("1.50").as_deref(), Some("1.5"));
        assert_eq!(normalize_numeric_literal("1e3").as_deref(), Some("1000"));
        assert_eq!(normalize_numeric_literal("abc"), None);
    }

    #[test]
    fn test_display_of_composite_types() {
        let array = Type::Array(Box::new(Type::union(vec![Type::String, Type::Number])));
        assert_eq!(array.to_string(), "(string | number)[]");
        let function = Type::function(
            vec![ParamInfo {
                name: "a".to_string(),
                ty: Type::Number,
                optional: true,
                rest: false,
            }],
            Type::Void,
        );
        assert_eq!(function.to_string(), "(a?: number) => void");
        let object = Type::object(vec![PropertyInfo {
            name: "x".to_string(),
            ty: Type::StringLiteral("a".to_string()),
            optional: false,
        }]);
        assert_eq!(object.to_string(), "{ x: \"a\"; }");
    }

    #[test]
    fn test_signature_argument_bounds() {
        let param = |optional, rest| ParamInfo {
            name: "p".to_string(),
            ty: Type::Any,
            optional,
            rest,
        };
        let sig = FunctionSig {
            params: vec![param(false, false), param(true, false)],
            return_type: Type::Void,
        };
        assert_eq!(sig.min_arguments(), 1);
        assert_eq!(sig.max_arguments(), Some(2));
        let variadic = FunctionSig {
            params: vec![param(false, false), param(false, true)],
            return_type: Type::Void,
        };
        assert_eq!(variadic.max_arguments(), None);
        assert!(variadic.has_rest());
    }
}
