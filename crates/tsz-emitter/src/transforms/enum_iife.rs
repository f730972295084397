//! Enum lowering.
//!
//! ```typescript
//! enum Color { Red, Green = "g", Blue = 4 }
//! ```
//!
//! Becomes:
//!
//! ```javascript
//! var Color;
//! (function (Color) {
//!     Color[Color["Red"] = 0] = "Red";
//!     Color["Green"] = "g";
//!     Color[Color["Blue"] = 4] = "Blue";
//! })(Color || (Color = {}));
//! ```
//!
//! Constant initializers are folded; anything else is emitted as written,
//! with references to sibling members qualified by the enum name.

use rustc_hash::FxHashMap;
use tsz_parser::{ModifierFlags, NodeData, NodeIndex};
use tsz_scanner::SyntaxKind;

use crate::emitter::Printer;
use crate::emitter::quote_string;

/// A folded enum member value.
#[derive(Clone, Debug, PartialEq)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

impl<'a> Printer<'a> {
    pub(crate) fn emit_enum_declaration(&mut self, modifiers: ModifierFlags, name: NodeIndex, members: &[NodeIndex]) {
        if modifiers.contains(ModifierFlags::DECLARE) {
            return;
        }
        let arena = self.arena;
        let enum_name = self.name_text(name);
        if enum_name.is_empty() {
            return;
        }

        self.write_iife_binding(enum_name, modifiers);
        self.open_iife(enum_name);

        let mut qualified = FxHashMap::default();
        for &member in members {
            if let Some(NodeData::EnumMember { name, .. }) = arena.data(member)
                && let Some(member_name) = arena.property_name_text(*name)
            {
                qualified.insert(member_name.to_string(), format!("{enum_name}.{member_name}"));
            }
        }
        self.substitutions.push(qualified);

        let mut values: FxHashMap<&str, EnumValue> = FxHashMap::default();
        let mut next_value = Some(0.0);
        for &member in members {
            let Some(NodeData::EnumMember { name, initializer }) = arena.data(member) else {
                continue;
            };
            let Some(member_name) = arena.property_name_text(*name) else {
                continue;
            };
            let key = quote_string(member_name);
            let value = if initializer.is_some() {
                evaluate_enum_initializer(self, *initializer, enum_name, &values)
            } else {
                next_value.map(EnumValue::Number)
            };

            match &value {
                Some(EnumValue::Number(number)) => {
                    self.write(&format!(
                        "{enum_name}[{enum_name}[{key}] = {}] = {key};",
                        format_number(*number)
                    ));
                    next_value = Some(number + 1.0);
                }
                Some(EnumValue::String(text)) => {
                    self.write(&format!("{enum_name}[{key}] = {};", quote_string(text)));
                    next_value = None;
                }
                None if initializer.is_some() => {
                    self.write(&format!("{enum_name}[{enum_name}[{key}] = "));
                    self.emit(*initializer);
                    self.write(&format!("] = {key};"));
                    next_value = None;
                }
                None => {
                    self.write(&format!("{enum_name}[{enum_name}[{key}] = void 0] = {key};"));
                }
            }
            self.write_line();
            if let Some(value) = value {
                values.insert(member_name, value);
            }
        }

        self.substitutions.pop();
        self.close_iife(enum_name, modifiers.contains(ModifierFlags::EXPORT));
    }
}

/// Fold a constant enum initializer: numbers, strings, unary and binary
/// arithmetic, parentheses, and references to earlier members (bare or
/// qualified by the enum's own name).
fn evaluate_enum_initializer(
    printer: &Printer<'_>,
    idx: NodeIndex,
    enum_name: &str,
    values: &FxHashMap<&str, EnumValue>,
) -> Option<EnumValue> {
    let arena = printer.arena;
    match arena.data(idx)? {
        NodeData::Literal { kind, text } => match kind {
            SyntaxKind::NumericLiteral => evaluate_numeric_literal(text).map(EnumValue::Number),
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                Some(EnumValue::String(text.clone()))
            }
            _ => None,
        },
        NodeData::ParenthesizedExpression { expression } => {
            evaluate_enum_initializer(printer, *expression, enum_name, values)
        }
        NodeData::Identifier { text } => values.get(text.as_str()).cloned(),
        NodeData::PropertyAccessExpression {
            expression, name, ..
        } => {
            if arena.identifier_text(*expression) != Some(enum_name) {
                return None;
            }
            values.get(arena.identifier_text(*name)?).cloned()
        }
        NodeData::PrefixUnaryExpression { operator, operand } => {
            let EnumValue::Number(value) = evaluate_enum_initializer(printer, *operand, enum_name, values)?
            else {
                return None;
            };
            let result = match operator {
                SyntaxKind::PlusToken => value,
                SyntaxKind::MinusToken => -value,
                SyntaxKind::TildeToken => f64::from(!to_int32(value)),
                _ => return None,
            };
            Some(EnumValue::Number(result))
        }
        NodeData::BinaryExpression {
            left,
            operator,
            right,
        } => {
            let left = evaluate_enum_initializer(printer, *left, enum_name, values)?;
            let right = evaluate_enum_initializer(printer, *right, enum_name, values)?;
            evaluate_binary(*operator, left, right)
        }
        _ => None,
    }
}

fn evaluate_binary(operator: SyntaxKind, left: EnumValue, right: EnumValue) -> Option<EnumValue> {
    use SyntaxKind::*;
    let (l, r) = match (left, right) {
        (EnumValue::Number(l), EnumValue::Number(r)) => (l, r),
        (left, right) if operator == PlusToken => {
            return Some(EnumValue::String(format!("{}{}", display(&left), display(&right))));
        }
        _ => return None,
    };
    let value = match operator {
        PlusToken => l + r,
        MinusToken => l - r,
        AsteriskToken => l * r,
        SlashToken => l / r,
        PercentToken => l % r,
        AsteriskAsteriskToken => l.powf(r),
        AmpersandToken => f64::from(to_int32(l) & to_int32(r)),
        BarToken => f64::from(to_int32(l) | to_int32(r)),
        CaretToken => f64::from(to_int32(l) ^ to_int32(r)),
        LessThanLessThanToken => f64::from(to_int32(l).wrapping_shl(to_uint32(r) & 31)),
        GreaterThanGreaterThanToken => f64::from(to_int32(l).wrapping_shr(to_uint32(r) & 31)),
        GreaterThanGreaterThanGreaterThanToken => f64::from(to_uint32(l) >> (to_uint32(r) & 31)),
        _ => return None,
    };
    Some(EnumValue::Number(value))
}

fn display(value: &EnumValue) -> String {
    match value {
        EnumValue::Number(number) => format_number(*number),
        EnumValue::String(text) => text.clone(),
    }
}

/// ECMAScript `ToUint32`.
fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// ECMAScript `ToInt32`.
fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

/// Value of a numeric literal's text (separators already removed):
/// decimal, hex, octal, binary and legacy octal.
pub fn evaluate_numeric_literal(text: &str) -> Option<f64> {
    let radix_digits = |prefixes: [&str; 2]| prefixes.iter().find_map(|prefix| text.strip_prefix(*prefix));
    if let Some(digits) = radix_digits(["0x", "0X"]) {
        return u64::from_str_radix(digits, 16).ok().map(|v| v as f64);
    }
    if let Some(digits) = radix_digits(["0o", "0O"]) {
        return u64::from_str_radix(digits, 8).ok().map(|v| v as f64);
    }
    if let Some(digits) = radix_digits(["0b", "0B"]) {
        return u64::from_str_radix(digits, 2).ok().map(|v| v as f64);
    }
    if text.len() > 1 && text.starts_with('0') && text.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return u64::from_str_radix(&text[1..], 8).ok().map(|v| v as f64);
    }
    text.parse::<f64>().ok()
}

/// JavaScript's number-to-string for the values enums produce.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literal_radixes() {
        assert_eq!(evaluate_numeric_literal("0x1F"), Some(31.0));
        assert_eq!(evaluate_numeric_literal("0b101"), Some(5.0));
        assert_eq!(evaluate_numeric_literal("0o17"), Some(15.0));
        assert_eq!(evaluate_numeric_literal("017"), Some(15.0));
        assert_eq!(evaluate_numeric_literal("1.5e3"), Some(1500.0));
        assert_eq!(evaluate_numeric_literal(".5"), Some(0.5));
    }

    #[test]
    fn test_format_number_matches_javascript() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_bitwise_folding_uses_int32() {
        let fold = |op, l, r| evaluate_binary(op, EnumValue::Number(l), EnumValue::Number(r));
        assert_eq!(fold(SyntaxKind::LessThanLessThanToken, 1.0, 31.0), Some(EnumValue::Number(-2147483648.0)));
        assert_eq!(fold(SyntaxKind::BarToken, 1.0, 2.0), Some(EnumValue::Number(3.0)));
        assert_eq!(
            fold(SyntaxKind::GreaterThanGreaterThanGreaterThanToken, -1.0, 28.0),
            Some(EnumValue::Number(15.0))
        );
    }
}
