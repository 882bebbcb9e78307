//! Literal spelling for parameter defaults and constants.

use stubgen_core::{Literal, TypeRef};

use super::naming::{keyword_of, type_name};

/// Spell `value` as a literal assignable to `ty`.
pub fn literal(value: &Literal, ty: &TypeRef) -> String {
    match value {
        Literal::Default => format!("default({})", type_name(ty)),
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(v) => integer(i128::from(*v), ty),
        Literal::UInt(v) => integer(i128::from(*v), ty),
        Literal::Float(v) => float(*v, keyword_of(ty)),
        Literal::String(s) => quoted(s, '"'),
        Literal::Char(c) => quoted(&c.to_string(), '\''),
    }
}

/// Integers bound to a non-keyword type are enum values and need a cast;
/// zero converts implicitly.
fn integer(v: i128, ty: &TypeRef) -> String {
    if v == 0 || !needs_cast(ty) {
        return v.to_string();
    }
    if v < 0 {
        format!("({})({v})", type_name(ty))
    } else {
        format!("({}){v}", type_name(ty))
    }
}

fn needs_cast(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Named { .. }) && keyword_of(ty).is_none()
}

fn float(v: f64, keyword: Option<&str>) -> String {
    let (prefix, suffix) = match keyword {
        Some("float") => ("float", "f"),
        Some("decimal") => ("double", "m"),
        _ => ("double", ""),
    };
    if v.is_nan() {
        return format!("{prefix}.NaN");
    }
    if v.is_infinite() {
        let which = if v > 0.0 {
            "PositiveInfinity"
        } else {
            "NegativeInfinity"
        };
        return format!("{prefix}.{which}");
    }
    format!("{v:?}{suffix}")
}

fn quoted(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
