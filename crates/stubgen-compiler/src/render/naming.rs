//! Source-level spelling of type references, identifiers and operators.

use std::borrow::Cow;

use stubgen_core::TypeRef;
use stubgen_core::utils::escape_identifier;

/// Framework types spelled with a language keyword.
const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("System.Boolean", "bool"),
    ("System.Byte", "byte"),
    ("System.Char", "char"),
    ("System.Decimal", "decimal"),
    ("System.Double", "double"),
    ("System.Int16", "short"),
    ("System.Int32", "int"),
    ("System.Int64", "long"),
    ("System.Object", "object"),
    ("System.SByte", "sbyte"),
    ("System.Single", "float"),
    ("System.String", "string"),
    ("System.UInt16", "ushort"),
    ("System.UInt32", "uint"),
    ("System.UInt64", "ulong"),
    ("System.Void", "void"),
];

const INTEGRAL_KEYWORDS: &[&str] = &[
    "byte", "sbyte", "short", "ushort", "int", "uint", "long", "ulong",
];

pub fn keyword_alias(name: &str) -> Option<&'static str> {
    KEYWORD_ALIASES
        .binary_search_by(|(full, _)| full.cmp(&name))
        .ok()
        .map(|i| KEYWORD_ALIASES[i].1)
}

/// Keyword for a non-generic named reference, looking through `Nullable<T>`.
pub fn keyword_of(ty: &TypeRef) -> Option<&'static str> {
    match ty {
        TypeRef::Named { name, args } if args.is_empty() => keyword_alias(name),
        TypeRef::Named { name, args } if is_nullable(name, args) => keyword_of(&args[0]),
        _ => None,
    }
}

pub fn is_integral(ty: &TypeRef) -> bool {
    keyword_of(ty).is_some_and(|k| INTEGRAL_KEYWORDS.contains(&k))
}

fn is_nullable(name: &str, args: &[TypeRef]) -> bool {
    name == "System.Nullable" && args.len() == 1
}

/// Source spelling of a type reference.
pub fn type_name(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_type(&mut out, ty);
    out
}

fn write_type(out: &mut String, ty: &TypeRef) {
    match ty {
        TypeRef::Named { name, args } => {
            if args.is_empty()
                && let Some(keyword) = keyword_alias(name)
            {
                out.push_str(keyword);
                return;
            }
            if is_nullable(name, args) {
                write_type(out, &args[0]);
                out.push('?');
                return;
            }
            out.push_str(&clean_name(name));
            if !args.is_empty() {
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, arg);
                }
                out.push('>');
            }
        }
        TypeRef::GenericParam(name) => out.push_str(&escape_identifier(name)),
        TypeRef::Array { element, rank } => {
            write_type(out, element);
            out.push('[');
            for _ in 1..*rank {
                out.push(',');
            }
            out.push(']');
        }
        TypeRef::Tuple(elements) => {
            out.push('(');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, &element.ty);
                if let Some(name) = &element.name {
                    out.push(' ');
                    out.push_str(&escape_identifier(name));
                }
            }
            out.push(')');
        }
        TypeRef::Pointer(inner) => {
            write_type(out, inner);
            out.push('*');
        }
        // The reader rejects these; spelled as opaque handles if they slip through.
        TypeRef::FunctionPointer => out.push_str("System.IntPtr"),
        TypeRef::Unknown => out.push_str("object"),
    }
}

/// Strip metadata decorations from a dotted name.
///
/// Drops generic arity suffixes (`List`1`), turns nested-type separators
/// (`Outer+Inner`) into dots, and escapes keyword segments.
pub fn clean_name(name: &str) -> String {
    name.split(['.', '+'])
        .map(|segment| {
            let bare = match segment.find('`') {
                Some(i) => &segment[..i],
                None => segment,
            };
            escape_identifier(bare)
        })
        .collect::<Vec<_>>()
        .join(".")
}

pub fn identifier(name: &str) -> Cow<'_, str> {
    escape_identifier(name)
}

/// How an `op_*` method name is spelled in a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorSpelling {
    /// `operator +`
    Token(&'static str),
    /// `implicit operator T` / `explicit operator T`
    Conversion(&'static str),
}

pub fn operator_spelling(name: &str) -> Option<OperatorSpelling> {
    use OperatorSpelling::{Conversion, Token};

    let spelling = match name {
        "op_Implicit" => Conversion("implicit"),
        "op_Explicit" => Conversion("explicit"),
        "op_Addition" => Token("+"),
        "op_Subtraction" => Token("-"),
        "op_Multiply" => Token("*"),
        "op_Division" => Token("/"),
        "op_Modulus" => Token("%"),
        "op_BitwiseAnd" => Token("&"),
        "op_BitwiseOr" => Token("|"),
        "op_ExclusiveOr" => Token("^"),
        "op_LeftShift" => Token("<<"),
        "op_RightShift" => Token(">>"),
        "op_UnsignedRightShift" => Token(">>>"),
        "op_Equality" => Token("=="),
        "op_Inequality" => Token("!="),
        "op_LessThan" => Token("<"),
        "op_GreaterThan" => Token(">"),
        "op_LessThanOrEqual" => Token("<="),
        "op_GreaterThanOrEqual" => Token(">="),
        "op_UnaryNegation" => Token("-"),
        "op_UnaryPlus" => Token("+"),
        "op_LogicalNot" => Token("!"),
        "op_OnesComplement" => Token("~"),
        "op_Increment" => Token("++"),
        "op_Decrement" => Token("--"),
        "op_True" => Token("true"),
        "op_False" => Token("false"),
        _ => return None,
    };
    Some(spelling)
}
