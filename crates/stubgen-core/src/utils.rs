use std::borrow::Cow;
use std::cmp::Ordering;

/// Reserved C# keywords, sorted for binary search.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Whether `s` is a reserved C# keyword.
///
/// # Examples
/// ```
/// use stubgen_core::utils::is_keyword;
/// assert!(is_keyword("object"));
/// assert!(!is_keyword("Object"));
/// ```
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.binary_search(&s).is_ok()
}

/// Prefix reserved keywords with `@` so they stay valid identifiers.
///
/// # Examples
/// ```
/// use stubgen_core::utils::escape_identifier;
/// assert_eq!(escape_identifier("event"), "@event");
/// assert_eq!(escape_identifier("value"), "value");
/// ```
pub fn escape_identifier(s: &str) -> Cow<'_, str> {
    if is_keyword(s) {
        Cow::Owned(format!("@{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Case-insensitive name order with an ordinal tie-break.
///
/// Gives a total order, so sorting with it never depends on input order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.chars().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}
