//! Naming rules for everything the generator declares or references by name.

/// C++ keywords and alternative tokens; none of them may name a device or port.
const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Namespaces the generated body refers to; a local with one of these names would shadow it.
pub const NAMESPACES: &[&str] = &["std", "cakeboard"];

/// Returns true if `s` can be emitted verbatim as a C++ identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !KEYWORDS.contains(&s)
}

/// `Vtop`, `TOP_NAME` or a `::`-qualified name such as `sim::Vtop`.
pub fn is_type_name(s: &str) -> bool {
    s.strip_prefix("::").unwrap_or(s).split("::").all(is_identifier)
}

/// Header names go between quotes on an `#include` line.
pub fn is_header_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(['"', '\n', '\r'])
}
